use super::*;

#[test]
fn allocation_is_zero_filled_and_sized() {
    let buf = PixelBuffer::allocate(3, 2, 4).unwrap();
    assert_eq!(buf.len(), 24);
    assert_eq!(buf.row_stride(), 12);
    assert!(buf.as_slice().iter().all(|&v| v == 0.0));
}

#[test]
fn zero_dimensions_give_an_empty_buffer() {
    let buf = PixelBuffer::allocate(0, 5, 4).unwrap();
    assert!(buf.is_empty());
    assert_eq!(buf.height(), 5);
}

#[test]
fn zero_channels_is_rejected() {
    let err = PixelBuffer::allocate(1, 1, 0).unwrap_err();
    assert!(matches!(err, TileshadeError::Validation(_)));
}

#[test]
fn overflowing_size_is_an_allocation_error() {
    let err = PixelBuffer::allocate(u32::MAX, u32::MAX, usize::MAX).unwrap_err();
    assert!(matches!(err, TileshadeError::Allocation(_)));
}

#[test]
fn addressing_is_plane_interleaved_row_major() {
    let mut buf = PixelBuffer::allocate(3, 2, 4).unwrap();
    assert_eq!(buf.offset(0, 0, 0), 0);
    assert_eq!(buf.offset(1, 0, 2), 6);
    assert_eq!(buf.offset(2, 1, 3), 23);

    buf.write(2, 1, 1, 0.75);
    assert_eq!(buf.read(2, 1, 1), 0.75);
    assert_eq!(buf.as_slice()[21], 0.75);
    assert_eq!(buf.pixel(2, 1), &[0.0, 0.75, 0.0, 0.0]);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn out_of_range_read_fails_fast() {
    let buf = PixelBuffer::allocate(2, 2, 1).unwrap();
    let _ = buf.read(2, 0, 0);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn out_of_range_channel_fails_fast() {
    let mut buf = PixelBuffer::allocate(2, 2, 3).unwrap();
    buf.write(0, 0, 3, 1.0);
}
