use crate::foundation::error::{TileshadeError, TileshadeResult};

/// Row-major, plane-interleaved `f32` pixel buffer.
///
/// Channel `c` of pixel `(x, y)` lives at `y*width*channels + x*channels + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<f32>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer.
    ///
    /// Fails with [`TileshadeError::Allocation`] when the slot count overflows `usize` or the
    /// memory cannot be reserved.
    pub fn allocate(width: u32, height: u32, channels: usize) -> TileshadeResult<Self> {
        if channels == 0 {
            return Err(TileshadeError::validation(
                "pixel buffer needs at least one channel",
            ));
        }

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(channels))
            .ok_or_else(|| {
                TileshadeError::allocation(format!(
                    "{width}x{height}x{channels} exceeds addressable size"
                ))
            })?;

        let mut data = Vec::<f32>::new();
        data.try_reserve_exact(len).map_err(|e| {
            TileshadeError::allocation(format!("{width}x{height}x{channels} pixel buffer: {e}"))
        })?;
        data.resize(len, 0.0);

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of `f32` slots (`width * height * channels`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` when the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Slots per image row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels
    }

    /// Flat index of channel `c` of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// On out-of-range coordinates or channel.
    pub fn offset(&self, x: u32, y: u32, c: usize) -> usize {
        assert!(
            x < self.width && y < self.height && c < self.channels,
            "pixel ({x}, {y}) channel {c} out of bounds for {}x{}x{}",
            self.width,
            self.height,
            self.channels
        );
        y as usize * self.row_stride() + x as usize * self.channels + c
    }

    /// Read one channel.
    pub fn read(&self, x: u32, y: u32, c: usize) -> f32 {
        self.data[self.offset(x, y, c)]
    }

    /// Write one channel.
    pub fn write(&mut self, x: u32, y: u32, c: usize, value: f32) {
        let i = self.offset(x, y, c);
        self.data[i] = value;
    }

    /// All channels of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> &[f32] {
        let start = self.offset(x, y, 0);
        &self.data[start..start + self.channels]
    }

    /// Borrow the flat slot array.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Give up the buffer and keep the flat slot array.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/buffer.rs"]
mod tests;
