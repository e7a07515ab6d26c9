use super::*;

#[test]
fn constructors_fill_expected_channels() {
    assert_eq!(Color::rgb(0.1, 0.2, 0.3).to_array(), [0.1, 0.2, 0.3, 1.0]);
    assert_eq!(Color::splat(0.5).to_array(), [0.5; 4]);
    assert_eq!(Color::default(), Color::TRANSPARENT);
    assert_eq!(Color::from([1.0, 0.0, 0.0, 1.0]), Color::rgb(1.0, 0.0, 0.0));
}

#[test]
fn set_overwrites_in_place() {
    let mut c = Color::BLACK;
    c.set(0.1, 0.2, 0.3, 0.4);
    assert_eq!(c, Color::new(0.1, 0.2, 0.3, 0.4));
    c.set_all(0.7);
    assert_eq!(c, Color::splat(0.7));
}

#[test]
fn clamp_is_per_channel() {
    let mut c = Color::new(-1.0, 0.5, 2.0, 8.0);
    c.clamp(0.0, 1.0);
    assert_eq!(c, Color::new(0.0, 0.5, 1.0, 1.0));

    let narrow = Color::new(0.1, 0.5, 0.9, 0.3).clamped(0.25, 0.75);
    assert_eq!(narrow, Color::new(0.25, 0.5, 0.75, 0.3));
}

#[test]
fn lerp_blends_and_extrapolates() {
    let a = Color::new(0.0, 0.0, 0.0, 1.0);
    let b = Color::new(1.0, 0.5, 0.25, 1.0);
    assert_eq!(Color::lerp(a, b, 0.0), a);
    assert_eq!(Color::lerp(a, b, 1.0), b);
    assert_eq!(Color::lerp(a, b, 0.5), Color::new(0.5, 0.25, 0.125, 1.0));
    assert_eq!(Color::lerp(a, b, 2.0).r, 2.0);
}
