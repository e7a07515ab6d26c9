use crate::foundation::math::clamp;

/// Straight (non-premultiplied) RGBA color with `f32` channels.
///
/// Channels are nominally in `[0, 1]` but nothing enforces that until [`Color::clamp`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Number of channels a color carries.
    pub const CHANNELS: usize = 4;

    /// Transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from all four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color (`a = 1`).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Every channel, alpha included, set to `t`.
    pub const fn splat(t: f32) -> Self {
        Self::new(t, t, t, t)
    }

    /// Overwrite all four channels.
    pub fn set(&mut self, r: f32, g: f32, b: f32, a: f32) {
        *self = Self::new(r, g, b, a);
    }

    /// Overwrite every channel with `t`.
    pub fn set_all(&mut self, t: f32) {
        *self = Self::splat(t);
    }

    /// Channels in `[r, g, b, a]` order.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Force every channel independently into `[min, max]`.
    pub fn clamp(&mut self, min: f32, max: f32) {
        self.r = clamp(self.r, min, max);
        self.g = clamp(self.g, min, max);
        self.b = clamp(self.b, min, max);
        self.a = clamp(self.a, min, max);
    }

    /// By-value form of [`Color::clamp`].
    pub fn clamped(mut self, min: f32, max: f32) -> Self {
        self.clamp(min, max);
        self
    }

    /// Per-channel `a*(1-t) + b*t`; extrapolates for `t` outside `[0, 1]`.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let one_minus_t = 1.0 - t;
        Self {
            r: one_minus_t * a.r + t * b.r,
            g: one_minus_t * a.g + t * b.g,
            b: one_minus_t * a.b + t * b.b,
            a: one_minus_t * a.a + t * b.a,
        }
    }
}

impl From<[f32; 4]> for Color {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
