use std::ops::{Add, Div, Mul, Neg, Sub};

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics when `min > max` and lets NaN through unchanged.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp `value` into `[0, 1]`.
pub fn clamp01(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// Two-component `f32` vector.
///
/// Normalizing (or projecting onto) a zero vector produces non-finite components; callers guard.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a vector from its components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean length.
    pub fn magnitude_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length.
    pub fn magnitude(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// `1 / magnitude`.
    pub fn inverse_magnitude(self) -> f32 {
        1.0 / self.magnitude()
    }

    /// `1 / magnitude_squared`.
    pub fn inverse_magnitude_squared(self) -> f32 {
        1.0 / self.magnitude_squared()
    }

    /// Scale to unit length in place.
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Unit-length copy of this vector.
    pub fn normalized(self) -> Self {
        self * self.inverse_magnitude()
    }

    /// Dot product.
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Projection of `a` onto `onto`.
    pub fn project(a: Self, onto: Self) -> Self {
        onto * (a.dot(onto) * onto.inverse_magnitude_squared())
    }

    /// `a*(1-t) + b*t`; `t` is not restricted to `[0, 1]`.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let one_minus_t = 1.0 - t;
        Self {
            x: one_minus_t * a.x + t * b.x,
            y: one_minus_t * a.y + t * b.y,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<f32> for Vec2 {
    type Output = Self;

    fn add(self, rhs: f32) -> Self {
        Self::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<f32> for Vec2 {
    type Output = Self;

    fn sub(self, rhs: f32) -> Self {
        Self::new(self.x - rhs, self.y - rhs)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
