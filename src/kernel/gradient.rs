use crate::foundation::color::Color;
use crate::foundation::error::{TileshadeError, TileshadeResult};
use crate::foundation::math::{Vec2, clamp01};
use crate::kernel::Kernel;

/// Linear ramp from `from` to `to` across the image along `direction`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GradientKernel {
    /// Color at the start of the ramp.
    pub from: Color,
    /// Color at the end of the ramp.
    pub to: Color,
    /// Ramp direction in image space (y down); must be non-zero.
    pub direction: Vec2,
}

impl Default for GradientKernel {
    fn default() -> Self {
        Self {
            from: Color::BLACK,
            to: Color::WHITE,
            direction: Vec2::new(1.0, 0.0),
        }
    }
}

impl Kernel for GradientKernel {
    fn evaluate(&self, x: u32, y: u32, width: u32, height: u32) -> TileshadeResult<Color> {
        if self.direction.magnitude_squared() == 0.0 {
            return Err(TileshadeError::evaluation(
                "gradient direction must be non-zero",
            ));
        }
        let dir = self.direction.normalized();

        // Pixel centre relative to the image centre, in unit-square coordinates.
        let p = Vec2::new(
            (x as f32 + 0.5) / width as f32,
            (y as f32 + 0.5) / height as f32,
        ) - 0.5;

        // Half of the unit square's extent along `dir`, so the ramp spans corner to corner.
        let half_extent = 0.5 * (dir.x.abs() + dir.y.abs());
        let t = clamp01(p.dot(dir) / (2.0 * half_extent) + 0.5);
        Ok(Color::lerp(self.from, self.to, t))
    }

    fn name(&self) -> &str {
        "gradient"
    }
}
