//! Per-pixel color kernels.
//!
//! A kernel is a pure function of `(x, y, width, height)`. The render engine calls it from many
//! worker threads at once without any coordination, so implementations must not mutate shared
//! state; anything precomputed belongs to the kernel value itself.

pub(crate) mod beam;
pub(crate) mod gradient;

use crate::foundation::color::Color;
use crate::foundation::error::{TileshadeError, TileshadeResult};

pub use beam::BeamKernel;
pub use gradient::GradientKernel;

/// Pure per-pixel color function.
pub trait Kernel: Sync {
    /// Color of pixel `(x, y)` in a `width x height` image.
    ///
    /// Must be deterministic for fixed inputs.
    fn evaluate(&self, x: u32, y: u32, width: u32, height: u32) -> TileshadeResult<Color>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "kernel"
    }
}

impl<F> Kernel for F
where
    F: Fn(u32, u32, u32, u32) -> TileshadeResult<Color> + Sync,
{
    fn evaluate(&self, x: u32, y: u32, width: u32, height: u32) -> TileshadeResult<Color> {
        self(x, y, width, height)
    }

    fn name(&self) -> &str {
        "fn"
    }
}

/// Constant color everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidKernel(pub Color);

impl Kernel for SolidKernel {
    fn evaluate(&self, _x: u32, _y: u32, _width: u32, _height: u32) -> TileshadeResult<Color> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "solid"
    }
}

/// Serializable kernel selection, as found in a render config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KernelConfig {
    /// [`BeamKernel`].
    Beam(BeamKernel),
    /// [`SolidKernel`].
    Solid {
        /// Fill color.
        color: Color,
    },
    /// [`GradientKernel`].
    Gradient(GradientKernel),
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::Beam(BeamKernel::default())
    }
}

impl KernelConfig {
    /// Reject parameter combinations that can only produce non-finite colors.
    pub fn validate(&self) -> TileshadeResult<()> {
        match self {
            Self::Beam(k) => {
                let params = [k.sharpness, k.wave_amplitude, k.wave_frequency, k.falloff];
                if params.iter().chain(k.tint.iter()).any(|v| !v.is_finite()) {
                    return Err(TileshadeError::validation(
                        "beam kernel parameters must be finite",
                    ));
                }
                Ok(())
            }
            Self::Solid { color } => {
                if color.to_array().iter().any(|v| !v.is_finite()) {
                    return Err(TileshadeError::validation(
                        "solid kernel color must be finite",
                    ));
                }
                Ok(())
            }
            Self::Gradient(k) => {
                let endpoints = k.from.to_array().into_iter().chain(k.to.to_array());
                if endpoints
                    .chain([k.direction.x, k.direction.y])
                    .any(|v| !v.is_finite())
                {
                    return Err(TileshadeError::validation(
                        "gradient kernel parameters must be finite",
                    ));
                }
                if k.direction.magnitude_squared() == 0.0 {
                    return Err(TileshadeError::validation(
                        "gradient kernel direction must be non-zero",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Validate and instantiate the selected kernel.
    pub fn build(&self) -> TileshadeResult<Box<dyn Kernel>> {
        self.validate()?;
        Ok(match self {
            Self::Beam(k) => Box::new(*k),
            Self::Solid { color } => Box::new(SolidKernel(*color)),
            Self::Gradient(k) => Box::new(*k),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/kernel.rs"]
mod tests;
