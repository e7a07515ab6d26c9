use crate::foundation::color::Color;
use crate::foundation::error::TileshadeResult;
use crate::foundation::math::{Vec2, clamp01};
use crate::kernel::Kernel;

/// A glowing vertical beam bent by a sine wave.
///
/// Pixel coordinates are mapped to `[-1, 1]^2`, the x axis is stretched by the aspect ratio, and
/// the intensity is `|1 / (u * sharpness + sin(v * wave_frequency) * wave_amplitude)| ^ falloff`,
/// clamped to `[0, 1]` and scaled per channel by `tint`. Alpha is always 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BeamKernel {
    /// Horizontal scale of the distance term; larger is a thinner beam.
    pub sharpness: f32,
    /// Horizontal displacement of the wave.
    pub wave_amplitude: f32,
    /// Vertical frequency of the wave.
    pub wave_frequency: f32,
    /// Intensity exponent.
    pub falloff: f32,
    /// RGB multipliers applied to the intensity.
    pub tint: [f32; 3],
}

impl Default for BeamKernel {
    fn default() -> Self {
        Self {
            sharpness: 300.0,
            wave_amplitude: 50.0,
            wave_frequency: 5.0,
            falloff: 0.75,
            tint: [2.0, 4.0, 8.0],
        }
    }
}

impl BeamKernel {
    fn intensity(&self, uv: Vec2) -> f32 {
        let d = uv.x * self.sharpness + (uv.y * self.wave_frequency).sin() * self.wave_amplitude;
        clamp01((1.0 / d).abs().powf(self.falloff))
    }
}

impl Kernel for BeamKernel {
    fn evaluate(&self, x: u32, y: u32, width: u32, height: u32) -> TileshadeResult<Color> {
        let aspect = width as f32 / height as f32;
        let mut uv = Vec2::new(x as f32 / width as f32, y as f32 / height as f32) * 2.0 - 1.0;
        uv.x *= aspect;

        let t = self.intensity(uv);
        let [r, g, b] = self.tint;
        Ok(Color::new(t * r, t * g, t * b, 1.0).clamped(0.0, 1.0))
    }

    fn name(&self) -> &str {
        "beam"
    }
}
