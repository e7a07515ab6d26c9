//! Collaborator-side copy-out of rendered buffers.
//!
//! The engine hands back one plane-interleaved buffer. Hosts usually want planar storage, one
//! plane at a time, and image files want 8-bit samples; both conversions live here, outside the
//! render core.

use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{TileshadeError, TileshadeResult},
    foundation::math::clamp01,
    render::buffer::PixelBuffer,
};

/// Destination for de-interleaved planes.
pub trait PlaneSink {
    /// Storage for plane `plane`, exactly `len` samples long.
    fn plane_mut(&mut self, plane: usize, len: usize) -> TileshadeResult<&mut [f32]>;
}

/// Copy `buffer` into `sink` one plane at a time.
///
/// Plane `p` receives every `channels`-th sample starting at offset `p`.
pub fn copy_to_planes(buffer: &PixelBuffer, sink: &mut dyn PlaneSink) -> TileshadeResult<()> {
    let channels = buffer.channels();
    let plane_len = buffer.len() / channels;
    for plane in 0..channels {
        let dst = sink.plane_mut(plane, plane_len)?;
        if dst.len() != plane_len {
            return Err(TileshadeError::validation(format!(
                "plane {plane} holds {} samples, expected {plane_len}",
                dst.len()
            )));
        }
        for (d, s) in dst
            .iter_mut()
            .zip(buffer.as_slice().iter().skip(plane).step_by(channels))
        {
            *d = *s;
        }
    }
    Ok(())
}

/// In-memory planar image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanarImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// One row-major plane per channel.
    pub planes: Vec<Vec<f32>>,
}

impl PlanarImage {
    /// De-interleave a whole buffer.
    pub fn from_buffer(buffer: &PixelBuffer) -> TileshadeResult<Self> {
        let mut out = Self {
            width: buffer.width(),
            height: buffer.height(),
            planes: Vec::new(),
        };
        copy_to_planes(buffer, &mut out)?;
        Ok(out)
    }
}

impl PlaneSink for PlanarImage {
    fn plane_mut(&mut self, plane: usize, len: usize) -> TileshadeResult<&mut [f32]> {
        if self.planes.len() <= plane {
            self.planes.resize_with(plane + 1, Vec::new);
        }
        let p = &mut self.planes[plane];
        p.clear();
        p.resize(len, 0.0);
        Ok(p.as_mut_slice())
    }
}

fn quantize(v: f32) -> u8 {
    (clamp01(v) * 255.0).round() as u8
}

/// Interleaved 8-bit samples, same channel layout as `buffer`.
pub fn to_8bit(buffer: &PixelBuffer) -> Vec<u8> {
    buffer.as_slice().iter().copied().map(quantize).collect()
}

fn color_type(channels: usize) -> TileshadeResult<image::ColorType> {
    Ok(match channels {
        1 => image::ColorType::L8,
        2 => image::ColorType::La8,
        3 => image::ColorType::Rgb8,
        4 => image::ColorType::Rgba8,
        n => {
            return Err(TileshadeError::validation(format!(
                "cannot encode {n}-channel buffers as PNG"
            )));
        }
    })
}

/// Quantize `buffer` and write it as a PNG.
pub fn save_png(buffer: &PixelBuffer, path: impl AsRef<Path>) -> TileshadeResult<()> {
    let path = path.as_ref();
    if buffer.is_empty() {
        return Err(TileshadeError::validation("cannot encode an empty image"));
    }
    let color = color_type(buffer.channels())?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &to_8bit(buffer),
        buffer.width(),
        buffer.height(),
        color,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
