use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::color::Color,
    foundation::error::{TileshadeError, TileshadeResult},
    kernel::KernelConfig,
    render::engine::RenderOptions,
};

fn default_channels() -> usize {
    Color::CHANNELS
}

/// Everything needed for one render call, as stored in a JSON file.
///
/// ```json
/// {
///   "width": 640,
///   "height": 360,
///   "channels": 4,
///   "render": { "workers": 5, "partition": { "kind": "vertical_strips" } },
///   "kernel": { "kind": "beam", "sharpness": 300.0 }
/// }
/// ```
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channels per pixel, `1..=4`.
    #[serde(default = "default_channels")]
    pub channels: usize,
    /// Engine options.
    #[serde(default)]
    pub render: RenderOptions,
    /// Kernel selection.
    #[serde(default)]
    pub kernel: KernelConfig,
}

impl RenderConfig {
    /// Config with default engine options and kernel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            channels: default_channels(),
            render: RenderOptions::default(),
            kernel: KernelConfig::default(),
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> TileshadeResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| TileshadeError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> TileshadeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read render config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check every field without allocating or spawning anything.
    pub fn validate(&self) -> TileshadeResult<()> {
        if self.channels == 0 || self.channels > Color::CHANNELS {
            return Err(TileshadeError::validation(format!(
                "channels must be in 1..={}, got {}",
                Color::CHANNELS,
                self.channels
            )));
        }
        self.render.validate()?;
        self.kernel.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
