//! Tileshade evaluates procedural per-pixel color kernels in parallel.
//!
//! Given a width, a height, a channel count and a [`Kernel`], a [`Renderer`] splits the image
//! into disjoint [`Tile`]s, evaluates the kernel for every pixel on a dedicated worker pool and
//! returns a fully written, plane-interleaved [`PixelBuffer`]:
//!
//! ```no_run
//! use tileshade::{BeamKernel, RenderOptions, Renderer};
//!
//! let mut renderer = Renderer::new(RenderOptions::with_workers(5))?;
//! let buffer = renderer.render(640, 360, 4, &BeamKernel::default())?;
//! tileshade::save_png(&buffer, "beam.png")?;
//! # Ok::<(), tileshade::TileshadeError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Render configuration files.
pub mod config;
/// Copy-out helpers for hosts and image files.
pub mod export;
/// Per-pixel color kernels.
pub mod kernel;
pub(crate) mod render;

pub use crate::foundation::color::Color;
pub use crate::foundation::error::{TileshadeError, TileshadeResult};
pub use crate::foundation::math::{Vec2, clamp, clamp01};

pub use crate::config::RenderConfig;
pub use crate::export::{PlanarImage, PlaneSink, copy_to_planes, save_png, to_8bit};
pub use crate::kernel::{BeamKernel, GradientKernel, Kernel, KernelConfig, SolidKernel};
pub use crate::render::buffer::PixelBuffer;
pub use crate::render::engine::{
    CancelToken, DEFAULT_WORKERS, MAX_WORKERS, RenderOptions, RenderStats, Renderer, render,
};
pub use crate::render::tile::{PartitionScheme, Tile, partition, split_span};
