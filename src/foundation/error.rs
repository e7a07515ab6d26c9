/// Crate-wide result alias.
pub type TileshadeResult<T> = Result<T, TileshadeError>;

/// Error taxonomy for buffer allocation, render configuration and kernel evaluation.
#[derive(thiserror::Error, Debug)]
pub enum TileshadeError {
    /// Invalid configuration, rejected before any task is spawned.
    #[error("validation error: {0}")]
    Validation(String),

    /// The pixel buffer could not be created at the requested dimensions.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Raised by a kernel that cannot produce a color.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// A kernel failed while rendering a specific pixel.
    #[error("kernel failed at pixel ({x}, {y}): {source}")]
    KernelPixel {
        /// Pixel column.
        x: u32,
        /// Pixel row.
        y: u32,
        /// Error returned by the kernel.
        #[source]
        source: Box<TileshadeError>,
    },

    /// The render was cancelled through its [`CancelToken`](crate::CancelToken).
    #[error("render cancelled")]
    Cancelled,

    /// Config (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually IO from the collaborator layer.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TileshadeError {
    /// Build a [`TileshadeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TileshadeError::Allocation`].
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`TileshadeError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`TileshadeError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub(crate) fn at_pixel(x: u32, y: u32, source: TileshadeError) -> Self {
        Self::KernelPixel {
            x,
            y,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
