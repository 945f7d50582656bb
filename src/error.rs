//! Error types for drawing and compositing operations.

use crate::position::Axis;
use crate::surface::PixelFormat;

/// Errors raised synchronously by drawing, compositing and layout calls.
///
/// None of these are recovered internally; the surface is left untouched (or
/// fully updated) when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawError {
    /// A symbolic position token outside the vocabulary of its axis.
    #[error("invalid {axis} position '{token}': expected a number or one of {}", .axis.tokens())]
    InvalidPosition { axis: Axis, token: String },

    /// A color tuple that is neither RGB nor RGBA.
    #[error("color must have 3 or 4 components, got {0}")]
    InvalidColor(usize),

    /// A scaling mode other than `absolute` or `ratio`.
    #[error("invalid scaling mode '{0}': expected 'absolute' or 'ratio'")]
    InvalidScalingMode(String),

    /// A pixel format the compositor cannot hold.
    #[error("unsupported pixel format: {0:?}")]
    UnsupportedPixelFormat(PixelFormat),

    /// A text alignment token other than left/right/center/justified.
    #[error("invalid alignment '{0}': expected 'left', 'right', 'center' or 'justified'")]
    InvalidAlignment(String),

    /// The rasterizer refused to allocate a buffer of this size.
    #[error("cannot allocate a {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },

    /// A raster whose byte length disagrees with its dimensions and layout.
    #[error("raster data is {actual} bytes, expected {expected}")]
    RasterSize { expected: usize, actual: usize },

    /// Font bytes that could not be parsed.
    #[error("failed to parse font: {0}")]
    Font(String),
}

pub type Result<T> = std::result::Result<T, DrawError>;
