//! Cropping and scaled/rotated pasting of surfaces.

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use tiny_skia::{
    FillRule, FilterQuality, Paint, Pattern, PixmapPaint, SpreadMode, Transform,
};

use crate::error::{DrawError, Result};
use crate::path;
use crate::position::{Axis, IntoPosition, Position};
use crate::surface::Surface;

/// How [`PasteOptions`] interprets a requested width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalingMode {
    /// Width and height are target sizes in pixels.
    #[default]
    Absolute,
    /// Width and height are scale factors.
    Ratio,
}

impl FromStr for ScalingMode {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "absolute" => Ok(ScalingMode::Absolute),
            "ratio" => Ok(ScalingMode::Ratio),
            other => Err(DrawError::InvalidScalingMode(other.to_string())),
        }
    }
}

impl fmt::Display for ScalingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingMode::Absolute => f.write_str("absolute"),
            ScalingMode::Ratio => f.write_str("ratio"),
        }
    }
}

/// Placement of a pasted surface.
///
/// Positions resolve against the destination with the scaled source size
/// as the shape extent. Rotation is in radians about the resolved top-left
/// corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PasteOptions {
    x: Position,
    y: Position,
    width: Option<f32>,
    height: Option<f32>,
    scaling: ScalingMode,
    rotation: f32,
}

impl PasteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options placed at `(x, y)`, accepting axis tokens such as `"center"`.
    pub fn at(x: impl IntoPosition, y: impl IntoPosition) -> Result<Self> {
        Ok(Self::default().with_position(x.into_position(Axis::X)?, y.into_position(Axis::Y)?))
    }

    pub fn position(&self) -> (Position, Position) {
        (self.x, self.y)
    }

    pub fn with_position(mut self, x: impl Into<Position>, y: impl Into<Position>) -> Self {
        self.x = x.into();
        self.y = y.into();
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_size(self, width: f32, height: f32) -> Self {
        self.with_width(width).with_height(height)
    }

    pub fn scaling(&self) -> ScalingMode {
        self.scaling
    }

    pub fn with_scaling(mut self, scaling: ScalingMode) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Scale factors for a source of `source_size`.
    ///
    /// A missing width or height falls back to the source's native size,
    /// which in ratio mode is used as the factor itself.
    pub fn scale_for(&self, source_size: (f32, f32)) -> (f32, f32) {
        let (sw, sh) = source_size;
        if self.width.is_none() && self.height.is_none() {
            return (1.0, 1.0);
        }
        let width = self.width.unwrap_or(sw);
        let height = self.height.unwrap_or(sh);
        match self.scaling {
            ScalingMode::Absolute => (width / sw, height / sh),
            ScalingMode::Ratio => (width, height),
        }
    }
}

/// Renders the `width` x `height` window at `(x, y)` of `surface` into a new
/// surface of the same format. Sizes are truncated to whole pixels.
pub(crate) fn crop(surface: &Surface, x: f32, y: f32, width: f32, height: f32) -> Result<Surface> {
    let (w, h) = (width as u32, height as u32);
    let mut cropped = Surface::new(w, h, surface.format())?;
    let quality = if x.fract() == 0.0 && y.fract() == 0.0 {
        FilterQuality::Nearest
    } else {
        FilterQuality::Bilinear
    };
    let paint = PixmapPaint {
        quality,
        ..PixmapPaint::default()
    };
    cropped.pixmap_mut().draw_pixmap(
        0,
        0,
        surface.pixmap().as_ref(),
        &paint,
        Transform::from_translate(-x, -y),
        None,
    );
    debug!(
        "cropped {}x{} surface to {w}x{h} at ({x}, {y})",
        surface.width(),
        surface.height()
    );
    Ok(cropped)
}

/// Blends `source` into `dest`, scaled and rotated per `options`.
pub(crate) fn paste(dest: &mut Surface, source: &Surface, options: &PasteOptions) {
    let (sx, sy) = options.scale_for(source.size());
    let (dw, dh) = (source.width() as f32 * sx, source.height() as f32 * sy);
    let (w, h) = dest.size();
    let x = options.x.resolve(w, dw, 0.0);
    let y = options.y.resolve(h, dh, 0.0);
    trace!(
        "paste {}x{} at ({x}, {y}) size={dw}x{dh} rotation={}",
        source.width(),
        source.height(),
        options.rotation
    );
    if dw == 0.0 || dh == 0.0 {
        return;
    }
    let Some(rect) = path::rectangle(0.0, 0.0, dw, dh) else {
        return;
    };

    let paint = Paint {
        shader: Pattern::new(
            source.pixmap().as_ref(),
            SpreadMode::Pad,
            FilterQuality::Bilinear,
            1.0,
            Transform::from_scale(sx, sy),
        ),
        anti_alias: true,
        ..Paint::default()
    };
    let transform = Transform::from_translate(x, y).pre_rotate(options.rotation.to_degrees());
    dest.pixmap_mut()
        .fill_path(&rect, &paint, FillRule::Winding, transform, None);
}
