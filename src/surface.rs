//! The owned pixel buffer behind a render target.

use tiny_skia::{Pixmap, PremultipliedColorU8};

use crate::color::Color;
use crate::error::{DrawError, Result};

/// Pixel layouts a surface can be asked for.
///
/// Only [`PixelFormat::Argb32`] and [`PixelFormat::Rgb24`] can back a
/// surface; the rest exist so callers can name them and get a typed error.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// 32-bit color with alpha.
    #[default]
    Argb32,
    /// 24-bit color; alpha is always opaque.
    Rgb24,
    A8,
    A1,
    Rgb16_565,
    Rgb30,
}

impl PixelFormat {
    pub fn is_supported(self) -> bool {
        matches!(self, PixelFormat::Argb32 | PixelFormat::Rgb24)
    }

    pub fn has_alpha(self) -> bool {
        !matches!(self, PixelFormat::Rgb24)
    }

    fn ensure_supported(self) -> Result<Self> {
        if self.is_supported() {
            Ok(self)
        } else {
            Err(DrawError::UnsupportedPixelFormat(self))
        }
    }
}

/// A premultiplied RGBA pixel buffer tagged with its logical format.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixmap: Pixmap,
    format: PixelFormat,
}

impl Surface {
    /// Allocates a blank surface.
    ///
    /// `Argb32` starts fully transparent, `Rgb24` starts opaque black.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let format = format.ensure_supported()?;
        let mut pixmap =
            Pixmap::new(width, height).ok_or(DrawError::SurfaceAllocation { width, height })?;
        if !format.has_alpha() {
            pixmap.fill(tiny_skia::Color::BLACK);
        }
        Ok(Self { pixmap, format })
    }

    /// Wraps an existing pixmap, forcing alpha to opaque for `Rgb24`.
    pub(crate) fn from_pixmap(pixmap: Pixmap, format: PixelFormat) -> Result<Self> {
        let format = format.ensure_supported()?;
        let mut surface = Self { pixmap, format };
        if !format.has_alpha() {
            surface.flatten_alpha();
        }
        Ok(surface)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width() as f32, self.height() as f32)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Reads one pixel as straight (non-premultiplied) RGBA, or `None`
    /// outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(Color::from_premultiplied)
    }

    /// Premultiplied RGBA bytes, row-major, no padding.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Builds a copy of this surface in another supported format.
    ///
    /// Converting to `Rgb24` composites over black; converting to `Argb32`
    /// keeps the pixels as they are.
    pub fn converted(&self, format: PixelFormat) -> Result<Surface> {
        Surface::from_pixmap(self.pixmap.clone(), format)
    }

    /// Drops transparency by compositing every pixel over opaque black.
    ///
    /// Premultiplied color over black is the color itself, so only alpha
    /// changes.
    fn flatten_alpha(&mut self) {
        for px in self.pixmap.pixels_mut() {
            if px.is_opaque() {
                continue;
            }
            if let Some(opaque) =
                PremultipliedColorU8::from_rgba(px.red(), px.green(), px.blue(), 255)
            {
                *px = opaque;
            }
        }
    }
}
