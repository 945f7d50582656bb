use crate::color::Color;
use crate::surface::PixelFormat;

/// Construction settings for a [`RenderTarget`](crate::RenderTarget).
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Painted over the whole surface right after allocation.
    pub background: Option<Color>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 800,
            format: PixelFormat::Argb32,
            background: None,
        }
    }
}

impl CanvasConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_background(mut self, color: impl Into<Color>) -> Self {
        self.background = Some(color.into());
        self
    }
}

/// PDF export settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfOptions {
    /// Pixels per inch; the page measures `pixels * 72 / dpi` points.
    pub dpi: f32,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self { dpi: 300.0 }
    }
}

impl PdfOptions {
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Points per pixel.
    pub fn scale(&self) -> f32 {
        72.0 / self.dpi
    }
}
