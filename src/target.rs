//! The public canvas object.

use std::path::Path;

use image::RgbaImage;
use log::debug;

use crate::attributes::DrawAttributes;
use crate::color::Color;
use crate::composite::{self, PasteOptions};
use crate::config::CanvasConfig;
use crate::context::Context;
use crate::draw::Draw;
use crate::error::Result;
use crate::export;
use crate::position::Position;
use crate::raster::{self, ChannelLayout, RasterImage, RawRaster};
use crate::surface::{PixelFormat, Surface};
use crate::text::{self, TextBlock, TextBounds};

/// A drawable surface together with its rendering context.
///
/// Operations that replace the pixel buffer (crop, format conversion,
/// raster import) build the new surface first and swap it in only on
/// success; the context is recreated along with it.
///
/// # Example
/// ```
/// use spotcanvas::{Color, PasteOptions, PixelFormat, RenderTarget};
///
/// let mut canvas = RenderTarget::new(600, 800, PixelFormat::Argb32).unwrap();
/// canvas.set_background(Color::RED).unwrap();
///
/// let mut sticker = RenderTarget::new(100, 200, PixelFormat::Argb32).unwrap();
/// sticker.set_background(Color::YELLOW).unwrap();
///
/// canvas.paste(&sticker, &PasteOptions::at("center", "center").unwrap());
/// assert_eq!(canvas.pixel(300, 400), Some(Color::YELLOW));
/// assert_eq!(canvas.pixel(10, 10), Some(Color::RED));
/// ```
#[derive(Debug, Clone)]
pub struct RenderTarget {
    surface: Surface,
    context: Context,
}

impl RenderTarget {
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        Ok(Self::from_surface(Surface::new(width, height, format)?))
    }

    pub fn from_config(config: &CanvasConfig) -> Result<Self> {
        let mut target = Self::new(config.width, config.height, config.format)?;
        if let Some(background) = config.background {
            target.set_background(background)?;
        }
        Ok(target)
    }

    pub fn from_surface(surface: Surface) -> Self {
        Self {
            surface,
            context: Context::new(),
        }
    }

    /// Builds a target from a foreign raster. Rasters without an alpha
    /// channel get `alpha` (0..=1) as their opacity.
    pub fn from_raster(raster: &impl RasterImage, alpha: f32, format: PixelFormat) -> Result<Self> {
        Ok(Self::from_surface(raster::import(raster, alpha, format)?))
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn format(&self) -> PixelFormat {
        self.surface.format()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.surface.pixel(x, y)
    }

    /// Shape renderer bound to the current surface.
    pub fn draw(&mut self) -> Draw<'_> {
        Draw::new(&mut self.surface, &mut self.context)
    }

    /// Sets the context's source color.
    ///
    /// This is context state only: every shape, text block and background
    /// call applies its own attributes and paints with their color. The
    /// value is visible through [`Context::source`] and is restored by
    /// `restore` and [`Snapshot`](crate::Snapshot) like any other context state.
    pub fn set_color(&mut self, color: impl Into<Color>) {
        self.context.set_source(color);
    }

    /// Covers the whole surface with `color`, border included.
    pub fn set_background(&mut self, color: impl Into<Color>) -> Result<()> {
        let attrs = DrawAttributes::new().with_color(color);
        let (w, h) = self.surface.size();
        self.draw().rectangle(Position::LEFT, Position::TOP, w, h, &attrs)
    }

    /// Strokes a frame of `line_width` along the surface edges.
    pub fn outline(&mut self, color: impl Into<Color>, line_width: f32) -> Result<()> {
        let attrs = DrawAttributes::new()
            .with_color(color)
            .with_fill(false)
            .with_outline(line_width);
        let (w, h) = self.surface.size();
        self.draw().rectangle(0, 0, w, h, &attrs)
    }

    /// A 1px frame plus a vertical and a horizontal center line.
    pub fn gridlines(&mut self, color: impl Into<Color>) -> Result<()> {
        let color = color.into();
        self.outline(color, 1.0)?;
        let (w, h) = self.surface.size();
        let attrs = DrawAttributes::new().with_color(color);
        let mut draw = self.draw();
        draw.line(w / 2.0, 0, w / 2.0, h, &attrs)?;
        draw.line(0, h / 2.0, w, h / 2.0, &attrs)
    }

    /// Lays out and paints a text block, returning the box it consumed.
    pub fn write(&mut self, block: &TextBlock) -> Result<TextBounds> {
        text::write(&mut self.draw(), block)
    }

    /// Replaces the surface with the `width` x `height` window at `(x, y)`.
    ///
    /// On failure the target is left untouched.
    pub fn crop(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<()> {
        let cropped = composite::crop(&self.surface, x, y, width, height)?;
        self.replace_surface(cropped);
        Ok(())
    }

    /// Blends another target's surface into this one.
    pub fn paste(&mut self, source: &RenderTarget, options: &PasteOptions) {
        self.paste_surface(&source.surface, options);
    }

    pub fn paste_surface(&mut self, source: &Surface, options: &PasteOptions) {
        composite::paste(&mut self.surface, source, options);
    }

    /// Re-creates the surface in another pixel format.
    pub fn convert_format(&mut self, format: PixelFormat) -> Result<()> {
        let converted = self.surface.converted(format)?;
        self.replace_surface(converted);
        Ok(())
    }

    /// Replaces the surface with a foreign raster, keeping the current
    /// pixel format.
    pub fn import_raster(&mut self, raster: &impl RasterImage, alpha: f32) -> Result<()> {
        let imported = raster::import(raster, alpha, self.format())?;
        self.replace_surface(imported);
        Ok(())
    }

    /// Straight-alpha RGBA copy of the surface.
    pub fn to_raster(&self) -> RgbaImage {
        raster::export(&self.surface)
    }

    pub fn to_raw(&self, layout: ChannelLayout) -> RawRaster {
        raster::export_raw(&self.surface, layout)
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        export::write_png(&self.surface, path.as_ref())
    }

    #[cfg(feature = "pdf")]
    pub fn write_pdf(
        &self,
        path: impl AsRef<Path>,
        options: &crate::config::PdfOptions,
    ) -> anyhow::Result<()> {
        export::write_pdf(&self.surface, path.as_ref(), options)
    }

    fn replace_surface(&mut self, surface: Surface) {
        debug!(
            "replacing {}x{} {:?} surface with {}x{} {:?}",
            self.surface.width(),
            self.surface.height(),
            self.surface.format(),
            surface.width(),
            surface.height(),
            surface.format()
        );
        self.surface = surface;
        self.context = Context::new();
    }
}
