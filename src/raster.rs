//! Bridging between surfaces and foreign raster images.
//!
//! Surfaces hold premultiplied RGBA. Foreign rasters are straight
//! (non-premultiplied) 8-bit pixels in one of a few channel orders; imports
//! permute and premultiply, exports demultiply and permute back.

use std::borrow::Cow;

use image::{DynamicImage, RgbImage, RgbaImage};
use log::debug;
use tiny_skia::{ColorU8, Pixmap};

use crate::error::{DrawError, Result};
use crate::surface::{PixelFormat, Surface};

/// Byte order of one pixel in a foreign raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    Rgb,
    Rgba,
    Bgr,
    Bgra,
}

impl ChannelLayout {
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Rgb | ChannelLayout::Bgr => 3,
            ChannelLayout::Rgba | ChannelLayout::Bgra => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        self.channels() == 4
    }

    /// Reads `[r, g, b, a]` from one pixel, using `alpha` when the layout
    /// has no alpha channel.
    fn read(self, px: &[u8], alpha: u8) -> [u8; 4] {
        match self {
            ChannelLayout::Rgb => [px[0], px[1], px[2], alpha],
            ChannelLayout::Rgba => [px[0], px[1], px[2], px[3]],
            ChannelLayout::Bgr => [px[2], px[1], px[0], alpha],
            ChannelLayout::Bgra => [px[2], px[1], px[0], px[3]],
        }
    }

    fn write(self, rgba: [u8; 4], out: &mut Vec<u8>) {
        let [r, g, b, a] = rgba;
        match self {
            ChannelLayout::Rgb => out.extend_from_slice(&[r, g, b]),
            ChannelLayout::Rgba => out.extend_from_slice(&[r, g, b, a]),
            ChannelLayout::Bgr => out.extend_from_slice(&[b, g, r]),
            ChannelLayout::Bgra => out.extend_from_slice(&[b, g, r, a]),
        }
    }
}

/// A foreign image the compositor can import.
pub trait RasterImage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn layout(&self) -> ChannelLayout;
    /// Row-major pixel bytes in [`RasterImage::layout`] order, no padding.
    fn bytes(&self) -> Cow<'_, [u8]>;
}

impl RasterImage for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn layout(&self) -> ChannelLayout {
        ChannelLayout::Rgba
    }

    fn bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_raw())
    }
}

impl RasterImage for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn layout(&self) -> ChannelLayout {
        ChannelLayout::Rgb
    }

    fn bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_raw())
    }
}

/// Variants other than 8-bit RGB(A) are converted on the fly.
impl RasterImage for DynamicImage {
    fn width(&self) -> u32 {
        DynamicImage::width(self)
    }

    fn height(&self) -> u32 {
        DynamicImage::height(self)
    }

    fn layout(&self) -> ChannelLayout {
        if self.color().has_alpha() {
            ChannelLayout::Rgba
        } else {
            ChannelLayout::Rgb
        }
    }

    fn bytes(&self) -> Cow<'_, [u8]> {
        match self {
            DynamicImage::ImageRgb8(buf) => Cow::Borrowed(buf.as_raw()),
            DynamicImage::ImageRgba8(buf) => Cow::Borrowed(buf.as_raw()),
            other if other.color().has_alpha() => Cow::Owned(other.to_rgba8().into_raw()),
            other => Cow::Owned(other.to_rgb8().into_raw()),
        }
    }
}

/// Raw pixel bytes with an explicit channel layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRaster {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    data: Vec<u8>,
}

impl RawRaster {
    /// # Errors
    /// Returns [`DrawError::RasterSize`] if `data` does not hold exactly
    /// `width * height` pixels of `layout`.
    pub fn new(width: u32, height: u32, layout: ChannelLayout, data: Vec<u8>) -> Result<Self> {
        let expected = expected_len(width, height, layout);
        if data.len() != expected {
            return Err(DrawError::RasterSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl RasterImage for RawRaster {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn layout(&self) -> ChannelLayout {
        self.layout
    }

    fn bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self.data)
    }
}

fn expected_len(width: u32, height: u32, layout: ChannelLayout) -> usize {
    width as usize * height as usize * layout.channels()
}

/// Converts a 0..=1 opacity into the alpha byte given to alpha-less rasters.
pub fn synthesized_alpha(alpha: f32) -> u8 {
    if alpha.is_nan() {
        return 255;
    }
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Builds a surface from a foreign raster.
///
/// Rasters without alpha get `alpha` (0..=1) as their opacity. An `Rgb24`
/// surface composites the imported pixels over black.
pub(crate) fn import(raster: &impl RasterImage, alpha: f32, format: PixelFormat) -> Result<Surface> {
    if !format.is_supported() {
        return Err(DrawError::UnsupportedPixelFormat(format));
    }
    let (width, height, layout) = (raster.width(), raster.height(), raster.layout());
    let bytes = raster.bytes();
    let expected = expected_len(width, height, layout);
    if bytes.len() != expected {
        return Err(DrawError::RasterSize {
            expected,
            actual: bytes.len(),
        });
    }

    let mut pixmap =
        Pixmap::new(width, height).ok_or(DrawError::SurfaceAllocation { width, height })?;
    let alpha = synthesized_alpha(alpha);
    for (dst, src) in pixmap
        .pixels_mut()
        .iter_mut()
        .zip(bytes.chunks_exact(layout.channels()))
    {
        let [r, g, b, a] = layout.read(src, alpha);
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    debug!("imported {width}x{height} {layout:?} raster as {format:?}");
    Surface::from_pixmap(pixmap, format)
}

/// Straight-alpha RGBA copy of a surface.
pub(crate) fn export(surface: &Surface) -> RgbaImage {
    let data = export_bytes(surface, ChannelLayout::Rgba);
    RgbaImage::from_raw(surface.width(), surface.height(), data)
        .unwrap_or_else(|| RgbaImage::new(surface.width(), surface.height()))
}

/// Straight-alpha copy of a surface in an arbitrary channel layout.
pub(crate) fn export_raw(surface: &Surface, layout: ChannelLayout) -> RawRaster {
    RawRaster {
        width: surface.width(),
        height: surface.height(),
        layout,
        data: export_bytes(surface, layout),
    }
}

fn export_bytes(surface: &Surface, layout: ChannelLayout) -> Vec<u8> {
    let pixels: &[[u8; 4]] = bytemuck::cast_slice(surface.data());
    let mut out = Vec::with_capacity(expected_len(surface.width(), surface.height(), layout));
    for &[r, g, b, a] in pixels {
        let straight = match tiny_skia::PremultipliedColorU8::from_rgba(r, g, b, a) {
            Some(px) => px.demultiply(),
            None => ColorU8::from_rgba(r, g, b, a),
        };
        layout.write(
            [
                straight.red(),
                straight.green(),
                straight.blue(),
                straight.alpha(),
            ],
            &mut out,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_rgb_import_synthesizes_alpha() {
        let img = RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
        let surface = import(&img, 1.0, PixelFormat::Argb32).unwrap();
        assert_eq!(surface.pixel(2, 1), Some(Color::rgba(10, 20, 30, 255)));

        let faded = import(&img, 0.0, PixelFormat::Argb32).unwrap();
        assert_eq!(faded.pixel(0, 0).map(|c| c.a), Some(0));
        assert_eq!(synthesized_alpha(0.5), 128);
        assert_eq!(synthesized_alpha(7.0), 255);
    }

    #[test]
    fn test_bgra_channels_are_permuted() {
        let raw = RawRaster::new(1, 1, ChannelLayout::Bgra, vec![1, 2, 3, 255]).unwrap();
        let surface = import(&raw, 1.0, PixelFormat::Argb32).unwrap();
        assert_eq!(surface.pixel(0, 0), Some(Color::rgb(3, 2, 1)));
        let back = export_raw(&surface, ChannelLayout::Bgr);
        assert_eq!(back.data(), &[1, 2, 3]);
    }

    #[test]
    fn test_export_then_import_is_lossless() {
        let mut img = RgbaImage::new(4, 4);
        for (i, px) in img.pixels_mut().enumerate() {
            let v = (i * 16) as u8;
            *px = image::Rgba([v, 255 - v, v / 2, 255]);
        }
        let surface = import(&img, 1.0, PixelFormat::Argb32).unwrap();
        let exported = export(&surface);
        assert_eq!(exported, img);
        let again = import(&exported, 1.0, PixelFormat::Argb32).unwrap();
        assert_eq!(again, surface);
    }

    #[test]
    fn test_translucent_round_trip_reproduces_buffer() {
        let mut surface = Surface::new(2, 2, PixelFormat::Argb32).unwrap();
        surface
            .pixmap_mut()
            .fill(tiny_skia::Color::from_rgba8(200, 100, 50, 77));
        let again = import(&export(&surface), 1.0, PixelFormat::Argb32).unwrap();
        assert_eq!(again.data(), surface.data());
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        assert_eq!(
            RawRaster::new(2, 2, ChannelLayout::Rgb, vec![0; 11]),
            Err(DrawError::RasterSize {
                expected: 12,
                actual: 11
            })
        );
        let img = RgbaImage::new(1, 1);
        assert_eq!(
            import(&img, 1.0, PixelFormat::Rgb30),
            Err(DrawError::UnsupportedPixelFormat(PixelFormat::Rgb30))
        );
    }

    #[test]
    fn test_rgb24_import_forces_opaque() {
        let raw = RawRaster::new(1, 1, ChannelLayout::Rgba, vec![255, 255, 255, 0]).unwrap();
        let surface = import(&raw, 1.0, PixelFormat::Rgb24).unwrap();
        assert_eq!(surface.pixel(0, 0), Some(Color::BLACK));
        let dynamic = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(1, 1, image::Luma([9])));
        let gray = import(&dynamic, 1.0, PixelFormat::Rgb24).unwrap();
        assert_eq!(gray.pixel(0, 0), Some(Color::rgb(9, 9, 9)));
    }
}
