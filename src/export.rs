//! PNG and PDF writers.

use std::path::Path;

use anyhow::Context as _;
use image::{DynamicImage, ImageFormat};
use log::debug;

use crate::raster;
use crate::surface::Surface;

/// Writes the surface as a lossless PNG at its native size.
///
/// `Rgb24` surfaces are written without an alpha channel.
pub(crate) fn write_png(surface: &Surface, path: &Path) -> anyhow::Result<()> {
    let rgba = DynamicImage::ImageRgba8(raster::export(surface));
    let image = if surface.format().has_alpha() {
        rgba
    } else {
        DynamicImage::ImageRgb8(rgba.to_rgb8())
    };
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write PNG to {}", path.display()))?;
    debug!(
        "wrote {}x{} PNG to {}",
        surface.width(),
        surface.height(),
        path.display()
    );
    Ok(())
}

/// Writes the surface as a single-page PDF.
///
/// The page is `pixels * 72 / dpi` points on each side and holds the raster
/// once, scaled to fill it. Transparency is carried in a soft mask.
#[cfg(feature = "pdf")]
pub(crate) fn write_pdf(
    surface: &Surface,
    path: &Path,
    options: &crate::config::PdfOptions,
) -> anyhow::Result<()> {
    use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref};

    if !(options.dpi > 0.0 && options.dpi.is_finite()) {
        anyhow::bail!("invalid PDF resolution {} dpi", options.dpi);
    }
    let scale = options.scale();
    let (width, height) = (surface.width(), surface.height());
    let (page_w, page_h) = (width as f32 * scale, height as f32 * scale);

    let straight = raster::export(surface);
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    let mut alpha = Vec::with_capacity(width as usize * height as usize);
    for px in straight.pixels() {
        let [r, g, b, a] = px.0;
        rgb.extend_from_slice(&[r, g, b]);
        alpha.push(a);
    }
    let has_mask = surface.format().has_alpha() && alpha.iter().any(|&a| a != 255);

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let s_mask_id = Ref::new(5);
    let content_id = Ref::new(6);
    let image_name = Name(b"Im1");

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut image = pdf.image_xobject(image_id, &rgb);
    image.width(width as i32);
    image.height(height as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    if has_mask {
        image.s_mask(s_mask_id);
    }
    image.finish();

    if has_mask {
        let mut s_mask = pdf.image_xobject(s_mask_id, &alpha);
        s_mask.width(width as i32);
        s_mask.height(height as i32);
        s_mask.color_space().device_gray();
        s_mask.bits_per_component(8);
        s_mask.finish();
    }

    let mut content = Content::new();
    content.save_state();
    content.transform([page_w, 0.0, 0.0, page_h, 0.0, 0.0]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    std::fs::write(path, pdf.finish())
        .with_context(|| format!("failed to write PDF to {}", path.display()))?;
    debug!(
        "wrote {width}x{height} PDF ({page_w}x{page_h} pt at {} dpi) to {}",
        options.dpi,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::surface::PixelFormat;

    fn filled(format: PixelFormat, color: Color) -> Surface {
        let mut surface = Surface::new(8, 4, format).unwrap();
        surface.pixmap_mut().fill(color.to_skia());
        surface
    }

    #[test_log::test]
    fn test_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        write_png(&filled(PixelFormat::Argb32, Color::RED), &path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 4));
        assert_eq!(decoded.get_pixel(7, 3).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_rgb24_png_has_no_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        write_png(&filled(PixelFormat::Rgb24, Color::YELLOW), &path).unwrap();
        let decoded = image::open(&path).unwrap();
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_png_bad_path_reports_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let err = write_png(&filled(PixelFormat::Argb32, Color::RED), &path).unwrap_err();
        assert!(err.to_string().contains("failed to write PNG"));
    }

    #[cfg(feature = "pdf")]
    #[test_log::test]
    fn test_pdf_page_size_follows_dpi() {
        use crate::config::PdfOptions;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let surface = filled(PixelFormat::Argb32, Color::rgba(0, 0, 255, 128));
        write_pdf(&surface, &path, &PdfOptions::default().with_dpi(72.0)).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-"));
        assert!(text.contains("/MediaBox [0 0 8 4]"));
        assert!(text.contains("/SMask"));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_pdf_rejects_non_positive_dpi() {
        use crate::config::PdfOptions;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.pdf");
        let surface = filled(PixelFormat::Argb32, Color::RED);
        assert!(write_pdf(&surface, &path, &PdfOptions::default().with_dpi(0.0)).is_err());
        assert!(!path.exists());
    }
}
