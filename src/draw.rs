//! Shape drawing with symbolic positions and outline-aware geometry.

use log::trace;
use tiny_skia::Path;

use crate::attributes::DrawAttributes;
use crate::context::Context;
use crate::error::Result;
use crate::path;
use crate::position::{Axis, IntoPosition, resolve_box};
use crate::surface::Surface;

/// Shape renderer borrowed from a [`RenderTarget`](crate::RenderTarget).
///
/// Every shape is drawn the same way: the context state is saved, the
/// attributes are applied, the path is filled (if requested) and then
/// stroked with the outline color, and the state is restored.
#[derive(Debug)]
pub struct Draw<'a> {
    surface: &'a mut Surface,
    context: &'a mut Context,
}

impl<'a> Draw<'a> {
    pub(crate) fn new(surface: &'a mut Surface, context: &'a mut Context) -> Self {
        Self { surface, context }
    }

    pub(crate) fn surface_size(&self) -> (f32, f32) {
        self.surface.size()
    }

    /// Draws a dot of `radius` whose bounding box sits at `(x, y)`.
    pub fn dot(
        &mut self,
        x: impl IntoPosition,
        y: impl IntoPosition,
        radius: f32,
        attrs: &DrawAttributes,
    ) -> Result<()> {
        let outline = attrs.outline();
        let b = resolve_box(
            x.into_position(Axis::X)?,
            y.into_position(Axis::Y)?,
            radius * 2.0,
            radius * 2.0,
            outline,
            self.surface.size(),
        );
        let (cx, cy) = (b.x + b.width / 2.0, b.y + b.height / 2.0);
        trace!("dot center=({cx}, {cy}) radius={radius} outline={outline}");
        self.paint_shape(attrs, path::circle(cx, cy, radius - outline / 2.0));
        Ok(())
    }

    /// Draws an ellipse inscribed in the box at `(x, y)`.
    pub fn ellipse(
        &mut self,
        x: impl IntoPosition,
        y: impl IntoPosition,
        width: f32,
        height: f32,
        attrs: &DrawAttributes,
    ) -> Result<()> {
        let b = resolve_box(
            x.into_position(Axis::X)?,
            y.into_position(Axis::Y)?,
            width,
            height,
            attrs.outline(),
            self.surface.size(),
        );
        trace!("ellipse box={b:?}");
        self.paint_shape(
            attrs,
            path::ellipse(
                b.x + b.width / 2.0,
                b.y + b.height / 2.0,
                b.width / 2.0,
                b.height / 2.0,
            ),
        );
        Ok(())
    }

    /// Strokes a segment between two points.
    ///
    /// Lines are never filled and never shrunk by the outline; the outline
    /// width is the stroke width and the stroke uses the fill color.
    pub fn line(
        &mut self,
        x1: impl IntoPosition,
        y1: impl IntoPosition,
        x2: impl IntoPosition,
        y2: impl IntoPosition,
        attrs: &DrawAttributes,
    ) -> Result<()> {
        let size = self.surface.size();
        let start = resolve_box(
            x1.into_position(Axis::X)?,
            y1.into_position(Axis::Y)?,
            0.0,
            0.0,
            0.0,
            size,
        );
        let end = resolve_box(
            x2.into_position(Axis::X)?,
            y2.into_position(Axis::Y)?,
            0.0,
            0.0,
            0.0,
            size,
        );
        trace!(
            "line ({}, {}) -> ({}, {}) width={}",
            start.x,
            start.y,
            end.x,
            end.y,
            attrs.outline()
        );
        let attrs = attrs.with_fill(false).with_outline_color(attrs.color());
        self.paint_shape(&attrs, path::line(start.x, start.y, end.x, end.y));
        Ok(())
    }

    /// Draws a closed polygon through `points`.
    ///
    /// Each vertex is resolved on its own, as a zero-size shape offset by
    /// half the outline. An empty point list draws nothing.
    pub fn polygon<X, Y>(
        &mut self,
        points: impl IntoIterator<Item = (X, Y)>,
        attrs: &DrawAttributes,
    ) -> Result<()>
    where
        X: IntoPosition,
        Y: IntoPosition,
    {
        let outline = attrs.outline();
        let (w, h) = self.surface.size();
        let vertices = points
            .into_iter()
            .map(|(x, y)| {
                Ok((
                    x.into_position(Axis::X)?.resolve(w, 0.0, outline),
                    y.into_position(Axis::Y)?.resolve(h, 0.0, outline),
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        trace!("polygon vertices={}", vertices.len());
        self.paint_shape(attrs, path::polygon(&vertices));
        Ok(())
    }

    /// Draws a rectangle whose footprint, stroke included, is exactly
    /// `width` x `height` at `(x, y)`.
    pub fn rectangle(
        &mut self,
        x: impl IntoPosition,
        y: impl IntoPosition,
        width: f32,
        height: f32,
        attrs: &DrawAttributes,
    ) -> Result<()> {
        let b = resolve_box(
            x.into_position(Axis::X)?,
            y.into_position(Axis::Y)?,
            width,
            height,
            attrs.outline(),
            self.surface.size(),
        );
        trace!("rectangle box={b:?}");
        self.paint_shape(attrs, path::rectangle(b.x, b.y, b.width, b.height));
        Ok(())
    }

    /// Draws a rectangle with corners rounded to `radius`.
    pub fn rounded_rectangle(
        &mut self,
        x: impl IntoPosition,
        y: impl IntoPosition,
        width: f32,
        height: f32,
        radius: f32,
        attrs: &DrawAttributes,
    ) -> Result<()> {
        let b = resolve_box(
            x.into_position(Axis::X)?,
            y.into_position(Axis::Y)?,
            width,
            height,
            attrs.outline(),
            self.surface.size(),
        );
        trace!("rounded_rectangle box={b:?} radius={radius}");
        self.paint_shape(
            attrs,
            path::rounded_rectangle(b.x, b.y, b.width, b.height, radius),
        );
        Ok(())
    }

    /// Fills and strokes an already-built path under the shared protocol.
    pub(crate) fn paint_shape(&mut self, attrs: &DrawAttributes, path: Option<Path>) {
        let mut ctx = self.context.snapshot();
        ctx.apply(attrs);
        let Some(path) = path else {
            return;
        };
        let pixmap = self.surface.pixmap_mut();
        if attrs.fill() {
            ctx.fill(pixmap, &path);
        }
        ctx.set_source(attrs.outline_color());
        ctx.stroke(pixmap, &path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::LineCap;
    use crate::color::Color;
    use crate::position::Position;
    use crate::surface::PixelFormat;

    fn canvas(w: u32, h: u32) -> (Surface, Context) {
        (Surface::new(w, h, PixelFormat::Argb32).unwrap(), Context::new())
    }

    #[test]
    fn test_rectangle_footprint_with_outline() {
        let (mut surface, mut ctx) = canvas(60, 40);
        let attrs = DrawAttributes::new()
            .with_color(Color::RED)
            .with_outline(4.0)
            .with_outline_color(Color::BLACK);
        Draw::new(&mut surface, &mut ctx)
            .rectangle(0, 0, 30.0, 20.0, &attrs)
            .unwrap();
        // stroke covers the outer edge, fill the inside
        assert_eq!(surface.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(surface.pixel(29, 19), Some(Color::BLACK));
        assert_eq!(surface.pixel(15, 10), Some(Color::RED));
        assert_eq!(surface.pixel(30, 10), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(15, 20), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_anchored_rectangle_is_flush() {
        let (mut surface, mut ctx) = canvas(50, 50);
        let attrs = DrawAttributes::new().with_color(Color::WHITE).with_outline(2.0);
        Draw::new(&mut surface, &mut ctx)
            .rectangle("right", "bottom", 10.0, 10.0, &attrs)
            .unwrap();
        assert_eq!(surface.pixel(49, 49), Some(Color::WHITE));
        assert_eq!(surface.pixel(40, 40), Some(Color::WHITE));
        assert_eq!(surface.pixel(39, 40), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_invalid_position_draws_nothing() {
        let (mut surface, mut ctx) = canvas(10, 10);
        let mut draw = Draw::new(&mut surface, &mut ctx);
        let err = draw
            .rectangle("top", 0, 5.0, 5.0, &DrawAttributes::new())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::DrawError::InvalidPosition { axis: Axis::X, .. }
        ));
        assert!(surface.data().iter().all(|&b| b == 0));
        assert_eq!(ctx.state_depth(), 0);
    }

    #[test]
    fn test_unfilled_shape_only_strokes() {
        let (mut surface, mut ctx) = canvas(40, 40);
        let attrs = DrawAttributes::new()
            .with_fill(false)
            .with_outline(2.0)
            .with_color(Color::RED);
        Draw::new(&mut surface, &mut ctx)
            .rectangle(0, 0, 40.0, 40.0, &attrs)
            .unwrap();
        assert_eq!(surface.pixel(0, 20), Some(Color::RED));
        assert_eq!(surface.pixel(20, 20), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_dot_centered_on_surface() {
        let (mut surface, mut ctx) = canvas(41, 41);
        let attrs = DrawAttributes::new().with_color(Color::YELLOW).with_outline(0.0);
        Draw::new(&mut surface, &mut ctx)
            .dot("center", "center", 10.0, &attrs)
            .unwrap();
        assert_eq!(surface.pixel(20, 20), Some(Color::YELLOW));
        assert_eq!(surface.pixel(20, 5), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(20, 12), Some(Color::YELLOW));
    }

    #[test]
    fn test_line_uses_fill_color_and_ignores_outline_offset() {
        let (mut surface, mut ctx) = canvas(20, 20);
        let attrs = DrawAttributes::new()
            .with_color(Color::RED)
            .with_outline(2.0)
            .with_outline_color(Color::WHITE);
        Draw::new(&mut surface, &mut ctx)
            .line(2, 10, 18, 10, &attrs)
            .unwrap();
        assert_eq!(surface.pixel(10, 9), Some(Color::RED));
        assert_eq!(surface.pixel(10, 10), Some(Color::RED));
        assert_eq!(surface.pixel(10, 12), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_polygon_empty_and_filled() {
        let (mut surface, mut ctx) = canvas(20, 20);
        let mut draw = Draw::new(&mut surface, &mut ctx);
        let none: [(i32, i32); 0] = [];
        draw.polygon(none, &DrawAttributes::new()).unwrap();
        draw.polygon(
            [(0, 0), (19, 0), (19, 19), (0, 19)],
            &DrawAttributes::new().with_color(Color::RED),
        )
        .unwrap();
        assert_eq!(surface.pixel(10, 10), Some(Color::RED));
    }

    #[test]
    fn test_rounded_rectangle_corners_are_clear() {
        let (mut surface, mut ctx) = canvas(40, 40);
        let attrs = DrawAttributes::new().with_color(Color::RED).with_outline(0.0);
        Draw::new(&mut surface, &mut ctx)
            .rounded_rectangle(0, 0, 40.0, 40.0, 10.0, &attrs)
            .unwrap();
        assert_eq!(surface.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(20, 0), Some(Color::RED));
        assert_eq!(surface.pixel(20, 20), Some(Color::RED));
    }

    #[test]
    fn test_default_outline_rectangle_covers_exactly_its_box() {
        let (mut surface, mut ctx) = canvas(30, 30);
        Draw::new(&mut surface, &mut ctx)
            .rectangle(5, 5, 10.0, 10.0, &DrawAttributes::new())
            .unwrap();
        for y in 0..30 {
            for x in 0..30 {
                let inside = (5..15).contains(&x) && (5..15).contains(&y);
                let expected = if inside { Color::BLACK } else { Color::TRANSPARENT };
                assert_eq!(surface.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_ellipse_footprint_with_outline() {
        let (mut surface, mut ctx) = canvas(60, 40);
        let attrs = DrawAttributes::new()
            .with_color(Color::RED)
            .with_outline(4.0)
            .with_outline_color(Color::BLACK);
        Draw::new(&mut surface, &mut ctx)
            .ellipse(0, 0, 40.0, 20.0, &attrs)
            .unwrap();
        // leftmost and topmost points of the stroke touch the box edges
        assert_eq!(surface.pixel(1, 10), Some(Color::BLACK));
        assert_eq!(surface.pixel(20, 1), Some(Color::BLACK));
        assert!(surface.pixel(0, 10).unwrap().a > 0);
        assert!(surface.pixel(20, 0).unwrap().a > 0);
        assert_eq!(surface.pixel(20, 10), Some(Color::RED));
        // nothing past the right and bottom edges, nor in the corner
        for y in 0..40 {
            assert_eq!(surface.pixel(40, y), Some(Color::TRANSPARENT));
        }
        for x in 0..60 {
            assert_eq!(surface.pixel(x, 20), Some(Color::TRANSPARENT));
        }
        assert_eq!(surface.pixel(1, 1), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_polygon_anchor_vertices_are_inset_by_half_outline() {
        let (mut surface, mut ctx) = canvas(20, 20);
        let attrs = DrawAttributes::new()
            .with_color(Color::RED)
            .with_outline(2.0)
            .with_outline_color(Color::BLACK);
        Draw::new(&mut surface, &mut ctx)
            .polygon(
                [
                    ("left", "top"),
                    ("right", "top"),
                    ("right", "bottom"),
                    ("left", "bottom"),
                ],
                &attrs,
            )
            .unwrap();
        assert_eq!(
            Position::RIGHT.resolve(20.0, 0.0, 2.0),
            19.0,
            "right vertex sits at w - outline/2"
        );
        assert_eq!(surface.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(surface.pixel(19, 19), Some(Color::BLACK));
        assert_eq!(surface.pixel(18, 10), Some(Color::BLACK));
        assert_eq!(surface.pixel(17, 10), Some(Color::RED));
        assert_eq!(surface.pixel(10, 10), Some(Color::RED));
    }

    #[test]
    fn test_line_caps_change_end_coverage() {
        let draw_line = |cap: LineCap| {
            let (mut surface, mut ctx) = canvas(20, 20);
            let attrs = DrawAttributes::new()
                .with_color(Color::RED)
                .with_outline(4.0)
                .with_line_cap(cap);
            Draw::new(&mut surface, &mut ctx)
                .line(5, 10, 15, 10, &attrs)
                .unwrap();
            surface
        };
        let butt = draw_line(LineCap::Butt);
        assert_eq!(butt.pixel(5, 10), Some(Color::RED));
        assert_eq!(butt.pixel(4, 10), Some(Color::TRANSPARENT));
        assert_eq!(butt.pixel(15, 10), Some(Color::TRANSPARENT));

        let square = draw_line(LineCap::Square);
        assert_eq!(square.pixel(3, 10), Some(Color::RED));
        assert_eq!(square.pixel(16, 10), Some(Color::RED));
        assert_eq!(square.pixel(2, 10), Some(Color::TRANSPARENT));
        assert_eq!(square.pixel(17, 10), Some(Color::TRANSPARENT));
    }
}
