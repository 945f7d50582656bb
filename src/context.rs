//! Rendering state bound to a surface: source color, stroke style and
//! transform, with a save/restore stack.

use std::ops::{Deref, DerefMut};

use tiny_skia::{FillRule, Paint, Path, PathStroker, Pixmap, Stroke, Transform};

use crate::attributes::{DrawAttributes, LineCap, LineJoin};
use crate::color::Color;

const MITER_LIMIT: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RenderState {
    source: Color,
    line_width: f32,
    line_cap: LineCap,
    line_join: LineJoin,
    transform: Transform,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            source: Color::BLACK,
            line_width: 2.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            transform: Transform::identity(),
        }
    }
}

impl RenderState {
    fn create_paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(self.source.to_skia());
        paint.anti_alias = true;
        paint
    }

    fn stroke(&self) -> Stroke {
        Stroke {
            width: self.line_width,
            miter_limit: MITER_LIMIT,
            line_cap: self.line_cap.into(),
            line_join: self.line_join.into(),
            dash: None,
        }
    }
}

/// The mutable rendering state of a render target.
///
/// A context is recreated whenever its target replaces the pixel buffer, so
/// state never outlives the surface it was configured for.
#[derive(Debug, Clone, Default)]
pub struct Context {
    state_stack: Vec<RenderState>,
    current_state: RenderState,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Color {
        self.current_state.source
    }

    pub fn set_source(&mut self, color: impl Into<Color>) {
        self.current_state.source = color.into();
    }

    pub fn line_width(&self) -> f32 {
        self.current_state.line_width
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.current_state.line_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    }

    pub fn line_cap(&self) -> LineCap {
        self.current_state.line_cap
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.current_state.line_cap = cap;
    }

    pub fn line_join(&self) -> LineJoin {
        self.current_state.line_join
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.current_state.line_join = join;
    }

    pub fn transform(&self) -> Transform {
        self.current_state.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.current_state.transform = transform;
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.current_state.transform = self.current_state.transform.pre_translate(tx, ty);
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.current_state.transform = self.current_state.transform.pre_scale(sx, sy);
    }

    /// Rotates the user space by `radians`, clockwise on screen.
    pub fn rotate(&mut self, radians: f32) {
        self.current_state.transform = self
            .current_state
            .transform
            .pre_rotate(radians.to_degrees());
    }

    /// Loads color, stroke width, cap and join from per-call attributes.
    pub fn apply(&mut self, attrs: &DrawAttributes) {
        self.set_source(attrs.color());
        self.set_line_cap(attrs.line_cap());
        self.set_line_join(attrs.line_join());
        self.set_line_width(attrs.outline());
    }

    /// Pushes the current state.
    pub fn save(&mut self) {
        self.state_stack.push(self.current_state);
    }

    /// Pops the last saved state. Does nothing if the stack is empty.
    pub fn restore(&mut self) {
        if let Some(prev_state) = self.state_stack.pop() {
            self.current_state = prev_state;
        }
    }

    pub fn state_depth(&self) -> usize {
        self.state_stack.len()
    }

    /// Saves the state and returns a guard that restores it when dropped,
    /// including on early returns through `?`.
    pub fn snapshot(&mut self) -> Snapshot<'_> {
        self.save();
        Snapshot { context: self }
    }

    /// Fills `path` with the source color under the current transform.
    pub(crate) fn fill(&self, pixmap: &mut Pixmap, path: &Path) {
        let paint = self.current_state.create_paint();
        pixmap.fill_path(
            path,
            &paint,
            FillRule::Winding,
            self.current_state.transform,
            None,
        );
    }

    /// Strokes `path` with the source color and current stroke style.
    ///
    /// The stroke is expanded into its outline and filled, so thin lines
    /// cover exactly their geometric area instead of going through hairline
    /// rendering. A zero line width draws nothing.
    pub(crate) fn stroke(&self, pixmap: &mut Pixmap, path: &Path) {
        if self.current_state.line_width <= 0.0 {
            return;
        }
        let transform = self.current_state.transform;
        let res_scale = PathStroker::compute_resolution_scale(&transform);
        let Some(outline) = path.stroke(&self.current_state.stroke(), res_scale) else {
            return;
        };
        let paint = self.current_state.create_paint();
        pixmap.fill_path(&outline, &paint, FillRule::Winding, transform, None);
    }
}

/// Scoped save/restore of a [`Context`].
#[derive(Debug)]
pub struct Snapshot<'a> {
    context: &'a mut Context,
}

impl Deref for Snapshot<'_> {
    type Target = Context;

    fn deref(&self) -> &Context {
        self.context
    }
}

impl DerefMut for Snapshot<'_> {
    fn deref_mut(&mut self) -> &mut Context {
        self.context
    }
}

impl Drop for Snapshot<'_> {
    fn drop(&mut self) {
        self.context.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_restore() {
        let mut ctx = Context::new();
        ctx.set_source(Color::RED);
        ctx.save();
        ctx.set_source(Color::WHITE);
        ctx.translate(5.0, 5.0);
        assert_eq!(ctx.state_depth(), 1);
        ctx.restore();
        assert_eq!(ctx.source(), Color::RED);
        assert!(ctx.transform().is_identity());
        ctx.restore();
        assert_eq!(ctx.state_depth(), 0);
    }

    fn resolve_fails() -> Result<f32, ()> {
        Err(())
    }

    fn failing_draw(ctx: &mut Context) -> Result<(), ()> {
        let mut snap = ctx.snapshot();
        snap.set_line_width(9.0);
        snap.set_source(Color::YELLOW);
        let _x = resolve_fails()?;
        Ok(())
    }

    #[test]
    fn test_snapshot_restores_on_error_path() {
        let mut ctx = Context::new();
        ctx.set_line_width(3.0);
        assert!(failing_draw(&mut ctx).is_err());
        assert_eq!(ctx.line_width(), 3.0);
        assert_eq!(ctx.source(), Color::BLACK);
        assert_eq!(ctx.state_depth(), 0);
    }

    #[test]
    fn test_apply_attributes() {
        let mut ctx = Context::new();
        let attrs = DrawAttributes::new()
            .with_color(Color::RED)
            .with_outline(6.0)
            .with_line_cap(LineCap::Round);
        ctx.apply(&attrs);
        assert_eq!(ctx.source(), Color::RED);
        assert_eq!(ctx.line_width(), 6.0);
        assert_eq!(ctx.line_cap(), LineCap::Round);
        assert_eq!(ctx.line_join(), LineJoin::Miter);
    }

    #[test]
    fn test_zero_width_stroke_draws_nothing() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let mut ctx = Context::new();
        ctx.set_line_width(0.0);
        let path = tiny_skia::PathBuilder::from_rect(
            tiny_skia::Rect::from_xywh(2.0, 2.0, 5.0, 5.0).unwrap(),
        );
        ctx.stroke(&mut pixmap, &path);
        assert!(pixmap.data().iter().all(|&b| b == 0));
        ctx.fill(&mut pixmap, &path);
        assert_eq!(pixmap.pixel(4, 4).unwrap().alpha(), 255);
    }

    #[test]
    fn test_one_pixel_stroke_stays_on_its_band() {
        let mut pixmap = Pixmap::new(30, 30).unwrap();
        let mut ctx = Context::new();
        ctx.set_line_width(1.0);
        let path = crate::path::rectangle(5.5, 5.5, 9.0, 9.0).unwrap();
        ctx.stroke(&mut pixmap, &path);
        for i in 5..15 {
            assert_eq!(pixmap.pixel(5, i).unwrap().alpha(), 255, "left edge at y={i}");
            assert_eq!(pixmap.pixel(14, i).unwrap().alpha(), 255, "right edge at y={i}");
            assert_eq!(pixmap.pixel(i, 5).unwrap().alpha(), 255, "top edge at x={i}");
            assert_eq!(pixmap.pixel(i, 14).unwrap().alpha(), 255, "bottom edge at x={i}");
            assert_eq!(pixmap.pixel(4, i).unwrap().alpha(), 0, "outside at y={i}");
            assert_eq!(pixmap.pixel(15, i).unwrap().alpha(), 0, "outside at y={i}");
        }
        assert_eq!(pixmap.pixel(6, 10).unwrap().alpha(), 0);
        assert_eq!(pixmap.pixel(10, 10).unwrap().alpha(), 0);
    }
}
