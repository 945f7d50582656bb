use crate::color::Color;

/// How the ends of open stroked segments are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineCap {
    Butt,
    Round,
    #[default]
    Square,
}

impl From<LineCap> for tiny_skia::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        }
    }
}

/// How corners between stroked segments are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl From<LineJoin> for tiny_skia::LineJoin {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        }
    }
}

/// Per-call styling for shape operations.
///
/// The outline is stroked centered on the path, and shapes are shrunk by
/// the outline width so that fill plus stroke covers exactly the requested
/// box.
///
/// ```
/// use spotcanvas::{Color, DrawAttributes};
///
/// let attrs = DrawAttributes::new()
///     .with_color(Color::RED)
///     .with_outline(4.0)
///     .with_outline_color(Color::BLACK);
/// assert_eq!(attrs.outline_color(), Color::BLACK);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawAttributes {
    color: Color,
    fill: bool,
    outline: f32,
    outline_color: Option<Color>,
    line_cap: LineCap,
    line_join: LineJoin,
}

impl Default for DrawAttributes {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            fill: true,
            outline: 1.0,
            outline_color: None,
            line_cap: LineCap::Square,
            line_join: LineJoin::Miter,
        }
    }
}

impl DrawAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn fill(&self) -> bool {
        self.fill
    }

    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    /// Outline (stroke) width in pixels. Never negative.
    pub fn outline(&self) -> f32 {
        self.outline
    }

    pub fn with_outline(mut self, outline: f32) -> Self {
        self.outline = if outline.is_finite() {
            outline.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Alias of [`DrawAttributes::with_outline`].
    pub fn with_line_width(self, width: f32) -> Self {
        self.with_outline(width)
    }

    /// Outline color; falls back to the fill color when unset.
    pub fn outline_color(&self) -> Color {
        self.outline_color.unwrap_or(self.color)
    }

    pub fn with_outline_color(mut self, color: impl Into<Color>) -> Self {
        self.outline_color = Some(color.into());
        self
    }

    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    pub fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    pub fn line_join(&self) -> LineJoin {
        self.line_join
    }

    pub fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }
}
