//! Text blocks: wrapping, font-size fitting, alignment and glyph painting.

mod font;
mod layout;
mod render;

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::attributes::{DrawAttributes, LineJoin};
use crate::color::Color;
use crate::draw::Draw;
use crate::error::{DrawError, Result};
use crate::position::{Axis, IntoPosition, Position};

pub use font::Font;

/// Horizontal placement of each line inside the text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    Justified,
}

impl FromStr for Alignment {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Alignment::Left),
            "right" => Ok(Alignment::Right),
            "center" => Ok(Alignment::Center),
            "justified" => Ok(Alignment::Justified),
            other => Err(DrawError::InvalidAlignment(other.to_string())),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
            Alignment::Justified => "justified",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(all: f32) -> Self {
        Self::new(all, all, all, all)
    }

    fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Size of the box a text block consumed, padding included.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    pub width: f32,
    pub height: f32,
}

/// A block of text to be written onto a canvas.
///
/// Without a fixed font size, the largest size that fits the block's
/// maximum width and height is used. An unset maximum extends to the
/// surface edge.
///
/// # Example
/// ```no_run
/// use spotcanvas::{Alignment, Font, RenderTarget, TextBlock};
///
/// let font = Font::from_file("assets/DejaVuSans.ttf").unwrap();
/// let mut canvas = RenderTarget::new(400, 300, Default::default()).unwrap();
/// let block = TextBlock::new("Hello\nworld", font)
///     .at("center", "center")
///     .unwrap()
///     .with_max_size(200.0, 100.0)
///     .with_alignment(Alignment::Center);
/// let bounds = canvas.write(&block).unwrap();
/// assert!(bounds.width <= 200.0);
/// ```
#[derive(Debug, Clone)]
pub struct TextBlock {
    text: String,
    font: Font,
    x: Position,
    y: Position,
    font_size: Option<f32>,
    max_width: Option<f32>,
    max_height: Option<f32>,
    line_spacing: f32,
    alignment: Alignment,
    justify_last_line: bool,
    padding: Padding,
    color: Color,
    outline: f32,
    outline_color: Option<Color>,
    break_lines: bool,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, font: Font) -> Self {
        Self {
            text: text.into(),
            font,
            x: Position::default(),
            y: Position::default(),
            font_size: None,
            max_width: None,
            max_height: None,
            line_spacing: 1.0,
            alignment: Alignment::Left,
            justify_last_line: false,
            padding: Padding::default(),
            color: Color::BLACK,
            outline: 0.0,
            outline_color: None,
            break_lines: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn at(mut self, x: impl IntoPosition, y: impl IntoPosition) -> Result<Self> {
        self.x = x.into_position(Axis::X)?;
        self.y = y.into_position(Axis::Y)?;
        Ok(self)
    }

    pub fn with_position(mut self, x: impl Into<Position>, y: impl Into<Position>) -> Self {
        self.x = x.into();
        self.y = y.into();
        self
    }

    pub fn with_font_size(mut self, px: f32) -> Self {
        self.font_size = Some(px);
        self
    }

    pub fn with_max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_max_height(mut self, height: f32) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn with_max_size(self, width: f32, height: f32) -> Self {
        self.with_max_width(width).with_max_height(height)
    }

    /// Multiplier on the font's natural line height.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_justify_last_line(mut self, justify: bool) -> Self {
        self.justify_last_line = justify;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Glyph stroke width; 0 disables the stroke.
    pub fn with_outline(mut self, width: f32) -> Self {
        self.outline = width;
        self
    }

    pub fn with_outline_color(mut self, color: impl Into<Color>) -> Self {
        self.outline_color = Some(color.into());
        self
    }

    pub fn with_break_lines(mut self, break_lines: bool) -> Self {
        self.break_lines = break_lines;
        self
    }

    fn attributes(&self) -> DrawAttributes {
        DrawAttributes::new()
            .with_color(self.color)
            .with_fill(true)
            .with_outline(self.outline)
            .with_outline_color(self.outline_color.unwrap_or(self.color))
            .with_line_join(LineJoin::Round)
    }
}

/// Room left between a start position and the surface edge.
fn available(position: Position, surface_extent: f32) -> f32 {
    match position {
        Position::Numeric(v) => surface_extent - v,
        Position::Anchor(_) => surface_extent,
    }
}

/// Lays out and paints `block`, returning the consumed box.
pub(crate) fn write(draw: &mut Draw<'_>, block: &TextBlock) -> Result<TextBounds> {
    let (surface_w, surface_h) = draw.surface_size();
    let pad = block.padding;
    let max_width = block
        .max_width
        .unwrap_or_else(|| available(block.x, surface_w));
    let max_height = block
        .max_height
        .unwrap_or_else(|| available(block.y, surface_h));
    let content_max_w = (max_width - pad.horizontal()).max(0.0);
    let content_max_h = (max_height - pad.vertical()).max(0.0);

    let font_size = match block.font_size {
        Some(px) => px,
        None => layout::fit_font_size(
            &block.text,
            &block.font,
            content_max_w,
            content_max_h,
            block.break_lines,
            block.line_spacing,
        ),
    };
    let laid_out = layout::layout(
        &block.text,
        &block.font,
        font_size,
        content_max_w,
        block.break_lines,
        block.line_spacing,
    );

    let bounds = TextBounds {
        width: laid_out.width + pad.horizontal(),
        height: laid_out.height + pad.vertical(),
    };
    let x = block.x.resolve(surface_w, bounds.width, 0.0);
    let y = block.y.resolve(surface_h, bounds.height, 0.0);
    trace!(
        "text box=({x}, {y}, {}, {}) size={} lines={}",
        bounds.width,
        bounds.height,
        laid_out.font_size,
        laid_out.lines.len()
    );

    let path = render::block_path(
        &laid_out,
        &block.font,
        x + pad.left,
        y + pad.top,
        laid_out.width,
        block.alignment,
        block.justify_last_line,
    );
    draw.paint_shape(&block.attributes(), path);
    Ok(bounds)
}
