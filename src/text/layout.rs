//! Line breaking, measurement and font-size fitting.

use ab_glyph::{FontArc, GlyphId, PxScaleFont, ScaleFont as _};

use super::font::Font;

type Scaled<'a> = PxScaleFont<&'a FontArc>;

/// Steps of the font-size bisection; enough to pin the size well below a
/// hundredth of a pixel on any realistic canvas.
const FIT_ITERATIONS: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Line {
    pub text: String,
    pub width: f32,
    /// Last line of a `\n`-separated paragraph.
    pub ends_paragraph: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextLayout {
    pub font_size: f32,
    pub lines: Vec<Line>,
    /// Widest line.
    pub width: f32,
    pub height: f32,
    pub ascent: f32,
    /// Baseline-to-baseline distance, line spacing included.
    pub advance: f32,
}

impl TextLayout {
    pub fn fits(&self, max_width: f32, max_height: f32) -> bool {
        self.width <= max_width && self.height <= max_height
    }
}

/// Width of `line` with kerning.
pub(crate) fn measure_line_width(line: &str, scaled: &Scaled<'_>) -> f32 {
    let mut width = 0.0f32;
    let mut prev: Option<GlyphId> = None;

    for ch in line.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(p) = prev {
            width += scaled.kern(p, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }

    width
}

/// Greedy word wrap of one paragraph. Words wider than `max_width` are
/// broken between characters.
pub(crate) fn wrap_paragraph(paragraph: &str, scaled: &Scaled<'_>, max_width: f32) -> Vec<String> {
    if max_width <= 0.0 {
        return vec![paragraph.to_string()];
    }

    let space_id = scaled.glyph_id(' ');
    let space_width = scaled.h_advance(space_id);
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0.0f32;
    let mut prev: Option<GlyphId> = None;

    for word in paragraph.split_whitespace() {
        let word_width = measure_line_width(word, scaled);

        if !current_line.is_empty() {
            let joined = match prev {
                Some(p) => scaled.kern(p, space_id) + space_width + word_width,
                None => space_width + word_width,
            };
            if current_width + joined <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
                current_width += joined;
                prev = word.chars().last().map(|ch| scaled.glyph_id(ch));
                continue;
            }
            lines.push(std::mem::take(&mut current_line));
        }

        if word_width <= max_width {
            current_line.push_str(word);
            current_width = word_width;
            prev = word.chars().last().map(|ch| scaled.glyph_id(ch));
            continue;
        }

        // Break the word character by character; the tail stays open so
        // following words can join it.
        let mut char_prev: Option<GlyphId> = None;
        current_width = 0.0;
        for ch in word.chars() {
            let id = scaled.glyph_id(ch);
            let char_w = match char_prev {
                Some(p) => scaled.kern(p, id) + scaled.h_advance(id),
                None => scaled.h_advance(id),
            };
            if !current_line.is_empty() && current_width + char_w > max_width {
                lines.push(std::mem::take(&mut current_line));
                current_width = scaled.h_advance(id);
            } else {
                current_width += char_w;
            }
            current_line.push(ch);
            char_prev = Some(id);
        }
        prev = char_prev;
    }

    if !current_line.is_empty() || lines.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Lays `text` out at `font_size`. Explicit `\n` always breaks; with
/// `break_lines` paragraphs are also wrapped at `max_width`.
pub(crate) fn layout(
    text: &str,
    font: &Font,
    font_size: f32,
    max_width: f32,
    break_lines: bool,
    line_spacing: f32,
) -> TextLayout {
    let scaled = font.scaled(font_size);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let wrapped = if break_lines {
            wrap_paragraph(paragraph, &scaled, max_width)
        } else {
            vec![paragraph.to_string()]
        };
        let count = wrapped.len();
        lines.extend(wrapped.into_iter().enumerate().map(|(i, text)| Line {
            width: measure_line_width(&text, &scaled),
            text,
            ends_paragraph: i + 1 == count,
        }));
    }

    let line_height = font.line_height(font_size);
    let advance = line_height * line_spacing;
    let width = lines.iter().map(|l| l.width).fold(0.0f32, f32::max);
    let height = match lines.len() {
        0 => 0.0,
        n => line_height + advance * (n - 1) as f32,
    };

    TextLayout {
        font_size: font_size.max(1.0),
        lines,
        width,
        height,
        ascent: scaled.ascent(),
        advance,
    }
}

/// Finds the largest font size in `[1, max_height]` whose layout fits the
/// box, by bisection. Falls back to size 1 when nothing fits.
pub(crate) fn fit_font_size(
    text: &str,
    font: &Font,
    max_width: f32,
    max_height: f32,
    break_lines: bool,
    line_spacing: f32,
) -> f32 {
    let fits = |size: f32| {
        layout(text, font, size, max_width, break_lines, line_spacing).fits(max_width, max_height)
    };

    let mut lo = 1.0f32;
    let mut hi = max_height.max(1.0);
    if fits(hi) {
        return hi;
    }
    for _ in 0..FIT_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}
