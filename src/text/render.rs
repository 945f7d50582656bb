//! Glyph outlines to vector paths.

use ab_glyph::{Font as _, GlyphId, OutlineCurve, ScaleFont as _};
use tiny_skia::{Path, PathBuilder};

use super::Alignment;
use super::font::Font;
use super::layout::{Line, TextLayout};

/// Builds one path holding every glyph of `layout`, with the content box's
/// top-left corner at `(x, y)` and lines aligned within `content_width`.
pub(crate) fn block_path(
    layout: &TextLayout,
    font: &Font,
    x: f32,
    y: f32,
    content_width: f32,
    alignment: Alignment,
    justify_last_line: bool,
) -> Option<Path> {
    let scaled = font.scaled(layout.font_size);
    let factor = scaled.scale_factor();
    let space_id = scaled.glyph_id(' ');
    let mut pb = PathBuilder::new();

    for (i, line) in layout.lines.iter().enumerate() {
        let baseline = y + layout.ascent + layout.advance * i as f32;
        let (start, gap_extra) = line_placement(line, content_width, alignment, justify_last_line);
        let mut caret = x + start;
        let mut prev: Option<GlyphId> = None;

        for ch in line.text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            if let Some(outline) = font.inner().outline(id) {
                let map = |p: ab_glyph::Point| {
                    (caret + p.x * factor.horizontal, baseline - p.y * factor.vertical)
                };
                push_outline(&mut pb, &outline.curves, map);
            }
            caret += scaled.h_advance(id);
            if id == space_id {
                caret += gap_extra;
            }
            prev = Some(id);
        }
    }

    pb.finish()
}

/// Horizontal start offset of a line and the extra width given to each
/// space when justifying.
fn line_placement(
    line: &Line,
    content_width: f32,
    alignment: Alignment,
    justify_last_line: bool,
) -> (f32, f32) {
    let slack = (content_width - line.width).max(0.0);
    match alignment {
        Alignment::Left => (0.0, 0.0),
        Alignment::Right => (slack, 0.0),
        Alignment::Center => (slack / 2.0, 0.0),
        Alignment::Justified => {
            let gaps = line.text.chars().filter(|&c| c == ' ').count();
            if gaps == 0 || (line.ends_paragraph && !justify_last_line) {
                (0.0, 0.0)
            } else {
                (0.0, slack / gaps as f32)
            }
        }
    }
}

/// Appends outline curves, starting a new closed contour whenever a curve
/// does not continue from the previous one.
fn push_outline(
    pb: &mut PathBuilder,
    curves: &[OutlineCurve],
    map: impl Fn(ab_glyph::Point) -> (f32, f32),
) {
    let mut last: Option<ab_glyph::Point> = None;
    for curve in curves {
        let start = match curve {
            OutlineCurve::Line(p0, _) | OutlineCurve::Quad(p0, _, _) | OutlineCurve::Cubic(p0, _, _, _) => *p0,
        };
        let continues = last.is_some_and(|p| p.x == start.x && p.y == start.y);
        if !continues {
            if last.is_some() {
                pb.close();
            }
            let (sx, sy) = map(start);
            pb.move_to(sx, sy);
        }
        match curve {
            OutlineCurve::Line(_, p1) => {
                let (x1, y1) = map(*p1);
                pb.line_to(x1, y1);
                last = Some(*p1);
            }
            OutlineCurve::Quad(_, p1, p2) => {
                let (x1, y1) = map(*p1);
                let (x2, y2) = map(*p2);
                pb.quad_to(x1, y1, x2, y2);
                last = Some(*p2);
            }
            OutlineCurve::Cubic(_, p1, p2, p3) => {
                let (x1, y1) = map(*p1);
                let (x2, y2) = map(*p2);
                let (x3, y3) = map(*p3);
                pb.cubic_to(x1, y1, x2, y2, x3, y3);
                last = Some(*p3);
            }
        }
    }
    if last.is_some() {
        pb.close();
    }
}
