//! Path builders for the shape primitives.
//!
//! Angles are in radians and increase clockwise on screen (y points down).
//! Arcs are approximated with cubic segments of at most a quarter turn.

use std::f32::consts::{FRAC_PI_2, TAU};

use tiny_skia::{Path, PathBuilder, Point};

/// Appends an elliptical arc around `(cx, cy)` from `start` to `end`.
///
/// If the builder already has a current point, a straight segment joins it
/// to the start of the arc; otherwise a new contour starts there. An `end`
/// smaller than `start` is pushed forward by whole turns.
pub fn arc_to(pb: &mut PathBuilder, cx: f32, cy: f32, rx: f32, ry: f32, start: f32, end: f32) {
    let mut end = end;
    while end < start {
        end += TAU;
    }

    let point = |angle: f32| Point::from_xy(cx + rx * angle.cos(), cy + ry * angle.sin());
    let first = point(start);
    if pb.is_empty() {
        pb.move_to(first.x, first.y);
    } else {
        pb.line_to(first.x, first.y);
    }

    let sweep = end - start;
    if sweep <= 0.0 {
        return;
    }
    let segments = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / segments as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let mut a0 = start;
    for _ in 0..segments {
        let a1 = a0 + step;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        pb.cubic_to(
            cx + rx * (c0 - k * s0),
            cy + ry * (s0 + k * c0),
            cx + rx * (c1 + k * s1),
            cy + ry * (s1 - k * c1),
            cx + rx * c1,
            cy + ry * s1,
        );
        a0 = a1;
    }
}

/// A closed ellipse centered at `(cx, cy)`. `None` when either radius is
/// not positive.
pub fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32) -> Option<Path> {
    if !(rx > 0.0 && ry > 0.0) {
        return None;
    }
    let mut pb = PathBuilder::new();
    arc_to(&mut pb, cx, cy, rx, ry, 0.0, TAU);
    pb.close();
    pb.finish()
}

pub fn circle(cx: f32, cy: f32, radius: f32) -> Option<Path> {
    ellipse(cx, cy, radius, radius)
}

/// An axis-aligned rectangle traced clockwise from its top-left corner.
pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x, y);
    pb.line_to(x + width, y);
    pb.line_to(x + width, y + height);
    pb.line_to(x, y + height);
    pb.close();
    pb.finish()
}

/// A rectangle with circular corners of `radius`.
///
/// Corners are traced bottom-right, bottom-left, top-left, top-right, each
/// a quarter arc, with straight edges implied between them.
pub fn rounded_rectangle(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Option<Path> {
    let corners = [
        (x + width - radius, y + height - radius),
        (x + radius, y + height - radius),
        (x + radius, y + radius),
        (x + width - radius, y + radius),
    ];
    let mut pb = PathBuilder::new();
    for (i, (cx, cy)) in corners.into_iter().enumerate() {
        let start = (i % 4) as f32 * FRAC_PI_2;
        let end = ((i + 1) % 4) as f32 * FRAC_PI_2;
        arc_to(&mut pb, cx, cy, radius, radius, start, end);
    }
    pb.close();
    pb.finish()
}

/// A closed polygon through `points`. `None` for an empty slice.
pub fn polygon(points: &[(f32, f32)]) -> Option<Path> {
    let (&(x0, y0), rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    for &(x, y) in rest {
        pb.line_to(x, y);
    }
    pb.close();
    pb.finish()
}

/// A single open segment.
pub fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x1, y1);
    pb.line_to(x2, y2);
    pb.finish()
}
