//! Symbolic and numeric positions, and their resolution to pixel offsets.

use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::error::{DrawError, Result};

/// The axis a position is resolved along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The accepted symbolic tokens, in start/center/end order.
    pub fn tokens(self) -> &'static str {
        match self {
            Axis::X => "'left', 'center' or 'right'",
            Axis::Y => "'top', 'center' or 'bottom'",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// A symbolic anchor along one axis.
///
/// `Start` is left/top, `End` is right/bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Start,
    Center,
    End,
}

impl Anchor {
    /// Parses an axis token (`left`/`center`/`right` for x,
    /// `top`/`center`/`bottom` for y).
    pub fn parse(axis: Axis, token: &str) -> Result<Self> {
        match (axis, token) {
            (Axis::X, "left") | (Axis::Y, "top") => Ok(Anchor::Start),
            (_, "center") => Ok(Anchor::Center),
            (Axis::X, "right") | (Axis::Y, "bottom") => Ok(Anchor::End),
            _ => Err(DrawError::InvalidPosition {
                axis,
                token: token.to_string(),
            }),
        }
    }
}

/// One coordinate component: a pixel offset or a symbolic anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    Numeric(f32),
    Anchor(Anchor),
}

impl Position {
    pub const LEFT: Position = Position::Anchor(Anchor::Start);
    pub const TOP: Position = Position::Anchor(Anchor::Start);
    pub const CENTER: Position = Position::Anchor(Anchor::Center);
    pub const RIGHT: Position = Position::Anchor(Anchor::End);
    pub const BOTTOM: Position = Position::Anchor(Anchor::End);

    /// Parses a horizontal position: a number or `left`/`center`/`right`.
    pub fn x(token: &str) -> Result<Self> {
        Self::parse(Axis::X, token)
    }

    /// Parses a vertical position: a number or `top`/`center`/`bottom`.
    pub fn y(token: &str) -> Result<Self> {
        Self::parse(Axis::Y, token)
    }

    pub fn parse(axis: Axis, token: &str) -> Result<Self> {
        let token = token.trim();
        if let Ok(v) = token.parse::<f32>() {
            if v.is_finite() {
                return Ok(Position::Numeric(v));
            }
        }
        Anchor::parse(axis, token).map(Position::Anchor)
    }

    /// Resolves this position to an absolute offset along one axis.
    ///
    /// `shape_extent` is the shape's size along the axis after the outline
    /// adjustment; `outline` is the full outline width.
    pub fn resolve(self, surface_extent: f32, shape_extent: f32, outline: f32) -> f32 {
        match self {
            Position::Numeric(v) => v + outline / 2.0,
            Position::Anchor(Anchor::Start) => outline / 2.0,
            Position::Anchor(Anchor::Center) => (surface_extent - shape_extent) / 2.0,
            Position::Anchor(Anchor::End) => surface_extent - (shape_extent + outline / 2.0),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::Numeric(0.0)
    }
}

impl From<Anchor> for Position {
    fn from(anchor: Anchor) -> Self {
        Position::Anchor(anchor)
    }
}

/// Non-finite values fall back to `0` with a warning; drawing calls reject
/// them through [`IntoPosition`] instead.
impl From<f32> for Position {
    fn from(value: f32) -> Self {
        if value.is_finite() {
            Position::Numeric(value)
        } else {
            warn!("non-finite position {value} replaced with 0");
            Position::Numeric(0.0)
        }
    }
}

impl From<f64> for Position {
    fn from(value: f64) -> Self {
        Position::from(value as f32)
    }
}

impl From<i32> for Position {
    fn from(value: i32) -> Self {
        Position::Numeric(value as f32)
    }
}

impl From<u32> for Position {
    fn from(value: u32) -> Self {
        Position::Numeric(value as f32)
    }
}

/// Parses axis-agnostic input: numbers, `center`, and the unambiguous
/// tokens `left`/`top` (start) and `right`/`bottom` (end).
impl FromStr for Position {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "top" => Ok(Position::TOP),
            "bottom" => Ok(Position::BOTTOM),
            other => Position::x(other),
        }
    }
}

/// Values accepted wherever a drawing call takes a coordinate: numbers,
/// anchors, parsed positions and axis tokens such as `"center"`.
pub trait IntoPosition {
    fn into_position(self, axis: Axis) -> Result<Position>;
}

impl IntoPosition for Position {
    fn into_position(self, _axis: Axis) -> Result<Position> {
        Ok(self)
    }
}

impl IntoPosition for Anchor {
    fn into_position(self, _axis: Axis) -> Result<Position> {
        Ok(Position::Anchor(self))
    }
}

impl IntoPosition for &str {
    fn into_position(self, axis: Axis) -> Result<Position> {
        Position::parse(axis, self)
    }
}

impl IntoPosition for String {
    fn into_position(self, axis: Axis) -> Result<Position> {
        Position::parse(axis, &self)
    }
}

macro_rules! numeric_into_position {
    ($($t:ty),*) => {
        $(
            impl IntoPosition for $t {
                fn into_position(self, _axis: Axis) -> Result<Position> {
                    Ok(Position::from(self))
                }
            }
        )*
    };
}

numeric_into_position!(i32, u32);

macro_rules! float_into_position {
    ($($t:ty),*) => {
        $(
            impl IntoPosition for $t {
                fn into_position(self, axis: Axis) -> Result<Position> {
                    let v = self as f32;
                    if !v.is_finite() {
                        return Err(DrawError::InvalidPosition {
                            axis,
                            token: self.to_string(),
                        });
                    }
                    Ok(Position::Numeric(v))
                }
            }
        )*
    };
}

float_into_position!(f32, f64);

/// Resolves one axis for a shape of `shape_extent` on a surface of
/// `surface_extent`, with a stroke of `outline` drawn about the path.
pub fn resolve_axis(
    value: Position,
    surface_extent: f32,
    shape_extent: f32,
    outline: f32,
) -> f32 {
    value.resolve(surface_extent, shape_extent, outline)
}

/// A resolved, outline-adjusted box: top-left corner plus the path size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Shrinks `width`/`height` by the full outline, then resolves `x`/`y`
/// against the surface size.
///
/// The stroke is centered on the returned path, so fill plus stroke covers
/// exactly the requested `width` x `height`.
pub fn resolve_box(
    x: Position,
    y: Position,
    width: f32,
    height: f32,
    outline: f32,
    surface_size: (f32, f32),
) -> ResolvedBox {
    let width = width - outline;
    let height = height - outline;
    ResolvedBox {
        x: x.resolve(surface_size.0, width, outline),
        y: y.resolve(surface_size.1, height, outline),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_without_outline_is_identity() {
        for v in [-12.5f32, 0.0, 3.0, 599.0] {
            assert_eq!(resolve_axis(Position::from(v), 600.0, 40.0, 0.0), v);
        }
    }

    #[test]
    fn test_outline_offsets() {
        assert_eq!(Position::from(10).resolve(600.0, 90.0, 10.0), 15.0);
        assert_eq!(Position::LEFT.resolve(600.0, 90.0, 10.0), 5.0);
        assert_eq!(Position::RIGHT.resolve(600.0, 90.0, 10.0), 505.0);
        assert_eq!(Position::CENTER.resolve(600.0, 90.0, 10.0), 255.0);
    }

    #[test]
    fn test_center_is_symmetric() {
        let (extent, shape) = (800.0f32, 123.0f32);
        let start = Position::CENTER.resolve(extent, shape, 0.0);
        let end = start + shape;
        assert!((start - (extent - end)).abs() < 1e-4);
    }

    #[test]
    fn test_box_footprint_matches_request() {
        let b = resolve_box(Position::from(0), Position::from(0), 100.0, 50.0, 8.0, (600.0, 800.0));
        assert_eq!(b.x - 4.0, 0.0);
        assert_eq!(b.y - 4.0, 0.0);
        assert_eq!(b.x + b.width + 4.0, 100.0);
        assert_eq!(b.y + b.height + 4.0, 50.0);

        let b = resolve_box(Position::RIGHT, Position::BOTTOM, 100.0, 50.0, 8.0, (600.0, 800.0));
        assert_eq!(b.x + b.width + 4.0, 600.0);
        assert_eq!(b.y + b.height + 4.0, 800.0);
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(Position::x("left").unwrap(), Position::LEFT);
        assert_eq!(Position::y("bottom").unwrap(), Position::BOTTOM);
        assert_eq!(Position::y("center").unwrap(), Position::CENTER);
        assert_eq!(Position::x(" 42.5 ").unwrap(), Position::Numeric(42.5));
        assert_eq!("top".parse::<Position>().unwrap(), Position::TOP);
    }

    #[test]
    fn test_parse_rejects_wrong_axis_tokens() {
        let err = Position::x("top").unwrap_err();
        assert_eq!(
            err,
            DrawError::InvalidPosition {
                axis: Axis::X,
                token: "top".to_string()
            }
        );
        assert!(Position::y("left").is_err());
        assert!(Position::x("middle").is_err());
        assert!("NaN".parse::<Position>().is_err());
        assert!(err.to_string().contains("'left', 'center' or 'right'"));
    }

    #[test]
    fn test_into_position_uses_axis_vocabulary() {
        assert_eq!("bottom".into_position(Axis::Y).unwrap(), Position::BOTTOM);
        assert!("bottom".into_position(Axis::X).is_err());
        assert_eq!(7u32.into_position(Axis::X).unwrap(), Position::Numeric(7.0));
        assert_eq!(Anchor::Center.into_position(Axis::Y).unwrap(), Position::CENTER);
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        assert_eq!(
            f32::NAN.into_position(Axis::X),
            Err(DrawError::InvalidPosition {
                axis: Axis::X,
                token: "NaN".to_string()
            })
        );
        assert!(f32::INFINITY.into_position(Axis::Y).is_err());
        assert!(1e300f64.into_position(Axis::X).is_err());
        assert_eq!(2.5f64.into_position(Axis::Y).unwrap(), Position::Numeric(2.5));
        assert_eq!(Position::from(f32::NEG_INFINITY), Position::Numeric(0.0));
    }
}
