use crate::error::{DrawError, Result};

/// An 8-bit, non-premultiplied RGBA color.
///
/// Colors are usually built from 3- or 4-element arrays or tuples; an RGB
/// triple is fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a color from a component slice of length 3 (RGB) or 4 (RGBA).
    ///
    /// # Errors
    /// Returns [`DrawError::InvalidColor`] for any other length.
    pub fn from_slice(components: &[u8]) -> Result<Self> {
        match *components {
            [r, g, b] => Ok(Self::rgb(r, g, b)),
            [r, g, b, a] => Ok(Self::rgba(r, g, b, a)),
            _ => Err(DrawError::InvalidColor(components.len())),
        }
    }

    /// Returns `[r, g, b, a]` scaled into `0.0..=1.0`, not premultiplied.
    pub fn normalize(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    pub(crate) fn from_premultiplied(px: tiny_skia::PremultipliedColorU8) -> Self {
        let c = px.demultiply();
        Self::rgba(c.red(), c.green(), c.blue(), c.alpha())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl TryFrom<&[u8]> for Color {
    type Error = DrawError;

    fn try_from(components: &[u8]) -> Result<Self> {
        Self::from_slice(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_triple_is_opaque() {
        let c = Color::from_slice(&[10, 20, 30]).unwrap();
        assert_eq!(c, Color::rgba(10, 20, 30, 255));
        assert!(c.is_opaque());
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        assert_eq!(Color::from_slice(&[1, 2]), Err(DrawError::InvalidColor(2)));
        assert_eq!(
            Color::from_slice(&[1, 2, 3, 4, 5]),
            Err(DrawError::InvalidColor(5))
        );
        assert!(Color::try_from(&[][..]).is_err());
    }

    #[test]
    fn test_normalize() {
        let [r, g, b, a] = Color::rgba(255, 0, 51, 0).normalize();
        assert_eq!((r, g, b, a), (1.0, 0.0, 0.2, 0.0));
        assert_eq!(Color::from([0, 0, 0]).normalize()[3], 1.0);
    }
}
