//! Font loading.

use std::path::Path;

use ab_glyph::{Font as _, FontArc, PxScale, PxScaleFont, ScaleFont as _};

use crate::error::{DrawError, Result};

/// A parsed TrueType/OpenType font, cheap to clone.
#[derive(Clone, Debug)]
pub struct Font {
    inner: FontArc,
}

impl Font {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let inner = FontArc::try_from_vec(bytes).map_err(|e| DrawError::Font(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn from_static(bytes: &'static [u8]) -> Result<Self> {
        let inner = FontArc::try_from_slice(bytes).map_err(|e| DrawError::Font(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("Failed to load font from {}: {}", path.display(), e))?;
        Ok(Self::from_bytes(bytes)?)
    }

    pub(crate) fn scaled(&self, px_size: f32) -> PxScaleFont<&FontArc> {
        self.inner.as_scaled(PxScale::from(px_size.max(1.0)))
    }

    pub(crate) fn inner(&self) -> &FontArc {
        &self.inner
    }

    /// Distance between consecutive baselines at `px_size`, before line
    /// spacing is applied.
    pub fn line_height(&self, px_size: f32) -> f32 {
        let scaled = self.scaled(px_size);
        scaled.ascent() - scaled.descent() + scaled.line_gap()
    }
}
