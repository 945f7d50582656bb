//! Spotcanvas - vector drawing with symbolic positions on a CPU canvas.
//!
//! Shapes, text blocks and pasted images are placed with numeric offsets or
//! with the anchors `left`/`center`/`right` and `top`/`center`/`bottom`.
//! Outlines are centered on the shape edge and counted in the requested
//! size, so a 100px square with a 4px outline covers exactly 100px.
//!
//! # Example
//! ```no_run
//! use spotcanvas::{Color, DrawAttributes, PasteOptions, PdfOptions, PixelFormat, RenderTarget};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut canvas = RenderTarget::new(600, 800, PixelFormat::Argb32)?;
//!     canvas.set_background(Color::WHITE)?;
//!
//!     let attrs = DrawAttributes::new()
//!         .with_color(Color::RED)
//!         .with_outline(4.0)
//!         .with_outline_color(Color::BLACK);
//!     canvas.draw().rectangle("center", "top", 200.0, 100.0, &attrs)?;
//!     canvas.draw().dot("right", "bottom", 30.0, &attrs)?;
//!
//!     let mut badge = RenderTarget::new(50, 50, PixelFormat::Argb32)?;
//!     badge.set_background(Color::YELLOW)?;
//!     canvas.paste(&badge, &PasteOptions::at("left", "center")?.with_size(100.0, 100.0));
//!
//!     canvas.write_png("out.png")?;
//!     canvas.write_pdf("out.pdf", &PdfOptions::default())?;
//!     Ok(())
//! }
//! ```

mod attributes;
mod color;
mod composite;
mod config;
mod context;
mod draw;
mod error;
mod export;
mod path;
mod position;
mod raster;
mod surface;
mod target;
mod text;

pub use attributes::{DrawAttributes, LineCap, LineJoin};
pub use color::Color;
pub use composite::{PasteOptions, ScalingMode};
pub use config::{CanvasConfig, PdfOptions};
pub use context::{Context, Snapshot};
pub use draw::Draw;
pub use error::{DrawError, Result};
pub use position::{Anchor, Axis, IntoPosition, Position, ResolvedBox, resolve_axis, resolve_box};
pub use raster::{ChannelLayout, RasterImage, RawRaster, synthesized_alpha};
pub use surface::{PixelFormat, Surface};
pub use target::RenderTarget;
pub use text::{Alignment, Font, Padding, TextBlock, TextBounds};
