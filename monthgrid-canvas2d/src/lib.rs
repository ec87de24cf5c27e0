//! Pure Rust 2D raster surface used by the monthgrid renderer.
//!
//! This crate provides the small subset of the Canvas 2D drawing model that a
//! month calendar needs, without a browser or JavaScript runtime. It uses:
//! - `tiny-skia` for 2D graphics rendering
//! - `cosmic-text` for text shaping and glyph outlines
//! - `fontdb` for the font database (loaded once, cloned per surface)
//!
//! # Example
//!
//! ```rust,ignore
//! use monthgrid_canvas2d::{Canvas2dContext, FontConfig, RectParams};
//!
//! let fonts = FontConfig::default().load();
//! let mut ctx = Canvas2dContext::with_fonts(400, 300, &fonts)?;
//! ctx.set_fill_style("#ff0000")?;
//! ctx.fill_rect(&RectParams { x: 10.0, y: 10.0, width: 100.0, height: 50.0 });
//! let png_data = ctx.to_png(None)?;
//! ```

mod context;
mod drawing_state;
mod error;
mod font_config;
mod geometry;
mod style;
mod text;

// Re-export public API
pub use context::Canvas2dContext;
pub use error::{Canvas2dError, Canvas2dResult};
pub use font_config::{CustomFont, FontConfig, FontDatabase};
pub use geometry::{CanvasColor, RectParams, RoundRectParams};
pub use style::{FillStyle, FontSpec, FontWeight, TextAlign, TextBaseline};
pub use text::TextMetrics;
