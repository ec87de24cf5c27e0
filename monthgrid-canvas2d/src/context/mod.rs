//! Raster drawing context.

mod drawing;
mod image_ops;
mod path_ops;
mod text_rendering;
mod transform;

use crate::drawing_state::DrawingState;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::font_config::FontDatabase;
use crate::geometry::CanvasColor;
use crate::style::FillStyle;
use cosmic_text::{FontSystem, SwashCache};
use tiny_skia::Pixmap;

/// Largest backing dimension accepted, in device pixels.
const MAX_DIMENSION: u32 = 32767;

/// A resizable RGBA surface with a save/restore state stack.
///
/// Paths are accumulated in device space: every point is mapped through the
/// current transform when it is added, so later transform changes never move
/// geometry that is already on the path.
pub struct Canvas2dContext {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) pixmap: Pixmap,
    pub(crate) font_system: FontSystem,
    pub(crate) swash_cache: SwashCache,
    pub(crate) state: DrawingState,
    saved: Vec<DrawingState>,
    pub(crate) path_builder: tiny_skia::PathBuilder,
    pub(crate) hinting_enabled: bool,
}

impl Canvas2dContext {
    /// Create a transparent surface drawing text with `fonts`.
    ///
    /// The font database is cloned, never rescanned.
    pub fn with_fonts(width: u32, height: u32, fonts: &FontDatabase) -> Canvas2dResult<Self> {
        let font_system =
            FontSystem::new_with_locale_and_db("en".to_string(), fonts.fontdb.clone());
        Ok(Self {
            width,
            height,
            pixmap: allocate(width, height)?,
            font_system,
            swash_cache: SwashCache::new(),
            state: DrawingState::default(),
            saved: Vec::new(),
            path_builder: tiny_skia::PathBuilder::new(),
            hinting_enabled: fonts.hinting_enabled,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change the backing size of the surface.
    ///
    /// Pixels and drawing state are discarded even when the size is
    /// unchanged. On error the surface keeps its old size and contents.
    pub fn resize(&mut self, width: u32, height: u32) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "resize {width}x{height}");
        if (width, height) != (self.width, self.height) {
            self.pixmap = allocate(width, height)?;
            self.width = width;
            self.height = height;
        }
        self.reset();
        Ok(())
    }

    pub fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    /// Pop the last saved state. A restore without a matching save is ignored.
    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.state = state,
            None => log::debug!(target: "canvas", "restore with empty stack"),
        }
    }

    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Transparent pixels, default state, empty stack and path.
    pub fn reset(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.state = DrawingState::default();
        self.saved.clear();
        self.path_builder = tiny_skia::PathBuilder::new();
    }

    /// Fill with a CSS color string such as `"#3b82f6"` or `"rgba(0,0,0,.5)"`.
    pub fn set_fill_style(&mut self, css: &str) -> Canvas2dResult<()> {
        self.state.fill_style = FillStyle::Color(parse_color(css)?);
        Ok(())
    }

    pub fn set_fill_style_color(&mut self, color: CanvasColor) {
        self.state.fill_style = FillStyle::Color(color.into());
    }

    /// Stroke with a CSS color string.
    pub fn set_stroke_style(&mut self, css: &str) -> Canvas2dResult<()> {
        self.state.stroke_style = FillStyle::Color(parse_color(css)?);
        Ok(())
    }

    pub fn set_stroke_style_color(&mut self, color: CanvasColor) {
        self.state.stroke_style = FillStyle::Color(color.into());
    }

    /// Line width in user units. Zero, negative and non-finite widths are
    /// ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }
}

fn allocate(width: u32, height: u32) -> Canvas2dResult<Pixmap> {
    let in_range = |d: u32| (1..=MAX_DIMENSION).contains(&d);
    if !in_range(width) || !in_range(height) {
        return Err(Canvas2dError::InvalidDimensions { width, height });
    }
    Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })
}

pub(crate) fn parse_color(css: &str) -> Canvas2dResult<tiny_skia::Color> {
    let [r, g, b, a] = csscolorparser::parse(css)
        .map_err(|e| Canvas2dError::ColorParseError(format!("{css}: {e}")))?
        .to_array();
    tiny_skia::Color::from_rgba(r, g, b, a)
        .ok_or_else(|| Canvas2dError::ColorParseError(format!("{css}: out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_config::FontConfig;
    use crate::geometry::RectParams;

    fn no_fonts() -> FontDatabase {
        FontConfig {
            load_system_fonts: false,
            ..Default::default()
        }
        .load()
    }

    fn small_context(width: u32, height: u32) -> Canvas2dContext {
        Canvas2dContext::with_fonts(width, height, &no_fonts()).unwrap()
    }

    #[test]
    fn test_new_context_defaults() {
        let ctx = small_context(200, 150);
        assert_eq!(ctx.width(), 200);
        assert_eq!(ctx.height(), 150);
        assert_eq!(ctx.state.line_width, 1.0);
        assert!(ctx.state.clip_paths.is_empty());
        assert!(ctx.pixmap.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Canvas2dContext::with_fonts(0, 100, &no_fonts()),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas2dContext::with_fonts(100, 40000, &no_fonts()),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_line_width_ignore_invalid() {
        let mut ctx = small_context(10, 10);
        ctx.set_line_width(5.0);
        ctx.set_line_width(-1.0);
        ctx.set_line_width(0.0);
        ctx.set_line_width(f32::NAN);
        assert_eq!(ctx.state.line_width, 5.0);
    }

    #[test]
    fn test_save_restore() {
        let mut ctx = small_context(10, 10);
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.save();
        ctx.set_fill_style("#00ff00").unwrap();
        ctx.scale(2.0, 2.0);
        assert_eq!(ctx.save_depth(), 1);
        ctx.restore();
        assert_eq!(ctx.save_depth(), 0);
        assert_eq!(
            ctx.state.fill_style,
            FillStyle::Color(tiny_skia::Color::from_rgba8(255, 0, 0, 255))
        );
        assert!(ctx.state.transform.is_identity());

        // Unbalanced restore is a no-op
        ctx.restore();
        assert_eq!(ctx.save_depth(), 0);
    }

    #[test]
    fn test_resize_clears_pixels_and_state() {
        let mut ctx = small_context(10, 10);
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.scale(3.0, 3.0);
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        });
        ctx.resize(20, 5).unwrap();
        assert_eq!((ctx.width(), ctx.height()), (20, 5));
        assert!(ctx.pixmap.data().iter().all(|&b| b == 0));
        assert!(ctx.state.transform.is_identity());
        assert_eq!(ctx.state.fill_style, FillStyle::default());
    }

    #[test]
    fn test_resize_rejects_zero() {
        let mut ctx = small_context(10, 10);
        assert!(ctx.resize(0, 10).is_err());
        assert_eq!(ctx.width(), 10);
    }

    #[test]
    fn test_invalid_color() {
        let mut ctx = small_context(10, 10);
        assert!(matches!(
            ctx.set_fill_style("not-a-color"),
            Err(Canvas2dError::ColorParseError(_))
        ));
    }
}
