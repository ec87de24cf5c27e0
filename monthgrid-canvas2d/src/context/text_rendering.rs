use super::drawing::paint_for;
use super::Canvas2dContext;
use crate::style::{FontSpec, TextAlign, TextBaseline};
use crate::text::{calculate_text_x_offset, calculate_text_y_offset, metrics_of, TextMetrics};
use cosmic_text::{CacheKeyFlags, Command};
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Set the current font.
    pub fn set_font(&mut self, font: FontSpec) {
        log::debug!(target: "canvas", "font {:?} {} {}px", font.families, font.weight.value(), font.size_px);
        self.state.font = font;
    }

    /// Set the text alignment.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    /// Set the text baseline.
    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    /// Measure text with the current font.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        crate::text::measure_text(&mut self.font_system, text, &self.state.font)
    }

    /// Fill text at the given anchor using the current font, alignment,
    /// baseline and fill style.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);
        if text.is_empty() {
            return;
        }

        let flags = if self.hinting_enabled {
            CacheKeyFlags::empty()
        } else {
            CacheKeyFlags::DISABLE_HINTING
        };
        let font = self.state.font.clone();
        let Some(buffer) = crate::text::shape(&mut self.font_system, text, &font, flags) else {
            log::warn!(target: "canvas", "no font faces loaded, skipping text {text:?}");
            return;
        };
        let metrics = metrics_of(&buffer, font.size_px);

        let base_x = x + calculate_text_x_offset(metrics.width, self.state.text_align);
        let base_y = y + calculate_text_y_offset(
            metrics.ascent,
            metrics.descent,
            self.state.text_baseline,
        );

        let transform = self.state.transform;
        let clip_mask = self.create_clip_mask();
        let paint = paint_for(self.state.fill_style);
        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let cache_key = glyph.physical((base_x, base_y), 1.0).cache_key;
                let Some(path) = self
                    .swash_cache
                    .get_outline_commands(&mut self.font_system, cache_key)
                    .and_then(glyph_path)
                else {
                    continue;
                };

                // Unrounded position keeps sub-pixel placement
                let glyph_x = base_x + glyph.x + glyph.font_size * glyph.x_offset;
                let glyph_y = base_y + glyph.y - glyph.font_size * glyph.y_offset;
                self.pixmap.fill_path(
                    &path,
                    &paint,
                    tiny_skia::FillRule::Winding,
                    Transform::from_translate(glyph_x, glyph_y).post_concat(transform),
                    clip_mask.as_ref(),
                );
            }
        }
    }
}

/// Convert a Y-up glyph outline into a Y-down path.
fn glyph_path(commands: &[Command]) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for command in commands {
        match *command {
            Command::MoveTo(p) => pb.move_to(p.x, -p.y),
            Command::LineTo(p) => pb.line_to(p.x, -p.y),
            Command::QuadTo(c, p) => pb.quad_to(c.x, -c.y, p.x, -p.y),
            Command::CurveTo(c1, c2, p) => pb.cubic_to(c1.x, -c1.y, c2.x, -c2.y, p.x, -p.y),
            Command::Close => pb.close(),
        }
    }
    pb.finish()
}
