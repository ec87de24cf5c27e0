//! Filling, stroking and clipping.

use super::Canvas2dContext;
use crate::geometry::RectParams;
use crate::style::FillStyle;
use tiny_skia::{FillRule, Transform};

impl Canvas2dContext {
    /// Intersect the clipping region with the current path.
    pub fn clip(&mut self) {
        if let Some(path) = self.current_path() {
            self.state.clip_paths.push(path);
        }
    }

    /// Fill the current path (non-zero winding). The path stays open for a
    /// following stroke or clip.
    pub fn fill(&mut self) {
        let Some(path) = self.current_path() else {
            return;
        };
        let mask = self.create_clip_mask();
        self.pixmap.fill_path(
            &path,
            &paint_for(self.state.fill_style),
            FillRule::Winding,
            Transform::identity(),
            mask.as_ref(),
        );
    }

    /// Stroke the current path with butt caps and miter joins.
    pub fn stroke(&mut self) {
        let Some(path) = self.current_path() else {
            return;
        };
        let stroke = tiny_skia::Stroke {
            width: self.state.line_width * mean_axis_scale(&self.state.transform),
            ..Default::default()
        };
        let mask = self.create_clip_mask();
        self.pixmap.stroke_path(
            &path,
            &paint_for(self.state.stroke_style),
            &stroke,
            Transform::identity(),
            mask.as_ref(),
        );
    }

    pub fn fill_rect(&mut self, params: &RectParams) {
        self.begin_path();
        self.rect(params);
        self.fill();
    }

    /// Make the pixels under a rectangle transparent, respecting the clip.
    /// The current path is left untouched.
    pub fn clear_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "clear_rect {params:?}");
        let Some(rect) = tiny_skia::Rect::from_xywh(params.x, params.y, params.width, params.height)
        else {
            return;
        };
        let paint = tiny_skia::Paint {
            blend_mode: tiny_skia::BlendMode::Clear,
            ..Default::default()
        };
        let mask = self.create_clip_mask();
        self.pixmap.fill_path(
            &tiny_skia::PathBuilder::from_rect(rect),
            &paint,
            FillRule::Winding,
            self.state.transform,
            mask.as_ref(),
        );
    }

    fn current_path(&self) -> Option<tiny_skia::Path> {
        self.path_builder.clone().finish()
    }

    /// Intersection of every clip path, or `None` when nothing is clipped.
    pub(crate) fn create_clip_mask(&self) -> Option<tiny_skia::Mask> {
        let (first, rest) = self.state.clip_paths.split_first()?;
        let mut mask = tiny_skia::Mask::new(self.width, self.height)?;
        mask.fill_path(first, FillRule::Winding, true, Transform::identity());
        for path in rest {
            mask.intersect_path(path, FillRule::Winding, true, Transform::identity());
        }
        Some(mask)
    }
}

/// Paths are stored in device space while line widths are in user space.
fn mean_axis_scale(t: &Transform) -> f32 {
    (t.sx.hypot(t.ky) + t.kx.hypot(t.sy)) / 2.0
}

/// Anti-aliased paint for a fill or stroke style.
pub(crate) fn paint_for(style: FillStyle) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint {
        anti_alias: true,
        ..Default::default()
    };
    match style {
        FillStyle::Color(color) => paint.set_color(color),
    }
    paint
}
