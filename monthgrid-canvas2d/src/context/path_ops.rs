//! Path construction. Points are mapped to device space as they are added.

use super::Canvas2dContext;
use crate::geometry::{RectParams, RoundRectParams};
use tiny_skia::{PathSegment, Transform};

/// Control point distance for a quarter circle of radius 1.
const K: f32 = 0.552_284_8;

impl Canvas2dContext {
    /// Discard the current path.
    pub fn begin_path(&mut self) {
        self.path_builder = tiny_skia::PathBuilder::new();
    }

    /// Start a new subpath at a point.
    pub fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = map_point(&self.state.transform, x, y);
        self.path_builder.move_to(x, y);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = map_point(&self.state.transform, x, y);
        self.path_builder.line_to(x, y);
    }

    /// Add a closed rectangle to the path.
    pub fn rect(&mut self, params: &RectParams) {
        let r = normalize(params);
        let Some(rect) = tiny_skia::Rect::from_xywh(r.x, r.y, r.width, r.height) else {
            return;
        };
        let path = tiny_skia::PathBuilder::from_rect(rect);
        self.append_transformed_path(&path, self.state.transform);
    }

    /// Add a closed rectangle with rounded corners to the path.
    pub fn round_rect(&mut self, params: &RoundRectParams) {
        let RectParams {
            x,
            y,
            width,
            height,
        } = normalize(&params.rect);
        let r = params.radius.max(0.0).min(width / 2.0).min(height / 2.0);
        if r <= 0.0 {
            self.rect(&params.rect);
            return;
        }
        let (right, bottom) = (x + width, y + height);
        let k = r * K;

        // Clockwise from the end of the top-left corner, in user space.
        let mut pb = tiny_skia::PathBuilder::new();
        pb.move_to(x + r, y);
        pb.line_to(right - r, y);
        pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
        pb.line_to(right, bottom - r);
        pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
        pb.line_to(x + r, bottom);
        pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
        pb.line_to(x, y + r);
        pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
        pb.close();

        if let Some(path) = pb.finish() {
            self.append_transformed_path(&path, self.state.transform);
        }
    }

    /// Append a user-space path, mapping every point through `transform`.
    fn append_transformed_path(&mut self, path: &tiny_skia::Path, transform: Transform) {
        let map = |p: tiny_skia::Point| map_point(&transform, p.x, p.y);
        let pb = &mut self.path_builder;
        for segment in path.segments() {
            match segment {
                PathSegment::MoveTo(p) => {
                    let (x, y) = map(p);
                    pb.move_to(x, y);
                }
                PathSegment::LineTo(p) => {
                    let (x, y) = map(p);
                    pb.line_to(x, y);
                }
                PathSegment::QuadTo(c, p) => {
                    let ((cx, cy), (x, y)) = (map(c), map(p));
                    pb.quad_to(cx, cy, x, y);
                }
                PathSegment::CubicTo(c1, c2, p) => {
                    let ((c1x, c1y), (c2x, c2y), (x, y)) = (map(c1), map(c2), map(p));
                    pb.cubic_to(c1x, c1y, c2x, c2y, x, y);
                }
                PathSegment::Close => pb.close(),
            }
        }
    }
}

fn map_point(transform: &Transform, x: f32, y: f32) -> (f32, f32) {
    (
        transform.sx * x + transform.kx * y + transform.tx,
        transform.ky * x + transform.sy * y + transform.ty,
    )
}

/// Flip negative widths/heights so the origin is the top-left corner.
fn normalize(rect: &RectParams) -> RectParams {
    let (x, width) = if rect.width < 0.0 {
        (rect.x + rect.width, -rect.width)
    } else {
        (rect.x, rect.width)
    };
    let (y, height) = if rect.height < 0.0 {
        (rect.y + rect.height, -rect.height)
    } else {
        (rect.y, rect.height)
    };
    RectParams {
        x,
        y,
        width,
        height,
    }
}
