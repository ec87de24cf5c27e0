use super::Canvas2dContext;
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Multiply the current transform by a scale.
    pub fn scale(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "scale {} {}", x, y);
        self.state.transform = self.state.transform.pre_scale(x, y);
    }

    pub fn get_transform(&self) -> Transform {
        self.state.transform
    }
}

#[cfg(test)]
mod tests {
    use crate::font_config::FontConfig;
    use crate::Canvas2dContext;

    #[test]
    fn test_scales_compose_until_resize() {
        let fonts = FontConfig {
            load_system_fonts: false,
            ..Default::default()
        }
        .load();
        let mut ctx = Canvas2dContext::with_fonts(10, 10, &fonts).unwrap();
        ctx.scale(2.0, 2.0);
        ctx.scale(1.5, 0.5);
        let t = ctx.get_transform();
        assert_eq!((t.sx, t.sy, t.tx, t.ty), (3.0, 1.0, 0.0, 0.0));

        ctx.resize(10, 10).unwrap();
        assert!(ctx.get_transform().is_identity());
    }
}
