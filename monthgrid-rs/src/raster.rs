//! Executes [`DrawCommand`] lists on a `monthgrid-canvas2d` surface.

use crate::date::MonthView;
use crate::error::MonthGridResult;
use crate::fonts::{family_stack, FontReadiness, FontRegistry, FALLBACK_FAMILY, GENERIC_FAMILY};
use crate::i18n::Translation;
use crate::layout::{compute_layout, Rect};
use crate::render::{build_draw_commands, DrawCommand, TextFont};
use crate::settings::StyleSettings;
use monthgrid_canvas2d::{
    Canvas2dContext, CanvasColor, FontSpec, FontWeight, RectParams, RoundRectParams,
};

const FALLBACK_COLOR: CanvasColor = CanvasColor::from_rgba8(0, 0, 0, 255);

/// A raster surface owned by one calendar or one export step.
pub struct RasterTarget {
    ctx: Canvas2dContext,
    logical_width: f32,
    logical_height: f32,
}

impl RasterTarget {
    /// Create a target sharing the registry's font database.
    pub fn new(fonts: &FontRegistry) -> MonthGridResult<Self> {
        Ok(Self {
            ctx: Canvas2dContext::with_fonts(1, 1, fonts.database())?,
            logical_width: 1.0,
            logical_height: 1.0,
        })
    }

    /// Resize the backing store to the logical size times the device pixel
    /// ratio. Any previous transform is dropped and exactly one device pixel
    /// ratio scale is applied.
    pub fn prepare(
        &mut self,
        logical_width: f32,
        logical_height: f32,
        device_pixel_ratio: f32,
    ) -> MonthGridResult<()> {
        let device_width = (logical_width * device_pixel_ratio).floor().max(1.0) as u32;
        let device_height = (logical_height * device_pixel_ratio).floor().max(1.0) as u32;
        self.ctx.resize(device_width, device_height)?;
        self.ctx.scale(device_pixel_ratio, device_pixel_ratio);
        self.logical_width = logical_width;
        self.logical_height = logical_height;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.ctx.width()
    }

    pub fn height(&self) -> u32 {
        self.ctx.height()
    }

    /// Straight-alpha RGBA pixels of the whole surface.
    pub fn pixels(&self) -> Vec<u8> {
        self.ctx.get_image_data(0, 0, self.ctx.width(), self.ctx.height())
    }

    pub fn to_png(&self) -> MonthGridResult<Vec<u8>> {
        Ok(self.ctx.to_png(None)?)
    }

    /// Run `commands` in order. With a degraded font every text item is drawn
    /// with the fallback families instead of the requested one.
    pub fn execute(&mut self, commands: &[DrawCommand], readiness: &FontReadiness) {
        for command in commands {
            match command {
                DrawCommand::Clear => {
                    let rect = RectParams {
                        x: 0.0,
                        y: 0.0,
                        width: self.logical_width,
                        height: self.logical_height,
                    };
                    self.ctx.clear_rect(&rect);
                }
                DrawCommand::FillRoundRect {
                    rect,
                    radius,
                    color,
                } => {
                    self.fill_style(color);
                    self.ctx.begin_path();
                    self.ctx.round_rect(&round_rect(rect, *radius));
                    self.ctx.fill();
                }
                DrawCommand::Text {
                    text,
                    anchor,
                    baseline,
                    font,
                    color,
                } => {
                    self.ctx.set_font(font_spec(font, readiness));
                    self.ctx.set_text_align(anchor.align);
                    self.ctx.set_text_baseline(*baseline);
                    self.fill_style(color);
                    self.ctx.fill_text(text, anchor.x, anchor.y);
                }
                DrawCommand::PushClip { rect, radius } => {
                    self.ctx.save();
                    self.ctx.begin_path();
                    self.ctx.round_rect(&round_rect(rect, *radius));
                    self.ctx.clip();
                }
                DrawCommand::StrokeLine { line, width, color } => {
                    if let Err(e) = self.ctx.set_stroke_style(color) {
                        log::warn!("{e}; stroking in black");
                        self.ctx.set_stroke_style_color(FALLBACK_COLOR);
                    }
                    self.ctx.set_line_width(*width);
                    self.ctx.begin_path();
                    self.ctx.move_to(line.x0, line.y0);
                    self.ctx.line_to(line.x1, line.y1);
                    self.ctx.stroke();
                }
                DrawCommand::PopClip => self.ctx.restore(),
            }
        }
    }

    fn fill_style(&mut self, color: &str) {
        if let Err(e) = self.ctx.set_fill_style(color) {
            log::warn!("{e}; filling in black");
            self.ctx.set_fill_style_color(FALLBACK_COLOR);
        }
    }
}

fn round_rect(rect: &Rect, radius: f32) -> RoundRectParams {
    RoundRectParams {
        rect: RectParams {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        },
        radius,
    }
}

fn font_spec(font: &TextFont, readiness: &FontReadiness) -> FontSpec {
    let weight = if font.bold {
        FontWeight::Bold
    } else {
        FontWeight::Normal
    };
    let size = font.size_px as f32;
    match readiness {
        FontReadiness::Ready => FontSpec {
            families: family_stack(&font.family),
            weight,
            size_px: size,
        },
        FontReadiness::Degraded { .. } => {
            FontSpec::new(FALLBACK_FAMILY, weight, size).with_fallbacks([GENERIC_FAMILY])
        }
    }
}

/// Lay out and draw one month onto `target`.
///
/// `logical_size` is the target size in logical pixels; the settings' own
/// width and height are the base the layout scales from.
pub fn draw_month(
    target: &mut RasterTarget,
    settings: &StyleSettings,
    translation: &Translation,
    view: &MonthView,
    logical_size: (f32, f32),
    device_pixel_ratio: f32,
    readiness: &FontReadiness,
) -> MonthGridResult<()> {
    let (width, height) = logical_size;
    target.prepare(width, height, device_pixel_ratio)?;
    let layout = compute_layout(
        width,
        height,
        settings.width as f32,
        settings.height as f32,
        settings,
    );
    let commands = build_draw_commands(&layout, settings, translation, view);
    log::debug!(
        "Drawing {}-{:02} with {} commands at {}x{}",
        view.year,
        view.month_index + 1,
        commands.len(),
        target.width(),
        target.height()
    );
    target.execute(&commands, readiness);
    Ok(())
}
