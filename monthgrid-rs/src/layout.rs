//! Pixel geometry of a month calendar at a given target resolution.
//!
//! Everything here is a pure function of the target size, the base size and
//! the settings. Base offsets scale linearly; font sizes scale and are then
//! rounded one by one, so rounding error is never carried between values.

use crate::date::MonthView;
use crate::settings::{NumberPosition, StyleSettings, TitlePosition};
use monthgrid_canvas2d::TextAlign;

pub const BASE_PADDING: f32 = 20.0;
pub const BASE_HEADER_HEIGHT: f32 = 60.0;
pub const BASE_DAY_HEADER_HEIGHT: f32 = 40.0;
pub const BASE_DAY_HEADER_FONT_SIZE: f32 = 18.0;

/// Horizontal inset of a left/right aligned title.
const TITLE_INSET: f32 = 20.0;
/// Margin between a cell edge and a corner-anchored day number.
const NUMBER_MARGIN: f32 = 8.0;
/// Extra drop from the top margin for top-anchored numbers.
const NUMBER_TOP_OFFSET: f32 = 15.0;
/// Extra lift from the bottom margin for bottom-anchored numbers.
const NUMBER_BOTTOM_OFFSET: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Where a text item is anchored and how it aligns horizontally around the
/// anchor. The vertical baseline is always the middle of the em box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextAnchor {
    pub x: f32,
    pub y: f32,
    pub align: TextAlign,
}

/// A straight line segment in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub target_width: f32,
    pub target_height: f32,
    pub scale: f32,
    pub padding: f32,
    pub header_height: f32,
    pub day_header_height: f32,
    /// Rounded background and grid clip.
    pub grid_area: Rect,
    pub corner_radius: f32,
    pub grid_start_y: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub title: TextAnchor,
    pub title_font_px: u32,
    pub header_font_px: u32,
    pub number_font_px: u32,
    number_position: NumberPosition,
}

/// Compute the layout for a target size from the base size and settings.
///
/// The scale factor comes from the widths alone; targets are expected to keep
/// the base aspect ratio.
pub fn compute_layout(
    target_width: f32,
    target_height: f32,
    base_width: f32,
    _base_height: f32,
    settings: &StyleSettings,
) -> Layout {
    let scale = target_width / base_width;

    let padding = BASE_PADDING * scale;
    let header_height = BASE_HEADER_HEIGHT * scale;
    let day_header_height = BASE_DAY_HEADER_HEIGHT * scale;

    let grid_area = Rect {
        x: padding,
        y: padding,
        width: target_width - 2.0 * padding,
        height: target_height - 2.0 * padding,
    };
    let grid_start_y = padding + header_height + day_header_height;
    let cell_width = (target_width - 2.0 * padding) / 7.0;
    let cell_height = (target_height - grid_start_y - padding) / 6.0;

    let title_y = padding + header_height / 2.0;
    let title = match settings.title_position {
        TitlePosition::Left => TextAnchor {
            x: padding + TITLE_INSET * scale,
            y: title_y,
            align: TextAlign::Left,
        },
        TitlePosition::Right => TextAnchor {
            x: target_width - padding - TITLE_INSET * scale,
            y: title_y,
            align: TextAlign::Right,
        },
        TitlePosition::Center => TextAnchor {
            x: target_width / 2.0,
            y: title_y,
            align: TextAlign::Center,
        },
    };

    Layout {
        target_width,
        target_height,
        scale,
        padding,
        header_height,
        day_header_height,
        grid_area,
        corner_radius: settings.border_radius as f32 * scale,
        grid_start_y,
        cell_width,
        cell_height,
        title,
        title_font_px: scaled_px(settings.title_font_size as f32, scale),
        header_font_px: scaled_px(BASE_DAY_HEADER_FONT_SIZE, scale),
        number_font_px: scaled_px(settings.number_font_size as f32, scale),
        number_position: settings.number_position,
    }
}

fn scaled_px(base: f32, scale: f32) -> u32 {
    (base * scale).round().max(0.0) as u32
}

impl Layout {
    /// Rounded title, number and weekday header sizes in pixels.
    pub fn font_sizes(&self) -> [u32; 3] {
        [self.title_font_px, self.number_font_px, self.header_font_px]
    }

    /// Center of weekday header column `index` (0 = Monday).
    pub fn day_header_anchor(&self, index: u32) -> TextAnchor {
        TextAnchor {
            x: self.padding + (index as f32 + 0.5) * self.cell_width,
            y: self.padding + self.header_height + self.day_header_height / 2.0,
            align: TextAlign::Center,
        }
    }

    /// Cell rectangle at (row, column).
    pub fn cell(&self, row: u32, col: u32) -> Rect {
        Rect {
            x: self.padding + col as f32 * self.cell_width,
            y: self.grid_start_y + row as f32 * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// Anchor of day number `day` of `view`, with its grid column.
    pub fn day_anchor(&self, view: &MonthView, day: u32) -> (TextAnchor, u32) {
        let (row, col) = view.cell_of(day);
        let Rect {
            x,
            y,
            width: w,
            height: h,
        } = self.cell(row, col);
        let m = NUMBER_MARGIN * self.scale;
        let t = NUMBER_TOP_OFFSET * self.scale;
        let b = NUMBER_BOTTOM_OFFSET * self.scale;

        let anchor = match self.number_position {
            NumberPosition::TopLeft => TextAnchor {
                x: x + m,
                y: y + m + t,
                align: TextAlign::Left,
            },
            NumberPosition::TopRight => TextAnchor {
                x: x + w - m,
                y: y + m + t,
                align: TextAlign::Right,
            },
            NumberPosition::BottomLeft => TextAnchor {
                x: x + m,
                y: y + h - m - b,
                align: TextAlign::Left,
            },
            NumberPosition::BottomRight => TextAnchor {
                x: x + w - m,
                y: y + h - m - b,
                align: TextAlign::Right,
            },
            NumberPosition::Center => TextAnchor {
                x: x + w / 2.0,
                y: y + h / 2.0,
                align: TextAlign::Center,
            },
        };
        (anchor, col)
    }

    /// Row boundaries 0..=6 spanning the grid width.
    pub fn horizontal_lines(&self) -> impl Iterator<Item = Line> + '_ {
        (0..=6).map(move |i| {
            let y = self.grid_start_y + i as f32 * self.cell_height;
            Line {
                x0: self.padding,
                y0: y,
                x1: self.target_width - self.padding,
                y1: y,
            }
        })
    }

    /// Column boundaries 0..=7 spanning the six grid rows.
    pub fn vertical_lines(&self) -> impl Iterator<Item = Line> + '_ {
        (0..=7).map(move |i| {
            let x = self.padding + i as f32 * self.cell_width;
            Line {
                x0: x,
                y0: self.grid_start_y,
                x1: x,
                y1: self.grid_start_y + 6.0 * self.cell_height,
            }
        })
    }
}

/// Settings for a calendar drawn at `factor` of its base size. The width,
/// font sizes and radius are each rounded to whole pixels; the height follows
/// the rounded width at the base aspect ratio.
pub fn scaled_settings(settings: &StyleSettings, factor: f32) -> StyleSettings {
    let round = |v: u32| (v as f32 * factor).round().max(1.0) as u32;
    let width = round(settings.width);
    let aspect = settings.width as f32 / settings.height as f32;
    let height = (width as f32 / aspect).round().max(1.0) as u32;
    settings
        .clone()
        .with_size(width, height)
        .with_title_font_size(round(settings.title_font_size))
        .with_number_font_size(round(settings.number_font_size))
        .with_border_radius((settings.border_radius as f32 * factor).round() as u32)
}
