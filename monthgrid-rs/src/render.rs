//! Turns a layout into an ordered list of drawing commands.
//!
//! Nothing here touches pixels; [`crate::raster`] executes the list.

use crate::date::MonthView;
use crate::i18n::Translation;
use crate::layout::{Layout, Line, Rect, TextAnchor};
use crate::settings::StyleSettings;
use monthgrid_canvas2d::TextBaseline;

/// Width of grid lines in logical pixels.
pub const GRID_LINE_WIDTH: f32 = 1.0;

/// First Monday-based column drawn in the accent color.
const WEEKEND_START_COL: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFont {
    pub family: String,
    pub bold: bool,
    pub size_px: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Make every pixel fully transparent.
    Clear,
    FillRoundRect {
        rect: Rect,
        radius: f32,
        color: String,
    },
    Text {
        text: String,
        anchor: TextAnchor,
        baseline: TextBaseline,
        font: TextFont,
        color: String,
    },
    /// Restrict drawing to a rounded rectangle until the matching `PopClip`.
    PushClip { rect: Rect, radius: f32 },
    StrokeLine {
        line: Line,
        width: f32,
        color: String,
    },
    PopClip,
}

/// Color for a grid column: weekends (Saturday, Sunday) use the accent.
pub fn column_color(settings: &StyleSettings, col: u32) -> &str {
    if col >= WEEKEND_START_COL {
        &settings.colors.accent
    } else {
        &settings.colors.main
    }
}

fn text_command(text: &str, anchor: TextAnchor, font: TextFont, color: &str) -> DrawCommand {
    DrawCommand::Text {
        text: text.to_string(),
        anchor,
        baseline: TextBaseline::Middle,
        font,
        color: color.to_string(),
    }
}

/// Build the commands for one month in draw order.
pub fn build_draw_commands(
    layout: &Layout,
    settings: &StyleSettings,
    translation: &Translation,
    view: &MonthView,
) -> Vec<DrawCommand> {
    let bold = |size_px| TextFont {
        family: settings.font_family.clone(),
        bold: true,
        size_px,
    };

    let mut commands = vec![DrawCommand::Clear];

    if settings.colors.has_background() {
        commands.push(DrawCommand::FillRoundRect {
            rect: layout.grid_area,
            radius: layout.corner_radius,
            color: settings.colors.background.clone(),
        });
    }

    commands.push(text_command(
        translation.month_name(view.month_index),
        layout.title,
        bold(layout.title_font_px),
        &settings.colors.main,
    ));

    for (i, &name) in (0u32..).zip(translation.day_names(settings.use_long_day_names)) {
        commands.push(text_command(
            name,
            layout.day_header_anchor(i),
            bold(layout.header_font_px),
            column_color(settings, i),
        ));
    }

    if settings.show_grid {
        commands.push(DrawCommand::PushClip {
            rect: layout.grid_area,
            radius: layout.corner_radius,
        });
        let stroke = |line| DrawCommand::StrokeLine {
            line,
            width: GRID_LINE_WIDTH,
            color: settings.colors.hint.clone(),
        };
        commands.extend(layout.horizontal_lines().map(stroke));
        commands.extend(layout.vertical_lines().map(stroke));
        commands.push(DrawCommand::PopClip);
    }

    for day in 1..=view.days_in_month {
        let (anchor, col) = layout.day_anchor(view, day);
        commands.push(text_command(
            &day.to_string(),
            anchor,
            bold(layout.number_font_px),
            column_color(settings, col),
        ));
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{EN, RU};
    use crate::layout::compute_layout;
    use crate::settings::{CalendarColors, TRANSPARENT};

    fn commands_for(settings: &StyleSettings, year: i32, month: u32) -> Vec<DrawCommand> {
        let layout = compute_layout(
            settings.width as f32,
            settings.height as f32,
            settings.width as f32,
            settings.height as f32,
            settings,
        );
        let view = MonthView::new(year, month).unwrap();
        build_draw_commands(&layout, settings, &EN, &view)
    }

    fn texts(commands: &[DrawCommand]) -> Vec<(&str, &str)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, color, .. } => Some((text.as_str(), color.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_fixed_draw_order() {
        let commands = commands_for(&StyleSettings::default(), 2024, 8);
        assert_eq!(commands[0], DrawCommand::Clear);
        assert!(matches!(commands[1], DrawCommand::FillRoundRect { .. }));
        assert!(matches!(&commands[2], DrawCommand::Text { text, .. } if text == "September"));
        // 7 headers, then the clip with 15 lines
        assert!(matches!(&commands[3], DrawCommand::Text { text, .. } if text == "Mon"));
        assert!(matches!(commands[10], DrawCommand::PushClip { .. }));
        assert!(commands[11..26]
            .iter()
            .all(|c| matches!(c, DrawCommand::StrokeLine { .. })));
        assert_eq!(commands[26], DrawCommand::PopClip);
        assert!(matches!(&commands[27], DrawCommand::Text { text, .. } if text == "1"));
        assert_eq!(commands.len(), 27 + 30);
    }

    #[test]
    fn test_weekend_columns_use_accent() {
        let settings = StyleSettings::default();
        let commands = commands_for(&settings, 2024, 8);
        let texts = texts(&commands);

        let headers = &texts[1..8];
        for (i, (_, color)) in headers.iter().enumerate() {
            let expected = if i >= 5 { "#ff0000" } else { "#000000" };
            assert_eq!(*color, expected, "header {i}");
        }

        let days = &texts[8..];
        // Sep 1 2024 is a Sunday, Sep 2 a Monday, Sep 7 a Saturday
        assert_eq!(days[0], ("1", "#ff0000"));
        assert_eq!(days[1], ("2", "#000000"));
        assert_eq!(days[6], ("7", "#ff0000"));
        assert_eq!(days[5], ("6", "#000000"));
    }

    #[test]
    fn test_transparent_background_and_hidden_grid() {
        let settings = StyleSettings::default()
            .with_colors(CalendarColors {
                background: TRANSPARENT.to_string(),
                ..Default::default()
            })
            .with_show_grid(false);
        let commands = commands_for(&settings, 2023, 1);
        assert!(!commands.iter().any(|c| matches!(
            c,
            DrawCommand::FillRoundRect { .. }
                | DrawCommand::PushClip { .. }
                | DrawCommand::StrokeLine { .. }
        )));
        // clear + title + 7 headers + 28 days
        assert_eq!(commands.len(), 1 + 1 + 7 + 28);
    }

    #[test]
    fn test_long_day_names_and_translation() {
        let settings = StyleSettings::default().with_long_day_names(true);
        let layout = compute_layout(600.0, 400.0, 600.0, 400.0, &settings);
        let view = MonthView::new(2024, 0).unwrap();
        let commands = build_draw_commands(&layout, &settings, &RU, &view);
        let texts = texts(&commands);
        assert_eq!(texts[0].0, "Январь");
        assert_eq!(texts[1].0, "Понедельник");
        assert_eq!(texts[7].0, "Воскресенье");
    }

    #[test]
    fn test_text_fonts() {
        let settings = StyleSettings::default().with_font_family("Roboto");
        let commands = commands_for(&settings, 2024, 8);
        let sizes: Vec<u32> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { font, baseline, .. } => {
                    assert_eq!(font.family, "Roboto");
                    assert!(font.bold);
                    assert_eq!(*baseline, TextBaseline::Middle);
                    Some(font.size_px)
                }
                _ => None,
            })
            .collect();
        assert_eq!(sizes[0], 32);
        assert_eq!(sizes[1], 18);
        assert_eq!(sizes[8], 20);
    }
}
