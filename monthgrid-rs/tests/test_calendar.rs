use monthgrid_rs::fonts::{FontReadiness, FontRegistry};
use monthgrid_rs::i18n::{EN, RU};
use monthgrid_rs::layout::{compute_layout, Rect};
use monthgrid_rs::raster::{draw_month, RasterTarget};
use monthgrid_rs::settings::{self, CalendarColors, NumberPosition, TitlePosition, TRANSPARENT};
use monthgrid_rs::store::MemoryStore;
use monthgrid_rs::{
    AppConfig, AppContext, CalendarCanvas, MonthView, RenderOutcome, StyleSettings,
    ValidationError,
};
use rstest::rstest;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn load_settings_text(name: &str) -> String {
    let root_path = Path::new(env!("CARGO_MANIFEST_DIR"));
    let path = root_path
        .join("tests")
        .join("settings")
        .join(format!("{}.json", name));
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read {:?}", path))
}

fn test_context() -> AppContext {
    let config = AppConfig {
        load_system_fonts: false,
        font_timeout_ms: 500,
        ..Default::default()
    };
    AppContext::with_store(config, Arc::new(MemoryStore::new()))
}

/// Family of the font shipped under `tests/fonts/`.
const TEST_FONT_FAMILY: &str = "DejaVu Sans";

fn fixture_config() -> AppConfig {
    AppConfig {
        load_system_fonts: false,
        font_dirs: vec![Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fonts")],
        font_timeout_ms: 5000,
        ..Default::default()
    }
}

/// Blue weekdays and red weekends on a transparent, gridless calendar, so
/// every inked pixel belongs to text.
fn two_tone_settings() -> StyleSettings {
    StyleSettings::default()
        .with_font_family(TEST_FONT_FAMILY)
        .with_show_grid(false)
        .with_colors(CalendarColors {
            main: "#0000ff".to_string(),
            accent: "#ff0000".to_string(),
            background: TRANSPARENT.to_string(),
            hint: "#d3d3d3".to_string(),
        })
}

/// Straight-alpha pixels with any coverage inside `rect`, one pixel inset.
fn inked(target: &RasterTarget, rect: &Rect) -> Vec<[u8; 4]> {
    let pixels = target.pixels();
    let width = target.width() as usize;
    let (x0, y0) = (rect.x.ceil() as usize + 1, rect.y.ceil() as usize + 1);
    let (x1, y1) = (
        (rect.x + rect.width).floor() as usize - 1,
        (rect.y + rect.height).floor() as usize - 1,
    );
    let mut ink = Vec::new();
    for y in y0..y1 {
        for x in x0..x1 {
            let i = (y * width + x) * 4;
            if pixels[i + 3] > 0 {
                ink.push([pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]);
            }
        }
    }
    ink
}

fn draw_september(settings: &StyleSettings, readiness: &FontReadiness) -> RasterTarget {
    let fonts = FontRegistry::new(&fixture_config());
    let mut target = RasterTarget::new(&fonts).unwrap();
    let view = MonthView::new(2024, 8).unwrap();
    draw_month(
        &mut target,
        settings,
        &EN,
        &view,
        (600.0, 400.0),
        1.0,
        readiness,
    )
    .unwrap();
    target
}

fn decode(png: &[u8]) -> image::RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

#[test]
fn test_import_full_settings() {
    let imported = settings::deserialize(&load_settings_text("full")).unwrap();
    assert_eq!(imported.font_family, "Roboto");
    assert_eq!(imported.title_position, TitlePosition::Left);
    assert_eq!(imported.number_position, NumberPosition::BottomRight);
    assert_eq!((imported.width, imported.height), (800, 500));
    assert!(imported.use_long_day_names);
    assert!(!imported.show_grid);

    let again = settings::deserialize(&settings::serialize(&imported).unwrap()).unwrap();
    assert_eq!(again, imported);
}

#[test]
fn test_import_legacy_settings_defaults_day_names() {
    let imported = settings::deserialize(&load_settings_text("legacy")).unwrap();
    assert!(!imported.use_long_day_names);
    assert!(!imported.colors.has_background());
}

#[rstest]
#[case("missing-title-position")]
#[case("string-font-size")]
fn test_rejected_import_keeps_current(#[case] name: &str) {
    let mut current = StyleSettings::default().with_border_radius(3);
    let before = current.clone();

    match settings::deserialize(&load_settings_text(name)) {
        Ok(imported) => current = imported,
        Err(ValidationError::MissingField(_) | ValidationError::WrongType { .. }) => {}
        Err(other) => panic!("unexpected error {other:?}"),
    }
    assert_eq!(current, before);
}

#[tokio::test]
async fn test_double_resolution_matches_base() {
    let ctx = test_context();
    let settings = StyleSettings::default()
        .with_font_family("sans-serif")
        .with_colors(settings::CalendarColors {
            background: "#336699".to_string(),
            ..Default::default()
        });

    let mut pages = Vec::new();
    for ratio in [1.0, 2.0] {
        let calendar =
            CalendarCanvas::new(&ctx.fonts, Duration::from_millis(500), ratio).unwrap();
        calendar
            .render(2024, 8, settings.clone(), &EN)
            .await
            .unwrap();
        pages.push(decode(&calendar.to_png().unwrap()));
    }
    let (base, double) = (&pages[0], &pages[1]);
    assert_eq!(double.dimensions(), (1200, 800));

    // Sample away from text and grid lines: the background and the clear margin
    for (x, y) in [(110, 240), (5, 5), (590, 395), (300, 390)] {
        assert_eq!(
            base.get_pixel(x, y),
            double.get_pixel(2 * x, 2 * y),
            "pixel ({x}, {y})"
        );
    }
}

#[tokio::test]
async fn test_export_year_archive() {
    let ctx = test_context();
    let exporter = ctx.exporter();
    let dir = tempfile::tempdir().unwrap();

    let path = exporter
        .export_year(
            2025,
            "960",
            "640",
            &StyleSettings::default(),
            &RU,
            dir.path(),
            |_, _| {},
        )
        .await
        .unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "calendar-2025-960x640.zip"
    );

    let mut archive = zip::ZipArchive::new(fs::File::open(&path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    let expected: Vec<String> = EN
        .months
        .iter()
        .enumerate()
        .map(|(i, month)| format!("2025-{:02}-{}.png", i + 1, month))
        .collect();
    assert_eq!(names, expected);

    for name in &expected {
        let mut png = Vec::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_end(&mut png)
            .unwrap();
        assert_eq!(decode(&png).dimensions(), (960, 640));
    }
}

#[tokio::test]
async fn test_missing_font_degrades() {
    let config = AppConfig {
        load_system_fonts: false,
        ..Default::default()
    };
    let fonts = FontRegistry::new(&config);
    let readiness = fonts
        .ensure_font_ready("Definitely Not Installed", &[32, 20, 18], Duration::from_millis(500))
        .await;
    assert!(!readiness.is_ready());
}

#[test]
fn test_weekend_numbers_drawn_in_accent() {
    let settings = two_tone_settings();
    let target = draw_september(&settings, &FontReadiness::Ready);
    let layout = compute_layout(600.0, 400.0, 600.0, 400.0, &settings);

    // Sun 1 at (0, 6), Sat 7 at (1, 5)
    for (row, col) in [(0, 6), (1, 5)] {
        let ink = inked(&target, &layout.cell(row, col));
        assert!(!ink.is_empty(), "no ink in cell ({row}, {col})");
        assert!(
            ink.iter().all(|p| p[0] > 0 && p[2] == 0),
            "non-accent ink in cell ({row}, {col})"
        );
    }

    // Mon 2 at (1, 0)
    let ink = inked(&target, &layout.cell(1, 0));
    assert!(!ink.is_empty());
    assert!(ink.iter().all(|p| p[0] == 0 && p[2] > 0));

    // Empty cell before Sep 1
    assert!(inked(&target, &layout.cell(0, 0)).is_empty());
}

#[rstest]
#[case(TitlePosition::Left, (20.0, 240.0), (420.0, 580.0))]
#[case(TitlePosition::Center, (200.0, 400.0), (20.0, 150.0))]
#[case(TitlePosition::Right, (360.0, 580.0), (20.0, 180.0))]
fn test_title_drawn_at_its_position(
    #[case] position: TitlePosition,
    #[case] inked_span: (f32, f32),
    #[case] empty_span: (f32, f32),
) {
    let settings = two_tone_settings().with_title_position(position);
    let target = draw_september(&settings, &FontReadiness::Ready);
    let band = |(x0, x1): (f32, f32)| Rect {
        x: x0,
        y: 20.0,
        width: x1 - x0,
        height: 60.0,
    };

    let ink = inked(&target, &band(inked_span));
    assert!(!ink.is_empty(), "title missing for {position:?}");
    assert!(ink.iter().all(|p| p[2] > 0 && p[0] == 0));
    assert!(inked(&target, &band(empty_span)).is_empty());
}

#[test]
fn test_degraded_font_still_draws_text() {
    let settings = two_tone_settings().with_font_family("Definitely Not Installed");
    let readiness = FontReadiness::Degraded {
        reason: "not installed".to_string(),
    };
    let target = draw_september(&settings, &readiness);
    let layout = compute_layout(600.0, 400.0, 600.0, 400.0, &settings);
    assert!(!inked(&target, &layout.cell(1, 0)).is_empty());
}

#[tokio::test]
async fn test_render_without_any_fonts_skips_text() {
    let ctx = test_context();
    assert_eq!(ctx.fonts.database().face_count(), 0);
    let calendar = ctx.calendar().unwrap();
    let outcome = calendar
        .render(2024, 8, two_tone_settings(), &EN)
        .await
        .unwrap();
    assert_eq!(outcome, RenderOutcome::Committed);

    let image = decode(&calendar.to_png().unwrap());
    assert!(image.pixels().all(|p| p.0[3] == 0));
}

#[tokio::test]
async fn test_render_with_fixture_font_is_ready() {
    let fonts = FontRegistry::new(&fixture_config());
    assert!(fonts.is_loaded(TEST_FONT_FAMILY));
    let readiness = fonts
        .ensure_font_ready(TEST_FONT_FAMILY, &[32, 20, 18], Duration::from_secs(5))
        .await;
    assert!(readiness.is_ready());
}
