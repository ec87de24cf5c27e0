//! Year export: twelve PNGs bundled into one ZIP archive.

use crate::date::MonthView;
use crate::error::{ExportError, MonthGridResult};
use crate::fonts::{FontReadiness, FontRegistry};
use crate::i18n::{Translation, EN};
use crate::layout::{compute_layout, scaled_settings};
use crate::raster::{draw_month, RasterTarget};
use crate::settings::StyleSettings;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

pub const MONTHS_PER_YEAR: usize = 12;

/// Fraction of the base size used for year overview thumbnails.
pub const OVERVIEW_SCALE: f32 = 0.85;

/// Progress of a [`BatchExporter`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    Validating,
    /// Rendering month `index` (0 = January).
    Generating { index: usize },
    Archiving,
    Done { path: PathBuf },
    Failed { message: String },
}

/// Parse export width and height as positive integers.
pub fn parse_dimensions(width: &str, height: &str) -> Result<(u32, u32), ExportError> {
    let parse = |text: &str| text.trim().parse::<u32>().ok().filter(|v| *v > 0);
    match (parse(width), parse(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(ExportError::InvalidDimensions {
            width: width.to_string(),
            height: height.to_string(),
        }),
    }
}

/// Export height that keeps the base aspect ratio for `width`.
pub fn export_height_for_width(width: u32, base_width: u32, base_height: u32) -> u32 {
    let aspect = base_width as f64 / base_height as f64;
    (width as f64 / aspect).round() as u32
}

/// Export width that keeps the base aspect ratio for `height`.
pub fn export_width_for_height(height: u32, base_width: u32, base_height: u32) -> u32 {
    let aspect = base_width as f64 / base_height as f64;
    (height as f64 * aspect).round() as u32
}

/// Archive entry name, always with the English month name.
pub fn entry_name(year: i32, month_index: u32) -> String {
    format!(
        "{year}-{:02}-{}.png",
        month_index + 1,
        EN.month_name(month_index)
    )
}

pub fn archive_name(year: i32, width: u32, height: u32) -> String {
    format!("calendar-{year}-{width}x{height}.zip")
}

/// Render one month on a fresh target and encode it as PNG.
///
/// `size` is the output size in pixels; the settings' width and height are
/// the base the layout scales from.
pub fn render_month_png(
    fonts: &FontRegistry,
    settings: &StyleSettings,
    translation: &Translation,
    view: &MonthView,
    size: (u32, u32),
    readiness: &FontReadiness,
) -> MonthGridResult<Vec<u8>> {
    let mut target = RasterTarget::new(fonts)?;
    draw_month(
        &mut target,
        settings,
        translation,
        view,
        (size.0 as f32, size.1 as f32),
        1.0,
        readiness,
    )?;
    target.to_png()
}

/// Renders and archives whole years. One export runs at a time.
pub struct BatchExporter {
    fonts: FontRegistry,
    font_timeout: Duration,
    state: Mutex<ExportState>,
}

/// Puts the exporter back to idle however the export ends.
struct IdleOnDrop<'a>(&'a BatchExporter);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set_state(ExportState::Idle);
    }
}

impl BatchExporter {
    pub fn new(fonts: &FontRegistry, font_timeout: Duration) -> Self {
        Self {
            fonts: fonts.clone(),
            font_timeout,
            state: Mutex::new(ExportState::Idle),
        }
    }

    pub fn state(&self) -> ExportState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_state(&self, state: ExportState) {
        log::debug!("Export state: {state:?}");
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    /// Leave `Idle` for `Validating`, or fail if an export is running.
    fn begin(&self) -> Result<IdleOnDrop<'_>, ExportError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state != ExportState::Idle {
            return Err(ExportError::Busy);
        }
        *state = ExportState::Validating;
        Ok(IdleOnDrop(self))
    }

    /// Export every month of `year` at `width` x `height` (as typed by the
    /// user) into `output_dir`, returning the archive path.
    ///
    /// `progress` is called with `(done, 12)` after each month. On failure
    /// nothing is written and the exporter is idle again.
    #[allow(clippy::too_many_arguments)]
    pub async fn export_year(
        &self,
        year: i32,
        width: &str,
        height: &str,
        settings: &StyleSettings,
        translation: &Translation,
        output_dir: &Path,
        mut progress: impl FnMut(usize, usize),
    ) -> Result<PathBuf, ExportError> {
        let _idle = self.begin()?;
        let result = self
            .run(
                year,
                width,
                height,
                settings,
                translation,
                output_dir,
                &mut progress,
            )
            .await;
        match &result {
            Ok(path) => {
                log::info!("Exported {}", path.display());
                self.set_state(ExportState::Done { path: path.clone() });
            }
            Err(e) => {
                log::warn!("Export failed: {e}");
                self.set_state(ExportState::Failed {
                    message: e.to_string(),
                });
            }
        }
        result
    }

    #[allow(clippy::too_many_arguments)]
    async fn run(
        &self,
        year: i32,
        width: &str,
        height: &str,
        settings: &StyleSettings,
        translation: &Translation,
        output_dir: &Path,
        progress: &mut dyn FnMut(usize, usize),
    ) -> Result<PathBuf, ExportError> {
        let (width, height) = parse_dimensions(width, height)?;
        let layout = compute_layout(
            width as f32,
            height as f32,
            settings.width as f32,
            settings.height as f32,
            settings,
        );
        let sizes = layout.font_sizes();

        let mut entries = Vec::with_capacity(MONTHS_PER_YEAR);
        for index in 0..MONTHS_PER_YEAR {
            self.set_state(ExportState::Generating { index });
            let month_index = index as u32;
            let render_error = |e| ExportError::Render {
                year,
                month_index,
                source: Box::new(e),
            };

            let view = MonthView::new(year, month_index).map_err(render_error)?;
            let readiness = self
                .fonts
                .ensure_font_ready(&settings.font_family, &sizes, self.font_timeout)
                .await;
            let png = render_month_png(
                &self.fonts,
                settings,
                translation,
                &view,
                (width, height),
                &readiness,
            )
            .map_err(render_error)?;
            entries.push((entry_name(year, month_index), png));
            progress(index + 1, MONTHS_PER_YEAR);
            tokio::task::yield_now().await;
        }

        self.set_state(ExportState::Archiving);
        let archive = build_archive(&entries)?;
        write_atomically(output_dir, &archive_name(year, width, height), &archive)
    }
}

fn build_archive(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, ExportError> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, data) in entries {
        writer.start_file(name.as_str(), options)?;
        writer
            .write_all(data)
            .map_err(zip::result::ZipError::from)?;
    }
    Ok(writer.finish()?.into_inner())
}

/// Write `data` to `dir/name` through a temporary file in the same
/// directory, so readers never see a partial archive.
pub(crate) fn write_atomically(dir: &Path, name: &str, data: &[u8]) -> Result<PathBuf, ExportError> {
    let path = dir.join(name);
    let write_error = |source| ExportError::Write {
        path: path.clone(),
        source,
    };
    std::fs::create_dir_all(dir).map_err(write_error)?;
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(data).map_err(write_error)?;
    file.persist(&path).map_err(|e| write_error(e.error))?;
    Ok(path)
}

/// Render the twelve year-overview thumbnails, each at [`OVERVIEW_SCALE`]
/// of the base size. Returns `(entry name, png)` pairs in month order.
pub async fn render_overview(
    fonts: &FontRegistry,
    settings: &StyleSettings,
    translation: &Translation,
    year: i32,
    font_timeout: Duration,
) -> MonthGridResult<Vec<(String, Vec<u8>)>> {
    let small = scaled_settings(settings, OVERVIEW_SCALE);
    let size = (small.width, small.height);
    let sizes = compute_layout(
        size.0 as f32,
        size.1 as f32,
        size.0 as f32,
        size.1 as f32,
        &small,
    )
    .font_sizes();
    let readiness = fonts
        .ensure_font_ready(&small.font_family, &sizes, font_timeout)
        .await;

    (0..MONTHS_PER_YEAR as u32)
        .map(|month_index| {
            let view = MonthView::new(year, month_index)?;
            let png = render_month_png(fonts, &small, translation, &view, size, &readiness)?;
            Ok((entry_name(year, month_index), png))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::RU;
    use monthgrid_canvas2d::FontConfig;
    use rstest::rstest;
    use std::io::Read;

    fn exporter() -> BatchExporter {
        let config = FontConfig {
            load_system_fonts: false,
            ..Default::default()
        };
        let fonts = FontRegistry::from_database(config.load());
        BatchExporter::new(&fonts, Duration::from_millis(500))
    }

    #[rstest]
    #[case("1920", "1280", Some((1920, 1280)))]
    #[case(" 300 ", "200", Some((300, 200)))]
    #[case("0", "200", None)]
    #[case("-5", "200", None)]
    #[case("abc", "200", None)]
    #[case("1920", "", None)]
    #[case("19.5", "200", None)]
    fn test_parse_dimensions(
        #[case] width: &str,
        #[case] height: &str,
        #[case] expected: Option<(u32, u32)>,
    ) {
        assert_eq!(parse_dimensions(width, height).ok(), expected);
    }

    #[test]
    fn test_aspect_helpers() {
        assert_eq!(export_height_for_width(1920, 600, 400), 1280);
        assert_eq!(export_width_for_height(1280, 600, 400), 1920);
        assert_eq!(export_height_for_width(1000, 700, 500), 714);
    }

    #[test]
    fn test_names() {
        assert_eq!(entry_name(2024, 0), "2024-01-January.png");
        assert_eq!(entry_name(2024, 11), "2024-12-December.png");
        assert_eq!(archive_name(2025, 1920, 1280), "calendar-2025-1920x1280.zip");
    }

    #[tokio::test]
    async fn test_export_writes_twelve_entries() {
        let exporter = exporter();
        let dir = tempfile::tempdir().unwrap();
        let mut seen = Vec::new();

        let path = exporter
            .export_year(
                2024,
                "300",
                "200",
                &StyleSettings::default(),
                &RU,
                dir.path(),
                |done, total| {
                    assert_eq!(exporter.state(), ExportState::Generating { index: done - 1 });
                    seen.push((done, total));
                },
            )
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("calendar-2024-300x200.zip"));
        assert_eq!(seen, (1..=12).map(|i| (i, 12)).collect::<Vec<_>>());
        assert_eq!(exporter.state(), ExportState::Idle);

        let mut archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(archive.len(), 12);
        let names: Vec<String> = archive.file_names().map(String::from).collect();
        assert!(names.contains(&"2024-09-September.png".to_string()));

        let mut png = Vec::new();
        archive
            .by_name("2024-02-February.png")
            .unwrap()
            .read_to_end(&mut png)
            .unwrap();
        let image = image::load_from_memory(&png).unwrap();
        assert_eq!((image.width(), image.height()), (300, 200));
    }

    #[tokio::test]
    async fn test_invalid_dimensions_leave_no_file() {
        let exporter = exporter();
        let dir = tempfile::tempdir().unwrap();
        let mut calls = 0;

        let err = exporter
            .export_year(
                2024,
                "wide",
                "200",
                &StyleSettings::default(),
                &EN,
                dir.path(),
                |_, _| calls += 1,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::InvalidDimensions { .. }));
        assert_eq!(calls, 0);
        assert_eq!(exporter.state(), ExportState::Idle);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_render_failure_aborts() {
        let exporter = exporter();
        let dir = tempfile::tempdir().unwrap();
        let mut calls = 0;

        // Wider than the raster surface allows
        let err = exporter
            .export_year(
                2024,
                "40000",
                "200",
                &StyleSettings::default(),
                &EN,
                dir.path(),
                |_, _| calls += 1,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Render { month_index: 0, .. }));
        assert_eq!(calls, 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_busy_while_running() {
        let exporter = exporter();
        let guard = exporter.begin().unwrap();
        assert!(matches!(exporter.begin(), Err(ExportError::Busy)));
        drop(guard);
        assert!(exporter.begin().is_ok());
    }

    #[tokio::test]
    async fn test_overview_sizes() {
        let config = FontConfig {
            load_system_fonts: false,
            ..Default::default()
        };
        let fonts = FontRegistry::from_database(config.load());
        let pages = render_overview(
            &fonts,
            &StyleSettings::default().with_size(200, 100),
            &EN,
            2023,
            Duration::from_millis(500),
        )
        .await
        .unwrap();
        assert_eq!(pages.len(), 12);
        let image = image::load_from_memory(&pages[0].1).unwrap();
        assert_eq!((image.width(), image.height()), (170, 85));
    }
}
