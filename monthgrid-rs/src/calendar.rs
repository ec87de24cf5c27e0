//! A live calendar that owns one raster target and redraws it on demand.

use crate::date::MonthView;
use crate::error::MonthGridResult;
use crate::fonts::FontRegistry;
use crate::i18n::Translation;
use crate::layout::compute_layout;
use crate::raster::{draw_month, RasterTarget};
use crate::settings::StyleSettings;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What happened to one render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The pixels on the target are from this request.
    Committed,
    /// A newer request was issued while this one waited for fonts.
    Stale,
}

/// Calendar preview bound to a single raster target.
///
/// Every call to [`CalendarCanvas::render`] takes a new request token. Only
/// the request still holding the latest token once it owns the target draws;
/// drawing never suspends, so two renders never interleave on the target.
pub struct CalendarCanvas {
    fonts: FontRegistry,
    target: Mutex<RasterTarget>,
    latest: AtomicU64,
    font_timeout: Duration,
    device_pixel_ratio: f32,
}

impl CalendarCanvas {
    pub fn new(
        fonts: &FontRegistry,
        font_timeout: Duration,
        device_pixel_ratio: f32,
    ) -> MonthGridResult<Self> {
        Ok(Self {
            fonts: fonts.clone(),
            target: Mutex::new(RasterTarget::new(fonts)?),
            latest: AtomicU64::new(0),
            font_timeout,
            device_pixel_ratio,
        })
    }

    /// Request a redraw of `year`/`month_index` at the settings' own size.
    ///
    /// The token is taken when this is called, not when the returned future
    /// is first polled.
    pub fn render<'a>(
        &'a self,
        year: i32,
        month_index: u32,
        settings: StyleSettings,
        translation: &'static Translation,
    ) -> impl Future<Output = MonthGridResult<RenderOutcome>> + 'a {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            let view = MonthView::new(year, month_index)?;
            let size = (settings.width as f32, settings.height as f32);
            let layout = compute_layout(size.0, size.1, size.0, size.1, &settings);

            let readiness = self
                .fonts
                .ensure_font_ready(&settings.font_family, &layout.font_sizes(), self.font_timeout)
                .await;

            // Compared under the lock so a newer request cannot slip in
            // between the check and the draw.
            let mut target = self.target.lock().unwrap_or_else(|e| e.into_inner());
            if self.latest.load(Ordering::SeqCst) != token {
                log::debug!("Dropping stale render request {token}");
                return Ok(RenderOutcome::Stale);
            }
            draw_month(
                &mut target,
                &settings,
                translation,
                &view,
                size,
                self.device_pixel_ratio,
                &readiness,
            )?;
            Ok(RenderOutcome::Committed)
        }
    }

    /// Device pixel size of the target.
    pub fn size(&self) -> (u32, u32) {
        let target = self.target.lock().unwrap_or_else(|e| e.into_inner());
        (target.width(), target.height())
    }

    pub fn to_png(&self) -> MonthGridResult<Vec<u8>> {
        self.target
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .to_png()
    }
}
