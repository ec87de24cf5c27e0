//! Application-wide collaborators, built once and passed by reference.

use crate::calendar::CalendarCanvas;
use crate::config::AppConfig;
use crate::error::MonthGridResult;
use crate::export::BatchExporter;
use crate::fonts::FontRegistry;
use crate::i18n::{env_locale, LanguageContext};
use crate::store::{JsonFileStore, KeyValueStore};
use std::sync::Arc;

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub fonts: FontRegistry,
    pub language: LanguageContext,
    pub store: Arc<dyn KeyValueStore>,
}

impl AppContext {
    /// Build the context with the JSON file store named by `config`.
    pub fn new(config: AppConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(config.store_path()));
        Self::with_store(config, store)
    }

    /// Build the context over an explicit store. The language is detected
    /// from the store, then the process locale.
    pub fn with_store(config: AppConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let fonts = FontRegistry::new(&config);
        let language = LanguageContext::detect(store.clone(), env_locale().as_deref());
        Self {
            config,
            fonts,
            language,
            store,
        }
    }

    /// A live calendar using the configured device pixel ratio.
    pub fn calendar(&self) -> MonthGridResult<CalendarCanvas> {
        CalendarCanvas::new(
            &self.fonts,
            self.config.font_timeout(),
            self.config.device_pixel_ratio(),
        )
    }

    pub fn exporter(&self) -> BatchExporter {
        BatchExporter::new(&self.fonts, self.config.font_timeout())
    }
}
