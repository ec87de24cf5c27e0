#![doc = include_str!("../README.md")]

pub mod calendar;
pub mod config;
pub mod context;
pub mod date;
pub mod error;
pub mod export;
pub mod fonts;
pub mod i18n;
pub mod layout;
pub mod month_input;
pub mod raster;
pub mod render;
pub mod settings;
pub mod store;

pub use calendar::{CalendarCanvas, RenderOutcome};
pub use config::AppConfig;
pub use context::AppContext;
pub use date::MonthView;
pub use error::{ExportError, MonthGridError, MonthGridResult, StoreError, ValidationError};
pub use export::{BatchExporter, ExportState};
pub use fonts::{FontReadiness, FontRegistry};
pub use i18n::{LanguageContext, Translation};
pub use settings::StyleSettings;
pub use serde_json;
