//! Error types for monthgrid-rs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using MonthGridError.
pub type MonthGridResult<T> = Result<T, MonthGridError>;

/// Top-level library error.
#[derive(Debug, Error)]
pub enum MonthGridError {
    /// Month index outside 0..=11 or year outside the supported range.
    #[error("Invalid date: year={year}, month_index={month_index}")]
    InvalidDate { year: i32, month_index: u32 },

    /// Raster surface failure (allocation, PNG encoding).
    #[error(transparent)]
    Canvas(#[from] monthgrid_canvas2d::Canvas2dError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration file could not be read or parsed.
    #[error("Failed to load config from {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reasons an imported settings document is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input is not valid JSON.
    #[error("Settings are not valid JSON: {0}")]
    Syntax(String),

    /// The top-level value is not an object.
    #[error("Settings must be a JSON object")]
    NotAnObject,

    /// A required field is absent.
    #[error("Missing field `{0}`")]
    MissingField(String),

    /// A field is present with the wrong JSON type.
    #[error("Field `{field}` must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    /// An enum-valued field holds a value outside its allowed set.
    #[error("Field `{field}` has unsupported value {value:?}")]
    UnknownVariant { field: String, value: String },
}

/// Errors that abort a batch export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export width/height did not parse as positive integers.
    #[error("Invalid export dimensions: {width:?} x {height:?}")]
    InvalidDimensions { width: String, height: String },

    /// Rendering a single month failed.
    #[error("Failed to render month {month_index} of {year}: {source}")]
    Render {
        year: i32,
        month_index: u32,
        #[source]
        source: Box<MonthGridError>,
    },

    /// Building the ZIP archive failed.
    #[error("Failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Writing the archive to its destination failed.
    #[error("Failed to write archive to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another export is still running on this exporter.
    #[error("An export is already in progress")]
    Busy,
}

/// Errors from the key-value settings store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
