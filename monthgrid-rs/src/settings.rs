//! Visual settings of a calendar and their JSON interchange format.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Background value meaning "do not fill".
pub const TRANSPARENT: &str = "transparent";

/// The four calendar colors, each a CSS color string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarColors {
    /// Title, weekday headers and weekday numbers.
    pub main: String,
    /// Weekend headers and numbers.
    pub accent: String,
    /// Rounded background, or `"transparent"`.
    pub background: String,
    /// Grid lines.
    pub hint: String,
}

impl Default for CalendarColors {
    fn default() -> Self {
        Self {
            main: "#000000".to_string(),
            accent: "#ff0000".to_string(),
            background: "#ffffff".to_string(),
            hint: "#d3d3d3".to_string(),
        }
    }
}

impl CalendarColors {
    pub fn has_background(&self) -> bool {
        self.background != TRANSPARENT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitlePosition {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    #[default]
    Center,
}

impl TitlePosition {
    pub const ALL: [TitlePosition; 3] = [
        TitlePosition::Left,
        TitlePosition::Center,
        TitlePosition::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TitlePosition::Left => "left",
            TitlePosition::Center => "center",
            TitlePosition::Right => "right",
        }
    }
}

impl NumberPosition {
    pub const ALL: [NumberPosition; 5] = [
        NumberPosition::TopLeft,
        NumberPosition::TopRight,
        NumberPosition::BottomLeft,
        NumberPosition::BottomRight,
        NumberPosition::Center,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NumberPosition::TopLeft => "top-left",
            NumberPosition::TopRight => "top-right",
            NumberPosition::BottomLeft => "bottom-left",
            NumberPosition::BottomRight => "bottom-right",
            NumberPosition::Center => "center",
        }
    }
}

impl FromStr for TitlePosition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                field: "titlePosition".to_string(),
                value: s.to_string(),
            })
    }
}

impl FromStr for NumberPosition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                field: "numberPosition".to_string(),
                value: s.to_string(),
            })
    }
}

impl fmt::Display for TitlePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NumberPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All visual parameters of a calendar render.
///
/// Values are immutable once built; the `with_*` methods return a modified
/// copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSettings {
    pub colors: CalendarColors,
    pub font_family: String,
    /// Title size in pixels at base resolution.
    pub title_font_size: u32,
    /// Day number size in pixels at base resolution.
    pub number_font_size: u32,
    pub show_grid: bool,
    pub title_position: TitlePosition,
    pub number_position: NumberPosition,
    /// Base canvas width in logical pixels.
    pub width: u32,
    /// Base canvas height in logical pixels.
    pub height: u32,
    pub border_radius: u32,
    #[serde(default)]
    pub use_long_day_names: bool,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            colors: CalendarColors::default(),
            font_family: "Arial".to_string(),
            title_font_size: 32,
            number_font_size: 20,
            show_grid: true,
            title_position: TitlePosition::Center,
            number_position: NumberPosition::Center,
            width: 600,
            height: 400,
            border_radius: 15,
            use_long_day_names: false,
        }
    }
}

impl StyleSettings {
    #[must_use]
    pub fn with_colors(mut self, colors: CalendarColors) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    #[must_use]
    pub fn with_title_font_size(mut self, size: u32) -> Self {
        self.title_font_size = size;
        self
    }

    #[must_use]
    pub fn with_number_font_size(mut self, size: u32) -> Self {
        self.number_font_size = size;
        self
    }

    #[must_use]
    pub fn with_show_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    #[must_use]
    pub fn with_title_position(mut self, position: TitlePosition) -> Self {
        self.title_position = position;
        self
    }

    #[must_use]
    pub fn with_number_position(mut self, position: NumberPosition) -> Self {
        self.number_position = position;
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_border_radius(mut self, radius: u32) -> Self {
        self.border_radius = radius;
        self
    }

    #[must_use]
    pub fn with_long_day_names(mut self, long: bool) -> Self {
        self.use_long_day_names = long;
        self
    }
}

/// Serialize settings as pretty-printed JSON with a fixed field order.
pub fn serialize(settings: &StyleSettings) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(settings)
}

/// Parse and validate an imported settings document.
///
/// The document is checked against the schema before any value is built, so
/// a partial or malformed record is rejected as a whole.
pub fn deserialize(text: &str) -> Result<StyleSettings, ValidationError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ValidationError::Syntax(e.to_string()))?;
    let obj = value.as_object().ok_or(ValidationError::NotAnObject)?;
    validate(obj)?;
    serde_json::from_value(value).map_err(|e| ValidationError::Syntax(e.to_string()))
}

fn validate(obj: &Map<String, Value>) -> Result<(), ValidationError> {
    let colors = require(obj, "colors")?
        .as_object()
        .ok_or_else(|| wrong_type("colors", "an object"))?;
    for key in ["main", "accent", "background", "hint"] {
        let path = format!("colors.{key}");
        let value = colors
            .get(key)
            .ok_or_else(|| ValidationError::MissingField(path.clone()))?;
        if !value.is_string() {
            return Err(wrong_type(&path, "a string"));
        }
    }

    let family = require(obj, "fontFamily")?
        .as_str()
        .ok_or_else(|| wrong_type("fontFamily", "a string"))?;
    if family.is_empty() {
        return Err(wrong_type("fontFamily", "a non-empty string"));
    }

    for key in ["titleFontSize", "numberFontSize", "width", "height"] {
        require_uint(obj, key, 1)?;
    }
    require_uint(obj, "borderRadius", 0)?;

    if !require(obj, "showGrid")?.is_boolean() {
        return Err(wrong_type("showGrid", "a boolean"));
    }

    let title = require(obj, "titlePosition")?
        .as_str()
        .ok_or_else(|| wrong_type("titlePosition", "a string"))?;
    title.parse::<TitlePosition>()?;

    let number = require(obj, "numberPosition")?
        .as_str()
        .ok_or_else(|| wrong_type("numberPosition", "a string"))?;
    number.parse::<NumberPosition>()?;

    if let Some(long) = obj.get("useLongDayNames") {
        if !long.is_boolean() {
            return Err(wrong_type("useLongDayNames", "a boolean"));
        }
    }

    Ok(())
}

fn require<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value, ValidationError> {
    obj.get(key)
        .ok_or_else(|| ValidationError::MissingField(key.to_string()))
}

fn require_uint(obj: &Map<String, Value>, key: &str, min: u64) -> Result<(), ValidationError> {
    let expected = if min == 0 {
        "a non-negative integer"
    } else {
        "a positive integer"
    };
    match require(obj, key)?.as_u64() {
        Some(n) if n >= min && n <= u64::from(u32::MAX) => Ok(()),
        _ => Err(wrong_type(key, expected)),
    }
}

fn wrong_type(field: &str, expected: &'static str) -> ValidationError {
    ValidationError::WrongType {
        field: field.to_string(),
        expected,
    }
}
