//! Style types and enums for raster drawing operations.

use cosmic_text::Weight;

/// Paint used by fills and strokes. Only flat colors are supported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillStyle {
    /// Solid color fill.
    Color(tiny_skia::Color),
}

impl Default for FillStyle {
    fn default() -> Self {
        // Default is opaque black
        FillStyle::Color(tiny_skia::Color::BLACK)
    }
}

/// Text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Align text to the left of the anchor point.
    #[default]
    Left,
    /// Align text to the right of the anchor point.
    Right,
    /// Center text on the anchor point.
    Center,
}

/// Text baseline relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// Top of the em square.
    Top,
    /// Middle of the em square.
    Middle,
    /// Alphabetic baseline.
    #[default]
    Alphabetic,
    /// Bottom of the em square.
    Bottom,
}

/// Font weight used for text drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl From<FontWeight> for Weight {
    fn from(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Normal => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        }
    }
}

impl FontWeight {
    /// Numeric CSS weight (400 or 700).
    pub fn value(self) -> u16 {
        Weight::from(self).0
    }
}

/// A structured font request: families in order of preference, weight and
/// pixel size.
///
/// Family names may be concrete (`"Roboto"`) or generic (`"sans-serif"`,
/// `"serif"`, `"monospace"`, `"cursive"`, `"fantasy"`).
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font families in order of preference.
    pub families: Vec<String>,
    /// Font weight.
    pub weight: FontWeight,
    /// Font size in pixels.
    pub size_px: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            families: vec!["sans-serif".to_string()],
            weight: FontWeight::Normal,
            size_px: 10.0,
        }
    }
}

impl FontSpec {
    /// Create a font spec for a single family.
    pub fn new(family: impl Into<String>, weight: FontWeight, size_px: f32) -> Self {
        Self {
            families: vec![family.into()],
            weight,
            size_px,
        }
    }

    /// Append fallback families after the current ones.
    pub fn with_fallbacks<I, S>(mut self, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.families.extend(fallbacks.into_iter().map(Into::into));
        self
    }
}
