//! Text measurement helpers built on cosmic-text.

use crate::style::{FontSpec, TextAlign, TextBaseline};
use cosmic_text::{Attrs, Buffer, CacheKeyFlags, Family, FontSystem, Metrics, Shaping};

/// Text metrics returned by [`measure_text`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMetrics {
    /// Width of the text in pixels.
    pub width: f32,
    /// Distance from baseline to the top of the line box.
    pub ascent: f32,
    /// Distance from baseline to the bottom of the line box.
    pub descent: f32,
}

/// Family chosen for a [`FontSpec`] after consulting the font database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResolvedFamily {
    /// A concrete family present in the database.
    Named(String),
    SansSerif,
    Serif,
    Monospace,
    Cursive,
    Fantasy,
}

impl ResolvedFamily {
    pub(crate) fn as_family(&self) -> Family<'_> {
        match self {
            ResolvedFamily::Named(name) => Family::Name(name),
            ResolvedFamily::SansSerif => Family::SansSerif,
            ResolvedFamily::Serif => Family::Serif,
            ResolvedFamily::Monospace => Family::Monospace,
            ResolvedFamily::Cursive => Family::Cursive,
            ResolvedFamily::Fantasy => Family::Fantasy,
        }
    }
}

/// Walk the family list and return the first family that can actually be
/// served, mirroring how a browser walks a CSS `font-family` stack.
pub(crate) fn resolve_family(font_system: &FontSystem, families: &[String]) -> ResolvedFamily {
    for family in families {
        let generic = match family.to_ascii_lowercase().as_str() {
            "sans-serif" => Some(ResolvedFamily::SansSerif),
            "serif" => Some(ResolvedFamily::Serif),
            "monospace" => Some(ResolvedFamily::Monospace),
            "cursive" => Some(ResolvedFamily::Cursive),
            "fantasy" => Some(ResolvedFamily::Fantasy),
            _ => None,
        };
        if let Some(generic) = generic {
            return generic;
        }

        let installed = font_system.db().faces().any(|face| {
            face.families
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(family))
        });
        if installed {
            return ResolvedFamily::Named(family.clone());
        }
        log::debug!(target: "canvas", "font family {:?} not installed, trying next", family);
    }
    ResolvedFamily::SansSerif
}

/// Shape `text` into a cosmic-text buffer using the given font.
///
/// Returns `None` when the database has no faces at all, since the shaper
/// then has nothing to fall back to.
pub(crate) fn shape(
    font_system: &mut FontSystem,
    text: &str,
    font: &FontSpec,
    flags: CacheKeyFlags,
) -> Option<Buffer> {
    if font_system.db().faces().next().is_none() {
        return None;
    }
    let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);

    let resolved = resolve_family(font_system, &font.families);
    let attrs = Attrs::new()
        .family(resolved.as_family())
        .weight(font.weight.into())
        .cache_key_flags(flags);

    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);
    Some(buffer)
}

/// Measure text using cosmic-text. Without any font faces the width is zero
/// and the vertical metrics are estimated from the font size.
pub fn measure_text(font_system: &mut FontSystem, text: &str, font: &FontSpec) -> TextMetrics {
    match shape(font_system, text, font, CacheKeyFlags::DISABLE_HINTING) {
        Some(buffer) => metrics_of(&buffer, font.size_px),
        None => TextMetrics {
            width: 0.0,
            ascent: font.size_px * 0.8,
            descent: font.size_px * 0.2,
        },
    }
}

pub(crate) fn metrics_of(buffer: &Buffer, size_px: f32) -> TextMetrics {
    let mut width: f32 = 0.0;
    let mut ascent: f32 = 0.0;
    let mut descent: f32 = 0.0;
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
        ascent = ascent.max(run.line_y - run.line_top);
        descent = descent.max((run.line_top + run.line_height) - run.line_y);
    }
    if ascent == 0.0 && descent == 0.0 {
        ascent = size_px * 0.8;
        descent = size_px * 0.2;
    }
    TextMetrics {
        width,
        ascent,
        descent,
    }
}

/// Calculate X offset for text alignment.
pub(crate) fn calculate_text_x_offset(width: f32, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Right => -width,
        TextAlign::Center => -width / 2.0,
    }
}

/// Calculate Y offset from the anchor to the alphabetic baseline.
pub(crate) fn calculate_text_y_offset(ascent: f32, descent: f32, baseline: TextBaseline) -> f32 {
    match baseline {
        TextBaseline::Top => ascent,
        TextBaseline::Middle => (ascent - descent) / 2.0,
        TextBaseline::Alphabetic => 0.0,
        TextBaseline::Bottom => -descent,
    }
}
