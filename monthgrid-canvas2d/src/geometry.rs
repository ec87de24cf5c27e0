//! Plain geometry and color values passed into the context.

/// An axis-aligned rectangle in user units. Negative extents are allowed and
/// flip the rectangle around its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A rectangle with the same radius on every corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRectParams {
    pub rect: RectParams,
    /// Clamped to zero from below and to half the shorter side from above.
    pub radius: f32,
}

/// 8-bit straight-alpha RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CanvasColor {
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<CanvasColor> for tiny_skia::Color {
    fn from(c: CanvasColor) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}
