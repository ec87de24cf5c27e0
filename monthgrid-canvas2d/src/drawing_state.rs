//! The part of the context that `save`/`restore` snapshot.

use crate::style::{FillStyle, FontSpec, TextAlign, TextBaseline};
use tiny_skia::{Path, Transform};

#[derive(Debug, Clone)]
pub(crate) struct DrawingState {
    pub fill_style: FillStyle,
    pub stroke_style: FillStyle,
    /// In user units; scaled by the transform when stroking.
    pub line_width: f32,
    pub font: FontSpec,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    pub transform: Transform,
    /// Device-space paths whose intersection is the clip region.
    pub clip_paths: Vec<Path>,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: FillStyle::default(),
            stroke_style: FillStyle::default(),
            line_width: 1.0,
            font: FontSpec::default(),
            text_align: TextAlign::Left,
            text_baseline: TextBaseline::Alphabetic,
            transform: Transform::identity(),
            clip_paths: Vec::new(),
        }
    }
}
