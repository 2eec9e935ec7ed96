//! Drawing targets for a render pass.

use crate::arc::ArcPrimitive;
use crate::config::SunburstConfig;
use crate::label::LabelPrimitive;
use crate::model::{CenterPrimitive, SunburstLayout};
use crate::text::TextMeasurer;
use serde::Serialize;

/// Document-level settings handed to [`RenderSurface::clear`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceFrame {
    pub width: f64,
    pub height: f64,
    pub font_family: String,
    pub font_size: f64,
    pub label_fill: String,
    /// `dy` of label `<text>` elements, in `em`; matches the first wrapped line.
    pub baseline_dy_em: f64,
}

impl SurfaceFrame {
    pub fn from_config(config: &SunburstConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            font_family: config.font_family.clone(),
            font_size: config.font_size,
            label_fill: config.label_fill.clone(),
            baseline_dy_em: config.baseline_dy_em,
        }
    }
}

/// A vector target that accepts the primitives of one pass.
///
/// Every pass starts with `clear`, then draws all arcs, all labels, and the center, and ends
/// with `finish`. Surfaces never diff against a previous pass.
pub trait RenderSurface {
    fn clear(&mut self, frame: &SurfaceFrame);

    /// Measurement capability backing label wrapping. Detached or headless surfaces may return
    /// a measurer that always fails.
    fn text_measurer(&self) -> &dyn TextMeasurer;

    fn draw_arc(&mut self, arc: &ArcPrimitive);
    fn draw_label(&mut self, label: &LabelPrimitive);
    fn draw_center(&mut self, center: &CenterPrimitive);

    fn finish(&mut self) {}
}

/// Replays a computed layout onto `surface` in draw order.
pub fn draw_layout(layout: &SunburstLayout, surface: &mut dyn RenderSurface) {
    surface.clear(&layout.frame);
    for arc in &layout.arcs {
        surface.draw_arc(arc);
    }
    for label in &layout.labels {
        surface.draw_label(label);
    }
    surface.draw_center(&layout.center);
    surface.finish();
}
