use crate::arc::ArcPrimitive;
use crate::config::SunburstConfig;
use crate::label::LabelPrimitive;
use crate::partition::PartitionLayout;
use crate::surface::SurfaceFrame;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn centered(width: f64, height: f64) -> Self {
        Self {
            min_x: -width / 2.0,
            min_y: -height / 2.0,
            max_x: width / 2.0,
            max_y: height / 2.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Center disk with the root's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterPrimitive {
    pub radius: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    /// CSS `filter` value.
    pub filter: String,
    pub label: String,
    pub label_class: &'static str,
    pub label_dy_em: f64,
    pub font_size_px: f64,
    pub font_weight: String,
    pub label_color: String,
}

impl CenterPrimitive {
    pub fn from_config(root_name: &str, config: &SunburstConfig) -> Self {
        Self {
            radius: config.inner_radius,
            fill: config.center_fill.clone(),
            stroke: config.center_stroke.clone(),
            stroke_width: config.center_stroke_width,
            filter: "drop-shadow(0 0 4px rgba(0,0,0,0.1))".to_string(),
            label: root_name.to_string(),
            label_class: "main-label",
            label_dy_em: config.baseline_dy_em,
            font_size_px: config.center_font_size,
            font_weight: config.center_font_weight.clone(),
            label_color: config.center_stroke.clone(),
        }
    }
}

/// Everything one render pass produces, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunburstLayout {
    pub frame: SurfaceFrame,
    pub bounds: Bounds,
    pub partition: PartitionLayout,
    pub arcs: Vec<ArcPrimitive>,
    pub labels: Vec<LabelPrimitive>,
    pub center: CenterPrimitive,
}

impl SunburstLayout {
    pub fn arc_by_name(&self, name: &str) -> Option<&ArcPrimitive> {
        self.arcs.iter().find(|a| a.name == name)
    }

    pub fn label_for(&self, node: corolla_core::NodeId) -> Option<&LabelPrimitive> {
        self.labels.iter().find(|l| l.node == node)
    }
}
