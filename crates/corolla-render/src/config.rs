use crate::{Error, Result};
use corolla_core::ConfigOverrides;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// d3 `schemeCategory10`.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// How the radial span is divided between depth levels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RadialSchedule {
    /// Every depth (root included) gets `span / (height + 1)`.
    #[default]
    Uniform,
    /// The root fills `[0, inner_radius]`; deeper levels share the rest equally.
    #[serde(rename_all = "camelCase")]
    InnerHole { inner_radius: f64 },
    /// Relative thickness per depth, root first. The last entry repeats for deeper levels;
    /// non-positive or non-finite entries count as `1`.
    Thickness { weights: Vec<f64> },
}

impl RadialSchedule {
    /// Radial band `[start, end]` of `depth` in a tree of the given `height`.
    pub fn band(&self, depth: usize, height: usize, span: f64) -> (f64, f64) {
        match self {
            Self::Uniform => uniform_band(depth, height, span),
            Self::InnerHole { inner_radius } => {
                let hole = if inner_radius.is_finite() {
                    inner_radius.clamp(0.0, span)
                } else {
                    0.0
                };
                if depth == 0 {
                    return (0.0, hole);
                }
                let band = (span - hole) / height.max(1) as f64;
                (
                    hole + (depth - 1) as f64 * band,
                    hole + depth as f64 * band,
                )
            }
            Self::Thickness { weights } => {
                let weight_at = |d: usize| {
                    let w = weights
                        .get(d)
                        .or_else(|| weights.last())
                        .copied()
                        .unwrap_or(1.0);
                    if w.is_finite() && w > 0.0 { w } else { 1.0 }
                };
                let total: f64 = (0..=height).map(weight_at).sum();
                let before: f64 = (0..depth).map(weight_at).sum();
                let k = span / total;
                (before * k, (before + weight_at(depth)) * k)
            }
        }
    }
}

fn uniform_band(depth: usize, height: usize, span: f64) -> (f64, f64) {
    let band = span / (height + 1) as f64;
    (depth as f64 * band, (depth + 1) as f64 * band)
}

/// One hand-authored label line (`dy` is relative to the previous line, in `em`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelOverrideLine {
    pub text: String,
    pub dy_em: f64,
}

impl LabelOverrideLine {
    pub fn new(text: impl Into<String>, dy_em: f64) -> Self {
        Self {
            text: text.into(),
            dy_em,
        }
    }
}

fn default_label_overrides() -> IndexMap<String, Vec<LabelOverrideLine>> {
    let mut out = IndexMap::new();
    out.insert(
        "Business Impact".to_string(),
        vec![
            LabelOverrideLine::new("Business", -0.1),
            LabelOverrideLine::new("Impact", 1.1),
        ],
    );
    out
}

/// Resolved chart settings. Read from the `sunburst` section of [`ConfigOverrides`]
/// (camelCase keys); anything missing falls back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SunburstConfig {
    pub width: f64,
    pub height: f64,
    pub inner_radius: f64,
    /// Share of the outer radius handed to the partition layout.
    pub radial_fraction: f64,
    pub arc_inset: f64,
    pub max_pad_angle: f64,
    /// Linear pad radius; `None` means half the chart radius.
    pub pad_radius: Option<f64>,
    /// Shrink applied to `angular span × mid radius` when wrapping labels.
    pub chord_shrink: f64,
    /// Width per character used when text cannot be measured.
    pub fallback_char_width: f64,
    pub line_height_em: f64,
    pub baseline_dy_em: f64,
    pub level1_font_size: f64,
    pub level1_font_weight: String,
    pub nested_font_size: f64,
    pub nested_font_weight: String,
    pub font_family: String,
    pub font_size: f64,
    pub fill_opacity: f64,
    pub label_fill: String,
    pub center_fill: String,
    pub center_stroke: String,
    pub center_stroke_width: f64,
    pub center_font_size: f64,
    pub center_font_weight: String,
    pub path_delimiter: String,
    pub palette: Vec<String>,
    pub radial_schedule: RadialSchedule,
    pub label_overrides: IndexMap<String, Vec<LabelOverrideLine>>,
}

impl Default for SunburstConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 480.0,
            inner_radius: 65.0,
            radial_fraction: 0.9,
            arc_inset: 3.0,
            max_pad_angle: 0.005,
            pad_radius: None,
            chord_shrink: 0.75,
            fallback_char_width: 6.0,
            line_height_em: 1.1,
            baseline_dy_em: 0.35,
            level1_font_size: 13.0,
            level1_font_weight: "600".to_string(),
            nested_font_size: 8.0,
            nested_font_weight: "normal".to_string(),
            font_family: "'Segoe UI', sans-serif".to_string(),
            font_size: 11.0,
            fill_opacity: 0.8,
            label_fill: "#fff".to_string(),
            center_fill: "#fff".to_string(),
            center_stroke: "#a000c8".to_string(),
            center_stroke_width: 3.0,
            center_font_size: 28.0,
            center_font_weight: "bold".to_string(),
            path_delimiter: " > ".to_string(),
            palette: CATEGORY10.iter().map(|c| c.to_string()).collect(),
            radial_schedule: RadialSchedule::Uniform,
            label_overrides: default_label_overrides(),
        }
    }
}

impl SunburstConfig {
    pub fn from_overrides(overrides: &ConfigOverrides) -> Result<Self> {
        let section = overrides
            .get("sunburst")
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));
        let cfg: Self = serde_json::from_value(section)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(path: &str, message: &str) -> Error {
            Error::InvalidConfig {
                path: format!("sunburst.{path}"),
                message: message.to_string(),
            }
        }

        for (path, v) in [("width", self.width), ("height", self.height)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid(path, "must be a positive number"));
            }
        }
        if !(self.inner_radius.is_finite() && self.inner_radius >= 0.0) {
            return Err(invalid("innerRadius", "must be a non-negative number"));
        }
        if !(self.radial_fraction > 0.0 && self.radial_fraction <= 1.0) {
            return Err(invalid("radialFraction", "must be in (0, 1]"));
        }
        if !(self.arc_inset.is_finite() && self.arc_inset >= 0.0) {
            return Err(invalid("arcInset", "must be a non-negative number"));
        }
        if self.inner_radius + self.arc_inset >= self.radial_span() {
            return Err(invalid("innerRadius", "leaves no room for the first ring"));
        }
        if !(self.chord_shrink.is_finite() && self.chord_shrink > 0.0) {
            return Err(invalid("chordShrink", "must be a positive number"));
        }
        if !(self.fallback_char_width.is_finite() && self.fallback_char_width >= 0.0) {
            return Err(invalid("fallbackCharWidth", "must be a non-negative number"));
        }
        if self.palette.is_empty() {
            return Err(invalid("palette", "must contain at least one color"));
        }
        Ok(())
    }

    /// Outer radius of the chart (half the smaller side).
    pub fn radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    /// Radial span handed to the partition layout.
    pub fn radial_span(&self) -> f64 {
        self.radius() * self.radial_fraction
    }

    pub fn effective_pad_radius(&self) -> f64 {
        self.pad_radius.unwrap_or_else(|| self.radius() / 2.0)
    }
}
