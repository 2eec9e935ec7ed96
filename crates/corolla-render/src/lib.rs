#![forbid(unsafe_code)]

//! Headless sunburst layout.
//!
//! A pass runs the hierarchy through [`partition::partition`], then builds one
//! [`arc::ArcPrimitive`] and one [`label::LabelPrimitive`] per non-root node, and finally the
//! center disk. [`driver::SunburstChart`] wraps that pass in an attach/render lifecycle over a
//! [`surface::RenderSurface`].

pub mod arc;
pub mod color;
pub mod config;
pub mod driver;
pub mod label;
pub mod model;
pub mod partition;
pub mod surface;
pub mod svg;
pub mod text;

use crate::color::OrdinalColorScale;
use crate::config::SunburstConfig;
use crate::model::{Bounds, CenterPrimitive, SunburstLayout};
use crate::surface::SurfaceFrame;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use corolla_core::{Node, WeightedTree, build_weighted_tree};
use std::f64::consts::TAU;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] corolla_core::Error),
    #[error("invalid sunburst config ({path}): {message}")]
    InvalidConfig { path: String, message: String },
    #[error("sunburst config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub config: SunburstConfig,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            config: SunburstConfig::default(),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Lays out `root` with a fresh weighted tree.
pub fn layout_sunburst(root: &Node, options: &LayoutOptions) -> Result<SunburstLayout> {
    options.config.validate()?;
    let tree = build_weighted_tree(root);
    Ok(layout_weighted_tree(
        &tree,
        &options.config,
        options.text_measurer.as_ref(),
    ))
}

/// Decodes a `{name, children?, value?}` JSON hierarchy and lays it out.
pub fn layout_sunburst_json(json: &str, options: &LayoutOptions) -> Result<SunburstLayout> {
    let root = Node::from_json_str(json)?;
    layout_sunburst(&root, options)
}

/// One full pass over an already weighted tree. `config` is assumed valid.
pub fn layout_weighted_tree(
    tree: &WeightedTree,
    config: &SunburstConfig,
    measurer: &dyn TextMeasurer,
) -> SunburstLayout {
    let partition = partition::partition(
        tree,
        TAU,
        config.radial_span(),
        &config.radial_schedule,
    );

    let mut colors = OrdinalColorScale::new(config.palette.clone());
    let ids: Vec<_> = partition
        .descendants()
        .into_iter()
        .filter(|id| *id != partition::PartitionLayout::ROOT)
        .collect();

    let arcs: Vec<_> = ids
        .iter()
        .map(|id| arc::build_arc(&partition, *id, config, &mut colors))
        .collect();
    let labels: Vec<_> = ids
        .iter()
        .map(|id| label::place_label(&partition, *id, measurer, config))
        .collect();

    let root_name = partition.root().name.clone();
    let center = CenterPrimitive::from_config(&root_name, config);

    tracing::debug!(
        arcs = arcs.len(),
        labels = labels.len(),
        wrapped = labels.iter().filter(|l| l.lines.len() > 1).count(),
        colors = colors.domain_len(),
        "sunburst layout pass"
    );

    SunburstLayout {
        frame: SurfaceFrame::from_config(config),
        bounds: Bounds::centered(config.width, config.height),
        partition,
        arcs,
        labels,
        center,
    }
}

/// Lays out `root` and serializes it to an SVG document.
pub fn render_svg(
    root: &Node,
    options: &LayoutOptions,
    svg_options: &svg::SvgRenderOptions,
) -> Result<String> {
    let layout = layout_sunburst(root, options)?;
    Ok(svg::render_sunburst_svg(&layout, svg_options))
}
