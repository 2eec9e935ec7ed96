//! Attach/render lifecycle around a [`RenderSurface`].

use crate::config::SunburstConfig;
use crate::model::SunburstLayout;
use crate::surface::{RenderSurface, draw_layout};
use crate::{Result, layout_weighted_tree};
use corolla_core::{Node, NodeId, WeightedTree, build_weighted_tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// No surface was attached; nothing was drawn.
    Skipped,
    Rendered { arcs: usize, labels: usize },
}

type ActivationHandler = Box<dyn FnMut(&str)>;

/// A sunburst bound to one immutable hierarchy.
///
/// Rendering is explicit: [`attach`](Self::attach) a surface, then call
/// [`render`](Self::render). Every pass clears the surface and redraws from scratch.
pub struct SunburstChart<S: RenderSurface> {
    tree: WeightedTree,
    config: SunburstConfig,
    surface: Option<S>,
    last_layout: Option<SunburstLayout>,
    on_activate: Option<ActivationHandler>,
}

impl<S: RenderSurface> SunburstChart<S> {
    pub fn new(root: &Node, config: SunburstConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tree: build_weighted_tree(root),
            config,
            surface: None,
            last_layout: None,
            on_activate: None,
        })
    }

    /// Sink for activation reports (root-to-node path strings).
    pub fn with_activation_handler(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_activate = Some(Box::new(handler));
        self
    }

    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn detach(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn tree(&self) -> &WeightedTree {
        &self.tree
    }

    pub fn config(&self) -> &SunburstConfig {
        &self.config
    }

    /// Layout of the most recent completed pass.
    pub fn layout(&self) -> Option<&SunburstLayout> {
        self.last_layout.as_ref()
    }

    pub fn render(&mut self) -> RenderOutcome {
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!("no surface attached; skipping sunburst render");
            return RenderOutcome::Skipped;
        };

        let layout = layout_weighted_tree(&self.tree, &self.config, surface.text_measurer());
        draw_layout(&layout, surface);

        let outcome = RenderOutcome::Rendered {
            arcs: layout.arcs.len(),
            labels: layout.labels.len(),
        };
        self.last_layout = Some(layout);
        outcome
    }

    /// Reports the root-to-node path of `id` on the activation channel.
    ///
    /// Returns `None` for the root (it has no arc) and for ids outside the tree.
    pub fn activate(&mut self, id: NodeId) -> Option<String> {
        if id == WeightedTree::ROOT || self.tree.get(id).is_none() {
            return None;
        }
        let path = self.tree.path_label(id, &self.config.path_delimiter);

        tracing::info!(node = id, path = %path, "sunburst arc activated");
        if let Some(handler) = self.on_activate.as_mut() {
            handler(&path);
        }
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc::ArcPrimitive;
    use crate::label::LabelPrimitive;
    use crate::model::CenterPrimitive;
    use crate::surface::SurfaceFrame;
    use crate::text::{TextMeasurer, UnavailableTextMeasurer};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Recorder {
        ops: Vec<String>,
    }

    impl RenderSurface for Recorder {
        fn clear(&mut self, _frame: &SurfaceFrame) {
            self.ops.clear();
            self.ops.push("clear".to_string());
        }

        fn text_measurer(&self) -> &dyn TextMeasurer {
            &UnavailableTextMeasurer
        }

        fn draw_arc(&mut self, arc: &ArcPrimitive) {
            self.ops.push(format!("arc:{}", arc.name));
        }

        fn draw_label(&mut self, label: &LabelPrimitive) {
            self.ops.push(format!("label:{}", label.node));
        }

        fn draw_center(&mut self, center: &CenterPrimitive) {
            self.ops.push(format!("center:{}", center.label));
        }
    }

    fn sample() -> Node {
        Node::branch(
            "Root",
            vec![
                Node::leaf("B"),
                Node::branch("A", vec![Node::leaf("a1"), Node::leaf("a2")]),
            ],
        )
    }

    #[test]
    fn render_without_surface_is_skipped() {
        let mut chart: SunburstChart<Recorder> =
            SunburstChart::new(&sample(), SunburstConfig::default()).unwrap();
        assert_eq!(chart.render(), RenderOutcome::Skipped);
        assert!(chart.layout().is_none());
    }

    #[test]
    fn render_draws_arcs_then_labels_then_center() {
        let mut chart = SunburstChart::new(&sample(), SunburstConfig::default()).unwrap();
        chart.attach(Recorder::default());
        assert_eq!(
            chart.render(),
            RenderOutcome::Rendered { arcs: 4, labels: 4 }
        );

        let ops = &chart.surface().unwrap().ops;
        assert_eq!(ops[0], "clear");
        assert_eq!(&ops[1..5], &["arc:A", "arc:B", "arc:a1", "arc:a2"]);
        assert!(ops[5..9].iter().all(|op| op.starts_with("label:")));
        assert_eq!(ops[9], "center:Root");
        assert_eq!(ops.len(), 10);
    }

    #[test]
    fn rerender_clears_previous_pass() {
        let mut chart = SunburstChart::new(&sample(), SunburstConfig::default()).unwrap();
        chart.attach(Recorder::default());
        chart.render();
        chart.render();
        assert_eq!(chart.surface().unwrap().ops.len(), 10);
    }

    #[test]
    fn detach_returns_surface_and_skips_later_renders() {
        let mut chart = SunburstChart::new(&sample(), SunburstConfig::default()).unwrap();
        chart.attach(Recorder::default());
        chart.render();
        let surface = chart.detach().unwrap();
        assert_eq!(surface.ops.len(), 10);
        assert_eq!(chart.render(), RenderOutcome::Skipped);
    }

    #[test]
    fn activation_reports_root_to_node_path() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut chart: SunburstChart<Recorder> =
            SunburstChart::new(&sample(), SunburstConfig::default())
                .unwrap()
                .with_activation_handler(move |path| sink.borrow_mut().push(path.to_string()));

        let a1 = chart
            .tree()
            .nodes()
            .iter()
            .position(|n| n.name == "a1")
            .unwrap();
        assert_eq!(chart.activate(a1).as_deref(), Some("Root > A > a1"));
        assert_eq!(chart.activate(0), None);
        assert_eq!(chart.activate(999), None);
        assert_eq!(seen.borrow().as_slice(), &["Root > A > a1".to_string()]);
    }

    #[test]
    fn activation_path_matches_arc_tooltip() {
        let mut chart = SunburstChart::new(&sample(), SunburstConfig::default()).unwrap();
        chart.attach(Recorder::default());
        chart.render();

        let arcs: Vec<(NodeId, String)> = chart
            .layout()
            .unwrap()
            .arcs
            .iter()
            .map(|arc| (arc.node, arc.tooltip.clone()))
            .collect();
        assert_eq!(arcs.len(), 4);
        for (node, tooltip) in arcs {
            assert_eq!(chart.activate(node), Some(tooltip));
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SunburstConfig {
            width: 0.0,
            ..Default::default()
        };
        assert!(SunburstChart::<Recorder>::new(&sample(), config).is_err());
    }
}
