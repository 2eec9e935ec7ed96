//! Partition layout: angular and radial extents for every node of a weighted tree.
//!
//! Angles are proportional to leaf weight; radii come from a per-depth [`RadialSchedule`].
//! Node ids match the ids of the source [`WeightedTree`].

use crate::config::RadialSchedule;
use corolla_core::hierarchy::{ancestor_path_label, descendants_bfs};
use corolla_core::{NodeId, WeightedTree};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub name: String,
    pub depth: usize,
    pub weight: f64,
    pub angle_start: f64,
    pub angle_end: f64,
    pub radius_start: f64,
    pub radius_end: f64,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl LayoutNode {
    pub fn angular_span(&self) -> f64 {
        self.angle_end - self.angle_start
    }

    pub fn mid_angle(&self) -> f64 {
        (self.angle_start + self.angle_end) / 2.0
    }

    pub fn mid_radius(&self) -> f64 {
        (self.radius_start + self.radius_end) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionLayout {
    nodes: Vec<LayoutNode>,
    pub angular_span: f64,
    pub radial_span: f64,
}

impl PartitionLayout {
    pub const ROOT: NodeId = WeightedTree::ROOT;

    pub fn root(&self) -> &LayoutNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, id: NodeId) -> &LayoutNode {
        &self.nodes[id]
    }

    pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Breadth-first ids, root first.
    pub fn descendants(&self) -> Vec<NodeId> {
        descendants_bfs(&self.nodes, Self::ROOT, |n| n.children.as_slice())
    }

    /// The depth-1 node above `id` (or `id` itself at depth 1). `None` for the root.
    pub fn top_level_ancestor(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = id;
        loop {
            let node = &self.nodes[cur];
            match node.depth {
                0 => return None,
                1 => return Some(cur),
                _ => cur = node.parent?,
            }
        }
    }

    /// Names from the root down to `id`, joined with `delimiter`.
    pub fn path_label(&self, id: NodeId, delimiter: &str) -> String {
        ancestor_path_label(
            &self.nodes,
            id,
            |n| n.parent,
            |n| n.name.as_str(),
            delimiter,
        )
    }
}

/// Lays out `tree` over `[0, angular_span]` and `[0, radial_span]`.
///
/// Each parent's interval is split between its (already weight-sorted) children in proportion
/// to their weight. Zero-weight children, and every child of a zero-weight parent, get a
/// zero-width interval at the running offset.
pub fn partition(
    tree: &WeightedTree,
    angular_span: f64,
    radial_span: f64,
    schedule: &RadialSchedule,
) -> PartitionLayout {
    let height = tree.height();
    let mut nodes: Vec<LayoutNode> = tree
        .nodes()
        .iter()
        .map(|n| {
            let (radius_start, radius_end) = schedule.band(n.depth, height, radial_span);
            LayoutNode {
                name: n.name.clone(),
                depth: n.depth,
                weight: n.weight,
                angle_start: 0.0,
                angle_end: 0.0,
                radius_start,
                radius_end,
                parent: n.parent,
                children: n.children.clone(),
            }
        })
        .collect();

    if let Some(root) = nodes.first_mut() {
        root.angle_start = 0.0;
        root.angle_end = angular_span;
    }

    let mut stack = vec![PartitionLayout::ROOT];
    while let Some(idx) = stack.pop() {
        let (x0, x1) = (nodes[idx].angle_start, nodes[idx].angle_end);
        let children = nodes[idx].children.clone();
        let total: f64 = children.iter().map(|c| nodes[*c].weight).sum();
        let k = if total > 0.0 { (x1 - x0) / total } else { 0.0 };

        let mut x = x0;
        for &c in &children {
            let w = nodes[c].weight * k;
            nodes[c].angle_start = x;
            nodes[c].angle_end = x + w;
            x += w;
        }
        stack.extend(children.iter().rev());
    }

    tracing::debug!(
        nodes = nodes.len(),
        height,
        angular_span,
        radial_span,
        "partitioned hierarchy"
    );
    PartitionLayout {
        nodes,
        angular_span,
        radial_span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corolla_core::{Node, build_weighted_tree};
    use std::f64::consts::TAU;

    const EPS: f64 = 1e-9;

    fn sample() -> Node {
        Node::from_json_str(
            r#"{"name":"Root","children":[{"name":"A","children":[{},{}]},{"name":"B"}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn spans_follow_leaf_weights() {
        let tree = build_weighted_tree(&sample());
        let layout = partition(&tree, TAU, 216.0, &RadialSchedule::Uniform);

        let top = layout.children(PartitionLayout::ROOT);
        let a = layout.node(top[0]);
        let b = layout.node(top[1]);
        assert_eq!(a.name, "A");
        assert_eq!(b.name, "B");
        assert!((a.angular_span() - TAU * 2.0 / 3.0).abs() < EPS);
        assert!((b.angular_span() - TAU / 3.0).abs() < EPS);
        assert_eq!(a.angle_start, 0.0);
        assert!((a.angle_end - b.angle_start).abs() < EPS);
    }

    #[test]
    fn uniform_schedule_shares_radius_by_depth() {
        let tree = build_weighted_tree(&sample());
        let layout = partition(&tree, TAU, 216.0, &RadialSchedule::Uniform);
        for node in layout.nodes() {
            let band = 216.0 / 3.0;
            assert!((node.radius_start - node.depth as f64 * band).abs() < EPS);
            assert!((node.radius_end - (node.depth + 1) as f64 * band).abs() < EPS);
        }
    }

    #[test]
    fn zero_weight_parent_gives_children_zero_width() {
        let root = Node::branch(
            "r",
            vec![
                Node::leaf("one"),
                Node::branch(
                    "empty",
                    vec![
                        Node::leaf("z1").with_value(0.0),
                        Node::leaf("z2").with_value(0.0),
                    ],
                ),
            ],
        );
        let tree = build_weighted_tree(&root);
        let layout = partition(&tree, TAU, 100.0, &RadialSchedule::Uniform);

        let empty = layout
            .nodes()
            .iter()
            .position(|n| n.name == "empty")
            .unwrap();
        assert_eq!(layout.node(empty).angular_span(), 0.0);
        for &c in layout.children(empty) {
            let n = layout.node(c);
            assert_eq!(n.angular_span(), 0.0);
            assert!(n.angle_start.is_finite());
        }
        let one = layout.children(PartitionLayout::ROOT)[0];
        assert!((layout.node(one).angular_span() - TAU).abs() < EPS);
    }

    #[test]
    fn lone_root_keeps_full_circle() {
        let tree = build_weighted_tree(&Node::leaf("alone"));
        let layout = partition(&tree, TAU, 216.0, &RadialSchedule::Uniform);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.root().angle_end, TAU);
        assert_eq!(layout.root().radius_end, 216.0);
    }

    #[test]
    fn inner_hole_schedule_offsets_first_ring() {
        let tree = build_weighted_tree(&sample());
        let schedule = RadialSchedule::InnerHole { inner_radius: 65.0 };
        let layout = partition(&tree, TAU, 215.0, &schedule);
        let a = layout.children(PartitionLayout::ROOT)[0];
        let leaf = layout.children(a)[0];
        assert_eq!(
            (layout.root().radius_start, layout.root().radius_end),
            (0.0, 65.0)
        );
        assert_eq!(
            (layout.node(a).radius_start, layout.node(a).radius_end),
            (65.0, 140.0)
        );
        assert_eq!(
            (layout.node(leaf).radius_start, layout.node(leaf).radius_end),
            (140.0, 215.0)
        );
    }

    #[test]
    fn thickness_schedule_repeats_last_weight() {
        let schedule = RadialSchedule::Thickness {
            weights: vec![1.0, 2.0],
        };
        // Depths 0..=2 weigh 1, 2, 2 → 100 / 5 = 20 per unit.
        assert_eq!(schedule.band(0, 2, 100.0), (0.0, 20.0));
        assert_eq!(schedule.band(1, 2, 100.0), (20.0, 60.0));
        assert_eq!(schedule.band(2, 2, 100.0), (60.0, 100.0));
    }

    #[test]
    fn path_label_and_top_level_ancestor() {
        let tree = build_weighted_tree(&sample());
        let layout = partition(&tree, TAU, 216.0, &RadialSchedule::Uniform);
        let a = layout.children(PartitionLayout::ROOT)[0];
        let leaf = layout.children(a)[1];
        assert_eq!(layout.path_label(leaf, " > "), "Root > A > ");
        assert_eq!(layout.top_level_ancestor(leaf), Some(a));
        assert_eq!(layout.top_level_ancestor(a), Some(a));
        assert_eq!(layout.top_level_ancestor(PartitionLayout::ROOT), None);
    }
}
