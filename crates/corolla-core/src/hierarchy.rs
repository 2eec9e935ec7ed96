//! Input tree and its leaf-count weighting.
//!
//! The input [`Node`] tree is never mutated. [`build_weighted_tree`] derives a flat arena where
//! every node carries its weight and children are ordered heaviest first.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Index of a node inside an arena (weighted tree or layout). The root is always `0`.
pub type NodeId = usize;

/// One named category of the input hierarchy (`{name, children?, value?}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    /// Explicit weight for a leaf. Ignored on nodes that have children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Node {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: None,
            value: None,
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            children: Some(children),
            value: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Children as a slice; absent and empty lists are both treated as "no children".
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    fn leaf_weight(&self) -> f64 {
        match self.value {
            Some(v) if v.is_finite() => v.max(0.0),
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedNode {
    pub name: String,
    pub weight: f64,
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Arena form of the input tree with per-node weights. Node `0` is the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedTree {
    nodes: Vec<WeightedNode>,
}

impl WeightedTree {
    pub const ROOT: NodeId = 0;

    pub fn root(&self) -> &WeightedNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, id: NodeId) -> &WeightedNode {
        &self.nodes[id]
    }

    pub fn get(&self, id: NodeId) -> Option<&WeightedNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[WeightedNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a weighted tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn total_weight(&self) -> f64 {
        self.root().weight
    }

    /// Depth of the deepest node (`0` for a lone root).
    pub fn height(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Ids from `id` up to the root, inclusive.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![id];
        let mut cur = id;
        while let Some(p) = self.nodes[cur].parent {
            out.push(p);
            cur = p;
        }
        out
    }

    /// Breadth-first ids, root first, siblings in weight order.
    pub fn descendants(&self) -> Vec<NodeId> {
        descendants_bfs(&self.nodes, Self::ROOT, |n| n.children.as_slice())
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

    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.children.is_empty())
            .map(|(id, _)| id)
    }
}

/// Breadth-first walk over an index arena.
pub fn descendants_bfs<T>(
    nodes: &[T],
    root: NodeId,
    children: impl Fn(&T) -> &[NodeId],
) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut next = vec![root];
    while !next.is_empty() {
        let current = std::mem::take(&mut next);
        for idx in current {
            out.push(idx);
            next.extend_from_slice(children(&nodes[idx]));
        }
    }
    out
}

/// Names on the parent chain of `id`, root first, joined with `delimiter`.
pub fn ancestor_path_label<T>(
    nodes: &[T],
    id: NodeId,
    parent: impl Fn(&T) -> Option<NodeId>,
    name: impl Fn(&T) -> &str,
    delimiter: &str,
) -> String {
    let mut chain = Vec::new();
    let mut cur = Some(id);
    while let Some(idx) = cur {
        chain.push(name(&nodes[idx]));
        cur = parent(&nodes[idx]);
    }
    chain.reverse();
    chain.join(delimiter)
}

/// Weights every node (leaf = 1 or its explicit value, internal = sum of children) and orders
/// children by descending weight, keeping the input order among equal weights.
pub fn build_weighted_tree(root: &Node) -> WeightedTree {
    let mut nodes = flatten(root);
    compute_sums(&mut nodes);
    sort_children_by_weight(&mut nodes);

    tracing::debug!(
        nodes = nodes.len(),
        total_weight = nodes[WeightedTree::ROOT].weight,
        "built weighted tree"
    );
    WeightedTree { nodes }
}

/// Pre-order arena of `root`. Parents always get a smaller id than their children.
fn flatten(root: &Node) -> Vec<WeightedNode> {
    let mut nodes: Vec<WeightedNode> = Vec::new();
    let mut stack: Vec<(&Node, Option<NodeId>, usize)> = vec![(root, None, 0)];
    while let Some((node, parent, depth)) = stack.pop() {
        let idx = nodes.len();
        let weight = if node.is_leaf() {
            node.leaf_weight()
        } else {
            0.0
        };
        nodes.push(WeightedNode {
            name: node.name.clone(),
            weight,
            depth,
            parent,
            children: Vec::new(),
        });
        if let Some(parent_idx) = parent {
            nodes[parent_idx].children.push(idx);
        }
        // Reversed so the first child is popped (and numbered) first.
        stack.extend(
            node.children()
                .iter()
                .rev()
                .map(|child| (child, Some(idx), depth + 1)),
        );
    }
    nodes
}

fn compute_sums(nodes: &mut [WeightedNode]) {
    // Children have larger ids, so a reverse sweep sees every subtree finished.
    for idx in (0..nodes.len()).rev() {
        if nodes[idx].children.is_empty() {
            continue;
        }
        let sum: f64 = nodes[idx].children.iter().map(|c| nodes[*c].weight).sum();
        nodes[idx].weight = sum;
    }
}

fn sort_children_by_weight(nodes: &mut [WeightedNode]) {
    for idx in 0..nodes.len() {
        let mut children = std::mem::take(&mut nodes[idx].children);
        // `sort_by` is stable, so equal weights keep their input order.
        children.sort_by(|a, b| {
            nodes[*b]
                .weight
                .partial_cmp(&nodes[*a].weight)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        nodes[idx].children = children;
    }
}
