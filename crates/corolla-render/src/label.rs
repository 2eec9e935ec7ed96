//! Radial labels: orientation along the arc's mid angle and wrapping to its chord width.

use crate::config::SunburstConfig;
use crate::partition::PartitionLayout;
use crate::svg::util::fmt;
use crate::text::{TextMeasurer, TextStyle, wrap_words_greedy};
use corolla_core::NodeId;
use serde::Serialize;

pub const LEVEL1_LABEL_CLASS: &str = "level1-radial-label";
pub const NESTED_LABEL_CLASS: &str = "subcategory-label";

/// `rotate(deg) translate(r,0) rotate(0|180)` plus an optional vertical centering shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelTransform {
    pub rotate_deg: f64,
    pub translate_x: f64,
    /// Text on the left half is turned upside-up.
    pub flip: bool,
    pub shift_y: Option<f64>,
}

impl LabelTransform {
    pub fn to_svg(&self) -> String {
        let mut out = format!(
            "rotate({}) translate({},0) rotate({})",
            fmt(self.rotate_deg),
            fmt(self.translate_x),
            if self.flip { 180 } else { 0 }
        );
        if let Some(dy) = self.shift_y {
            out.push_str(&format!(" translate(0,{})", fmt(dy)));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelLine {
    pub text: String,
    pub dy_em: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPrimitive {
    pub node: NodeId,
    pub depth: usize,
    pub class: &'static str,
    pub transform: LabelTransform,
    pub lines: Vec<LabelLine>,
    pub font_size_px: f64,
    pub font_weight: String,
    /// Chord width the lines were wrapped against.
    pub available_width: f64,
}

impl LabelPrimitive {
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

/// Places and wraps the label of a non-root node.
pub fn place_label(
    layout: &PartitionLayout,
    id: NodeId,
    measurer: &dyn TextMeasurer,
    config: &SunburstConfig,
) -> LabelPrimitive {
    let node = layout.node(id);
    let mid_deg = node.mid_angle().to_degrees();
    let mid_radius = node.mid_radius();
    let available_width = node.angular_span() * mid_radius * config.chord_shrink;

    let (class, font_size_px, font_weight) = if node.depth == 1 {
        (
            LEVEL1_LABEL_CLASS,
            config.level1_font_size,
            config.level1_font_weight.clone(),
        )
    } else {
        (
            NESTED_LABEL_CLASS,
            config.nested_font_size,
            config.nested_font_weight.clone(),
        )
    };

    let mut transform = LabelTransform {
        rotate_deg: mid_deg - 90.0,
        translate_x: mid_radius,
        flip: mid_deg >= 180.0,
        shift_y: None,
    };

    let lines = if let Some(fixed) = config.label_overrides.get(&node.name) {
        fixed
            .iter()
            .map(|l| LabelLine {
                text: l.text.clone(),
                dy_em: l.dy_em,
            })
            .collect()
    } else {
        let style = TextStyle {
            font_family: Some(config.font_family.clone()),
            font_size: font_size_px,
            font_weight: Some(font_weight.clone()),
        };
        let wrapped = wrap_words_greedy(
            &node.name,
            measurer,
            &style,
            available_width,
            config.fallback_char_width,
        );
        tracing::trace!(
            name = %node.name,
            available_width,
            lines = wrapped.len(),
            "wrapped label"
        );

        if wrapped.len() > 1 {
            let n = wrapped.len() as f64;
            transform.shift_y =
                Some(-(n - 1.0) * config.line_height_em * 0.5 * font_size_px * 0.5);
        }
        wrapped
            .into_iter()
            .enumerate()
            .map(|(i, text)| LabelLine {
                text,
                dy_em: if i == 0 {
                    config.baseline_dy_em
                } else {
                    i as f64 * config.line_height_em
                },
            })
            .collect()
    };

    LabelPrimitive {
        node: id,
        depth: node.depth,
        class,
        transform,
        lines,
        font_size_px,
        font_weight,
        available_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::partition;
    use crate::text::{DeterministicTextMeasurer, UnavailableTextMeasurer};
    use corolla_core::{Node, build_weighted_tree};
    use std::f64::consts::TAU;

    fn layout_of(root: &Node) -> PartitionLayout {
        let config = SunburstConfig::default();
        let tree = build_weighted_tree(root);
        partition(&tree, TAU, config.radial_span(), &config.radial_schedule)
    }

    fn find(layout: &PartitionLayout, name: &str) -> NodeId {
        layout
            .nodes()
            .iter()
            .position(|n| n.name == name)
            .unwrap()
    }

    #[test]
    fn transform_renders_flip_and_shift() {
        let t = LabelTransform {
            rotate_deg: 150.0,
            translate_x: 108.0,
            flip: true,
            shift_y: Some(-2.2),
        };
        assert_eq!(
            t.to_svg(),
            "rotate(150) translate(108,0) rotate(180) translate(0,-2.2)"
        );
    }

    #[test]
    fn override_bypasses_wrapping() {
        let root = Node::branch(
            "R",
            vec![Node::branch(
                "Business Impact",
                vec![Node::leaf("a"), Node::leaf("b")],
            )],
        );
        let layout = layout_of(&root);
        let id = find(&layout, "Business Impact");
        let label = place_label(
            &layout,
            id,
            &UnavailableTextMeasurer,
            &SunburstConfig::default(),
        );

        assert_eq!(label.texts(), vec!["Business", "Impact"]);
        assert_eq!(label.lines[0].dy_em, -0.1);
        assert_eq!(label.lines[1].dy_em, 1.1);
        assert_eq!(label.transform.shift_y, None);
        assert_eq!(label.class, LEVEL1_LABEL_CLASS);
        assert_eq!(label.font_size_px, 13.0);
    }

    #[test]
    fn right_half_is_not_flipped() {
        let root = Node::branch("R", vec![Node::leaf("A"), Node::leaf("B")]);
        let layout = layout_of(&root);
        let config = SunburstConfig::default();

        let a = place_label(&layout, find(&layout, "A"), &UnavailableTextMeasurer, &config);
        assert!((a.transform.rotate_deg - 0.0).abs() < 1e-9);
        assert!(!a.transform.flip);

        let b = place_label(&layout, find(&layout, "B"), &UnavailableTextMeasurer, &config);
        assert!((b.transform.rotate_deg - 180.0).abs() < 1e-9);
        assert!(b.transform.flip);
    }

    #[test]
    fn multi_line_labels_shift_up() {
        // A thin nested wedge forces one word per line.
        let mut items: Vec<Node> = (0..40).map(|i| Node::leaf(format!("x{i}"))).collect();
        items.push(Node::leaf("Customer Satisfaction Score"));
        let root = Node::branch("R", vec![Node::branch("Cat", items)]);
        let layout = layout_of(&root);
        let config = SunburstConfig::default();
        let id = find(&layout, "Customer Satisfaction Score");

        let label = place_label(&layout, id, &UnavailableTextMeasurer, &config);
        assert_eq!(label.texts(), vec!["Customer", "Satisfaction", "Score"]);
        assert_eq!(label.lines[0].dy_em, 0.35);
        assert_eq!(label.lines[1].dy_em, 1.1);
        assert!((label.lines[2].dy_em - 2.2).abs() < 1e-12);

        let shift = label.transform.shift_y.unwrap();
        assert!((shift - -(2.0 * 1.1 * 0.5 * 8.0 * 0.5)).abs() < 1e-9);
        assert_eq!(label.class, NESTED_LABEL_CLASS);
        assert_eq!(label.font_weight, "normal");
    }

    #[test]
    fn single_line_label_has_no_shift() {
        let root = Node::branch("R", vec![Node::leaf("Quality")]);
        let layout = layout_of(&root);
        let label = place_label(
            &layout,
            find(&layout, "Quality"),
            &DeterministicTextMeasurer::default(),
            &SunburstConfig::default(),
        );
        assert_eq!(label.texts(), vec!["Quality"]);
        assert_eq!(label.transform.shift_y, None);
    }

    #[test]
    fn blank_name_has_no_lines() {
        let root = Node::branch("R", vec![Node::leaf("  ")]);
        let layout = layout_of(&root);
        let label = place_label(
            &layout,
            1,
            &UnavailableTextMeasurer,
            &SunburstConfig::default(),
        );
        assert!(label.lines.is_empty());
    }
}
