//! Annular sector geometry for partition nodes.
//!
//! The path generator follows d3-shape's `arc()` without corner rounding: angles are measured
//! clockwise from 12 o'clock, padding is applied as a linear gap (`pad_radius × sin(pad/2)`),
//! and a wedge narrower than its padding collapses to its mid angle instead of inverting.

use crate::color::OrdinalColorScale;
use crate::config::SunburstConfig;
use crate::partition::PartitionLayout;
use crate::svg::util::fmt_path_into;
use corolla_core::NodeId;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

const EPSILON: f64 = 1e-12;
const PATH_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcGeometry {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub pad_angle: f64,
    /// `None` uses `sqrt(inner² + outer²)`.
    pub pad_radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcPrimitive {
    pub node: NodeId,
    pub depth: usize,
    pub name: String,
    pub geometry: ArcGeometry,
    /// SVG path data (`d` attribute).
    pub path: String,
    pub fill: String,
    pub fill_opacity: f64,
    /// Root-to-node names, joined with the configured delimiter.
    pub tooltip: String,
}

/// Builds the drawable arc for a non-root node.
///
/// Depth-1 arcs start just outside the center disk; deeper arcs start at their band. Both are
/// inset by `arc_inset` on each side. The fill comes from the depth-1 ancestor's name.
pub fn build_arc(
    layout: &PartitionLayout,
    id: NodeId,
    config: &SunburstConfig,
    colors: &mut OrdinalColorScale,
) -> ArcPrimitive {
    let node = layout.node(id);
    let inner_radius = if node.depth == 1 {
        config.inner_radius + config.arc_inset
    } else {
        node.radius_start + config.arc_inset
    };
    let outer_radius = node.radius_end - config.arc_inset;
    let span = node.angular_span();
    let pad_angle = (span / 2.0).min(config.max_pad_angle);

    let geometry = ArcGeometry {
        inner_radius,
        outer_radius,
        start_angle: node.angle_start,
        end_angle: node.angle_end,
        pad_angle,
        pad_radius: Some(config.effective_pad_radius()),
    };

    let color_key = layout
        .top_level_ancestor(id)
        .map(|a| layout.node(a).name.as_str())
        .unwrap_or(node.name.as_str());
    let fill = colors.color_for(color_key);

    ArcPrimitive {
        node: id,
        depth: node.depth,
        name: node.name.clone(),
        geometry,
        path: arc_path_d(&geometry),
        fill,
        fill_opacity: config.fill_opacity,
        tooltip: layout.path_label(id, &config.path_delimiter),
    }
}

fn asin(x: f64) -> f64 {
    if x >= 1.0 {
        FRAC_PI_2
    } else if x <= -1.0 {
        -FRAC_PI_2
    } else {
        x.asin()
    }
}

/// SVG path data for an annular sector centered on the origin.
pub fn arc_path_d(g: &ArcGeometry) -> String {
    let mut r0 = g.inner_radius.max(0.0);
    let mut r1 = g.outer_radius.max(0.0);
    if r1 < r0 {
        std::mem::swap(&mut r0, &mut r1);
    }
    let a0 = g.start_angle - FRAC_PI_2;
    let a1 = g.end_angle - FRAC_PI_2;
    let da = (a1 - a0).abs();
    let cw = a1 > a0;

    let mut p = PathBuilder::default();

    if !(r1 > EPSILON) {
        p.move_to(0.0, 0.0);
    } else if da > TAU - EPSILON {
        p.move_to(r1 * a0.cos(), r1 * a0.sin());
        p.arc(r1, a0, a1, !cw);
        if r0 > EPSILON {
            p.move_to(r0 * a1.cos(), r0 * a1.sin());
            p.arc(r0, a1, a0, cw);
        }
    } else {
        padded_sector(&mut p, g, r0, r1, a0, a1, cw);
    }

    p.close_path();
    p.finish()
}

/// Annular sector narrower than a full turn, with linear padding applied.
fn padded_sector(
    p: &mut PathBuilder,
    g: &ArcGeometry,
    r0: f64,
    r1: f64,
    a0: f64,
    a1: f64,
    cw: bool,
) {
    let da = (a1 - a0).abs();
    let (mut a00, mut a10, mut a01, mut a11) = (a0, a1, a0, a1);
    let (mut da0, mut da1) = (da, da);
    let ap = g.pad_angle / 2.0;
    let rp = if ap > EPSILON {
        g.pad_radius.unwrap_or_else(|| (r0 * r0 + r1 * r1).sqrt())
    } else {
        0.0
    };

    if rp > EPSILON {
        let dir = if cw { 1.0 } else { -1.0 };
        let p0 = asin(rp / r0 * ap.sin());
        let p1 = asin(rp / r1 * ap.sin());

        da0 -= p0 * 2.0;
        if da0 > EPSILON {
            a00 += p0 * dir;
            a10 -= p0 * dir;
        } else {
            da0 = 0.0;
            a00 = (a0 + a1) / 2.0;
            a10 = a00;
        }

        da1 -= p1 * 2.0;
        if da1 > EPSILON {
            a01 += p1 * dir;
            a11 -= p1 * dir;
        } else {
            da1 = 0.0;
            a01 = (a0 + a1) / 2.0;
            a11 = a01;
        }
    }

    p.move_to(r1 * a01.cos(), r1 * a01.sin());
    if da1 > EPSILON {
        p.arc(r1, a01, a11, !cw);
    }

    if !(r0 > EPSILON) || !(da0 > EPSILON) {
        p.line_to(r0 * a10.cos(), r0 * a10.sin());
    } else {
        p.arc(r0, a10, a00, cw);
    }
}

/// Minimal d3-path recorder (origin-centered arcs only).
#[derive(Debug, Default)]
struct PathBuilder {
    out: String,
    current: Option<(f64, f64)>,
    subpath_start: Option<(f64, f64)>,
}

impl PathBuilder {
    fn push_pair(&mut self, cmd: char, x: f64, y: f64) {
        self.out.push(cmd);
        fmt_path_into(&mut self.out, x);
        self.out.push(',');
        fmt_path_into(&mut self.out, y);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push_pair('M', x, y);
        self.current = Some((x, y));
        self.subpath_start = Some((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push_pair('L', x, y);
        self.current = Some((x, y));
    }

    fn arc_to(&mut self, r: f64, large_arc: bool, sweep: bool, x: f64, y: f64) {
        self.out.push('A');
        fmt_path_into(&mut self.out, r);
        self.out.push(',');
        fmt_path_into(&mut self.out, r);
        self.out.push_str(",0,");
        self.out.push(if large_arc { '1' } else { '0' });
        self.out.push(',');
        self.out.push(if sweep { '1' } else { '0' });
        self.out.push(',');
        fmt_path_into(&mut self.out, x);
        self.out.push(',');
        fmt_path_into(&mut self.out, y);
        self.current = Some((x, y));
    }

    /// Circular arc around the origin from `a0` to `a1`, counter-clockwise when `ccw`.
    fn arc(&mut self, r: f64, a0: f64, a1: f64, ccw: bool) {
        let (dx, dy) = (r * a0.cos(), r * a0.sin());
        let sweep = !ccw;
        let mut da = if ccw { a0 - a1 } else { a1 - a0 };

        match self.current {
            None => self.move_to(dx, dy),
            Some((x, y)) if (x - dx).abs() > PATH_EPSILON || (y - dy).abs() > PATH_EPSILON => {
                self.line_to(dx, dy)
            }
            Some(_) => {}
        }

        if r == 0.0 {
            return;
        }
        if da < 0.0 {
            da = da % TAU + TAU;
        }

        if da > TAU - PATH_EPSILON {
            // A full turn is drawn as two half-circle arcs.
            self.arc_to(r, true, sweep, -dx, -dy);
            self.arc_to(r, true, sweep, dx, dy);
        } else if da > PATH_EPSILON {
            self.arc_to(r, da >= PI, sweep, r * a1.cos(), r * a1.sin());
        }
    }

    fn close_path(&mut self) {
        if let Some(start) = self.subpath_start {
            self.current = Some(start);
            self.out.push('Z');
        }
    }

    fn finish(self) -> String {
        self.out
    }
}
