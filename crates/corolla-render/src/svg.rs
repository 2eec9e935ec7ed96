//! SVG document surface.

pub(crate) mod util;

use crate::arc::ArcPrimitive;
use crate::label::LabelPrimitive;
use crate::model::{CenterPrimitive, SunburstLayout};
use crate::surface::{RenderSurface, SurfaceFrame, draw_layout};
use crate::text::{TextMeasurer, UnavailableTextMeasurer};
use std::fmt::Write as _;
use std::sync::Arc;
use util::{escape_xml, escape_xml_into, fmt};

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `id` attribute.
    pub diagram_id: Option<String>,
    /// When true, arcs carry `data-node` and `data-path` so a host can wire activation.
    pub include_activation_attrs: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            include_activation_attrs: true,
        }
    }
}

/// Accumulates one SVG document per pass.
pub struct SvgSurface {
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    options: SvgRenderOptions,
    frame: Option<SurfaceFrame>,
    arcs: String,
    labels: String,
    center: String,
    document: String,
}

impl std::fmt::Debug for SvgSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgSurface")
            .field("options", &self.options)
            .field("frame", &self.frame)
            .field("document_len", &self.document.len())
            .finish_non_exhaustive()
    }
}

impl SvgSurface {
    pub fn new(measurer: Arc<dyn TextMeasurer + Send + Sync>, options: SvgRenderOptions) -> Self {
        Self {
            measurer,
            options,
            frame: None,
            arcs: String::new(),
            labels: String::new(),
            center: String::new(),
            document: String::new(),
        }
    }

    /// A surface without font metrics; labels wrap against the per-character estimate.
    pub fn headless(options: SvgRenderOptions) -> Self {
        Self::new(Arc::new(UnavailableTextMeasurer), options)
    }

    /// The document produced by the last finished pass (empty before the first one).
    pub fn to_svg_string(&self) -> &str {
        &self.document
    }

    pub fn into_svg_string(self) -> String {
        self.document
    }
}

impl RenderSurface for SvgSurface {
    fn clear(&mut self, frame: &SurfaceFrame) {
        self.frame = Some(frame.clone());
        self.arcs.clear();
        self.labels.clear();
        self.center.clear();
        self.document.clear();
    }

    fn text_measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    fn draw_arc(&mut self, arc: &ArcPrimitive) {
        let out = &mut self.arcs;
        let _ = write!(
            out,
            r#"<path fill="{fill}" fill-opacity="{opacity}" d="{d}" style="cursor:pointer;""#,
            fill = escape_xml(&arc.fill),
            opacity = fmt(arc.fill_opacity),
            d = arc.path,
        );
        if self.options.include_activation_attrs {
            let _ = write!(out, r#" data-node="{}" data-path=""#, arc.node);
            escape_xml_into(out, &arc.tooltip);
            out.push('"');
        }
        out.push_str("><title>");
        escape_xml_into(out, &arc.tooltip);
        out.push_str("</title></path>");
    }

    fn draw_label(&mut self, label: &LabelPrimitive) {
        let (fill, dy) = self
            .frame
            .as_ref()
            .map(|f| (f.label_fill.as_str(), f.baseline_dy_em))
            .unwrap_or(("#fff", 0.35));
        let out = &mut self.labels;
        let _ = write!(
            out,
            r#"<text class="{class}" dy="{dy}em" fill="{fill}" transform="{transform}" style="font-size:{size}px;font-weight:{weight};">"#,
            class = label.class,
            dy = fmt(dy),
            fill = escape_xml(fill),
            transform = label.transform.to_svg(),
            size = fmt(label.font_size_px),
            weight = escape_xml(&label.font_weight),
        );
        for line in &label.lines {
            let _ = write!(out, r#"<tspan x="0" dy="{}em">"#, fmt(line.dy_em));
            escape_xml_into(out, &line.text);
            out.push_str("</tspan>");
        }
        out.push_str("</text>");
    }

    fn draw_center(&mut self, center: &CenterPrimitive) {
        let out = &mut self.center;
        let _ = write!(
            out,
            r#"<circle r="{r}" fill="{fill}" stroke="{stroke}" stroke-width="{sw}" style="filter:{filter};"/>"#,
            r = fmt(center.radius),
            fill = escape_xml(&center.fill),
            stroke = escape_xml(&center.stroke),
            sw = fmt(center.stroke_width),
            filter = escape_xml(&center.filter),
        );
        let _ = write!(
            out,
            r#"<text class="{class}" dy="{dy}em" style="font-size:{size}px;font-weight:{weight};fill:{color};">"#,
            class = center.label_class,
            dy = fmt(center.label_dy_em),
            size = fmt(center.font_size_px),
            weight = escape_xml(&center.font_weight),
            color = escape_xml(&center.label_color),
        );
        escape_xml_into(out, &center.label);
        out.push_str("</text>");
    }

    fn finish(&mut self) {
        let Some(frame) = self.frame.as_ref() else {
            return;
        };
        let id = escape_xml(self.options.diagram_id.as_deref().unwrap_or("corolla"));
        let (w, h) = (frame.width, frame.height);

        let doc = &mut self.document;
        doc.clear();
        let _ = write!(
            doc,
            r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" viewBox="{x} {y} {w} {h}" style="max-width: {w}px; height: auto; font: {fs}px {family};" role="graphics-document document" aria-roledescription="sunburst">"#,
            x = fmt(-w / 2.0),
            y = fmt(-h / 2.0),
            w = fmt(w),
            h = fmt(h),
            fs = fmt(frame.font_size),
            family = escape_xml(&frame.font_family),
        );
        doc.push_str(r#"<g class="arcs">"#);
        doc.push_str(&self.arcs);
        doc.push_str(r#"</g><g class="labels" pointer-events="none" text-anchor="middle" style="user-select:none;">"#);
        doc.push_str(&self.labels);
        doc.push_str(r#"</g><g class="center" text-anchor="middle">"#);
        doc.push_str(&self.center);
        doc.push_str("</g></svg>");
    }
}

/// Serializes an already computed layout. The layout's labels are kept as they are.
pub fn render_sunburst_svg(layout: &SunburstLayout, options: &SvgRenderOptions) -> String {
    let mut surface = SvgSurface::headless(options.clone());
    draw_layout(layout, &mut surface);
    surface.into_svg_string()
}
