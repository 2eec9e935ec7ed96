#![forbid(unsafe_code)]

//! `corolla` lays out hierarchical data as a sunburst chart, headless.
//!
//! The hierarchy model lives in `corolla-core` and is re-exported here. Layout and drawing are
//! behind features.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`corolla::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use corolla_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use corolla_render::config::{RadialSchedule, SunburstConfig};
    pub use corolla_render::driver::{RenderOutcome, SunburstChart};
    pub use corolla_render::model::SunburstLayout;
    pub use corolla_render::surface::RenderSurface;
    pub use corolla_render::svg::{SvgRenderOptions, SvgSurface};
    pub use corolla_render::text::{
        DeterministicTextMeasurer, TextMeasurer, UnavailableTextMeasurer,
    };
    pub use corolla_render::{LayoutOptions, layout_sunburst};

    use corolla_core::{ConfigOverrides, Node};
    use std::sync::Arc;

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Input(#[from] corolla_core::Error),
        #[error(transparent)]
        Render(#[from] corolla_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several charts can
    /// be inlined in one document without id collisions.
    ///
    /// This helper:
    /// - trims whitespace
    /// - replaces unsupported characters with `-`
    /// - ensures the id starts with an ASCII letter by prefixing `c-` when needed
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "c-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        let mut last_dash = false;
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '_' || ch == ':' || ch == '.';
            if ok {
                out.push(ch);
                last_dash = false;
            } else if !last_dash {
                out.push('-');
                last_dash = true;
            }
        }

        if !out.starts_with(|c: char| c.is_ascii_alphabetic()) {
            out.insert_str(0, "c-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "c" {
            return "c-untitled".to_string();
        }
        out.to_string()
    }

    /// Layout options resolved from `sunburst.*` overrides, measuring with the font-free
    /// deterministic measurer.
    pub fn layout_options_from_overrides(overrides: &ConfigOverrides) -> Result<LayoutOptions> {
        Ok(LayoutOptions {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            config: SunburstConfig::from_overrides(overrides)?,
        })
    }

    /// Returns layout defaults for headless SVG: labels wrap against the per-character estimate,
    /// as they would on a surface without font metrics.
    pub fn headless_layout_options() -> LayoutOptions {
        LayoutOptions {
            text_measurer: Arc::new(UnavailableTextMeasurer),
            config: SunburstConfig::default(),
        }
    }

    /// Synchronous SVG render helper (executor-free).
    pub fn render_svg_sync(
        root: &Node,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        Ok(corolla_render::render_svg(root, layout_options, svg_options)?)
    }

    pub async fn render_svg(
        root: &Node,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        render_svg_sync(root, layout_options, svg_options)
    }

    /// Decodes a JSON hierarchy and renders it.
    pub fn render_json_svg_sync(
        json: &str,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let root = Node::from_json_str(json)?;
        render_svg_sync(&root, layout_options, svg_options)
    }

    /// Decodes a YAML hierarchy and renders it.
    pub fn render_yaml_svg_sync(
        yaml: &str,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let root = Node::from_yaml_str(yaml)?;
        render_svg_sync(&root, layout_options, svg_options)
    }

    /// Bundles layout and SVG options so UI integrations pass one value per call. All work is
    /// CPU-bound and performs no I/O.
    #[derive(Clone)]
    pub struct HeadlessRenderer {
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl Default for HeadlessRenderer {
        fn default() -> Self {
            Self {
                layout: headless_layout_options(),
                svg: SvgRenderOptions::default(),
            }
        }
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Replaces the chart config with one resolved from `overrides`; the measurer is kept.
        pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self> {
            self.layout.config = SunburstConfig::from_overrides(overrides)?;
            Ok(self)
        }

        pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
            self.layout.text_measurer = measurer;
            self
        }

        pub fn layout_sync(&self, root: &Node) -> Result<SunburstLayout> {
            Ok(layout_sunburst(root, &self.layout)?)
        }

        pub fn render_svg_sync(&self, root: &Node) -> Result<String> {
            render_svg_sync(root, &self.layout, &self.svg)
        }

        pub fn render_json_svg_sync(&self, json: &str) -> Result<String> {
            render_json_svg_sync(json, &self.layout, &self.svg)
        }

        pub fn render_svg_sync_with_diagram_id(
            &self,
            root: &Node,
            diagram_id: &str,
        ) -> Result<String> {
            let mut svg = self.svg.clone();
            svg.diagram_id = Some(sanitize_svg_id(diagram_id));
            render_svg_sync(root, &self.layout, &svg)
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            root: &Node,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_png_sync(root, &self.layout, &self.svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            root: &Node,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_jpeg_sync(root, &self.layout, &self.svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(&self, root: &Node) -> raster::Result<Vec<u8>> {
            raster::render_pdf_sync(root, &self.layout, &self.svg)
        }
    }

}
