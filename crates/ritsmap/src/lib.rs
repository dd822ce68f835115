#![forbid(unsafe_code)]

//! `ritsmap` draws the RITS/FSS participant diagram headlessly.
//!
//! The geometry core (gear paths, circle derivation, the enclosing arc, the grouped dot layout
//! and callouts) is always available and re-exported from `ritsmap-layout`.
//!
//! # Features
//!
//! - `render` (default): diagram config, layout orchestration and SVG output (`ritsmap::render`)
//! - `raster`: PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use ritsmap_layout::*;

#[cfg(feature = "render")]
pub mod render {
    pub use ritsmap_render::config::{DiagramConfig, RenderConfig};
    pub use ritsmap_render::model::{Bounds, DiagramLayout, LayoutLabel, Leader, Segment};
    pub use ritsmap_render::svg::SvgRenderOptions;
    pub use ritsmap_render::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
    pub use ritsmap_render::{LayoutOptions, has_spoke, layout_diagram};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Render(#[from] ritsmap_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token.
    ///
    /// Trims whitespace, replaces unsupported characters with `-`, collapses runs of `-` and
    /// prefixes `r-` when the id would not start with an ASCII letter.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "r-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 2);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | ':' | '.');
            out.push(if ok { ch } else { '-' });
        }

        if !out.starts_with(|c: char| c.is_ascii_alphabetic()) {
            out.insert_str(0, "r-");
        }
        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "r" {
            return "r-untitled".to_string();
        }
        out.to_string()
    }

    /// Builds SVG options from the `svg` section of a typed config, sanitizing the id.
    pub fn svg_options_for(config: &DiagramConfig) -> SvgRenderOptions {
        let mut options = SvgRenderOptions::from_config(&config.svg);
        options.diagram_id = options.diagram_id.as_deref().map(sanitize_svg_id);
        options
    }

    /// Synchronous layout helper.
    pub fn layout_diagram_sync(
        config: &RenderConfig,
        layout_options: &LayoutOptions,
    ) -> Result<DiagramLayout> {
        Ok(ritsmap_render::layout_from_config(config, layout_options)?)
    }

    pub fn render_layouted_svg(layout: &DiagramLayout, svg_options: &SvgRenderOptions) -> String {
        ritsmap_render::svg::render_svg(layout, svg_options)
    }

    /// Lays out and renders in one go, taking SVG options from the config's `svg` section.
    pub fn render_svg_sync(config: &RenderConfig, layout_options: &LayoutOptions) -> Result<String> {
        let typed = config.diagram_config()?;
        let layout = layout_diagram(&typed, layout_options)?;
        Ok(render_layouted_svg(&layout, &svg_options_for(&typed)))
    }

    /// Bundles a config and the layout options for repeated headless renders.
    #[derive(Clone, Default)]
    pub struct HeadlessRenderer {
        pub config: RenderConfig,
        pub layout: LayoutOptions,
        /// Prepend an `<?xml ...?>` declaration to standalone SVG output.
        pub xml_declaration: bool,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: RenderConfig) -> Self {
            self.config = config;
            self
        }

        /// Applies a `key=value` override on top of the current config.
        pub fn with_override(mut self, assignment: &str) -> Result<Self> {
            self.config.apply_override(assignment)?;
            Ok(self)
        }

        pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
            self.xml_declaration = enabled;
            self
        }

        pub fn diagram_config(&self) -> Result<DiagramConfig> {
            Ok(self.config.diagram_config()?)
        }

        pub fn layout_sync(&self) -> Result<DiagramLayout> {
            layout_diagram_sync(&self.config, &self.layout)
        }

        pub fn svg_options(&self) -> Result<SvgRenderOptions> {
            let mut options = svg_options_for(&self.diagram_config()?);
            options.xml_declaration = self.xml_declaration;
            Ok(options)
        }

        pub fn render_svg_sync(&self) -> Result<String> {
            let typed = self.diagram_config()?;
            let layout = layout_diagram(&typed, &self.layout)?;
            let mut options = svg_options_for(&typed);
            options.xml_declaration = self.xml_declaration;
            Ok(render_layouted_svg(&layout, &options))
        }
    }

}
