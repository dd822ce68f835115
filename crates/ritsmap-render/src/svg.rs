//! SVG output for a laid-out diagram.

mod util;

use crate::config::SvgConfig;
use crate::labels::{LEADER_STROKE, LEADER_STROKE_WIDTH};
use crate::model::{DiagramLayout, Segment};
use ritsmap_layout::{GearSpec, MainCircle, Point};
use std::fmt::Write as _;
use util::{escape_xml, fmt, fmt2};

const FONT_FAMILY: &str = "Arial, sans-serif";
const SPOKE_STROKE: &str = "#3b82f6";
const CONNECTOR_STROKE: &str = "#f59e0b";
const ARC_STROKE: &str = "#000000";

/// Fill colors for the four layers of a main circle.
#[derive(Debug, Clone, Copy)]
struct CirclePaint {
    outer: &'static str,
    border: &'static str,
    inner: &'static str,
    gear: &'static str,
    gear_stroke: &'static str,
}

const RITS_PAINT: CirclePaint = CirclePaint {
    outer: "#1e3a8a",
    border: "#3b82f6",
    inner: "#dbeafe",
    gear: "#bfdbfe",
    gear_stroke: "#3b82f6",
};

const FSS_PAINT: CirclePaint = CirclePaint {
    outer: "#9a3412",
    border: "#f59e0b",
    inner: "#fef3c7",
    gear: "#fde68a",
    gear_stroke: "#f59e0b",
};

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Adds extra space around the computed viewBox.
    pub viewbox_padding: f64,
    /// Root element id; also prefixes group ids.
    pub diagram_id: Option<String>,
    /// Painted as a full-size rect behind everything. `None` leaves the canvas transparent.
    pub background: Option<String>,
    /// Prepend an `<?xml ...?>` declaration.
    pub xml_declaration: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 16.0,
            diagram_id: None,
            background: Some("white".to_string()),
            xml_declaration: false,
        }
    }
}

impl SvgRenderOptions {
    pub fn from_config(svg: &SvgConfig) -> Self {
        Self {
            viewbox_padding: svg.padding,
            diagram_id: Some(svg.diagram_id.clone()),
            background: svg.background.clone(),
            xml_declaration: false,
        }
    }
}

pub fn render_svg(layout: &DiagramLayout, options: &SvgRenderOptions) -> String {
    let _span = tracing::debug_span!("render_svg", dots = layout.dots.len()).entered();

    let diagram_id = options.diagram_id.as_deref().unwrap_or("ritsmap");
    let id = escape_xml(diagram_id);

    let vb = layout.bounds.padded(options.viewbox_padding.max(0.0));
    let vb_w = vb.width().max(1.0);
    let vb_h = vb.height().max(1.0);

    let mut out = String::with_capacity(64 * 1024);
    if options.xml_declaration {
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        out.push('\n');
    }
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" viewBox="{x} {y} {w} {h}" role="img" aria-roledescription="ritsmap">"#,
        x = fmt2(vb.min_x),
        y = fmt2(vb.min_y),
        w = fmt2(vb_w),
        h = fmt2(vb_h),
    );
    if let Some(bg) = options.background.as_deref() {
        let _ = write!(
            &mut out,
            r#"<rect class="background" x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#,
            x = fmt2(vb.min_x),
            y = fmt2(vb.min_y),
            w = fmt2(vb_w),
            h = fmt2(vb_h),
            fill = escape_xml(bg),
        );
    }

    render_circles(&mut out, &id, layout);
    render_arc(&mut out, &id, layout);
    if !layout.spokes.is_empty() {
        render_segments(&mut out, &id, "spokes", &layout.spokes, SPOKE_STROKE, 1.0, Some(0.9));
    }
    if !layout.connectors.is_empty() {
        render_segments(
            &mut out,
            &id,
            "connectors",
            &layout.connectors,
            CONNECTOR_STROKE,
            2.0,
            None,
        );
    }
    render_markers(&mut out, &id, layout);
    render_labels(&mut out, &id, layout);

    out.push_str("</svg>\n");

    tracing::debug!(bytes = out.len(), "rendered svg");
    out
}

fn render_circles(out: &mut String, id: &str, layout: &DiagramLayout) {
    let circles = [
        ("big", &layout.circles.big, RITS_PAINT),
        ("small", &layout.circles.small, FSS_PAINT),
    ];

    let _ = write!(out, r#"<g id="{id}-circles" class="circles">"#);
    for (name, c, paint) in circles {
        circle(out, &format!("{name}-outer"), c.center, c.outer_radius, paint.outer);
    }
    for (name, c, paint) in circles {
        gear(out, &format!("{name}-gear-border"), c, &c.gear_border, paint.border, None);
    }
    for (name, c, paint) in circles {
        circle(out, &format!("{name}-inner"), c.center, c.inner_radius, paint.inner);
    }
    for (name, c, paint) in circles {
        gear(
            out,
            &format!("{name}-gear"),
            c,
            &c.gear,
            paint.gear,
            Some(paint.gear_stroke),
        );
    }
    out.push_str("</g>");
}

fn circle(out: &mut String, class: &str, center: Point, r: f64, fill: &str) {
    let _ = write!(
        out,
        r#"<circle class="{class}" cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/>"#,
        cx = fmt2(center.x),
        cy = fmt2(center.y),
        r = fmt(r),
    );
}

fn gear(out: &mut String, class: &str, c: &MainCircle, spec: &GearSpec, fill: &str, stroke: Option<&str>) {
    let _ = write!(
        out,
        r#"<path class="{class}" d="{d}" transform="translate({x}, {y})" fill="{fill}""#,
        d = spec.to_path(),
        x = fmt(c.center.x),
        y = fmt(c.center.y),
    );
    if spec.bore_radius.is_some() {
        out.push_str(r#" fill-rule="evenodd""#);
    }
    if let Some(stroke) = stroke {
        let _ = write!(out, r#" stroke="{stroke}" stroke-width="1""#);
    }
    out.push_str("/>");
}

fn render_arc(out: &mut String, id: &str, layout: &DiagramLayout) {
    let _ = write!(
        out,
        r#"<path id="{id}-enclosing-arc" class="enclosing-arc" d="{d}" fill="none" stroke="{ARC_STROKE}" stroke-width="{w}""#,
        d = layout.arc.path(),
        w = fmt(layout.arc_stroke_width),
    );
    if !layout.show_arc {
        out.push_str(r#" display="none""#);
    }
    out.push_str("/>");
}

fn render_segments(
    out: &mut String,
    id: &str,
    class: &str,
    segments: &[Segment],
    stroke: &str,
    width: f64,
    opacity: Option<f64>,
) {
    let _ = write!(
        out,
        r#"<g id="{id}-{class}" class="{class}" stroke="{stroke}" stroke-width="{w}""#,
        w = fmt(width),
    );
    if let Some(o) = opacity {
        let _ = write!(out, r#" opacity="{}""#, fmt(o));
    }
    out.push('>');
    for s in segments {
        let _ = write!(
            out,
            r#"<line data-index="{i}" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"/>"#,
            i = s.index,
            x1 = fmt2(s.from.x),
            y1 = fmt2(s.from.y),
            x2 = fmt2(s.to.x),
            y2 = fmt2(s.to.y),
        );
    }
    out.push_str("</g>");
}

fn render_markers(out: &mut String, id: &str, layout: &DiagramLayout) {
    let _ = write!(out, r#"<g id="{id}-markers" class="markers">"#);
    for d in &layout.dots {
        if let Some(h) = d.halo {
            let _ = write!(out, r#"<circle class="halo" data-index="{}""#, d.index());
            let _ = write!(
                out,
                r#" cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="{stroke}" stroke-width="{w}"/>"#,
                cx = fmt2(h.center.x),
                cy = fmt2(h.center.y),
                r = fmt(h.radius),
                fill = h.fill,
                stroke = h.stroke,
                w = fmt(h.stroke_width),
            );
        }
        let _ = write!(
            out,
            r#"<circle class="marker" data-index="{i}" cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="{stroke}" stroke-width="{w}"/>"#,
            i = d.index(),
            cx = fmt2(d.position.x),
            cy = fmt2(d.position.y),
            r = fmt(d.radius()),
            fill = d.dot.fill,
            stroke = d.dot.stroke,
            w = fmt(d.dot.stroke_width),
        );
        if let Some(c) = d.companion {
            let _ = write!(
                out,
                r#"<circle class="companion" data-index="{i}" cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="{stroke}" stroke-width="1"/>"#,
                i = d.index(),
                cx = fmt2(c.position.x),
                cy = fmt2(c.position.y),
                r = fmt(c.radius),
                fill = c.fill,
                stroke = c.stroke,
            );
        }
    }
    out.push_str("</g>");
}

fn render_labels(out: &mut String, id: &str, layout: &DiagramLayout) {
    let _ = write!(out, r#"<g id="{id}-labels" class="labels">"#);
    for leader in &layout.leaders {
        let mut d = String::new();
        for (i, p) in leader.points.iter().enumerate() {
            d.push_str(if i == 0 { "M " } else { " L " });
            d.push_str(&fmt2(p.x));
            d.push(' ');
            d.push_str(&fmt2(p.y));
        }
        let _ = write!(
            out,
            r#"<path class="leader" data-index="{i}" d="{d}" fill="none" stroke="{LEADER_STROKE}" stroke-width="{w}"/>"#,
            i = leader.index,
            w = fmt(LEADER_STROKE_WIDTH),
        );
    }
    for label in &layout.labels {
        let _ = write!(
            out,
            r#"<text class="label {kind}" x="{x}" y="{y}" text-anchor="{anchor}" dominant-baseline="middle" fill="{fill}" font-family="{FONT_FAMILY}" font-size="{size}""#,
            kind = label_class(label.kind),
            x = fmt2(label.x),
            y = fmt2(label.y),
            anchor = label.anchor.as_str(),
            fill = label.fill,
            size = fmt(label.font_size),
        );
        if label.bold {
            out.push_str(r#" font-weight="bold""#);
        }
        out.push('>');
        util::escape_xml_into(out, &label.text);
        out.push_str("</text>");
    }
    out.push_str("</g>");
}

fn label_class(kind: crate::model::LabelKind) -> &'static str {
    use crate::model::LabelKind;
    match kind {
        LabelKind::Participant => "participant",
        LabelKind::Rba => "rba",
        LabelKind::Cls => "cls",
        LabelKind::Circle => "circle-caption",
    }
}
