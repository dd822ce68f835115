#![forbid(unsafe_code)]

pub mod config;
pub mod labels;
pub mod model;
pub mod svg;
pub mod text;

use crate::config::{DiagramConfig, RenderConfig};
use crate::model::{Bounds, DiagramLayout, Segment, circle_extent};
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use ritsmap_layout::{
    ArcSpec, CalloutRules, CircleLayout, DotStyle, GearSpec, GroupSpacingTable, layout_dots_with,
    place_callouts,
};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid diagram config: {message}")]
    InvalidConfig { message: String },
    #[error(transparent)]
    Layout(#[from] ritsmap_layout::Error),
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

/// Markers whose spoke to the RITS center is left out so the clusters stay legible.
pub fn has_spoke(index: usize) -> bool {
    !matches!(index, 34..=44 | 68..=83 | 91 | 95)
}

pub fn layout_from_config(config: &RenderConfig, options: &LayoutOptions) -> Result<DiagramLayout> {
    layout_diagram(&config.diagram_config()?, options)
}

pub fn layout_diagram(config: &DiagramConfig, options: &LayoutOptions) -> Result<DiagramLayout> {
    let _span = tracing::debug_span!(
        "layout_diagram",
        count = config.dots.count,
        spacing = config.dots.spacing
    )
    .entered();

    config.validate()?;

    let circles = CircleLayout::from_params(&config.circles);
    check_gears(&circles)?;

    let dots_cfg = &config.dots;
    let enclosing = ArcSpec::enclosing(
        &circles,
        &config.arc.tuning,
        dots_cfg.spacing,
        dots_cfg.count,
    );
    let arc = enclosing.spec;

    let table = GroupSpacingTable::standard();
    table.validate()?;
    let style = DotStyle {
        base_radius: dots_cfg.radius,
    };
    let dots = layout_dots_with(&arc, dots_cfg.count, dots_cfg.spacing, &table, &style);

    let rules = if dots_cfg.callouts {
        CalloutRules::standard(circles.big.center, dots_cfg.radius)
    } else {
        CalloutRules::none(circles.big.center, dots_cfg.radius)
    };
    let placed = place_callouts(&dots, &arc, &rules);

    let spokes = if dots_cfg.spokes {
        placed
            .iter()
            .filter(|d| has_spoke(d.index()))
            .map(|d| Segment {
                index: d.index(),
                from: circles.big.center,
                to: d.position,
            })
            .collect()
    } else {
        Vec::new()
    };
    let connectors: Vec<Segment> = placed
        .iter()
        .filter_map(|d| {
            d.companion.map(|c| Segment {
                index: d.index(),
                from: circles.small.center,
                to: c.position,
            })
        })
        .collect();

    let measurer = options.text_measurer.as_ref();
    let mut labels = Vec::new();
    let mut leaders = Vec::new();
    if dots_cfg.labels {
        let (participants, lines) = crate::labels::participant_labels(&placed, measurer);
        labels.extend(participants);
        leaders = lines;
    }
    labels.extend(crate::labels::marker_captions(&placed, measurer));
    labels.extend(crate::labels::circle_captions(&circles, measurer));

    let show_arc = config.arc.show_path;
    let mut points: Vec<(f64, f64)> = Vec::new();
    for c in [&circles.big, &circles.small] {
        points.extend(circle_extent(c.center, c.outer_radius));
    }
    if show_arc {
        // The arc bulges right of its endpoints by at most its radius.
        points.push((enclosing.start.x, enclosing.start.y));
        points.push((enclosing.end.x, enclosing.end.y));
        points.push((arc.center.x + arc.radius_x, arc.center.y));
    }
    for d in &placed {
        points.extend(circle_extent(d.position, d.radius() + d.dot.stroke_width / 2.0));
        if let Some(c) = d.companion {
            points.extend(circle_extent(c.position, c.radius + 0.5));
        }
        if let Some(h) = d.halo {
            points.extend(circle_extent(h.center, h.radius + h.stroke_width / 2.0));
        }
    }
    for l in &labels {
        points.extend(l.extent());
    }
    let bounds = Bounds::from_points(points).unwrap_or(Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 600.0,
        max_y: 900.0,
    });

    tracing::debug!(
        dots = placed.len(),
        spokes = spokes.len(),
        connectors = connectors.len(),
        labels = labels.len(),
        width = bounds.width(),
        height = bounds.height(),
        "diagram laid out"
    );

    Ok(DiagramLayout {
        circles,
        arc: enclosing,
        show_arc,
        arc_stroke_width: config.arc.stroke_width,
        dots: placed,
        spokes,
        connectors,
        labels,
        leaders,
        bounds,
    })
}

/// Re-derives every circle gear through the checked constructor.
fn check_gears(circles: &CircleLayout) -> Result<()> {
    for c in [&circles.big, &circles.small] {
        for g in [c.gear_border, c.gear] {
            let checked = GearSpec::new(g.outer_radius, g.tooth_count, g.tooth_height, g.tooth_fraction)?;
            if let Some(bore) = g.bore_radius {
                checked.with_bore(bore)?;
            }
        }
    }
    Ok(())
}
