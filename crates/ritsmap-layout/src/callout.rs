//! Emphasized markers pulled off the arc along their spoke from the RITS center.

use crate::arc::ArcSpec;
use crate::dots::{Companion, DotLayout};
use crate::geom::{Point, point};

pub const HALO_FILL: &str = "#000000";
pub const HALO_STROKE: &str = "#991b1b";
pub const HALO_STROKE_WIDTH: f64 = 2.0;

/// Moves markers in `[start, end)`: scale away from the hub by `extend`, then shift down by
/// `drop` halo radii (negative rises).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalloutRule {
    pub start: usize,
    pub end: usize,
    pub extend: f64,
    pub drop: f64,
    /// Draw a halo behind the moved marker.
    #[serde(default)]
    pub halo: bool,
}

impl CalloutRule {
    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalloutRules {
    pub hub: Point,
    pub base_radius: f64,
    pub halo_factor: f64,
    pub rules: Vec<CalloutRule>,
}

impl CalloutRules {
    pub fn standard(hub: Point, base_radius: f64) -> Self {
        let rule = |start, end, extend, drop, halo| CalloutRule {
            start,
            end,
            extend,
            drop,
            halo,
        };
        Self {
            hub,
            base_radius,
            halo_factor: 6.0,
            rules: vec![
                rule(0, 1, 1.067, -2.0, true),
                rule(92, 96, 1.0, 0.5, false),
                rule(96, 99, 1.05, 1.0, false),
                rule(99, 100, 1.2, 1.8, false),
            ],
        }
    }

    /// No marker moves.
    pub fn none(hub: Point, base_radius: f64) -> Self {
        Self {
            hub,
            base_radius,
            halo_factor: 6.0,
            rules: Vec::new(),
        }
    }

    pub fn halo_radius(&self) -> f64 {
        self.halo_factor * self.base_radius
    }

    pub fn rule_for(&self, index: usize) -> Option<&CalloutRule> {
        self.rules.iter().find(|r| r.contains(index))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Halo {
    pub center: Point,
    pub radius: f64,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: f64,
}

/// A marker at its final drawing position.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedDot {
    /// The arc layout this marker came from, unchanged.
    pub dot: DotLayout,
    pub position: Point,
    pub companion: Option<Companion>,
    pub halo: Option<Halo>,
    pub moved: bool,
}

impl PlacedDot {
    pub fn index(&self) -> usize {
        self.dot.index
    }

    pub fn radius(&self) -> f64 {
        self.dot.radius
    }
}

pub fn place_callouts(dots: &[DotLayout], arc: &ArcSpec, rules: &CalloutRules) -> Vec<PlacedDot> {
    let halo_radius = rules.halo_radius();
    dots.iter()
        .map(|dot| {
            let Some(rule) = rules.rule_for(dot.index) else {
                return PlacedDot {
                    dot: dot.clone(),
                    position: dot.position,
                    companion: dot.companion,
                    halo: None,
                    moved: false,
                };
            };

            let extended = rules.hub + (dot.position - rules.hub) * rule.extend;
            let position = point(extended.x, extended.y + rule.drop * halo_radius);

            let companion = dot.companion.map(|c| {
                let away = position - arc.center;
                let len = away.length();
                let o = dot.radius + c.radius;
                let pos = if len > 0.0 {
                    position - away * (o / len)
                } else {
                    position
                };
                Companion { position: pos, ..c }
            });

            let halo = rule.halo.then_some(Halo {
                center: position,
                radius: halo_radius,
                fill: HALO_FILL,
                stroke: HALO_STROKE,
                stroke_width: HALO_STROKE_WIDTH,
            });

            PlacedDot {
                dot: dot.clone(),
                position,
                companion,
                halo,
                moved: position != dot.position,
            }
        })
        .collect()
}
