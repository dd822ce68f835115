//! Participant markers along the enclosing arc.

use crate::arc::ArcSpec;
use crate::geom::{Point, point};
use crate::spacing::GroupSpacingTable;

pub mod palette {
    pub const DOT_FILL: &str = "#3b82f6";
    pub const DOT_STROKE: &str = "#1e3a8a";
    /// Exchange-settlement markers, `[92, 96)`.
    pub const RED_STROKE: &str = "#ef4444";
    /// Clearing and settlement facilities, `[96, 99)`.
    pub const GREEN_STROKE: &str = "#4CAF50";
    /// The CLS marker, index 99.
    pub const CLS_STROKE: &str = "#7FFF00";
    pub const COMPANION_FILL: &str = "#f59e0b";
    pub const COMPANION_STROKE: &str = "#9a3412";
}

pub const DEFAULT_DOT_RADIUS: f64 = 2.4;
pub const COMPANION_SCALE: f64 = 2.0 / 3.0;

const CLS_INDEX: usize = 99;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DotStyle {
    /// Radius of an ordinary marker; every other radius is a multiple of it.
    pub base_radius: f64,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            base_radius: DEFAULT_DOT_RADIUS,
        }
    }
}

/// The smaller marker touching a dot on the arc-center side.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Companion {
    pub position: Point,
    pub radius: f64,
    pub fill: &'static str,
    pub stroke: &'static str,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DotLayout {
    pub index: usize,
    /// Normalized position along the arc, in `[0, 1)`.
    pub t: f64,
    pub angle: f64,
    pub position: Point,
    pub radius: f64,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: f64,
    pub has_companion: bool,
    pub companion: Option<Companion>,
}

impl DotLayout {
    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Distance from a dot's center to its companion's center.
    pub fn companion_offset(&self) -> f64 {
        self.companion.map(|c| self.radius + c.radius).unwrap_or(0.0)
    }
}

/// Lays out `total_count` markers with the standard group table and default marker radius.
pub fn layout_dots(arc: &ArcSpec, total_count: usize, spacing: f64) -> Vec<DotLayout> {
    layout_dots_with(
        arc,
        total_count,
        spacing,
        &GroupSpacingTable::standard(),
        &DotStyle::default(),
    )
}

pub fn layout_dots_with(
    arc: &ArcSpec,
    total_count: usize,
    spacing: f64,
    table: &GroupSpacingTable,
    style: &DotStyle,
) -> Vec<DotLayout> {
    let _span = tracing::debug_span!("layout_dots", total_count, spacing).entered();

    let max_index = table.extent(total_count, spacing);
    let dots: Vec<DotLayout> = (0..total_count)
        .map(|i| {
            let t = table.adjusted_index(i, spacing) / max_index;
            let angle = arc.angle_at(t);
            let position = arc.point_at(angle);
            let radius = dot_radius(i, style.base_radius);
            let companion = has_companion(i).then(|| {
                let c_radius = radius * COMPANION_SCALE;
                let o = radius + c_radius;
                Companion {
                    position: point(
                        arc.center.x + (arc.radius_x - o) * angle.cos(),
                        arc.center.y + (arc.radius_y - o) * angle.sin(),
                    ),
                    radius: c_radius,
                    fill: palette::COMPANION_FILL,
                    stroke: palette::COMPANION_STROKE,
                }
            });
            DotLayout {
                index: i,
                t,
                angle,
                position,
                radius,
                fill: palette::DOT_FILL,
                stroke: dot_stroke(i),
                stroke_width: dot_stroke_width(i),
                has_companion: companion.is_some(),
                companion,
            }
        })
        .collect();

    tracing::debug!(
        dots = dots.len(),
        companions = dots.iter().filter(|d| d.has_companion).count(),
        max_index,
        "laid out markers"
    );
    dots
}

/// Markers that carry a companion: the leading marker of every cluster plus the named banks.
pub fn has_companion(i: usize) -> bool {
    i == 0
        || (1..3).contains(&i)
        || (45..47).contains(&i)
        || (50..56).contains(&i)
        || (84..86).contains(&i)
        || (87..89).contains(&i)
}

pub fn dot_radius(i: usize, base: f64) -> f64 {
    if i == CLS_INDEX {
        return base * 12.0;
    }
    if (96..99).contains(&i) {
        return base * 2.0;
    }
    let mut r = if has_companion(i) { base * 2.0 } else { base };
    if (50..54).contains(&i) {
        r *= 1.5;
    }
    r
}

pub fn dot_stroke(i: usize) -> &'static str {
    match i {
        92..=95 => palette::RED_STROKE,
        96..=98 => palette::GREEN_STROKE,
        CLS_INDEX => palette::CLS_STROKE,
        _ => palette::DOT_STROKE,
    }
}

pub fn dot_stroke_width(i: usize) -> f64 {
    match i {
        CLS_INDEX => 6.0,
        92..=98 => 2.0,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn half_ellipse() -> ArcSpec {
        ArcSpec::new(point(0.0, 0.0), 100.0, 105.0, -FRAC_PI_2, FRAC_PI_2)
    }

    #[test]
    fn exactly_fifteen_companions() {
        let with: Vec<usize> = (0..100).filter(|&i| has_companion(i)).collect();
        assert_eq!(
            with,
            vec![0, 1, 2, 45, 46, 50, 51, 52, 53, 54, 55, 84, 85, 87, 88]
        );
    }

    #[test]
    fn radius_rules() {
        let r = 2.4;
        assert_eq!(dot_radius(3, r), r);
        assert_eq!(dot_radius(1, r), 2.0 * r);
        assert!((dot_radius(50, r) - 3.0 * r).abs() < 1e-12);
        assert_eq!(dot_radius(54, r), 2.0 * r);
        assert_eq!(dot_radius(60, r), r);
        for i in 96..99 {
            assert_eq!(dot_radius(i, r), 2.0 * r);
        }
        assert_eq!(dot_radius(99, r), 12.0 * r);
    }

    #[test]
    fn stroke_rules() {
        assert_eq!(dot_stroke(0), palette::DOT_STROKE);
        assert_eq!(dot_stroke(92), palette::RED_STROKE);
        assert_eq!(dot_stroke(95), palette::RED_STROKE);
        assert_eq!(dot_stroke(96), palette::GREEN_STROKE);
        assert_eq!(dot_stroke(99), palette::CLS_STROKE);
        assert_eq!(dot_stroke_width(91), 1.0);
        assert_eq!(dot_stroke_width(92), 2.0);
        assert_eq!(dot_stroke_width(98), 2.0);
        assert_eq!(dot_stroke_width(99), 6.0);
    }

    #[test]
    fn first_dot_sits_on_start_angle() {
        let dots = layout_dots(&half_ellipse(), 100, 5.0);
        assert_eq!(dots.len(), 100);
        assert_eq!(dots[0].angle, -FRAC_PI_2);
        assert!((dots[0].x()).abs() < 1e-9);
        assert!((dots[0].y() + 105.0).abs() < 1e-9);
        assert!(dots[99].angle < FRAC_PI_2);
    }

    #[test]
    fn companion_touches_dot_toward_center() {
        let arc = half_ellipse();
        let dots = layout_dots(&arc, 100, 5.0);
        let d = &dots[1];
        let c = d.companion.unwrap();
        assert!((c.radius - d.radius * 2.0 / 3.0).abs() < 1e-12);
        let o = d.companion_offset();
        let expected = point(
            (arc.radius_x - o) * d.angle.cos(),
            (arc.radius_y - o) * d.angle.sin(),
        );
        assert!((c.position - expected).length() < 1e-9);
        assert!(c.position.to_vector().length() < d.position.to_vector().length());
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(layout_dots(&half_ellipse(), 0, 5.0).is_empty());
    }
}
