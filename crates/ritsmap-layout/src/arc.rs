use crate::circles::CircleLayout;
use crate::geom::{Point, fixed2, on_ellipse, point};

/// Elliptical arc the participant markers sit on.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcSpec {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Radians; `start_angle < end_angle`.
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ArcSpec {
    pub fn new(center: Point, radius_x: f64, radius_y: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
            start_angle,
            end_angle,
        }
    }

    pub fn point_at(&self, angle: f64) -> Point {
        on_ellipse(self.center, self.radius_x, self.radius_y, angle)
    }

    /// Angle at normalized position `t` (0 at the start, 1 at the end).
    pub fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + t * (self.end_angle - self.start_angle)
    }

    /// Derives the arc wrapping the right-hand side of both main circles.
    ///
    /// The arc is stretched vertically by an amount that grows with `dot_spacing` so the grouped
    /// markers have room between the small circle's top and the big circle's bottom.
    pub fn enclosing(
        circles: &CircleLayout,
        tuning: &ArcTuning,
        dot_spacing: f64,
        total_count: usize,
    ) -> EnclosingArc {
        let p = &circles.params;
        let count = total_count.max(1) as f64;
        let ratio = dot_spacing + 10.0 * dot_spacing * tuning.gap_multiplier / count;
        let extension = tuning.extension_per_ratio * (ratio - 1.0);

        let x0 = p.cx + p.r_big + p.stroke_width + tuning.side_margin + tuning.offset;
        let start = point(
            x0,
            circles.small.center.y - p.r_small - tuning.clearance - extension,
        );
        let end = point(
            x0,
            circles.big.center.y + p.r_big + tuning.clearance + extension,
        );

        let radius = (tuning.reference_radius + extension) * tuning.bulge;
        let half_height = (end.y - start.y) / 2.0;
        let sqrt_term = radius * radius - half_height * half_height;
        let center_x = if sqrt_term > 0.0 {
            x0 - sqrt_term.sqrt()
        } else {
            x0 - radius
        };
        let center = point(center_x, (start.y + end.y) / 2.0);
        let stretch = tuning.vertical_stretch;

        let angle_of = |q: Point| ((q.y - center.y) / stretch).atan2(q.x - center.x);
        let spec = ArcSpec::new(
            center,
            radius,
            radius * stretch,
            angle_of(start),
            angle_of(end),
        );

        tracing::debug!(
            extension,
            radius,
            start_angle = spec.start_angle,
            end_angle = spec.end_angle,
            "derived enclosing arc"
        );

        EnclosingArc {
            spec,
            start,
            end,
            radius,
            extension,
        }
    }
}

/// Named constants shaping the enclosing arc.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArcTuning {
    /// Vertical distance kept from the circles' outer edges.
    pub clearance: f64,
    pub side_margin: f64,
    /// Horizontal push to the right of the big circle.
    pub offset: f64,
    pub extension_per_ratio: f64,
    pub bulge: f64,
    pub vertical_stretch: f64,
    pub gap_multiplier: f64,
    pub reference_radius: f64,
}

impl Default for ArcTuning {
    fn default() -> Self {
        Self {
            clearance: 15.0,
            side_margin: 20.0,
            offset: 60.0,
            extension_per_ratio: 120.0,
            bulge: 0.3,
            vertical_stretch: 1.05,
            gap_multiplier: 2.0,
            reference_radius: 320.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnclosingArc {
    pub spec: ArcSpec,
    /// Top endpoint, above the small circle.
    pub start: Point,
    /// Bottom endpoint, below the big circle.
    pub end: Point,
    pub radius: f64,
    pub extension: f64,
}

impl EnclosingArc {
    /// Circular arc stroke between the endpoints, bulging right.
    pub fn path(&self) -> String {
        let r = fixed2(self.radius);
        format!(
            "M {} {} A {r} {r} 0 0 1 {} {}",
            fixed2(self.start.x),
            fixed2(self.start.y),
            fixed2(self.end.x),
            fixed2(self.end.y),
        )
    }
}
