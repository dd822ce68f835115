//! Gear outlines as SVG path data.
//!
//! A gear is centered on the origin; callers position it with a `transform="translate(..)"`.

use crate::error::{Error, Result};
use crate::geom::{Point, js_number, point, push_js_number};
use std::f64::consts::TAU;

/// Tooth-width fraction used for every gear in the diagram.
pub const DEFAULT_TOOTH_FRACTION: f64 = 0.25;

/// A validated gear description.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GearSpec {
    pub outer_radius: f64,
    /// Radius of the circular cut-out drawn with `fill-rule="evenodd"`.
    pub bore_radius: Option<f64>,
    pub tooth_count: usize,
    pub tooth_height: f64,
    pub tooth_fraction: f64,
}

impl GearSpec {
    pub fn new(
        outer_radius: f64,
        tooth_count: usize,
        tooth_height: f64,
        tooth_fraction: f64,
    ) -> Result<Self> {
        if tooth_count == 0 {
            return Err(invalid("tooth count must be at least 1"));
        }
        if !(outer_radius.is_finite() && outer_radius > 0.0) {
            return Err(invalid(format!(
                "outer radius must be positive, got {outer_radius}"
            )));
        }
        if !(tooth_height.is_finite() && tooth_height >= 0.0 && tooth_height < outer_radius) {
            return Err(invalid(format!(
                "tooth height must be in [0, {outer_radius}), got {tooth_height}"
            )));
        }
        if !(tooth_fraction > 0.0 && tooth_fraction < 1.0) {
            return Err(invalid(format!(
                "tooth width fraction must be in (0, 1), got {tooth_fraction}"
            )));
        }
        Ok(Self {
            outer_radius,
            bore_radius: None,
            tooth_count,
            tooth_height,
            tooth_fraction,
        })
    }

    pub fn with_bore(mut self, bore_radius: f64) -> Result<Self> {
        if !(bore_radius.is_finite() && bore_radius > 0.0) {
            return Err(invalid(format!("bore radius must be positive, got {bore_radius}")));
        }
        if bore_radius >= self.outer_radius {
            return Err(invalid(format!(
                "bore radius {bore_radius} must be smaller than the outer radius {}",
                self.outer_radius
            )));
        }
        self.bore_radius = Some(bore_radius);
        Ok(self)
    }

    pub fn root_radius(&self) -> f64 {
        self.outer_radius - self.tooth_height
    }

    /// Gear outline followed by the bore sub-path, if any.
    pub fn to_path(&self) -> String {
        let mut out = gear_path(
            self.outer_radius,
            self.tooth_count,
            self.tooth_height,
            self.tooth_fraction,
        );
        if let Some(r) = self.bore_radius {
            out.push(' ');
            out.push_str(&bore_path(r));
        }
        out
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidGear {
        message: message.into(),
    }
}

/// Vertices of the gear outline in drawing order: root, tip, tip, root per slice.
pub fn gear_vertices(
    outer_radius: f64,
    tooth_count: usize,
    tooth_height: f64,
    tooth_fraction: f64,
) -> Vec<Point> {
    if tooth_count == 0 {
        return Vec::new();
    }
    let step = TAU / tooth_count as f64;
    let root = outer_radius - tooth_height;
    let at = |r: f64, a: f64| point(r * a.cos(), r * a.sin());

    let mut out = Vec::with_capacity(tooth_count * 4);
    for k in 0..tooth_count {
        let a = k as f64 * step;
        out.push(at(root, a));
        out.push(at(outer_radius, a + step * (1.0 - tooth_fraction) / 2.0));
        out.push(at(outer_radius, a + step * (1.0 + tooth_fraction) / 2.0));
        out.push(at(root, a + step));
    }
    out
}

/// Closed gear outline with trapezoidal teeth. Returns an empty string for zero teeth.
pub fn gear_path(
    outer_radius: f64,
    tooth_count: usize,
    tooth_height: f64,
    tooth_fraction: f64,
) -> String {
    let vertices = gear_vertices(outer_radius, tooth_count, tooth_height, tooth_fraction);
    if vertices.is_empty() {
        return String::new();
    }

    let mut buf = ryu_js::Buffer::new();
    let mut out = String::with_capacity(vertices.len() * 24);
    for (i, p) in vertices.iter().enumerate() {
        out.push_str(if i == 0 { "M " } else { " L " });
        push_js_number(&mut out, p.x, &mut buf);
        out.push(' ');
        push_js_number(&mut out, p.y, &mut buf);
    }
    out.push_str(" Z");
    out
}

/// Full circle of radius `r` as two semicircular arcs.
pub fn bore_path(r: f64) -> String {
    let rs = js_number(r);
    let neg = js_number(-r);
    format!("M {rs} 0 A {rs} {rs} 0 1 0 {neg} 0 A {rs} {rs} 0 1 0 {rs} 0")
}

/// Ring with a circular outer edge and rectangular teeth on the inner edge pointing outward.
///
/// The outer circle and the toothed inner edge are separate sub-paths so the ring renders with
/// `fill-rule="evenodd"`.
pub fn gear_ring_path(outer_radius: f64, inner_radius: f64, tooth_count: usize) -> String {
    const TOOTH_WIDTH: f64 = 0.3;
    const TOOTH_DEPTH: f64 = 0.4;

    if tooth_count == 0 {
        return String::new();
    }
    let step = TAU / tooth_count as f64;
    let depth = (outer_radius - inner_radius) * TOOTH_DEPTH;
    let tip = inner_radius + depth;

    let mut buf = ryu_js::Buffer::new();
    let mut out = String::new();
    let mut polar = |out: &mut String, cmd: &str, r: f64, a: f64| {
        out.push_str(cmd);
        push_js_number(out, r * a.cos(), &mut buf);
        out.push(' ');
        push_js_number(out, r * a.sin(), &mut buf);
    };
    let outer_arc = format!(" A {0} {0} 0 0 1 ", js_number(outer_radius));
    let inner_arc = format!(" A {0} {0} 0 0 0 ", js_number(inner_radius));

    polar(&mut out, "M ", outer_radius, 0.0);
    for k in 0..tooth_count {
        polar(&mut out, &outer_arc, outer_radius, (k + 1) as f64 * step);
    }
    out.push_str(" Z");

    for k in (0..tooth_count).rev() {
        let a = k as f64 * step;
        let far = a + step * (1.0 - TOOTH_WIDTH / 2.0);
        let near = a + step * TOOTH_WIDTH / 2.0;
        if k == tooth_count - 1 {
            polar(&mut out, " M ", inner_radius, far);
        }
        polar(&mut out, " L ", tip, far);
        polar(&mut out, " L ", tip, near);
        polar(&mut out, " L ", inner_radius, near);
        polar(&mut out, &inner_arc, inner_radius, a - step * TOOTH_WIDTH / 2.0);
    }
    out.push_str(" Z");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_teeth_yields_empty_path() {
        assert_eq!(gear_path(50.0, 0, 4.0, 0.25), "");
        assert!(gear_vertices(50.0, 0, 4.0, 0.25).is_empty());
        assert_eq!(gear_ring_path(50.0, 40.0, 0), "");
    }

    #[test]
    fn path_is_closed_move_line_sequence() {
        let d = gear_path(50.0, 3, 4.0, 0.25);
        assert!(d.starts_with("M "));
        assert!(d.ends_with(" Z"));
        assert_eq!(d.matches('L').count(), 11);
        assert!(!d.contains("NaN"));
    }

    #[test]
    fn single_tooth_slice_spans_full_turn() {
        let v = gear_vertices(10.0, 1, 2.0, 0.5);
        assert_eq!(v.len(), 4);
        assert!((v[0].x - 8.0).abs() < 1e-12);
        assert!((v[3].x - 8.0).abs() < 1e-9);
        assert!(v[3].y.abs() < 1e-9);
    }

    #[test]
    fn checked_constructor_rejects_bad_input() {
        assert!(matches!(
            GearSpec::new(50.0, 0, 4.0, 0.25),
            Err(Error::InvalidGear { .. })
        ));
        assert!(GearSpec::new(50.0, 12, 4.0, 1.0).is_err());
        assert!(GearSpec::new(50.0, 12, 4.0, 0.0).is_err());
        assert!(GearSpec::new(-1.0, 12, 4.0, 0.25).is_err());
        assert!(GearSpec::new(50.0, 12, 60.0, 0.25).is_err());
        let g = GearSpec::new(50.0, 12, 4.0, 0.25).unwrap();
        assert!(g.with_bore(50.0).is_err());
        assert!(g.with_bore(-1.0).is_err());
        assert!(g.with_bore(40.0).is_ok());
    }

    #[test]
    fn bored_gear_appends_bore_subpath() {
        let g = GearSpec::new(50.0, 12, 4.0, 0.25)
            .unwrap()
            .with_bore(40.0)
            .unwrap();
        let d = g.to_path();
        assert!(d.ends_with("M 40 0 A 40 40 0 1 0 -40 0 A 40 40 0 1 0 40 0"));
        assert_eq!(d.matches('M').count(), 2);
    }

    #[test]
    fn ring_has_two_closed_subpaths() {
        let d = gear_ring_path(60.0, 50.0, 8);
        assert!(d.starts_with("M 60 0"));
        assert_eq!(d.matches('M').count(), 2);
        assert_eq!(d.matches('Z').count(), 2);
        assert_eq!(d.matches(" A 60 60 0 0 1 ").count(), 8);
        assert_eq!(d.matches(" A 50 50 0 0 0 ").count(), 8);
    }
}
