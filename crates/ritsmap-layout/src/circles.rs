use crate::gear::{DEFAULT_TOOTH_FRACTION, GearSpec};
use crate::geom::{Point, point};

/// Inputs for the two main circles: RITS ("big", below) and FSS ("small", above).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CircleParams {
    pub cx: f64,
    pub cy_big: f64,
    pub r_big: f64,
    pub r_small: f64,
    pub stroke_width: f64,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            cx: 300.0,
            cy_big: 450.0,
            r_big: 115.5,
            r_small: 65.5,
            stroke_width: 3.0,
        }
    }
}

impl CircleParams {
    /// The small circle sits directly on top of the big one, separated by one stroke.
    pub fn cy_small(&self) -> f64 {
        self.cy_big - (self.r_big + self.r_small + self.stroke_width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainCircle {
    pub center: Point,
    pub radius: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    /// Toothed border between the outer and inner circles, bored out to `inner_radius`.
    pub gear_border: GearSpec,
    pub gear: GearSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleLayout {
    pub params: CircleParams,
    pub big: MainCircle,
    pub small: MainCircle,
}

impl CircleLayout {
    pub fn from_params(params: &CircleParams) -> Self {
        let sw = params.stroke_width;

        let big_inner = params.r_big - 2.5 * sw;
        let big = MainCircle {
            center: point(params.cx, params.cy_big),
            radius: params.r_big,
            outer_radius: params.r_big + sw / 2.0,
            inner_radius: big_inner,
            gear_border: gear(params.r_big - 0.75 * sw, 20, 6.0, Some(big_inner)),
            gear: gear(big_inner - 12.0, 16, 8.0, None),
        };

        let small_inner = params.r_small - 2.0 * sw;
        let small = MainCircle {
            center: point(params.cx, params.cy_small()),
            radius: params.r_small,
            outer_radius: params.r_small + sw / 2.0,
            inner_radius: small_inner,
            gear_border: gear(params.r_small - 0.3 * sw, 12, 4.0, Some(small_inner)),
            gear: gear(small_inner - 8.0, 10, 4.0, None),
        };

        Self {
            params: *params,
            big,
            small,
        }
    }
}

// Unchecked: degenerate parameters are rejected by configuration validation upstream.
fn gear(outer_radius: f64, tooth_count: usize, tooth_height: f64, bore: Option<f64>) -> GearSpec {
    GearSpec {
        outer_radius,
        bore_radius: bore,
        tooth_count,
        tooth_height,
        tooth_fraction: DEFAULT_TOOTH_FRACTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_circles() {
        let c = CircleLayout::from_params(&CircleParams::default());
        assert_eq!(c.small.center, point(300.0, 266.0));
        assert_eq!(c.big.outer_radius, 117.0);
        assert_eq!(c.big.inner_radius, 108.0);
        assert_eq!(c.small.outer_radius, 67.0);
        assert_eq!(c.small.inner_radius, 59.5);

        assert_eq!(c.big.gear_border.outer_radius, 113.25);
        assert_eq!(c.big.gear_border.bore_radius, Some(108.0));
        assert_eq!(c.big.gear_border.tooth_count, 20);
        assert_eq!(c.big.gear.outer_radius, 96.0);
        assert_eq!(c.big.gear.tooth_count, 16);
        assert_eq!(c.big.gear.bore_radius, None);

        assert!((c.small.gear_border.outer_radius - 64.6).abs() < 1e-9);
        assert_eq!(c.small.gear_border.bore_radius, Some(59.5));
        assert_eq!(c.small.gear.outer_radius, 51.5);
        assert_eq!(c.small.gear.tooth_count, 10);
    }

    #[test]
    fn default_gears_pass_checked_construction() {
        let c = CircleLayout::from_params(&CircleParams::default());
        for g in [c.big.gear_border, c.big.gear, c.small.gear_border, c.small.gear] {
            let checked = GearSpec::new(g.outer_radius, g.tooth_count, g.tooth_height, g.tooth_fraction)
                .unwrap();
            let checked = match g.bore_radius {
                Some(r) => checked.with_bore(r).unwrap(),
                None => checked,
            };
            assert_eq!(checked, g);
        }
    }

    #[test]
    fn circles_touch_through_one_stroke() {
        let p = CircleParams {
            r_big: 100.0,
            r_small: 50.0,
            stroke_width: 4.0,
            ..CircleParams::default()
        };
        let c = CircleLayout::from_params(&p);
        let gap = c.big.center.y - c.small.center.y - p.r_big - p.r_small;
        assert_eq!(gap, 4.0);
    }
}
