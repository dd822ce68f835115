//! Diagram configuration.
//!
//! [`RenderConfig`] is the raw JSON document (file contents plus `--set` overrides);
//! [`DiagramConfig`] is its typed, defaulted view.

use crate::{Error, Result};
use ritsmap_layout::{ArcSpec, ArcTuning, CircleLayout, CircleParams};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig(Value);

impl Default for RenderConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl RenderConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(text)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    /// Applies a `key=value` override. The value is parsed as JSON when possible
    /// (`dots.count=80`, `arc.showPath=true`) and kept as a string otherwise.
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let Some((key, raw)) = assignment.split_once('=') else {
            return Err(Error::InvalidConfig {
                message: format!("expected key=value, got {assignment:?}"),
            });
        };
        let key = key.trim();
        if key.is_empty() || key.split('.').any(str::is_empty) {
            return Err(Error::InvalidConfig {
                message: format!("invalid config key {key:?}"),
            });
        }
        let value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        self.set_value(key, value);
        Ok(())
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    /// Typed view with defaults filled in, validated.
    pub fn diagram_config(&self) -> Result<DiagramConfig> {
        let cfg = DiagramConfig::deserialize(&self.0)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagramConfig {
    pub circles: CircleParams,
    pub arc: ArcConfig,
    pub dots: DotsConfig,
    pub svg: SvgConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArcConfig {
    #[serde(flatten)]
    pub tuning: ArcTuning,
    /// Draw the arc itself; it is emitted hidden otherwise.
    pub show_path: bool,
    pub stroke_width: f64,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            tuning: ArcTuning::default(),
            show_path: false,
            stroke_width: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DotsConfig {
    pub count: usize,
    pub spacing: f64,
    pub radius: f64,
    pub callouts: bool,
    pub spokes: bool,
    pub labels: bool,
}

impl Default for DotsConfig {
    fn default() -> Self {
        Self {
            count: 100,
            spacing: 5.0,
            radius: 2.4,
            callouts: true,
            spokes: true,
            labels: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SvgConfig {
    pub diagram_id: String,
    pub padding: f64,
    pub background: Option<String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            diagram_id: "ritsmap".to_string(),
            padding: 16.0,
            background: Some("white".to_string()),
        }
    }
}

impl DiagramConfig {
    pub fn validate(&self) -> Result<()> {
        let c = &self.circles;
        positive("circles.rBig", c.r_big)?;
        positive("circles.rSmall", c.r_small)?;
        positive("circles.strokeWidth", c.stroke_width)?;
        finite("circles.cx", c.cx)?;
        finite("circles.cyBig", c.cy_big)?;
        // The inner gears are inset from the inner circles by a fixed margin plus their teeth.
        if c.r_big - 2.5 * c.stroke_width - 12.0 <= 8.0 {
            return Err(invalid(format!(
                "circles.rBig {} is too small for its inner gear",
                c.r_big
            )));
        }
        if c.r_small - 2.0 * c.stroke_width - 8.0 <= 4.0 {
            return Err(invalid(format!(
                "circles.rSmall {} is too small for its inner gear",
                c.r_small
            )));
        }

        let t = &self.arc.tuning;
        positive("arc.bulge", t.bulge)?;
        positive("arc.verticalStretch", t.vertical_stretch)?;
        positive("arc.referenceRadius", t.reference_radius)?;
        for (name, v) in [
            ("arc.clearance", t.clearance),
            ("arc.sideMargin", t.side_margin),
            ("arc.offset", t.offset),
            ("arc.extensionPerRatio", t.extension_per_ratio),
            ("arc.gapMultiplier", t.gap_multiplier),
            ("arc.strokeWidth", self.arc.stroke_width),
        ] {
            finite(name, v)?;
        }

        if self.dots.count == 0 {
            return Err(invalid("dots.count must be at least 1"));
        }
        positive("dots.spacing", self.dots.spacing)?;
        positive("dots.radius", self.dots.radius)?;

        // The arc must run downward from above the small circle to below the big one.
        let arc = ArcSpec::enclosing(
            &CircleLayout::from_params(c),
            t,
            self.dots.spacing,
            self.dots.count,
        );
        if !(arc.start.y < arc.end.y && arc.spec.start_angle < arc.spec.end_angle) {
            return Err(invalid(format!(
                "arc tuning puts the arc start (y = {}) at or below its end (y = {})",
                arc.start.y, arc.end.y
            )));
        }

        if !(self.svg.padding.is_finite() && self.svg.padding >= 0.0) {
            return Err(invalid(format!(
                "svg.padding must be non-negative, got {}",
                self.svg.padding
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidConfig {
        message: message.into(),
    }
}

fn positive(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {v}")))
    }
}

fn finite(name: &str, v: f64) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite, got {v}")))
    }
}
