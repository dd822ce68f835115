//! Grouped, non-uniform spacing of markers along the arc.
//!
//! Every group maps a true index `i` to an "adjusted index" (a distance along the arc in spacing
//! units):
//!
//! ```text
//! origin·s + lead·gap + (i − origin + shift)·s·scale + Σ { n.gaps·gap | i ≥ n.from }
//! ```
//!
//! with `gap = 2·s`. The standard table reproduces the published diagram's six clusters.

use crate::error::{Error, Result};

/// Extra distance added from `from` onward, in multiples of the group gap.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nudge {
    pub from: usize,
    pub gaps: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingGroup {
    pub start: usize,
    pub end: usize,
    /// Gap multiples inserted before the group begins.
    pub lead: f64,
    #[serde(default)]
    pub shift: f64,
    #[serde(default)]
    pub origin: usize,
    #[serde(default = "unit_scale")]
    pub scale: f64,
    #[serde(default)]
    pub nudges: Vec<Nudge>,
}

fn unit_scale() -> f64 {
    1.0
}

impl SpacingGroup {
    fn new(start: usize, end: usize, lead: f64) -> Self {
        Self {
            start,
            end,
            lead,
            shift: 0.0,
            origin: 0,
            scale: 1.0,
            nudges: Vec::new(),
        }
    }

    fn shifted(mut self, shift: f64) -> Self {
        self.shift = shift;
        self
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }

    fn adjusted(&self, index: usize, spacing: f64) -> f64 {
        let gap = 2.0 * spacing;
        let origin = self.origin as f64;
        let steps = index as f64 - origin + self.shift;
        let nudged: f64 = self
            .nudges
            .iter()
            .filter(|n| index >= n.from)
            .map(|n| n.gaps * gap)
            .sum();
        origin * spacing + self.lead * gap + steps * spacing * self.scale + nudged
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupSpacingTable {
    pub groups: Vec<SpacingGroup>,
}

impl Default for GroupSpacingTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl GroupSpacingTable {
    /// The table for the 100-participant diagram.
    pub fn standard() -> Self {
        let last = SpacingGroup {
            start: 92,
            end: 100,
            lead: 13.5,
            shift: 0.0,
            origin: 92,
            scale: 1.5,
            nudges: vec![
                Nudge { from: 96, gaps: 0.5 },
                Nudge { from: 98, gaps: 1.0 },
                Nudge { from: 99, gaps: 1.0 },
            ],
        };
        Self {
            groups: vec![
                SpacingGroup::new(0, 1, 0.0),
                SpacingGroup::new(1, 45, 2.0),
                SpacingGroup::new(45, 50, 3.0),
                SpacingGroup::new(50, 84, 6.0).shifted(1.0),
                SpacingGroup::new(84, 87, 8.0).shifted(1.0),
                SpacingGroup::new(87, 92, 10.5),
                last,
            ],
        }
    }

    /// Checks that the groups are non-empty, contiguous and start at index 0, and that the
    /// adjusted index never decreases, within a group or across a boundary.
    pub fn validate(&self) -> Result<()> {
        let Some(first) = self.groups.first() else {
            return Err(invalid("table has no groups"));
        };
        if first.start != 0 {
            return Err(invalid(format!(
                "first group starts at {}, expected 0",
                first.start
            )));
        }
        let mut expected = 0;
        for (n, g) in self.groups.iter().enumerate() {
            if g.start != expected {
                return Err(invalid(format!(
                    "group {n} starts at {}, expected {expected}",
                    g.start
                )));
            }
            if g.end <= g.start {
                return Err(invalid(format!(
                    "group {n} is empty ({}..{})",
                    g.start, g.end
                )));
            }
            if !(g.scale.is_finite() && g.scale > 0.0) || !g.lead.is_finite() {
                return Err(invalid(format!("group {n} has a non-positive pitch")));
            }
            if let Some(nudge) = g
                .nudges
                .iter()
                .find(|nudge| !(nudge.gaps.is_finite() && nudge.gaps >= 0.0))
            {
                return Err(invalid(format!(
                    "group {n} nudge at {} has negative gaps {}",
                    nudge.from, nudge.gaps
                )));
            }
            // Every term scales with the spacing, so one unit spacing decides the ordering.
            if n > 0 {
                let before = self.groups[n - 1].adjusted(g.start - 1, 1.0);
                let after = g.adjusted(g.start, 1.0);
                if after < before {
                    return Err(invalid(format!(
                        "group {n} jumps backwards at index {} ({after} < {before})",
                        g.start
                    )));
                }
            }
            expected = g.end;
        }
        Ok(())
    }

    /// Checks [`validate`](Self::validate) and that the table covers exactly `[0, count)`.
    pub fn validate_for(&self, count: usize) -> Result<()> {
        self.validate()?;
        let end = self.end();
        if end != count {
            return Err(invalid(format!("table covers [0, {end}), expected [0, {count})")));
        }
        Ok(())
    }

    /// One past the last index the table names.
    pub fn end(&self) -> usize {
        self.groups.last().map(|g| g.end).unwrap_or(0)
    }

    /// Group governing `index`. Indices past the end fall through to the last group.
    pub fn group_for(&self, index: usize) -> Option<&SpacingGroup> {
        self.groups
            .iter()
            .find(|g| g.contains(index))
            .or_else(|| self.groups.last())
    }

    pub fn adjusted_index(&self, index: usize, spacing: f64) -> f64 {
        self.group_for(index)
            .map(|g| g.adjusted(index, spacing))
            .unwrap_or(index as f64 * spacing)
    }

    /// Adjusted index of the virtual item one past `count - 1`; the normalization denominator.
    pub fn extent(&self, count: usize, spacing: f64) -> f64 {
        self.adjusted_index(count, spacing)
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidSpacingTable {
        message: message.into(),
    }
}
