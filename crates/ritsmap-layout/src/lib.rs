#![forbid(unsafe_code)]

//! Headless geometry for the ritsmap payments-system diagram.
//!
//! Everything here is pure arithmetic: gear outlines as SVG path strings, the two main circles,
//! the enclosing elliptical arc and the grouped distribution of participant markers along it.
//! `ritsmap-render` consumes these results and turns them into SVG.

pub mod arc;
pub mod callout;
pub mod circles;
pub mod dots;
pub mod error;
pub mod gear;
pub mod geom;
pub mod spacing;

pub use arc::{ArcSpec, ArcTuning, EnclosingArc};
pub use callout::{CalloutRule, CalloutRules, Halo, PlacedDot, place_callouts};
pub use circles::{CircleLayout, CircleParams, MainCircle};
pub use dots::{Companion, DotLayout, DotStyle, layout_dots, layout_dots_with};
pub use error::{Error, Result};
pub use gear::{DEFAULT_TOOTH_FRACTION, GearSpec, bore_path, gear_path, gear_ring_path};
pub use geom::Point;
pub use spacing::{GroupSpacingTable, Nudge, SpacingGroup};
