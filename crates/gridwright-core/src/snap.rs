//! Step-rule snapping for aligning placement candidates to the ground grid.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Relative tolerance when checking whether a coordinate sits on a reserved line.
const RESERVED_LINE_EPSILON: f64 = 1e-9;

/// Horizontal axis of the ground grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Both horizontal axes, in snapping order.
    pub const HORIZONTAL: [Axis; 2] = [Axis::X, Axis::Z];

    /// Read this axis' component from a world-space vector.
    pub fn component(self, v: DVec3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.z,
        }
    }

    /// Return `v` with this axis' component replaced.
    pub fn with_component(self, mut v: DVec3, value: f64) -> DVec3 {
        match self {
            Axis::X => v.x = value,
            Axis::Z => v.z = value,
        }
        v
    }
}

/// Per-template snapping rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRule {
    /// Grid cell length.
    pub size: f64,
    /// Modulus of the reserved boundary lines.
    pub round: f64,
    /// Axis biased by one extra cell, for objects anchored off their footprint.
    #[serde(default)]
    pub orientation: Option<Axis>,
}

impl StepRule {
    /// Create a rule without an orientation bias.
    pub fn new(size: f64, round: f64) -> Self {
        Self {
            size,
            round,
            orientation: None,
        }
    }

    /// Bias `axis` by one extra cell.
    pub fn with_orientation(mut self, axis: Axis) -> Self {
        self.orientation = Some(axis);
        self
    }

    /// Check that both lengths are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.size.is_finite() && self.round.is_finite() && self.size > 0.0 && self.round > 0.0
    }
}

/// Whether `n` lands on a line reserved by the `round` modulus.
fn on_reserved_line(n: f64, round: f64) -> bool {
    let rem = n.rem_euclid(round);
    let tolerance = round * RESERVED_LINE_EPSILON;
    rem <= tolerance || round - rem <= tolerance
}

/// Snap one horizontal coordinate.
///
/// Rounds up to the next grid line, steps past lines reserved by `round`,
/// then applies the orientation bias if it names `axis`.
pub fn snap_axis(raw: f64, step: &StepRule, axis: Axis) -> f64 {
    let mut n = (raw / step.size).ceil() * step.size;
    if on_reserved_line(n, step.round) {
        n += step.size;
    }
    if step.orientation == Some(axis) {
        n += step.size;
    }
    // Normalise -0.0 so exact position comparisons behave.
    n + 0.0
}

/// Snap a ground hit to a placement candidate.
///
/// The vertical component is never derived from the hit: it is replaced by
/// the template's `elevation`.
pub fn snap_position(raw: DVec3, step: &StepRule, elevation: f64) -> DVec3 {
    let mut snapped = DVec3::new(raw.x, elevation, raw.z);
    for axis in Axis::HORIZONTAL {
        snapped = axis.with_component(snapped, snap_axis(axis.component(raw), step, axis));
    }
    snapped
}
