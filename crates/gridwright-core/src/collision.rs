//! Overlap testing of placement candidates against placed objects.

use crate::bounds::Aabb;
use crate::objects::{ObjectId, ObjectKind, PlacedObject};
use glam::DVec3;

/// Edge length of the probe box placed at a candidate position.
pub const DEFAULT_PROBE_SIZE: f64 = 0.00001;

/// Outcome of validating one candidate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    /// The probe overlaps some placed object's bounds.
    pub blocked: bool,
    /// Placed object of the same kind at exactly the candidate position.
    pub delete_target: Option<ObjectId>,
}

impl CollisionReport {
    /// Whether the candidate must be shown as not placeable.
    pub fn not_allowed(&self) -> bool {
        self.blocked || self.delete_target.is_some()
    }
}

/// Probe box for a candidate, treated as a point rather than its footprint.
pub fn probe_bounds(candidate: DVec3, probe_size: f64) -> Aabb {
    Aabb::from_center_size(candidate, DVec3::splat(probe_size))
}

/// Whether the probe at `candidate` overlaps any placed object.
pub fn is_blocked<'a>(
    candidate: DVec3,
    probe_size: f64,
    placed: impl IntoIterator<Item = &'a PlacedObject>,
) -> bool {
    let probe = probe_bounds(candidate, probe_size);
    placed.into_iter().any(|object| probe.intersects(&object.bounds()))
}

/// Find a placed object of `kind` sitting exactly at `candidate`.
pub fn find_delete_target<'a>(
    candidate: DVec3,
    kind: ObjectKind,
    placed: impl IntoIterator<Item = &'a PlacedObject>,
) -> Option<ObjectId> {
    placed
        .into_iter()
        .find(|object| object.kind == kind && object.position == candidate)
        .map(|object| object.id)
}

/// Validate a candidate against the current set of placed objects.
pub fn detect(
    candidate: DVec3,
    kind: ObjectKind,
    probe_size: f64,
    placed: &[&PlacedObject],
) -> CollisionReport {
    CollisionReport {
        blocked: is_blocked(candidate, probe_size, placed.iter().copied()),
        delete_target: find_delete_target(candidate, kind, placed.iter().copied()),
    }
}
