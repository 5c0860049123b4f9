//! The ghost object: an uncommitted placement preview.

use crate::collision::CollisionReport;
use crate::objects::{Geometry, ObjectId, ObjectKind, PlacedObject, Yaw};
use crate::snap::StepRule;
use crate::template::Template;
use glam::DVec3;

/// Preview candidate owned by a placement session.
///
/// A ghost has no identifier. One is assigned only when it is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostObject {
    pub kind: ObjectKind,
    pub position: DVec3,
    pub yaw: Yaw,
    pub step: StepRule,
    /// Blocked by a collision or sitting on a delete target.
    pub not_allowed: bool,
    /// Same-kind object at exactly this position, from the last validation.
    pub delete_target: Option<ObjectId>,
}

impl GhostObject {
    /// Ghost for `template` at an already snapped position.
    pub fn from_template(template: &Template, position: DVec3) -> Self {
        Self {
            kind: template.kind,
            position,
            yaw: template.yaw,
            step: template.step,
            not_allowed: false,
            delete_target: None,
        }
    }

    /// Store the outcome of a validation.
    pub fn apply_report(&mut self, report: CollisionReport) {
        self.not_allowed = report.not_allowed();
        self.delete_target = report.delete_target;
    }

    /// Turn the ghost into a committed object with a fresh identifier.
    pub fn commit(&self) -> PlacedObject {
        PlacedObject::new(self.kind, self.position, self.yaw)
    }

    /// Descriptor handed to the renderer.
    pub fn preview(&self) -> GhostPreview {
        GhostPreview {
            kind: self.kind,
            position: self.position,
            yaw: self.yaw,
            not_allowed: self.not_allowed,
            geometry: self.kind.geometry(),
        }
    }
}

/// What the renderer needs to draw a ghost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostPreview {
    pub kind: ObjectKind,
    pub position: DVec3,
    pub yaw: Yaw,
    pub not_allowed: bool,
    pub geometry: Geometry,
}

/// Consumer of ghost previews, called once per update.
pub trait PreviewRenderer {
    /// Draw the preview, or clear it when `None`.
    fn draw_preview(&mut self, preview: Option<&GhostPreview>);
}
