//! Placement templates: what the next ghost will be.

use crate::objects::{ObjectKind, Yaw};
use crate::snap::{Axis, StepRule};
use serde::{Deserialize, Serialize};

/// Grid segment length of the default ground grid.
pub const DEFAULT_CELL: f64 = 10.0;

/// The currently selected kind of object and how it snaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub kind: ObjectKind,
    pub step: StepRule,
    /// Vertical coordinate of the ghost; never taken from the pointer ray.
    #[serde(default)]
    pub elevation: f64,
    #[serde(default)]
    pub yaw: Yaw,
}

impl Template {
    pub fn new(kind: ObjectKind, step: StepRule, elevation: f64) -> Self {
        Self {
            kind,
            step,
            elevation,
            yaw: Yaw::Deg0,
        }
    }

    /// Built-in template for `kind`.
    pub fn default_for(kind: ObjectKind) -> Self {
        let cell = StepRule::new(DEFAULT_CELL, DEFAULT_CELL * 2.0);
        match kind {
            ObjectKind::Floor => Self::new(kind, cell, 0.0),
            // Walls and windows anchor on the x grid line beside their cell.
            ObjectKind::Wall => Self::new(kind, cell.with_orientation(Axis::X), 15.0),
            ObjectKind::Window => Self::new(kind, cell.with_orientation(Axis::X), 20.0),
        }
    }

    /// Built-in templates for every kind.
    pub fn defaults() -> Vec<Template> {
        ObjectKind::ALL.into_iter().map(Self::default_for).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_kind() {
        let defaults = Template::defaults();
        assert_eq!(defaults.len(), ObjectKind::ALL.len());
        for (template, kind) in defaults.iter().zip(ObjectKind::ALL) {
            assert_eq!(template.kind, kind);
            assert!(template.step.is_valid());
        }
    }

    #[test]
    fn test_wall_is_biased_on_x() {
        let wall = Template::default_for(ObjectKind::Wall);
        assert_eq!(wall.step.orientation, Some(Axis::X));
        assert_eq!(Template::default_for(ObjectKind::Floor).step.orientation, None);
    }

    #[test]
    fn test_template_json_defaults() {
        let json = r#"{ "kind": "WALL", "step": { "size": 100.0, "round": 200.0, "orientation": "z" } }"#;
        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(template.kind, ObjectKind::Wall);
        assert_eq!(template.step.orientation, Some(Axis::Z));
        assert_eq!(template.elevation, 0.0);
        assert_eq!(template.yaw, Yaw::Deg0);
    }
}
