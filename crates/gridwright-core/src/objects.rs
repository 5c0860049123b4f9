//! Placeable object kinds and placed object descriptors.

use crate::bounds::Aabb;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for placed objects.
pub type ObjectId = Uuid;

/// Box extents and label for one object kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Extent along x at zero yaw.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
    /// Extent along z at zero yaw.
    pub depth: f64,
    /// Human-readable name.
    pub label: &'static str,
}

impl Geometry {
    /// Extents as a vector, with x and z swapped for a quarter turn.
    pub fn extents(&self, yaw: Yaw) -> DVec3 {
        match yaw {
            Yaw::Deg0 => DVec3::new(self.width, self.height, self.depth),
            Yaw::Deg90 => DVec3::new(self.depth, self.height, self.width),
        }
    }
}

/// Kinds of architectural elements that can be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectKind {
    Floor,
    Wall,
    Window,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Floor, ObjectKind::Wall, ObjectKind::Window];

    /// The box geometry used for previews and bounding volumes.
    pub fn geometry(self) -> Geometry {
        match self {
            ObjectKind::Floor => Geometry {
                width: 20.0,
                height: 1.0,
                depth: 20.0,
                label: "Floor",
            },
            ObjectKind::Wall => Geometry {
                width: 2.0,
                height: 30.0,
                depth: 20.0,
                label: "Wall",
            },
            ObjectKind::Window => Geometry {
                width: 2.0,
                height: 12.0,
                depth: 16.0,
                label: "Window",
            },
        }
    }
}

/// Discrete rotation about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Yaw {
    #[default]
    Deg0,
    Deg90,
}

impl Yaw {
    /// Switch to the other orientation.
    pub fn toggle(self) -> Self {
        match self {
            Yaw::Deg0 => Yaw::Deg90,
            Yaw::Deg90 => Yaw::Deg0,
        }
    }

    pub fn degrees(self) -> f64 {
        match self {
            Yaw::Deg0 => 0.0,
            Yaw::Deg90 => 90.0,
        }
    }
}

/// An object committed to the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub position: DVec3,
    pub yaw: Yaw,
}

impl PlacedObject {
    /// Create a placed object with a fresh identifier.
    pub fn new(kind: ObjectKind, position: DVec3, yaw: Yaw) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            yaw,
        }
    }

    /// Bounding volume of the rendered geometry.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.kind.geometry().extents(self.yaw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_toggle_is_two_cycle() {
        for yaw in [Yaw::Deg0, Yaw::Deg90] {
            assert_ne!(yaw.toggle(), yaw);
            assert_eq!(yaw.toggle().toggle(), yaw);
        }
    }

    #[test]
    fn test_quarter_turn_swaps_footprint() {
        let wall = ObjectKind::Wall.geometry();
        assert_eq!(wall.extents(Yaw::Deg0), DVec3::new(2.0, 30.0, 20.0));
        assert_eq!(wall.extents(Yaw::Deg90), DVec3::new(20.0, 30.0, 2.0));
    }

    #[test]
    fn test_bounds_centered_on_position() {
        let floor = PlacedObject::new(ObjectKind::Floor, DVec3::new(10.0, 0.0, 30.0), Yaw::Deg0);
        let bounds = floor.bounds();
        assert_eq!(bounds.center(), floor.position);
        assert_eq!(bounds.min, DVec3::new(0.0, -0.5, 20.0));
        assert_eq!(bounds.max, DVec3::new(20.0, 0.5, 40.0));
    }

    #[test]
    fn test_new_objects_get_unique_ids() {
        let a = PlacedObject::new(ObjectKind::Wall, DVec3::ZERO, Yaw::Deg0);
        let b = PlacedObject::new(ObjectKind::Wall, DVec3::ZERO, Yaw::Deg0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_kind_serializes_upper_case() {
        let json = serde_json::to_string(&ObjectKind::Window).unwrap();
        assert_eq!(json, "\"WINDOW\"");
        let kind: ObjectKind = serde_json::from_str("\"FLOOR\"").unwrap();
        assert_eq!(kind, ObjectKind::Floor);
    }
}
