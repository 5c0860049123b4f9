//! Gridwright Core Library
//!
//! Platform-agnostic placement engine for architectural objects on a 3D grid:
//! pointer projection, grid snapping, collision checks and the placement
//! state machine.

pub mod bounds;
pub mod camera;
pub mod collision;
pub mod config;
pub mod controller;
pub mod error;
pub mod ghost;
pub mod input;
pub mod objects;
pub mod placement;
pub mod projection;
pub mod repository;
pub mod snap;
pub mod template;

pub use bounds::Aabb;
pub use camera::{Camera, Projection, Ray};
pub use collision::{CollisionReport, DEFAULT_PROBE_SIZE};
pub use config::{DoubleClickConfig, GroundConfig, PlacementConfig};
pub use controller::{Activation, EventSource, ListenerHandle, ListenerRegistry, PlacementController};
pub use error::{ConfigError, PlacementError, PlacementResult};
pub use ghost::{GhostObject, GhostPreview, PreviewRenderer};
pub use input::{ClickTracker, EventKind, InputState, Key, PlacementEvent, PointerButton};
pub use objects::{Geometry, ObjectId, ObjectKind, PlacedObject, Yaw};
pub use placement::{PlacementAction, PlacementSession, PlacementState};
pub use projection::{GroundPlane, Surface, project_pointer};
pub use repository::{MemoryRepository, ObjectRepository};
pub use snap::{Axis, StepRule, snap_position};
pub use template::Template;
