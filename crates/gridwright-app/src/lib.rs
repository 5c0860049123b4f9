//! Gridwright Application
//!
//! Headless application shell: translates winit input into placement events
//! and replays scripted scenarios against the placement engine.

pub mod bridge;
pub mod error;
pub mod renderer;
pub mod scenario;

pub use bridge::InputBridge;
pub use error::AppError;
pub use renderer::LogRenderer;
pub use scenario::{ReplaySummary, Scenario, ScenarioInput, replay};
