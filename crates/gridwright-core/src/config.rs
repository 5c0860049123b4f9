//! Placement configuration loaded from JSON.

use crate::collision::DEFAULT_PROBE_SIZE;
use crate::error::ConfigError;
use crate::input::{ClickTracker, DOUBLE_CLICK_DISTANCE, DOUBLE_CLICK_TIME_MS};
use crate::objects::ObjectKind;
use crate::projection::{DEFAULT_GROUND_SIZE, GroundPlane};
use crate::template::Template;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Size and height of the ground grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub height: f64,
    pub width: f64,
    pub depth: f64,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            height: 0.0,
            width: DEFAULT_GROUND_SIZE,
            depth: DEFAULT_GROUND_SIZE,
        }
    }
}

/// Limits for recognising two presses as a double-click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoubleClickConfig {
    pub max_interval_ms: u64,
    pub max_distance: f64,
}

impl Default for DoubleClickConfig {
    fn default() -> Self {
        Self {
            max_interval_ms: DOUBLE_CLICK_TIME_MS,
            max_distance: DOUBLE_CLICK_DISTANCE,
        }
    }
}

impl DoubleClickConfig {
    pub fn tracker(&self) -> ClickTracker {
        ClickTracker::new(Duration::from_millis(self.max_interval_ms), self.max_distance)
    }
}

/// Settings for the placement engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Template catalog, at most one per kind.
    pub templates: Vec<Template>,
    /// Edge length of the collision probe at the candidate position.
    pub probe_size: f64,
    pub ground: GroundConfig,
    pub double_click: DoubleClickConfig,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            templates: Template::defaults(),
            probe_size: DEFAULT_PROBE_SIZE,
            ground: GroundConfig::default(),
            double_click: DoubleClickConfig::default(),
        }
    }
}

impl PlacementConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PlacementConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for template in &self.templates {
            if !template.step.is_valid() {
                return Err(ConfigError::Invalid(format!(
                    "step rule for {:?} needs positive size and round",
                    template.kind
                )));
            }
            if !template.elevation.is_finite() {
                return Err(ConfigError::Invalid(format!("elevation for {:?} is not finite", template.kind)));
            }
            if !seen.insert(template.kind) {
                return Err(ConfigError::Invalid(format!("duplicate template for {:?}", template.kind)));
            }
        }
        if !(self.probe_size.is_finite() && self.probe_size > 0.0) {
            return Err(ConfigError::Invalid("probe_size must be positive".to_string()));
        }
        if !(self.ground.width > 0.0 && self.ground.depth > 0.0 && self.ground.height.is_finite()) {
            return Err(ConfigError::Invalid("ground must have a positive size".to_string()));
        }
        if self.double_click.max_interval_ms == 0 || !(self.double_click.max_distance > 0.0) {
            return Err(ConfigError::Invalid("double_click limits must be positive".to_string()));
        }
        Ok(())
    }

    /// Template configured for `kind`.
    pub fn template(&self, kind: ObjectKind) -> Option<&Template> {
        self.templates.iter().find(|template| template.kind == kind)
    }

    /// Ground plane described by `ground`.
    pub fn ground_plane(&self) -> GroundPlane {
        GroundPlane::centered(self.ground.height, self.ground.width, self.ground.depth)
    }
}
