//! Scene camera and pointer ray construction.

use glam::{DMat4, DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Squared length below which two directions are treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-12;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit direction.
    pub direction: DVec3,
}

impl Ray {
    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Lens model of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Projection {
    Perspective {
        /// Vertical field of view in degrees.
        fov_y_degrees: f64,
        near: f64,
        far: f64,
    },
    Orthographic {
        /// Height of the view volume in world units.
        view_height: f64,
        near: f64,
        far: f64,
    },
}

/// Camera manages the view and projection used to cast pointer rays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye position.
    pub position: DVec3,
    /// Point the camera looks at.
    pub target: DVec3,
    /// Preferred up direction.
    #[serde(default = "default_up")]
    pub up: DVec3,
    pub projection: Projection,
}

fn default_up() -> DVec3 {
    DVec3::Y
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(DVec3::new(0.0, 600.0, 600.0), DVec3::ZERO, 45.0)
    }
}

impl Camera {
    /// Create a perspective camera.
    pub fn perspective(position: DVec3, target: DVec3, fov_y_degrees: f64) -> Self {
        Self {
            position,
            target,
            up: DVec3::Y,
            projection: Projection::Perspective {
                fov_y_degrees,
                near: 1.0,
                far: 10000.0,
            },
        }
    }

    /// Create an orthographic camera.
    pub fn orthographic(position: DVec3, target: DVec3, view_height: f64) -> Self {
        Self {
            position,
            target,
            up: DVec3::Y,
            projection: Projection::Orthographic {
                view_height,
                near: 1.0,
                far: 10000.0,
            },
        }
    }

    /// Unit view direction, or zero when position and target coincide.
    pub fn forward(&self) -> DVec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Up vector that is not parallel to the view direction.
    ///
    /// A camera looking straight down falls back to -z, so screen up maps to
    /// world -z.
    fn effective_up(&self) -> DVec3 {
        let forward = self.forward();
        if forward.cross(self.up).length_squared() > PARALLEL_EPSILON {
            self.up
        } else if forward.cross(DVec3::NEG_Z).length_squared() > PARALLEL_EPSILON {
            DVec3::NEG_Z
        } else {
            DVec3::Y
        }
    }

    /// World to view transform.
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, self.effective_up())
    }

    /// View to clip transform for a surface of the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f64) -> DMat4 {
        match self.projection {
            Projection::Perspective {
                fov_y_degrees,
                near,
                far,
            } => DMat4::perspective_rh_gl(fov_y_degrees.to_radians(), aspect, near, far),
            Projection::Orthographic {
                view_height,
                near,
                far,
            } => {
                let half_h = view_height * 0.5;
                let half_w = half_h * aspect;
                DMat4::orthographic_rh_gl(-half_w, half_w, -half_h, half_h, near, far)
            }
        }
    }

    /// Cast a ray through a point in normalized device coordinates.
    ///
    /// Returns `None` for a degenerate camera or aspect ratio.
    pub fn ray_from_ndc(&self, ndc: DVec2, aspect: f64) -> Option<Ray> {
        if !(aspect.is_finite() && aspect > 0.0) || self.forward() == DVec3::ZERO {
            return None;
        }

        let inverse = (self.projection_matrix(aspect) * self.view_matrix()).inverse();
        let near = inverse.project_point3(DVec3::new(ndc.x, ndc.y, -1.0));
        let far = inverse.project_point3(DVec3::new(ndc.x, ndc.y, 1.0));

        let (origin, direction) = match self.projection {
            Projection::Perspective { .. } => {
                (self.position, (far - self.position).normalize_or_zero())
            }
            Projection::Orthographic { .. } => (near, self.forward()),
        };

        if direction == DVec3::ZERO || !direction.is_finite() || !origin.is_finite() {
            return None;
        }
        Some(Ray { origin, direction })
    }
}
