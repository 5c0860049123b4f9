//! Pointer to ground-plane projection.

use crate::camera::{Camera, Ray};
use glam::{DVec2, DVec3};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Rays closer than this to horizontal never reach the ground.
const GRAZING_EPSILON: f64 = 1e-9;

/// Side length of the default ground grid.
pub const DEFAULT_GROUND_SIZE: f64 = 1000.0;

/// The rendering surface, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub bounds: Rect,
}

impl Surface {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// Surface anchored at the window origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(Rect::new(0.0, 0.0, width, height))
    }

    /// Width over height, or `None` for a zero-area surface.
    pub fn aspect(&self) -> Option<f64> {
        let bounds = self.bounds.abs();
        (bounds.width() > 0.0 && bounds.height() > 0.0).then(|| bounds.width() / bounds.height())
    }

    /// Whether `pointer` lies on the surface, edges included.
    pub fn contains(&self, pointer: Point) -> bool {
        let bounds = self.bounds.abs();
        (bounds.x0..=bounds.x1).contains(&pointer.x) && (bounds.y0..=bounds.y1).contains(&pointer.y)
    }

    /// Convert a window-space pointer to normalized device coordinates.
    ///
    /// The pointer is made relative to the surface origin first, so a
    /// surface that does not start at the window corner still maps its own
    /// corners to -1 and 1. Pointers outside the surface (edges included as
    /// inside) yield `None`.
    pub fn to_ndc(&self, pointer: Point) -> Option<DVec2> {
        let bounds = self.bounds.abs();
        self.aspect()?;
        if !self.contains(pointer) {
            return None;
        }
        let rel_x = pointer.x - bounds.x0;
        let rel_y = pointer.y - bounds.y0;
        Some(DVec2::new(
            rel_x / bounds.width() * 2.0 - 1.0,
            -(rel_y / bounds.height()) * 2.0 + 1.0,
        ))
    }
}

/// Horizontal plane facing +y that pointer rays are cast against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    /// Height of the plane.
    pub height: f64,
    /// Footprint in the x/z plane (x maps to x, y maps to z). `None` is unbounded.
    pub extent: Option<Rect>,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self::centered(0.0, DEFAULT_GROUND_SIZE, DEFAULT_GROUND_SIZE)
    }
}

impl GroundPlane {
    /// Plane of `width` by `depth` centered on the vertical axis.
    pub fn centered(height: f64, width: f64, depth: f64) -> Self {
        Self {
            height,
            extent: Some(Rect::new(-width / 2.0, -depth / 2.0, width / 2.0, depth / 2.0)),
        }
    }

    /// Infinite plane.
    pub fn unbounded(height: f64) -> Self {
        Self {
            height,
            extent: None,
        }
    }

    /// First intersection of `ray` with the plane's upper face.
    pub fn intersect(&self, ray: &Ray) -> Option<DVec3> {
        let denom = ray.direction.y;
        // Parallel rays and rays coming up from below miss the single-sided plane.
        if denom > -GRAZING_EPSILON {
            return None;
        }
        let t = (self.height - ray.origin.y) / denom;
        if t < 0.0 {
            return None;
        }
        let hit = ray.at(t);
        if let Some(extent) = self.extent {
            let extent = extent.abs();
            let inside = hit.x >= extent.x0 && hit.x <= extent.x1 && hit.z >= extent.y0 && hit.z <= extent.y1;
            if !inside {
                return None;
            }
        }
        Some(hit)
    }
}

/// Project a window-space pointer onto the ground plane.
pub fn project_pointer(
    pointer: Point,
    surface: &Surface,
    camera: &Camera,
    ground: &GroundPlane,
) -> Option<DVec3> {
    let ndc = surface.to_ndc(pointer)?;
    let ray = camera.ray_from_ndc(ndc, surface.aspect()?)?;
    ground.intersect(&ray)
}
