//! Ray trace state.
//!
//! Besides the usual r(t) = origin + t * direction line, a ray here carries
//! everything the shading fold threads from one sphere to the next: the
//! accumulated color, the refractive index of the medium it believes it is
//! in, and its remaining transparency.

use glam::Vec3A;

use crate::vector::{Color, Vector3};

/// Refractive index of the vacuum every primary ray starts in.
pub const VACUUM_INDEX: f32 = 1.0;

/// Ray in 3D space plus its per-pixel shading state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The camera position for primary rays; moved to the entry and exit
    /// points when the ray refracts through a transparent sphere.
    pub origin: Vector3,

    /// Direction vector of the ray.
    ///
    /// Primary rays are unit length, but nothing downstream relies on it:
    /// intersection keeps the full `a = d·d` term.
    pub direction: Vector3,

    /// Color accumulated so far, unclamped.
    pub color: Color,

    /// Refractive index of the medium the ray was last bent into.
    pub current_refractive_index: f32,

    /// Product of the transparencies of every sphere passed through.
    pub transparency: f32,
}

impl Ray {
    /// Fresh primary ray: black, in vacuum, fully transparent.
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Self {
            origin,
            direction,
            color: Vec3A::ZERO,
            current_refractive_index: VACUUM_INDEX,
            transparency: 1.0,
        }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vector3 {
        self.origin + t * self.direction
    }
}
