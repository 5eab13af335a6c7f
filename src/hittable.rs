//! Shading fold: how each object changes a ray that is tested against it.
//!
//! Shading is additive and non-occluding. Every object a ray's line meets
//! adds its contribution, in scene order, whatever its depth; there are no
//! light sources, shadows or nearest-hit selection.

use log::trace;

use crate::ray::Ray;
use crate::refraction;
use crate::sphere::{Intersection, Sphere};

/// Trait for objects that can fold their contribution into a ray.
///
/// Must be thread-safe (Sync + Send) so pixels can be traced in parallel
/// against a shared scene.
pub trait Hittable: Sync + Send {
    /// Test `ray` against this object and return it with this object's
    /// contribution applied.
    ///
    /// `max_refraction_events` bounds how many surface crossings a
    /// transparent object may bend the ray through.
    fn shade(&self, ray: Ray, max_refraction_events: u32) -> Ray;
}

impl Hittable for Sphere {
    fn shade(&self, mut ray: Ray, max_refraction_events: u32) -> Ray {
        match self.intersect(&ray) {
            Intersection::Miss => ray,
            Intersection::Tangent => {
                // Grazing opaque hits paint the ray direction itself.
                if self.is_opaque() {
                    ray.color += ray.direction;
                }
                ray
            }
            Intersection::Through(quadratic) => {
                ray.color += self.color;
                if self.is_opaque() {
                    return ray;
                }
                ray.transparency *= self.transparency;
                trace!("Refracting through sphere at {:?} (n = {})", self.center, self.refractive_index);
                refraction::refract_through(ray, self, &quadratic, max_refraction_events)
            }
        }
    }
}

/// Objects in a list shade one after another in list order, each seeing the
/// ray as the previous one left it.
impl<T: Hittable> Hittable for [T] {
    fn shade(&self, ray: Ray, max_refraction_events: u32) -> Ray {
        self.iter()
            .fold(ray, |ray, object| object.shade(ray, max_refraction_events))
    }
}
