//! Snell's-law bending and the refraction walk through a transparent sphere.
//!
//! A transparent sphere bends a ray twice: once where it enters at the near
//! root and once where it leaves. The exit point reuses the far root of the
//! quadratic solved for the incoming ray instead of re-solving against the
//! bent ray, and the ray keeps the sphere's refractive index after leaving.

use glam::Vec3A;
use log::trace;

use crate::ray::{Ray, VACUUM_INDEX};
use crate::sphere::{Quadratic, Sphere};
use crate::vector::{self, Vector3};

/// Boundaries a ray crosses while passing through a sphere, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Vacuum (or stale medium) into the sphere, at the near root.
    Entry,
    /// Sphere back out to vacuum, at the far root.
    Exit,
}

impl Boundary {
    /// Every boundary of a single sphere.
    pub const ALL: [Boundary; 2] = [Boundary::Entry, Boundary::Exit];
}

/// Bend `direction` across a surface with unit `normal`, going from a medium
/// of index `n_from` into one of index `n_to`.
///
/// The incident angle is `acos(d·n / (|d| |n|))` and the transmitted angle
/// follows `sin θt = (n_from / n_to) sin θi`. The result is
/// `cos θt * normal + sin θt * tangent`, with `tangent` the unit component of
/// `direction` orthogonal to `normal`.
///
/// When `|sin θt|` exceeds 1 (total internal reflection) it is clamped, so the
/// ray leaves at a grazing angle instead of producing NaN. At normal
/// incidence the tangent is zero and the result is `normal` itself.
pub fn bend(direction: Vector3, normal: Vector3, n_from: f32, n_to: f32) -> Vector3 {
    let incident = vector::angle_between(direction, normal) as f64;
    let mut sin_transmitted = (n_from as f64 / n_to as f64) * incident.sin();
    if sin_transmitted.abs() > 1.0 {
        trace!("Total internal reflection (sin θt = {sin_transmitted:.4}), clamping to grazing exit");
        sin_transmitted = sin_transmitted.clamp(-1.0, 1.0);
    }
    let transmitted = sin_transmitted.asin();

    let along_normal = vector::scale(normal, vector::dot(direction, normal));
    let tangent = vector::try_normalize(vector::sub(direction, along_normal)).unwrap_or(Vec3A::ZERO);

    vector::add(
        vector::scale(normal, transmitted.cos() as f32),
        vector::scale(tangent, transmitted.sin() as f32),
    )
}

/// Walk `ray` through the boundaries of a transparent `sphere`, stopping
/// after `max_events` bends.
///
/// `quadratic` is the intersection solved for the ray as it arrived; both the
/// entry and the exit distance are taken from it.
pub fn refract_through(mut ray: Ray, sphere: &Sphere, quadratic: &Quadratic, max_events: u32) -> Ray {
    for boundary in Boundary::ALL.into_iter().take(max_events as usize) {
        let (t, n_from, n_to) = match boundary {
            Boundary::Entry => (quadratic.near_root(), ray.current_refractive_index, sphere.refractive_index),
            Boundary::Exit => (quadratic.far_root(), sphere.refractive_index, VACUUM_INDEX),
        };
        let point = ray.at(t);
        let normal = match boundary {
            Boundary::Entry => sphere.outward_normal(point),
            Boundary::Exit => sphere.outward_normal(point).map(|n| -n),
        };
        let Some(normal) = normal else {
            trace!("{boundary:?} point {point:?} sits on the sphere center, ending refraction walk");
            break;
        };

        ray.direction = bend(ray.direction, normal, n_from, n_to);
        ray.origin = point;
        if boundary == Boundary::Entry {
            ray.current_refractive_index = sphere.refractive_index;
        }
    }
    ray
}
