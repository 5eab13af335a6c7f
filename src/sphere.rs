//! Sphere primitive and ray-sphere intersection classification.

use crate::ray::Ray;
use crate::scene::SceneError;
use crate::vector::{self, Color, Vector3};

/// Sphere defined by center, radius, base color and optical properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vector3,

    /// Base color added to every ray that crosses the sphere.
    pub color: Color,

    /// Radius of the sphere, strictly positive in a valid scene.
    pub radius: f32,

    /// 0.0 is fully opaque; anything above makes the sphere refract.
    pub transparency: f32,

    /// Index of refraction (1.0 = vacuum, 1.5 = glass). Only read when
    /// the sphere is transparent.
    pub refractive_index: f32,
}

/// Coefficients of `a t² + b t + c = 0` for a ray against a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    /// `d·d`
    pub a: f32,
    /// `-2 d·oc`
    pub b: f32,
    /// `oc·oc - r²`
    pub c: f32,
}

impl Quadratic {
    /// `b² - 4ac`
    #[inline]
    pub fn discriminant(&self) -> f32 {
        self.b * self.b - 4.0 * self.a * self.c
    }

    /// `(-b - √Δ) / 2a`, the entry distance.
    pub fn near_root(&self) -> f32 {
        (-self.b - self.sqrt_discriminant()) / (2.0 * self.a)
    }

    /// `(-b + √Δ) / 2a`, the exit distance.
    pub fn far_root(&self) -> f32 {
        (-self.b + self.sqrt_discriminant()) / (2.0 * self.a)
    }

    fn sqrt_discriminant(&self) -> f32 {
        (self.discriminant() as f64).sqrt() as f32
    }
}

/// How a ray meets a sphere, classified by the sign of the discriminant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// Δ < 0: the line never touches the sphere.
    Miss,
    /// Δ == 0: the line grazes the sphere at a single point.
    Tangent,
    /// Δ > 0: the line enters and leaves the sphere.
    Through(Quadratic),
}

impl Sphere {
    /// Create a new sphere. See [`Sphere::validate`] for the constraints a
    /// scene enforces on it.
    pub fn new(center: Vector3, color: Color, radius: f32, transparency: f32, refractive_index: f32) -> Self {
        Self {
            center,
            color,
            radius,
            transparency,
            refractive_index,
        }
    }

    /// Fully opaque sphere.
    pub fn opaque(center: Vector3, color: Color, radius: f32) -> Self {
        Self::new(center, color, radius, 0.0, 1.0)
    }

    /// True when the sphere does not refract.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.transparency == 0.0
    }

    /// Check the sphere can be traced without producing NaNs.
    ///
    /// `index` is the sphere's position in the scene, reported back on error.
    pub fn validate(&self, index: usize) -> Result<(), SceneError> {
        let invalid = |reason: String| SceneError::InvalidSphere { index, reason };

        if !vector::is_finite(self.center) || !vector::is_finite(self.color) {
            return Err(invalid("center and color must be finite".into()));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid(format!("radius must be positive, got {}", self.radius)));
        }
        if !(0.0..=1.0).contains(&self.transparency) {
            return Err(invalid(format!("transparency must be in [0, 1], got {}", self.transparency)));
        }
        if !self.is_opaque() && !(self.refractive_index.is_finite() && self.refractive_index > 0.0) {
            return Err(invalid(format!(
                "refractive index must be positive for a transparent sphere, got {}",
                self.refractive_index
            )));
        }
        Ok(())
    }

    /// Build the intersection quadratic for `r`, with `oc = center - origin`.
    pub fn quadratic(&self, r: &Ray) -> Quadratic {
        let oc = vector::sub(self.center, r.origin);
        Quadratic {
            a: vector::dot(r.direction, r.direction),
            b: -2.0 * vector::dot(r.direction, oc),
            c: vector::dot(oc, oc) - self.radius * self.radius,
        }
    }

    /// Classify how `r` meets this sphere.
    ///
    /// Only the infinite line matters: roots behind the ray origin count.
    pub fn intersect(&self, r: &Ray) -> Intersection {
        let quadratic = self.quadratic(r);
        let discriminant = quadratic.discriminant();
        if discriminant < 0.0 {
            Intersection::Miss
        } else if discriminant == 0.0 {
            Intersection::Tangent
        } else if discriminant > 0.0 {
            Intersection::Through(quadratic)
        } else {
            // NaN from a degenerate ray
            Intersection::Miss
        }
    }

    /// Outward unit normal at a surface point, `None` at the center.
    pub fn outward_normal(&self, point: Vector3) -> Option<Vector3> {
        vector::try_normalize(vector::sub(point, self.center))
    }
}
