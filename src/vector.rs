//! Vector algebra for points, directions and colors.
//!
//! All geometry runs on `glam::Vec3A` in single precision. The named free
//! functions below mirror the operations the tracer is written in terms of;
//! angle computations widen to f64 before `acos`/`sqrt` and narrow back.

use glam::Vec3A;

/// Spatial point or direction.
pub type Vector3 = Vec3A;

/// RGB color, nominally in [0, 1] per channel but unclamped while accumulating.
pub type Color = Vec3A;

/// Component-wise sum.
#[inline]
pub fn add(a: Vector3, b: Vector3) -> Vector3 {
    a + b
}

/// Difference, computed as `a + (-b)`.
#[inline]
pub fn sub(a: Vector3, b: Vector3) -> Vector3 {
    add(a, negate(b))
}

/// Flip every component.
#[inline]
pub fn negate(v: Vector3) -> Vector3 {
    -v
}

/// Multiply every component by `s`.
#[inline]
pub fn scale(v: Vector3, s: f32) -> Vector3 {
    v * s
}

/// `a.x*b.x + a.y*b.y + a.z*b.z`
#[inline]
pub fn dot(a: Vector3, b: Vector3) -> f32 {
    a.dot(b)
}

/// Euclidean length, `sqrt(dot(v, v))`.
#[inline]
pub fn magnitude(v: Vector3) -> f32 {
    dot(v, v).sqrt()
}

/// Scale `v` to unit length.
///
/// A zero vector has no direction: the result is NaN in every component.
/// Use [`try_normalize`] wherever a zero input is reachable.
#[inline]
pub fn normalize(v: Vector3) -> Vector3 {
    scale(v, 1.0 / magnitude(v))
}

/// Unit-length copy of `v`, or `None` when `v` is zero or not finite.
pub fn try_normalize(v: Vector3) -> Option<Vector3> {
    let length = magnitude(v);
    if length > 0.0 && length.is_finite() {
        Some(scale(v, 1.0 / length))
    } else {
        None
    }
}

/// Angle in radians between `a` and `b`, `acos(dot / (|a| |b|))`.
///
/// Evaluated in f64. The cosine is clamped to [-1, 1] so rounding on nearly
/// parallel inputs cannot push `acos` out of its domain. Returns NaN if either
/// vector is zero.
pub fn angle_between(a: Vector3, b: Vector3) -> f32 {
    let a64 = a.as_dvec3();
    let b64 = b.as_dvec3();
    let cosine = a64.dot(b64) / (a64.length() * b64.length());
    cosine.clamp(-1.0, 1.0).acos() as f32
}

/// True if every component of `v` is finite.
#[inline]
pub fn is_finite(v: Vector3) -> bool {
    v.is_finite()
}

/// Build a vector from a `[x, y, z]` triple.
#[inline]
pub fn from_array(values: [f32; 3]) -> Vector3 {
    Vec3A::from_array(values)
}
