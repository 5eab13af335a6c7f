//! Pinhole camera mapping normalized pixel coordinates to primary ray directions.

use glam::Vec3A;
use log::debug;

use crate::scene::SceneError;
use crate::vector::{self, Vector3};

/// Maximum deviation tolerated when checking that the basis is orthonormal.
pub const BASIS_TOLERANCE: f32 = 1e-4;

/// Pinhole camera with an explicit orthonormal basis.
///
/// Focal length and aspect ratio are both implicitly 1: the image plane spans
/// `[-1, 1]` along `right` and `up` at unit distance along `view`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye point every primary ray starts from
    position: Vector3,
    /// Unit viewing direction
    view: Vector3,
    /// Unit vector pointing to image right
    right: Vector3,
    /// Unit vector pointing to image top
    up: Vector3,
}

impl Camera {
    /// Create a camera from a hand-supplied basis.
    ///
    /// Fails with [`SceneError::CameraBasis`] unless `view`, `right` and `up`
    /// are unit length and mutually orthogonal within [`BASIS_TOLERANCE`].
    pub fn new(position: Vector3, view: Vector3, right: Vector3, up: Vector3) -> Result<Self, SceneError> {
        if !vector::is_finite(position) {
            return Err(SceneError::CameraBasis("position is not finite".into()));
        }
        for (name, axis) in [("view", view), ("right", right), ("up", up)] {
            let length = vector::magnitude(axis);
            if !length.is_finite() || (length - 1.0).abs() > BASIS_TOLERANCE {
                return Err(SceneError::CameraBasis(format!("{name} has length {length}, expected 1")));
            }
        }
        for (name, a, b) in [("view·right", view, right), ("view·up", view, up), ("right·up", right, up)] {
            let d = vector::dot(a, b);
            if d.abs() > BASIS_TOLERANCE {
                return Err(SceneError::CameraBasis(format!("{name} = {d}, expected 0")));
            }
        }
        Ok(Self { position, view, right, up })
    }

    /// Create a camera looking along `view`, deriving `right` and `up` from
    /// `world_up` with cross products.
    ///
    /// `view` need not be unit length but must be nonzero and not parallel
    /// to `world_up`.
    pub fn look_along(position: Vector3, view: Vector3, world_up: Vector3) -> Result<Self, SceneError> {
        let view = vector::try_normalize(view)
            .ok_or_else(|| SceneError::CameraBasis("view direction is zero".into()))?;
        let right = vector::try_normalize(view.cross(world_up))
            .ok_or_else(|| SceneError::CameraBasis("view is parallel to the up vector".into()))?;
        let up = right.cross(view).normalize();

        debug!("Camera basis derived: view={view:?} right={right:?} up={up:?}");
        Self::new(position, view, right, up)
    }

    /// Map a pixel index along an axis of `dimension` pixels to NDC,
    /// sampling the pixel center: `2 * (pixel + 0.5) / dimension - 1`.
    #[inline]
    pub fn ndc(pixel: u32, dimension: u32) -> f32 {
        2.0 * (pixel as f32 + 0.5) / dimension as f32 - 1.0
    }

    /// World-space unit direction through the NDC point `(ndc_x, ndc_y)`.
    ///
    /// `ndc_y` grows downward (row 0 is the top of the image), hence the
    /// subtraction of the `up` term.
    pub fn project(&self, ndc_x: f32, ndc_y: f32) -> Vector3 {
        let target = vector::add(
            vector::sub(vector::scale(self.right, ndc_x), vector::scale(self.up, ndc_y)),
            self.view,
        );
        // |view| = 1 and view ⟂ right, up, so the target is never zero.
        vector::normalize(target)
    }

    /// Eye point.
    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Unit viewing direction.
    pub fn view(&self) -> Vector3 {
        self.view
    }

    /// Unit right vector.
    pub fn right(&self) -> Vector3 {
        self.right
    }

    /// Unit up vector.
    pub fn up(&self) -> Vector3 {
        self.up
    }
}

impl Default for Camera {
    /// Camera at the origin looking down -z with +y up.
    fn default() -> Self {
        Self {
            position: Vec3A::ZERO,
            view: Vec3A::NEG_Z,
            right: Vec3A::X,
            up: Vec3A::Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_maps_pixel_centers() {
        assert_eq!(Camera::ndc(0, 2), -0.5);
        assert_eq!(Camera::ndc(1, 2), 0.5);
        assert_eq!(Camera::ndc(0, 1), 0.0);
        assert!((Camera::ndc(0, 500) - (-0.998)).abs() < 1e-6);
    }

    #[test]
    fn center_of_image_projects_along_view() {
        let camera = Camera::default();
        assert_eq!(camera.project(0.0, 0.0), Vec3A::NEG_Z);
    }

    #[test]
    fn top_left_points_up_and_left() {
        let camera = Camera::default();
        let d = camera.project(-1.0, -1.0);
        assert!(d.x < 0.0);
        assert!(d.y > 0.0);
        assert!(d.z < 0.0);
        assert!((d.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn look_along_derives_default_basis() {
        let camera = Camera::look_along(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -5.0), Vec3A::Y).unwrap();
        assert!((camera.right() - Vec3A::X).length() < 1e-6);
        assert!((camera.up() - Vec3A::Y).length() < 1e-6);
        assert!((camera.view() - Vec3A::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn look_along_rejects_parallel_up() {
        let err = Camera::look_along(Vec3A::ZERO, Vec3A::Y, Vec3A::Y).unwrap_err();
        assert!(matches!(err, SceneError::CameraBasis(_)));
    }

    #[test]
    fn new_rejects_non_unit_axis() {
        let err = Camera::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -2.0), Vec3A::X, Vec3A::Y).unwrap_err();
        assert!(matches!(err, SceneError::CameraBasis(_)));
    }

    #[test]
    fn new_rejects_skewed_basis() {
        let skewed = Vec3A::new(1.0, 1.0, 0.0).normalize();
        let err = Camera::new(Vec3A::ZERO, Vec3A::NEG_Z, skewed, Vec3A::Y).unwrap_err();
        assert!(matches!(err, SceneError::CameraBasis(_)));
    }

    #[test]
    fn new_accepts_orthonormal_basis() {
        let camera = Camera::new(Vec3A::new(1.0, 2.0, 3.0), Vec3A::X, Vec3A::NEG_Z, Vec3A::Y).unwrap();
        assert_eq!(camera.position(), Vec3A::new(1.0, 2.0, 3.0));
        assert_eq!(camera.project(0.0, 0.0), Vec3A::X);
    }
}
