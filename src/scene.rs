//! Immutable scene description: camera, ordered spheres and frame settings.

use glam::Vec3A;
use log::debug;

use crate::camera::Camera;
use crate::hittable::Hittable;
use crate::ray::Ray;
use crate::sphere::Sphere;

/// Reasons a scene cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The camera basis is not orthonormal or cannot be derived.
    #[error("Invalid camera basis: {0}")]
    CameraBasis(String),

    /// A sphere would produce NaNs when traced.
    #[error("Invalid sphere #{index}: {reason}")]
    InvalidSphere {
        /// Position of the sphere in declaration order
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// The output frame has no pixels.
    #[error("Invalid frame size {width}x{height}: both dimensions must be positive")]
    FrameSize {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },
}

/// Frame-level settings that are not part of the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Surface crossings a transparent sphere may bend a ray through.
    /// 2 bends at entry and exit; higher values behave like 2.
    pub max_refraction_events: u32,
}

impl RenderSettings {
    /// Default number of refraction events: one entry and one exit.
    pub const DEFAULT_REFRACTION_EVENTS: u32 = 2;

    /// Settings for a `width` x `height` frame with the default refraction depth.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            max_refraction_events: Self::DEFAULT_REFRACTION_EVENTS,
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::new(500, 500)
    }
}

/// Everything a render reads. Built once, then only borrowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    camera: Camera,
    spheres: Vec<Sphere>,
    settings: RenderSettings,
}

impl Scene {
    /// Validate and assemble a scene.
    ///
    /// Sphere order is significant: it is the order each ray is shaded in.
    pub fn new(camera: Camera, spheres: Vec<Sphere>, settings: RenderSettings) -> Result<Self, SceneError> {
        if settings.width == 0 || settings.height == 0 {
            return Err(SceneError::FrameSize {
                width: settings.width,
                height: settings.height,
            });
        }
        for (index, sphere) in spheres.iter().enumerate() {
            sphere.validate(index)?;
        }
        debug!(
            "Scene built: {} spheres, {}x{}, {} refraction events",
            spheres.len(),
            settings.width,
            settings.height,
            settings.max_refraction_events
        );
        Ok(Self {
            camera,
            spheres,
            settings,
        })
    }

    /// Built-in scene rendered when no scene file is given: an opaque red
    /// sphere, a green one partly behind it, and a glass sphere in front.
    pub fn demo() -> Self {
        let spheres = vec![
            Sphere::opaque(Vec3A::new(-1.5, 0.0, -8.0), Vec3A::new(0.8, 0.1, 0.1), 1.5),
            Sphere::opaque(Vec3A::new(1.5, 0.5, -10.0), Vec3A::new(0.1, 0.7, 0.2), 2.0),
            Sphere::new(Vec3A::new(0.0, -0.5, -5.0), Vec3A::new(0.05, 0.1, 0.3), 1.0, 0.6, 1.5),
            Sphere::opaque(Vec3A::new(0.0, -101.5, -10.0), Vec3A::new(0.15, 0.15, 0.15), 100.0),
        ];
        Self {
            camera: Camera::default(),
            spheres,
            settings: RenderSettings::default(),
        }
    }

    /// Copy of this scene rendered at a different resolution.
    pub fn with_size(mut self, width: u32, height: u32) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::FrameSize { width, height });
        }
        self.settings.width = width;
        self.settings.height = height;
        Ok(self)
    }

    /// Camera the frame is seen through.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Spheres in shading order.
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Frame settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Shade `ray` against every sphere in declaration order.
    pub fn trace(&self, ray: Ray) -> Ray {
        self.spheres.as_slice().shade(ray, self.settings.max_refraction_events)
    }
}
