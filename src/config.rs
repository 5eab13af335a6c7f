//! Scene files: TOML descriptions of the image, camera and spheres.
//!
//! ```toml
//! [image]
//! width = 500
//! height = 500
//!
//! [camera]
//! position = [0.0, 0.0, 0.0]
//! view = [0.0, 0.0, -1.0]
//! up = [0.0, 1.0, 0.0]
//!
//! [[spheres]]
//! center = [0.0, 0.0, -10.0]
//! color = [1.0, 0.0, 0.0]
//! radius = 5.0
//! ```

use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::camera::Camera;
use crate::scene::{RenderSettings, Scene, SceneError};
use crate::sphere::Sphere;
use crate::vector;

/// Errors raised while loading a scene file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The path does not exist
    #[error("Scene file not found: {0}")]
    NotFound(String),

    /// The file exists but could not be read
    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for a scene
    #[error("Failed to parse scene file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but the scene fails validation
    #[error("Scene file describes an invalid scene: {0}")]
    Scene(#[from] SceneError),
}

/// Top-level layout of a scene file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Frame size and refraction depth
    #[serde(default)]
    pub image: ImageConfig,
    /// Camera placement
    #[serde(default)]
    pub camera: CameraConfig,
    /// Spheres in shading order
    #[serde(default)]
    pub spheres: Vec<SphereConfig>,
}

/// Output frame settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageConfig {
    /// Width in pixels
    #[serde(default = "default_dimension")]
    pub width: u32,
    /// Height in pixels
    #[serde(default = "default_dimension")]
    pub height: u32,
    /// Surface crossings a transparent sphere may bend a ray through
    #[serde(default = "default_refraction_events")]
    pub max_refraction_events: u32,
}

/// Camera placement. Without `right` the basis is derived from `view` and
/// `up`; with it all three vectors are taken as given and must already be
/// orthonormal.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    /// Eye point
    #[serde(default)]
    pub position: [f32; 3],
    /// Viewing direction
    #[serde(default = "default_view")]
    pub view: [f32; 3],
    /// Up vector (world up when `right` is absent)
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Right vector of an explicit basis
    #[serde(default)]
    pub right: Option<[f32; 3]>,
}

/// One sphere, in shading order.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereConfig {
    /// Center point
    pub center: [f32; 3],
    /// Base RGB color in [0, 1]
    pub color: [f32; 3],
    /// Radius, strictly positive
    pub radius: f32,
    /// 0.0 (default) is opaque
    #[serde(default)]
    pub transparency: f32,
    /// Index of refraction, 1.0 by default
    #[serde(default = "default_refractive_index")]
    pub refractive_index: f32,
}

fn default_dimension() -> u32 {
    500
}

fn default_refraction_events() -> u32 {
    RenderSettings::DEFAULT_REFRACTION_EVENTS
}

fn default_view() -> [f32; 3] {
    [0.0, 0.0, -1.0]
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_refractive_index() -> f32 {
    1.0
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: default_dimension(),
            height: default_dimension(),
            max_refraction_events: default_refraction_events(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            view: default_view(),
            up: default_up(),
            right: None,
        }
    }
}

impl CameraConfig {
    /// Build the camera, validating a supplied basis or deriving one.
    pub fn to_camera(&self) -> Result<Camera, SceneError> {
        let position = vector::from_array(self.position);
        let view = vector::from_array(self.view);
        let up = vector::from_array(self.up);
        match self.right {
            Some(right) => Camera::new(position, view, vector::from_array(right), up),
            None => Camera::look_along(position, view, up),
        }
    }
}

impl From<&SphereConfig> for Sphere {
    fn from(config: &SphereConfig) -> Self {
        Sphere::new(
            vector::from_array(config.center),
            vector::from_array(config.color),
            config.radius,
            config.transparency,
            config.refractive_index,
        )
    }
}

impl SceneConfig {
    /// Parse a scene description from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validate the description and build the scene it describes.
    pub fn to_scene(&self) -> Result<Scene, SceneError> {
        let settings = RenderSettings {
            width: self.image.width,
            height: self.image.height,
            max_refraction_events: self.image.max_refraction_events,
        };
        let camera = self.camera.to_camera()?;
        let spheres = self.spheres.iter().map(Sphere::from).collect();
        Scene::new(camera, spheres, settings)
    }
}

/// Load and validate a scene file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config = SceneConfig::from_toml(&content)?;
    debug!("Parsed scene file {}: {:?}", path.display(), config);

    let scene = config.to_scene()?;
    info!("Loaded scene {} ({} spheres)", path.display(), scene.spheres().len());
    Ok(scene)
}
