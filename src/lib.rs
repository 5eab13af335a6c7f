//! prismtrace sphere tracer
//!
//! Casts one primary ray per pixel through a pinhole camera into a scene of
//! spheres. Every sphere a ray's line meets adds its color; transparent
//! spheres also bend the ray on entry and exit with Snell's law. The frame
//! is returned as an 8-bit RGBA grid, with PNG, JPEG and EXR writers on top.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod vector;
pub mod ray;
pub mod sphere;
pub mod hittable;
pub mod refraction;
pub mod camera;
pub mod scene;
pub mod render;
pub mod config;
pub mod output;
