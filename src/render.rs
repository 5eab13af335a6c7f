//! Frame driver: one primary ray per pixel, traced against the whole scene.
//!
//! Pixels are independent, so the frame is traced in parallel with rayon.
//! Within a pixel the spheres are always visited sequentially in scene order
//! because refraction makes each step depend on the previous one.

use image::{ImageBuffer, Rgb, Rgba, RgbaImage};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::ray::Ray;
use crate::scene::Scene;
use crate::vector::Color;

/// Unclamped accumulated color per pixel, linear f32 RGB.
pub type LinearFrame = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Primary ray through the center of pixel (`column`, `row`); row 0 is the top.
pub fn primary_ray(scene: &Scene, column: u32, row: u32) -> Ray {
    let settings = scene.settings();
    let camera = scene.camera();
    let x = Camera::ndc(column, settings.width);
    let y = Camera::ndc(row, settings.height);
    Ray::new(camera.position(), camera.project(x, y))
}

/// Final state of the primary ray for pixel (`column`, `row`) after it has
/// been shaded by every sphere.
pub fn trace_pixel(scene: &Scene, column: u32, row: u32) -> Ray {
    scene.trace(primary_ray(scene, column, row))
}

/// Trace every pixel and keep the raw accumulated colors.
///
/// Pixel (`column`, `row`) lands at image coordinate (x = column, y = row).
/// With `show_progress` an indicatif bar tracks completed pixels.
pub fn render(scene: &Scene, show_progress: bool) -> LinearFrame {
    let settings = *scene.settings();
    let mut image = LinearFrame::new(settings.width, settings.height);

    info!(
        "Tracing {}x{} pixels against {} spheres on {} threads...",
        settings.width,
        settings.height,
        scene.spheres().len(),
        rayon::current_num_threads()
    );
    let generation_start = std::time::Instant::now();

    let pb = if show_progress {
        let pb = ProgressBar::new(settings.width as u64 * settings.height as u64);
        let style = ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    } else {
        ProgressBar::hidden()
    };

    image.enumerate_pixels_mut().par_bridge().for_each(|(column, row, pixel)| {
        let ray = trace_pixel(scene, column, row);
        *pixel = Rgb(ray.color.to_array());
        pb.inc(1);
    });

    pb.finish_and_clear();
    info!("Frame traced in {:.2?}", generation_start.elapsed());

    image
}

/// Convert one linear channel to a byte: clamp to [0, 1], scale by 255 and
/// truncate. No gamma or tone mapping.
#[inline]
pub fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0) as u8
}

/// 8-bit RGBA version of an accumulated color, fully opaque.
pub fn to_pixel(color: Color) -> Rgba<u8> {
    Rgba([to_byte(color.x), to_byte(color.y), to_byte(color.z), u8::MAX])
}

/// Quantize a linear frame into the 8-bit RGBA grid handed to encoders.
pub fn quantize(frame: &LinearFrame) -> RgbaImage {
    let clipped = frame
        .pixels()
        .flat_map(|p| p.0)
        .filter(|c| !(0.0..=1.0).contains(c))
        .count();
    if clipped > 0 {
        debug!("{clipped} channel values clamped to [0, 1] during quantization");
    }

    RgbaImage::from_fn(frame.width(), frame.height(), |x, y| {
        let Rgb([r, g, b]) = *frame.get_pixel(x, y);
        to_pixel(Color::new(r, g, b))
    })
}

/// Render straight to the 8-bit RGBA grid.
pub fn render_rgba(scene: &Scene, show_progress: bool) -> RgbaImage {
    quantize(&render(scene, show_progress))
}
