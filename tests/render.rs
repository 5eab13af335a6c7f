use glam::Vec3A;
use image::Rgba;

use prismtrace::camera::Camera;
use prismtrace::config::SceneConfig;
use prismtrace::ray::Ray;
use prismtrace::render::{render, render_rgba, to_pixel, trace_pixel};
use prismtrace::scene::{RenderSettings, Scene};
use prismtrace::sphere::Sphere;

const RED: Vec3A = Vec3A::new(1.0, 0.0, 0.0);
const BLUE: Vec3A = Vec3A::new(0.0, 0.0, 0.5);

fn scene(spheres: Vec<Sphere>, width: u32, height: u32) -> Scene {
    Scene::new(Camera::default(), spheres, RenderSettings::new(width, height)).unwrap()
}

#[test_log::test]
fn large_red_sphere_fills_two_by_two_frame() {
    let scene = scene(vec![Sphere::opaque(Vec3A::new(0.0, 0.0, -100.0), RED, 90.0)], 2, 2);
    let image = render_rgba(&scene, false);

    assert_eq!(image.dimensions(), (2, 2));
    for pixel in image.pixels() {
        assert_eq!(*pixel, Rgba([255, 0, 0, 255]));
    }
}

#[test_log::test]
fn empty_frame_is_black() {
    let image = render_rgba(&scene(Vec::new(), 3, 2), false);
    assert!(image.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
}

#[test_log::test]
fn non_square_frame_is_not_transposed() {
    // aim a small sphere at the center of column 3, row 0 of a 4x2 frame
    let target = Camera::default().project(Camera::ndc(3, 4), Camera::ndc(0, 2));
    let scene = scene(vec![Sphere::opaque(target * 10.0, RED, 0.3)], 4, 2);

    let image = render_rgba(&scene, false);
    assert_eq!(image.dimensions(), (4, 2));
    for (x, y, pixel) in image.enumerate_pixels() {
        let expected = if (x, y) == (3, 0) { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 0, 255]) };
        assert_eq!(*pixel, expected, "pixel ({x}, {y})");
    }
}

#[test_log::test]
fn hidden_sphere_still_contributes() {
    let near = Sphere::opaque(Vec3A::new(0.0, 0.0, -10.0), Vec3A::new(0.25, 0.0, 0.0), 3.0);
    let far = Sphere::opaque(Vec3A::new(0.0, 0.0, -40.0), Vec3A::new(0.0, 0.5, 0.0), 3.0);

    let front_first = trace_pixel(&scene(vec![near, far], 1, 1), 0, 0);
    let back_first = trace_pixel(&scene(vec![far, near], 1, 1), 0, 0);

    assert_eq!(front_first.color, Vec3A::new(0.25, 0.5, 0.0));
    assert_eq!(back_first.color, Vec3A::new(0.25, 0.5, 0.0));
}

#[test]
fn opaque_tangent_paints_ray_direction() {
    let scene = scene(vec![Sphere::opaque(Vec3A::new(5.0, 0.0, -10.0), RED, 5.0)], 1, 1);
    let ray = trace_pixel(&scene, 0, 0);
    assert_eq!(ray.color, Vec3A::NEG_Z);
    // the negative channel clamps to zero in the frame
    assert_eq!(to_pixel(ray.color), Rgba([0, 0, 0, 255]));
}

#[test]
fn refraction_makes_sphere_order_matter() {
    let glass = Sphere::new(Vec3A::new(0.0, 0.0, -5.0), BLUE, 1.0, 0.5, 1.5);
    let wall = Sphere::opaque(Vec3A::new(2.0, 0.0, -20.0), RED, 1.0);
    let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.1, 0.0, -1.0).normalize());

    // wall first: both spheres lie on the unbent line
    let wall_first = scene(vec![wall, glass], 1, 1).trace(ray);
    assert_eq!(wall_first.color, RED + BLUE);

    // glass first: the bent ray no longer meets the wall
    let glass_first = scene(vec![glass, wall], 1, 1).trace(ray);
    assert_eq!(glass_first.color, BLUE);
    assert_eq!(glass_first.current_refractive_index, 1.5);
}

#[test]
fn exit_leaves_refractive_index_stale() {
    let first = Sphere::new(Vec3A::new(0.0, 0.0, -5.0), BLUE, 1.0, 0.5, 1.5);
    let second = Sphere::new(Vec3A::new(0.0, 0.0, -15.0), BLUE, 1.0, 0.5, 2.0);
    let ray = trace_pixel(&scene(vec![first, second], 1, 1), 0, 0);

    assert_eq!(ray.current_refractive_index, 2.0);
    assert_eq!(ray.transparency, 0.25);
    assert_eq!(ray.color, BLUE * 2.0);
}

#[test_log::test]
fn parallel_render_is_deterministic() {
    let demo = Scene::demo().with_size(48, 32).unwrap();
    let a = render(&demo, false);
    let b = render(&demo, false);
    assert_eq!(a, b);

    for (x, y, pixel) in a.enumerate_pixels() {
        let ray = trace_pixel(&demo, x, y);
        assert_eq!(pixel.0, ray.color.to_array(), "pixel ({x}, {y})");
    }
}

#[test_log::test]
fn scene_file_renders_end_to_end() {
    let config = SceneConfig::from_toml(
        r#"
[image]
width = 2
height = 2

[[spheres]]
center = [0.0, 0.0, -100.0]
color = [1.0, 0.0, 0.0]
radius = 90.0
"#,
    )
    .unwrap();
    let image = render_rgba(&config.to_scene().unwrap(), false);
    assert!(image.pixels().all(|p| *p == Rgba([255, 0, 0, 255])));
}

#[test]
fn bundled_scene_file_matches_demo() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenes/demo.toml");
    let scene = prismtrace::config::load_scene(path).unwrap();
    assert_eq!(scene, Scene::demo());
}
