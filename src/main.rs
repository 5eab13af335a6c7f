use clap::Parser;
use log::{debug, error, info};

use prismtrace::config::load_scene;
use prismtrace::output::{save_frame, save_linear_exr, OutputError, OutputFormat};
use prismtrace::render::render;
use prismtrace::scene::Scene;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

/// Scene from `--config`, or the demo scene, with CLI size overrides applied.
fn resolve_scene(args: &Args) -> Result<Scene, Box<dyn std::error::Error>> {
    let scene = match &args.config {
        Some(path) => load_scene(path)?,
        None => {
            info!("No scene file given, rendering the built-in demo scene");
            Scene::demo()
        }
    };

    if args.width.is_none() && args.height.is_none() {
        return Ok(scene);
    }
    let settings = *scene.settings();
    let width = args.width.unwrap_or(settings.width);
    let height = args.height.unwrap_or(settings.height);
    Ok(scene.with_size(width, height)?)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    // Output paths are checked before any pixel is traced.
    let format = OutputFormat::from_path(&args.output)?;
    if let Some(exr_path) = &args.exr {
        if OutputFormat::from_path(exr_path)? != OutputFormat::Exr {
            return Err(OutputError::UnsupportedExtension(exr_path.display().to_string()).into());
        }
    }

    let scene = resolve_scene(args)?;
    let settings = scene.settings();
    info!("Image resolution: {}x{}", settings.width, settings.height);
    debug!("Camera: {:?}", scene.camera());
    for (index, sphere) in scene.spheres().iter().enumerate() {
        debug!("Sphere #{index}: {sphere:?}");
    }

    let frame = render(&scene, !args.no_progress);

    if let Some(exr_path) = &args.exr {
        save_linear_exr(&frame, exr_path)?;
    }
    save_frame(&frame, &args.output, format, args.quality)?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("prismtrace - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}
