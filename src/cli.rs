use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use prismtrace::output::DEFAULT_JPEG_QUALITY;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser, Debug)]
#[command(name = "prismtrace")]
#[command(about = "Sphere ray tracer with single-bounce refraction")]
pub struct Args {
    /// Scene description (TOML). The built-in demo scene is used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels, overriding the scene file
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels, overriding the scene file
    #[arg(long)]
    pub height: Option<u32>,

    /// Output file path (.jpg/.jpeg or .png)
    #[arg(short, long, default_value = "output.jpg")]
    pub output: PathBuf,

    /// JPEG quality, 1-100
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Also write the unclamped linear colors to this .exr file
    #[arg(long)]
    pub exr: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}
