//! # Output Module
//!
//! Hands finished frames to image encoders. The renderer's job ends at the
//! 8-bit RGBA grid; this module only picks an encoder and writes the file.
//!
//! - `.jpg` / `.jpeg`: baseline JPEG at a caller-chosen quality (alpha dropped)
//! - `.png`: lossless RGBA
//! - `.exr`: the linear, unclamped accumulated colors as 32-bit floats

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use exr::prelude::write_rgb_file;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::info;

use crate::render::{quantize, LinearFrame};

/// JPEG quality used when none is requested.
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Errors raised while writing an image.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The file extension does not name a supported encoder
    #[error("Unsupported file extension '{0}': use .jpg, .jpeg, .png or .exr")]
    UnsupportedExtension(String),

    /// EXR stores the linear frame; an 8-bit frame cannot be written as EXR
    #[error("{0}: EXR output is written from the linear frame, not the 8-bit one")]
    NeedsLinearFrame(String),

    /// JPEG quality outside 1..=100
    #[error("JPEG quality must be between 1 and 100, got {0}")]
    Quality(u8),

    /// Creating the output file failed
    #[error("Failed to create output file: {0}")]
    Io(#[from] std::io::Error),

    /// The image encoder failed
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    /// The EXR writer failed
    #[error("Failed to write EXR image: {0}")]
    Exr(#[from] exr::error::Error),
}

/// Encoders an output path can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 8-bit baseline JPEG
    Jpeg,
    /// 8-bit RGBA PNG
    Png,
    /// 32-bit float OpenEXR of the linear frame
    Exr,
}

impl OutputFormat {
    /// Pick the encoder from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, OutputError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "exr" => Ok(Self::Exr),
            _ => Err(OutputError::UnsupportedExtension(extension)),
        }
    }
}

/// Save the 8-bit frame as JPEG or PNG depending on the extension of `path`.
///
/// `jpeg_quality` is only consulted for JPEG output.
pub fn save_image(image: &RgbaImage, path: &Path, jpeg_quality: u8) -> Result<(), OutputError> {
    match OutputFormat::from_path(path)? {
        OutputFormat::Jpeg => save_image_as_jpeg(image, path, jpeg_quality),
        OutputFormat::Png => save_image_as_png(image, path),
        OutputFormat::Exr => Err(OutputError::NeedsLinearFrame(path.display().to_string())),
    }
}

/// Save a rendered frame in `format`: EXR keeps the linear colors, JPEG and
/// PNG get the quantized 8-bit grid.
///
/// Resolve `format` with [`OutputFormat::from_path`] before rendering so a
/// bad path fails without tracing the frame.
pub fn save_frame(frame: &LinearFrame, path: &Path, format: OutputFormat, jpeg_quality: u8) -> Result<(), OutputError> {
    match format {
        OutputFormat::Exr => save_linear_exr(frame, path),
        OutputFormat::Jpeg => save_image_as_jpeg(&quantize(frame), path, jpeg_quality),
        OutputFormat::Png => save_image_as_png(&quantize(frame), path),
    }
}

/// Save as baseline JPEG. JPEG has no alpha channel, so it is dropped.
pub fn save_image_as_jpeg(image: &RgbaImage, path: &Path, quality: u8) -> Result<(), OutputError> {
    if !(1..=100).contains(&quality) {
        return Err(OutputError::Quality(quality));
    }
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let writer = BufWriter::new(File::create(path)?);
    JpegEncoder::new_with_quality(writer, quality).encode_image(&rgb)?;
    info!("Image saved as {} (JPEG quality {})", path.display(), quality);
    Ok(())
}

/// Save as RGBA PNG.
pub fn save_image_as_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    image.save_with_format(path, ImageFormat::Png)?;
    info!("Image saved as {}", path.display());
    Ok(())
}

/// Save the linear accumulated colors as EXR with full f32 precision, no
/// clamping and no gamma.
pub fn save_linear_exr(frame: &LinearFrame, path: &Path) -> Result<(), OutputError> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    write_rgb_file(path, width, height, |x, y| {
        let pixel = frame.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    })?;
    info!("Linear frame saved as EXR: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    fn checker() -> RgbaImage {
        RgbaImage::from_fn(4, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.jpg")).unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("a.JPEG")).unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("dir/a.png")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a.exr")).unwrap(), OutputFormat::Exr);
        assert!(matches!(
            OutputFormat::from_path(Path::new("a.bmp")),
            Err(OutputError::UnsupportedExtension(_))
        ));
        assert!(OutputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn png_round_trips_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        save_image(&checker(), &path, DEFAULT_JPEG_QUALITY).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded, checker());
    }

    #[test]
    fn jpeg_keeps_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.jpg");
        save_image(&checker(), &path, 90).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 2));
    }

    #[test]
    fn jpeg_rejects_zero_quality() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.jpg");
        assert!(matches!(save_image(&checker(), &path, 0), Err(OutputError::Quality(0))));
    }

    #[test]
    fn exr_writes_linear_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.exr");
        let frame = LinearFrame::from_pixel(3, 2, Rgb([1.8, -0.5, 0.25]));
        save_linear_exr(&frame, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn eight_bit_exr_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.exr");
        let err = save_image(&checker(), &path, DEFAULT_JPEG_QUALITY).unwrap_err();
        assert!(matches!(err, OutputError::NeedsLinearFrame(_)));
        assert!(!err.to_string().contains("Unsupported"));
    }

    #[test]
    fn save_frame_dispatches_on_format() {
        let dir = tempfile::tempdir().unwrap();
        let frame = LinearFrame::from_pixel(3, 2, Rgb([1.8, -0.5, 0.25]));

        let exr = dir.path().join("frame.exr");
        save_frame(&frame, &exr, OutputFormat::from_path(&exr).unwrap(), DEFAULT_JPEG_QUALITY).unwrap();
        assert!(std::fs::metadata(&exr).unwrap().len() > 0);

        let png = dir.path().join("frame.png");
        save_frame(&frame, &png, OutputFormat::from_path(&png).unwrap(), DEFAULT_JPEG_QUALITY).unwrap();
        let decoded = image::open(&png).unwrap().to_rgba8();
        assert!(decoded.pixels().all(|p| *p == Rgba([255, 0, 63, 255])));
    }
}
