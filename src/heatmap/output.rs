//! PNG encoding and atomic file output
//!
//! Files are written to a temporary sibling and renamed over the destination
//! once complete, so a failed run never leaves a truncated file behind.

use super::error::{HeatmapError, Result};
use super::properties::PngCompression;
use super::render::RenderedImage;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Encode an RGB8 image as PNG bytes
pub fn encode_png(image: &RenderedImage, compression: PngCompression) -> Result<Vec<u8>> {
    let compression = match compression {
        PngCompression::Fast => CompressionType::Fast,
        PngCompression::Default => CompressionType::Default,
        PngCompression::Best => CompressionType::Best,
    };

    let expected = image.width as usize * image.height as usize * 3;
    if image.pixels.len() != expected {
        return Err(HeatmapError::Encode(format!(
            "pixel buffer is {} bytes, expected {} for {}x{} RGB",
            image.pixels.len(),
            expected,
            image.width,
            image.height
        )));
    }

    let mut png = Vec::new();
    PngEncoder::new_with_quality(&mut png, compression, FilterType::Adaptive)
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| HeatmapError::Encode(e.to_string()))?;

    Ok(png)
}

/// Temporary path next to `path`, unique per call
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let temp_name = format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4().simple());
    path.with_file_name(temp_name)
}

/// Replace `path` with `bytes` atomically
///
/// The parent directory must already exist.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);
    debug!(temp = %temp_path.display(), "writing {} bytes", bytes.len());

    let written = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(&temp_path, path));

    if let Err(e) = written {
        // The temp file may not exist if creation itself failed
        let _ = std::fs::remove_file(&temp_path);
        return Err(HeatmapError::file_access(path, e));
    }

    Ok(())
}
