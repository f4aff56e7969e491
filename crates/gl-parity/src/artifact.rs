//! PNG artifact encoding and storage.

use std::path::Path;

use gl_parity_core::{Dimensions, Error, Result};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbaImage};
use tokio::io::AsyncWriteExt;

/// Encode a packed RGBA buffer as PNG.
pub fn encode_png(pixels: &[u8], dimensions: Dimensions) -> Result<Vec<u8>> {
    let expected = dimensions.rgba_len();
    if pixels.len() != expected {
        return Err(Error::PixelBuffer {
            expected,
            actual: pixels.len(),
        });
    }

    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            pixels,
            dimensions.width,
            dimensions.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| Error::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Decode PNG bytes into an RGBA raster.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| Error::Encode(e.to_string()))?;
    Ok(image.to_rgba8())
}

/// Read and decode the PNG at `path`.
pub async fn read_png(path: &Path) -> Result<RgbaImage> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    decode_png(&bytes)
}

/// Encode `image` and write it to `path`.
pub async fn write_png(path: &Path, image: &RgbaImage) -> Result<()> {
    let (width, height) = image.dimensions();
    let bytes = encode_png(image.as_raw(), Dimensions::new(width, height))?;
    write_artifact(path, &bytes).await
}

/// Write `bytes` to `path`, creating parent directories and replacing any
/// existing file. Returns once the data is synced to storage.
pub async fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }

    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    file.write_all(bytes).await.map_err(|e| Error::io(path, e))?;
    file.sync_all().await.map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Remove the artifact at `path`. Returns whether a file was removed; a
/// missing file is not an error.
pub async fn remove_artifact(path: &Path) -> Result<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}
