//! Surface capture: freeze the live surface into a PNG artifact.

use std::path::{Path, PathBuf};

use gl_parity_core::{Dimensions, Error, Result};

use crate::artifact::{encode_png, write_artifact};
use crate::surface::{PixelFormat, PixelRect, Surface};

/// Read a `width` x `height` RGBA rectangle from `surface` and write it as a
/// PNG to `path`, replacing any existing file.
///
/// Resolves with `path` once the file is synced.
pub async fn capture<S>(
    surface: &S,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<PathBuf>
where
    S: Surface + ?Sized,
{
    let path = path.as_ref();
    let dimensions = Dimensions::new(width, height);
    if dimensions.is_empty() {
        return Err(Error::InvalidDimensions { width, height });
    }

    let pixels = surface.read_pixels(PixelRect::from_origin(width, height), PixelFormat::Rgba8)?;
    let bytes = encode_png(&pixels, dimensions)?;
    write_artifact(path, &bytes).await?;

    tracing::debug!(
        "Captured {} surface to {} ({} bytes)",
        dimensions,
        path.display(),
        bytes.len()
    );
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::read_png;
    use crate::mock::MockContext;
    use image::Rgba;

    #[tokio::test]
    async fn test_capture_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        let context = MockContext::filled(4, 3, [10, 20, 30, 255]);

        let saved = capture(&context, &path, 4, 3).await.unwrap();
        assert_eq!(saved, path);

        let image = read_png(&path).await.unwrap();
        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(image.get_pixel(3, 2), &Rgba([10, 20, 30, 255]));
    }

    #[tokio::test]
    async fn test_capture_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, b"previous contents").unwrap();

        let context = MockContext::filled(2, 2, [0, 0, 0, 255]);
        capture(&context, &path, 2, 2).await.unwrap();

        let image = read_png(&path).await.unwrap();
        assert_eq!(image.dimensions(), (2, 2));
    }

    #[tokio::test]
    async fn test_capture_rejects_zero_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        let context = MockContext::filled(2, 2, [0, 0, 0, 255]);

        let result = capture(&context, &path, 0, 2).await;
        assert!(matches!(
            result,
            Err(Error::InvalidDimensions { width: 0, height: 2 })
        ));
        assert!(!path.exists());
        assert_eq!(context.read_count(), 0);
    }

    #[tokio::test]
    async fn test_capture_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        // A regular file cannot act as a parent directory.
        let path = blocker.join("shot.png");
        let context = MockContext::filled(2, 2, [0, 0, 0, 255]);
        let result = capture(&context, &path, 2, 2).await;
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
