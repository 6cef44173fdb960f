//! Base image input and PNG output.

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use tracing::info;

use crate::error::{RenderError, RenderResult};

/// Decode downloaded base image bytes into an RGBA buffer.
pub fn decode_base_image(bytes: &[u8]) -> RenderResult<RgbaImage> {
    let image = image::load_from_memory(bytes).map_err(RenderError::Decode)?;
    Ok(image.to_rgba8())
}

/// Read a base image from disk.
pub fn load_base_image(path: &Path) -> RenderResult<RgbaImage> {
    let bytes = std::fs::read(path)?;
    decode_base_image(&bytes)
}

/// Write the rendered image as PNG, replacing any previous file.
pub fn save_png(image: &RgbaImage, path: &Path) -> RenderResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| RenderError::Save {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Saved PNG"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{assert_images_eq, patterned_base_image, png_bytes, temp_test_dir};

    #[test]
    fn test_decode_png_bytes() {
        let original = patterned_base_image(12, 7);
        let decoded = decode_base_image(&png_bytes(&original)).unwrap();
        assert_images_eq!(decoded, original);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_base_image(b"not an image"),
            Err(RenderError::Decode(_))
        ));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = temp_test_dir();
        let path = dir.path().join("out").join("atl_latest.png");
        let image = patterned_base_image(5, 5);
        save_png(&image, &path).unwrap();
        assert_images_eq!(load_base_image(&path).unwrap(), image);
    }
}
