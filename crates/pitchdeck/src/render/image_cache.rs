use std::collections::HashMap;
use std::path::{Path, PathBuf};

use eframe::egui;

/// Decoded textures keyed by path. A failed load is remembered so a missing
/// file is reported once rather than on every frame.
#[derive(Default)]
pub struct ImageCache {
    textures: HashMap<PathBuf, Option<egui::TextureHandle>>,
}

impl ImageCache {
    pub fn get_or_load(&mut self, ctx: &egui::Context, path: &Path) -> Option<egui::TextureHandle> {
        self.textures
            .entry(path.to_path_buf())
            .or_insert_with(|| match decode(path) {
                Ok(image) => Some(ctx.load_texture(
                    path.display().to_string(),
                    image,
                    egui::TextureOptions::LINEAR,
                )),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "could not load image");
                    None
                }
            })
            .clone()
    }
}

fn decode(path: &Path) -> Result<egui::ColorImage, image::ImageError> {
    let image = image::open(path)?.into_rgba8();
    let (w, h) = image.dimensions();
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        [w as usize, h as usize],
        image.as_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        image::save_buffer(&path, &[255u8; 2 * 3 * 4], 2, 3, image::ColorType::Rgba8).unwrap();
        let decoded = decode(&path).unwrap();
        assert_eq!(decoded.size, [2, 3]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(decode(Path::new("/definitely/not/here.png")).is_err());
    }

    #[test]
    fn test_failed_load_is_cached() {
        let ctx = egui::Context::default();
        let mut cache = ImageCache::default();
        let path = Path::new("/definitely/not/here.png");
        assert!(cache.get_or_load(&ctx, path).is_none());
        assert!(cache.get_or_load(&ctx, path).is_none());
        assert_eq!(cache.textures.len(), 1);
    }
}
