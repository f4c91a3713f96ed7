//! Image pipeline - mirrors a source tree into the public output,
//! converting raster images to lossy WebP on the way

use anyhow::{anyhow, Result};
use image::ImageReader;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::Penna;

/// Counts of what one pipeline run did
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImageStats {
    pub converted: usize,
    pub copied: usize,
    pub skipped: usize,
}

/// Mirrors `images.source_dir` into `images.target_dir`.
///
/// jpg/png files are re-encoded as WebP but keep their original file
/// name in the target tree; webp/svg files are copied byte-identical;
/// everything else is skipped. Source files are never touched.
pub struct ImagePipeline<'a> {
    site: &'a Penna,
}

impl<'a> ImagePipeline<'a> {
    /// Create a new image pipeline
    pub fn new(site: &'a Penna) -> Self {
        Self { site }
    }

    /// Run the pipeline once, sequentially and depth-first.
    ///
    /// The first filesystem or codec error aborts the whole run.
    pub fn run(&self) -> Result<ImageStats> {
        let source_root = self.site.base_dir.join(&self.site.config.images.source_dir);
        let target_root = self.site.base_dir.join(&self.site.config.images.target_dir);

        if !source_root.exists() {
            tracing::debug!("Image source {:?} does not exist, nothing to do", source_root);
            return Ok(ImageStats::default());
        }

        fs::create_dir_all(&target_root)?;

        let quality = self.site.config.images.quality;
        let mut stats = ImageStats::default();

        for entry in WalkDir::new(&source_root).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            let relative = path.strip_prefix(&source_root)?;
            let target = target_root.join(relative);

            if entry.file_type().is_dir() {
                // Directories are mirrored even when they hold no images
                fs::create_dir_all(&target)?;
                continue;
            }

            match extension_of(path).as_deref() {
                Some("jpg") | Some("png") => {
                    convert_to_webp(path, &target, quality)?;
                    stats.converted += 1;
                }
                Some("webp") | Some("svg") => {
                    fs::copy(path, &target)?;
                    tracing::debug!("Copied {:?} -> {:?}", path, target);
                    stats.copied += 1;
                }
                _ => {
                    stats.skipped += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// Decode a raster image and write it as lossy WebP to `target`.
fn convert_to_webp(source: &Path, target: &Path, quality: u8) -> Result<()> {
    let img = ImageReader::open(source)
        .map_err(|e| anyhow!("Failed to open image {:?}: {}", source, e))?
        .decode()
        .map_err(|e| anyhow!("Failed to decode image {:?}: {}", source, e))?;

    let rgba = img.to_rgba8();
    let encoder = webp::Encoder::from_rgba(&rgba, rgba.width(), rgba.height());
    let encoded = encoder.encode(quality as f32);

    fs::write(target, &*encoded)
        .map_err(|e| anyhow!("Failed to write {:?}: {}", target, e))?;
    tracing::debug!("Converted {:?} -> {:?}", source, target);

    Ok(())
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_png(path: &Path) {
        let img = image::RgbaImage::from_fn(16, 16, |x, y| {
            image::Rgba([(x * 16) as u8, (y * 16) as u8, 128, 255])
        });
        img.save(path).unwrap();
    }

    fn create_test_jpeg(path: &Path) {
        let img = image::RgbImage::from_fn(16, 16, |x, y| {
            image::Rgb([(x * 16) as u8, (y * 16) as u8, 64])
        });
        img.save(path).unwrap();
    }

    fn is_webp(bytes: &[u8]) -> bool {
        bytes.len() > 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
    }

    fn target_root(site: &Penna) -> PathBuf {
        site.base_dir.join(&site.config.images.target_dir)
    }

    #[test]
    fn test_mirror_and_convert_keeps_original_names() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(content.join("posts/brush-care")).unwrap();
        fs::create_dir_all(content.join("empty-album")).unwrap();
        create_test_png(&content.join("posts/brush-care/photo.png"));
        create_test_jpeg(&content.join("posts/brush-care/detail.jpg"));
        fs::write(content.join("posts/brush-care/en.md"), "not an image").unwrap();

        let site = Penna::new(tmp.path()).unwrap();
        let stats = ImagePipeline::new(&site).run().unwrap();

        assert_eq!(stats.converted, 2);
        assert_eq!(stats.copied, 0);
        assert_eq!(stats.skipped, 1);

        let target = target_root(&site);
        // Converted files keep the source file name but hold WebP bytes
        let photo = fs::read(target.join("posts/brush-care/photo.png")).unwrap();
        assert!(is_webp(&photo));
        let detail = fs::read(target.join("posts/brush-care/detail.jpg")).unwrap();
        assert!(is_webp(&detail));
        // Non-images are not mirrored, empty directories are
        assert!(!target.join("posts/brush-care/en.md").exists());
        assert!(target.join("empty-album").is_dir());
    }

    #[test]
    fn test_source_files_untouched() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(&content).unwrap();
        let source_file = content.join("photo.png");
        create_test_png(&source_file);
        let before = fs::read(&source_file).unwrap();

        let site = Penna::new(tmp.path()).unwrap();
        ImagePipeline::new(&site).run().unwrap();

        let after = fs::read(&source_file).unwrap();
        assert_eq!(before, after);
        assert!(!is_webp(&before));
    }

    #[test]
    fn test_webp_and_svg_copied_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(&content).unwrap();
        let webp_bytes = b"RIFF\x04\x00\x00\x00WEBPfake".to_vec();
        fs::write(content.join("already.webp"), &webp_bytes).unwrap();
        let svg_bytes = b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>".to_vec();
        fs::write(content.join("diagram.svg"), &svg_bytes).unwrap();

        let site = Penna::new(tmp.path()).unwrap();
        let stats = ImagePipeline::new(&site).run().unwrap();

        assert_eq!(stats.copied, 2);
        assert_eq!(stats.converted, 0);

        let target = target_root(&site);
        assert_eq!(fs::read(target.join("already.webp")).unwrap(), webp_bytes);
        assert_eq!(fs::read(target.join("diagram.svg")).unwrap(), svg_bytes);
    }

    #[test]
    fn test_jpeg_extension_not_converted() {
        // Only the four listed extensions take part; .jpeg is not one
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(&content).unwrap();
        create_test_jpeg(&content.join("photo.jpeg"));

        let site = Penna::new(tmp.path()).unwrap();
        let stats = ImagePipeline::new(&site).run().unwrap();

        assert_eq!(stats.converted, 0);
        assert_eq!(stats.skipped, 1);
        assert!(!target_root(&site).join("photo.jpeg").exists());
    }

    #[test]
    fn test_uppercase_extensions_converted() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(&content).unwrap();
        create_test_png(&content.join("SHOUTING.PNG"));

        let site = Penna::new(tmp.path()).unwrap();
        let stats = ImagePipeline::new(&site).run().unwrap();

        assert_eq!(stats.converted, 1);
        let bytes = fs::read(target_root(&site).join("SHOUTING.PNG")).unwrap();
        assert!(is_webp(&bytes));
    }

    #[test]
    fn test_corrupt_image_aborts_run() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("broken.png"), b"not actually a png").unwrap();

        let site = Penna::new(tmp.path()).unwrap();
        let result = ImagePipeline::new(&site).run();

        assert!(result.is_err());
    }

    #[test]
    fn test_missing_source_dir_is_a_no_op() {
        let tmp = TempDir::new().unwrap();
        let site = Penna::new(tmp.path()).unwrap();

        let stats = ImagePipeline::new(&site).run().unwrap();
        assert_eq!(stats, ImageStats::default());
    }
}
