use anyhow::{Context, Result};
use fast_image_resize::{images::Image, ResizeOptions, Resizer};
use image::{DynamicImage, RgbaImage};
use std::collections::hash_map::DefaultHasher;
use std::fs::{self, File};
use std::hash::{Hash, Hasher};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::warn;

// Large enough for a full-screen viewer on a big terminal
pub const PREVIEW_WIDTH: u32 = 800;
pub const PREVIEW_HEIGHT: u32 = 600;

const JPEG_QUALITY: u8 = 90;

/// Disk cache of downscaled photo previews.
pub struct PreviewCache {
    cache_dir: PathBuf,
}

impl PreviewCache {
    pub fn new() -> Self {
        let cache_dir = directories::ProjectDirs::from("com", "mrmattias", "keepsake")
            .map(|dirs| dirs.cache_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("keepsake"))
            .join("previews_v1");
        Self::with_dir(cache_dir)
    }

    pub fn with_dir(cache_dir: PathBuf) -> Self {
        let _ = fs::create_dir_all(&cache_dir);
        Self { cache_dir }
    }

    /// Cache file for a source, keyed by path and modification time.
    fn preview_filename(&self, source_path: &Path) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        source_path.to_string_lossy().hash(&mut hasher);

        if let Ok(modified) = fs::metadata(source_path).and_then(|m| m.modified()) {
            modified.hash(&mut hasher);
        }

        self.cache_dir.join(format!("{:016x}.jpg", hasher.finish()))
    }

    /// Load a preview, decoding and downscaling the source on a cache miss.
    /// Fails if the source photo is missing or undecodable.
    pub fn load(&self, source_path: &Path) -> Result<DynamicImage> {
        let preview_path = self.preview_filename(source_path);
        if preview_path.exists() {
            match image::open(&preview_path) {
                Ok(img) => return Ok(img),
                Err(err) => {
                    warn!(
                        path = %preview_path.display(),
                        error = %err,
                        "cached preview unreadable, regenerating"
                    );
                    let _ = fs::remove_file(&preview_path);
                }
            }
        }

        let preview = Self::build_preview(source_path)?;
        if let Err(err) = save_as_jpeg(&preview, &preview_path, JPEG_QUALITY) {
            warn!(
                path = %preview_path.display(),
                error = %err,
                "failed to persist preview"
            );
        }

        Ok(DynamicImage::ImageRgba8(preview))
    }

    /// Calculate dimensions that fit within bounds while maintaining aspect ratio
    fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
        if src_w == 0 || src_h == 0 {
            return (max_w.max(1), max_h.max(1));
        }
        let ratio = (max_w as f32 / src_w as f32).min(max_h as f32 / src_h as f32);
        // Never upscale small photos.
        let ratio = ratio.min(1.0);

        let dst_w = (src_w as f32 * ratio).round() as u32;
        let dst_h = (src_h as f32 * ratio).round() as u32;

        (dst_w.max(1), dst_h.max(1))
    }

    fn build_preview(source_path: &Path) -> Result<RgbaImage> {
        let src_image = image::open(source_path)
            .with_context(|| format!("Failed to open photo: {}", source_path.display()))?;

        let src_rgba = src_image.to_rgba8();
        let (src_width, src_height) = (src_rgba.width(), src_rgba.height());
        let (dst_width, dst_height) =
            Self::fit_dimensions(src_width, src_height, PREVIEW_WIDTH, PREVIEW_HEIGHT);

        if (dst_width, dst_height) == (src_width, src_height) {
            return Ok(src_rgba);
        }

        let src_fir = Image::from_vec_u8(
            src_width,
            src_height,
            src_rgba.into_raw(),
            fast_image_resize::PixelType::U8x4,
        )?;
        let mut dst_fir = Image::new(dst_width, dst_height, fast_image_resize::PixelType::U8x4);

        let mut resizer = Resizer::new();
        resizer.resize(
            &src_fir,
            &mut dst_fir,
            &ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
                fast_image_resize::FilterType::Lanczos3,
            )),
        )?;

        RgbaImage::from_raw(dst_width, dst_height, dst_fir.into_vec())
            .context("Failed to create preview image")
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Save RGBA image as JPEG with specified quality
fn save_as_jpeg(img: &RgbaImage, path: &Path, quality: u8) -> Result<()> {
    let rgb_img = DynamicImage::ImageRgba8(img.clone()).to_rgb8();

    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality);
    encoder
        .encode_image(&rgb_img)
        .with_context(|| format!("Failed to encode JPEG: {}", path.display()))?;

    Ok(())
}
