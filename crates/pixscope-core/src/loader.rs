use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use tracing::{debug, info};

use crate::config::UploadConfig;
use crate::consts::REENCODE_QUALITY;
use crate::error::{PixscopeError, Result};
use crate::format::{format_types, ByteSize};
use crate::geometry::fit_within;
use crate::media::{media_type_for_path, MediaType};
use crate::resource::{DisplayResource, ResourceId};

/// Where the bytes of a [`PendingFile`] come from.
#[derive(Clone, Debug)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// A file offered at the upload boundary, not yet read or decoded.
#[derive(Clone, Debug)]
pub struct PendingFile {
    pub name: String,
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    /// Declared size in bytes.
    pub size: u64,
    pub source: FileSource,
}

impl PendingFile {
    /// Describe a file on disk. Only metadata is read here.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            media_type: media_type_for_path(path),
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    /// Wrap bytes that are already in memory (e.g. from a drop).
    ///
    /// An empty `media_type` falls back to the one implied by `name`.
    pub fn from_bytes(name: impl Into<String>, media_type: &str, bytes: Arc<[u8]>) -> Self {
        let name = name.into();
        let media_type = if media_type.trim().is_empty() {
            media_type_for_path(Path::new(&name))
        } else {
            media_type.to_string()
        };

        Self {
            name,
            media_type,
            size: bytes.len() as u64,
            source: FileSource::Bytes(bytes),
        }
    }

    fn read(&self) -> Result<Arc<[u8]>> {
        match &self.source {
            FileSource::Path(path) => Ok(std::fs::read(path)?.into()),
            FileSource::Bytes(bytes) => Ok(Arc::clone(bytes)),
        }
    }
}

/// Metadata of a successfully loaded image. Immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedImage {
    /// The display resource this image is shown from.
    pub resource: ResourceId,
    pub width: u32,
    pub height: u32,
    pub original_width: u32,
    pub original_height: u32,
    pub file_name: String,
    pub file_type: String,
    pub original_size: u64,
    pub display_size: u64,
    pub scaled: bool,
}

impl LoadedImage {
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Everything a successful load produces.
#[derive(Debug)]
pub struct LoadOutput {
    pub image: LoadedImage,
    /// Owned handle to the displayed bytes; hand it to a `ResourceSlot`.
    pub resource: DisplayResource,
    /// Decoded pixels of the display resource, for on-screen preview.
    pub preview: RgbaImage,
}

/// Check type then size against the upload limits.
pub fn validate(file: &PendingFile, config: &UploadConfig) -> Result<MediaType> {
    let media_type = MediaType::from_mime(&file.media_type)
        .filter(|t| config.supports(*t))
        .ok_or_else(|| PixscopeError::UnsupportedType {
            media_type: file.media_type.clone(),
            supported: format_types(&config.supported_types),
        })?;

    check_size(file.size, config)?;
    Ok(media_type)
}

fn check_size(size: u64, config: &UploadConfig) -> Result<()> {
    if size > config.max_file_size_bytes {
        return Err(PixscopeError::FileTooLarge {
            size: ByteSize(size),
            max: ByteSize(config.max_file_size_bytes),
        });
    }
    Ok(())
}

/// Validate, decode and (if needed) downscale a file into a displayable image.
pub fn load_image(file: &PendingFile, config: &UploadConfig) -> Result<LoadOutput> {
    let media_type = validate(file, config)?;
    let bytes = file.read()?;
    // The declared size may be stale by the time the file is read.
    check_size(bytes.len() as u64, config)?;

    let source = image::load_from_memory_with_format(&bytes, media_type.image_format())
        .map_err(PixscopeError::Decode)?;
    let (original_width, original_height) = (source.width(), source.height());
    if original_width == 0 || original_height == 0 {
        return Err(PixscopeError::RenderSurface(format!(
            "image has no pixels ({original_width}x{original_height})"
        )));
    }

    let fit = fit_within(original_width, original_height, config.max_image_dimension);

    let (resource, preview) = if fit.scaled {
        let target = media_type.downscale_target();
        let encoded = downscale(&source, fit.width, fit.height, target)?;
        debug!(
            from = %format!("{original_width}x{original_height}"),
            to = %format!("{}x{}", fit.width, fit.height),
            %target,
            "downscaled for display"
        );
        let preview = image::load_from_memory_with_format(&encoded, target.image_format())
            .map_err(|e| {
                PixscopeError::RenderSurface(format!("re-encoded image is unreadable: {e}"))
            })?
            .to_rgba8();
        (DisplayResource::new(target, encoded), preview)
    } else {
        (DisplayResource::new(media_type, bytes), source.to_rgba8())
    };

    let image = LoadedImage {
        resource: resource.id(),
        width: fit.width,
        height: fit.height,
        original_width,
        original_height,
        file_name: file.name.clone(),
        file_type: file.media_type.clone(),
        original_size: file.size,
        display_size: resource.len() as u64,
        scaled: fit.scaled,
    };

    info!(
        file = %image.file_name,
        width = image.width,
        height = image.height,
        scaled = image.scaled,
        "image loaded"
    );

    Ok(LoadOutput {
        image,
        resource,
        preview,
    })
}

/// Resample `source` to exactly `width`×`height` and encode it as `target`.
pub fn downscale(
    source: &DynamicImage,
    width: u32,
    height: u32,
    target: MediaType,
) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(PixscopeError::RenderSurface(format!(
            "cannot render a {width}x{height} surface"
        )));
    }

    let resized = source.resize_exact(width, height, FilterType::Triangle);
    encode(&resized, target)
}

/// Encode `image` as `target`.
///
/// JPEG uses [`REENCODE_QUALITY`], WEBP is lossless, and a GIF target is
/// written as PNG.
pub fn encode(image: &DynamicImage, target: MediaType) -> Result<Vec<u8>> {
    let mut buf = Vec::new();

    let written = match target {
        MediaType::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, REENCODE_QUALITY))
        }
        MediaType::Webp => {
            let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
            rgba.write_with_encoder(WebPEncoder::new_lossless(&mut buf))
        }
        MediaType::Png | MediaType::Gif => {
            let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
            rgba.write_with_encoder(PngEncoder::new(&mut buf))
        }
    };

    written.map_err(PixscopeError::Encode)?;
    Ok(buf)
}
