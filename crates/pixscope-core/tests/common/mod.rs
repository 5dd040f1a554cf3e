#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use pixscope_core::config::UploadConfig;
use pixscope_core::loader::PendingFile;
use pixscope_core::sampler::Raster;

/// RGBA image where each pixel encodes its own coordinates: R = x, G = y.
pub fn coordinate_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    })
}

/// Encode an RGBA image into an in-memory file of the given format.
pub fn encode(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    let dynamic = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image.clone()).to_rgb8()),
        _ => DynamicImage::ImageRgba8(image.clone()),
    };
    dynamic.write_to(&mut cursor, format).expect("encode fixture");
    cursor.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(&coordinate_image(width, height), ImageFormat::Png)
}

pub fn pending_png(name: &str, width: u32, height: u32) -> PendingFile {
    PendingFile::from_bytes(name, "image/png", Arc::from(png_bytes(width, height)))
}

/// Upload limits with a small max dimension so downscaling is cheap to test.
pub fn small_upload_config(max_dimension: u32) -> UploadConfig {
    UploadConfig {
        max_image_dimension: max_dimension,
        ..UploadConfig::default()
    }
}

pub fn coordinate_raster(width: u32, height: u32) -> Raster {
    Raster::from_rgba(coordinate_image(width, height)).expect("raster")
}
