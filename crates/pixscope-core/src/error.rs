use thiserror::Error;

use crate::format::ByteSize;

#[derive(Error, Debug)]
pub enum PixscopeError {
    #[error("Unsupported format ({media_type}). Please choose a {supported} file.")]
    UnsupportedType { media_type: String, supported: String },

    #[error("File is too large ({size}). The maximum is {max}.")]
    FileTooLarge { size: ByteSize, max: ByteSize },

    #[error("Could not decode the image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Could not prepare the display image: {0}")]
    RenderSurface(String),

    #[error("Could not compress the downscaled image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Could not read the file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PixscopeError>;
