use std::path::PathBuf;

use thiserror::Error;

use duotone_core::error::CoreError;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("unsupported image format: {0} (expected JPEG, PNG or WebP)")]
    UnsupportedFormat(String),

    #[error("file is {size} bytes, larger than the {max} byte limit")]
    FileTooLarge { size: u64, max: u64 },

    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode image {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MediaError>;
