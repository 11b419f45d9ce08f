use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::error::{MediaError, Result};

/// Largest accepted upload, 25 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

/// Still-image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    WebP,
}

impl ImageKind {
    pub fn from_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::WebP => Some(Self::WebP),
            _ => None,
        }
    }

    pub fn format(&self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::WebP => ImageFormat::WebP,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }
}

/// A validated upload held in memory.
#[derive(Debug, Clone)]
pub struct Upload {
    pub path: PathBuf,
    pub kind: ImageKind,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".into())
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Check an upload's size limit without reading it.
pub fn check_size(size: u64) -> Result<()> {
    if size > MAX_UPLOAD_BYTES {
        return Err(MediaError::FileTooLarge {
            size,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Identify the image kind from magic bytes, falling back to the extension.
pub fn detect_kind(path: &Path, bytes: &[u8]) -> Result<ImageKind> {
    let format = image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .map_err(|_| MediaError::UnsupportedFormat(describe(path)))?;
    ImageKind::from_format(format)
        .ok_or_else(|| MediaError::UnsupportedFormat(format!("{format:?}")))
}

/// Validate and read an image file.
pub fn read_upload(path: &Path) -> Result<Upload> {
    let size = fs::metadata(path)?.len();
    check_size(size)?;
    let bytes = fs::read(path)?;
    // The file may have grown between stat and read.
    check_size(bytes.len() as u64)?;
    let kind = detect_kind(path, &bytes)?;
    tracing::debug!(path = %path.display(), ?kind, size, "accepted upload");
    Ok(Upload {
        path: path.to_path_buf(),
        kind,
        bytes,
    })
}

fn describe(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
