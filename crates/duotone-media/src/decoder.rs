use std::path::{Path, PathBuf};

use duotone_core::pipeline::PixelBuffer;

use crate::error::{MediaError, Result};
use crate::upload::{self, Upload};

/// Decode a validated upload into an RGBA buffer.
pub fn decode_upload(upload: &Upload) -> Result<PixelBuffer> {
    let img = image::load_from_memory_with_format(&upload.bytes, upload.kind.format()).map_err(
        |source| MediaError::Decode {
            path: upload.path.clone(),
            source,
        },
    )?;
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(path = %upload.path.display(), width, height, "decoded image");
    Ok(PixelBuffer::from_rgba_vec(width, height, rgba.into_raw())?)
}

/// Validate, read and decode an image file.
pub fn decode_file(path: &Path) -> Result<PixelBuffer> {
    let upload = upload::read_upload(path)?;
    decode_upload(&upload)
}

/// Decode in-memory image bytes of any supported kind.
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer> {
    upload::check_size(bytes.len() as u64)?;
    let path = PathBuf::from("<memory>");
    let kind = upload::detect_kind(&path, bytes)?;
    decode_upload(&Upload {
        path,
        kind,
        bytes: bytes.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bytes_rejects_garbage() {
        assert!(matches!(
            decode_bytes(b"definitely not an image"),
            Err(MediaError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_decode_truncated_png() {
        let truncated = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert!(matches!(
            decode_bytes(&truncated),
            Err(MediaError::Decode { .. })
        ));
    }
}
