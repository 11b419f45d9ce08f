use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid pixel buffer: {len} bytes does not match {width}x{height}x4")]
    InvalidBuffer { len: usize, width: u32, height: u32 },

    #[error("invalid color {0:?}: expected #rrggbb")]
    InvalidColor(String),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("invalid settings version: {0}")]
    InvalidVersion(#[from] semver::Error),

    #[error("unsupported settings version {found} (this build reads {supported})")]
    UnsupportedVersion { found: String, supported: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
