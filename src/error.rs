use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("GIF encoding error: {0}")]
    GifEncoding(#[from] gif::EncodingError),

    #[error("JPEG encoding error: {0}")]
    JpegEncoding(#[from] jpeg_encoder::EncodingError),

    #[error("JPEG XL encoding error: {0}")]
    Jxl(String),

    #[error("Encoder not available in this build: {0}")]
    EncoderUnavailable(&'static str),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid effort value: {0}. Must be between 1 and 9")]
    InvalidEffort(u8),

    #[error("Invalid maximum dimension: {0}. Must be greater than zero")]
    InvalidDimension(u32),

    #[error("Image too large for this format: {0}x{1}. Maximum allowed: {2}x{2}")]
    DimensionsTooLarge(u32, u32, u32),

    #[error("An animation needs at least one frame")]
    EmptyAnimation,

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("No image files found in input path: {0}")]
    NoImageFilesFound(String),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Invalid glob pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Failed to start server: {0}")]
    Bind(#[from] warp::Error),

    #[error("Failed to move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type Result<T> = std::result::Result<T, AssetError>;
