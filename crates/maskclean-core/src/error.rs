use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaskCleanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid SER file: {0}")]
    InvalidSer(String),

    #[error("Invalid plane dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Plane buffer too small: need {needed} bytes, got {actual}")]
    PlaneTooSmall { needed: usize, actual: usize },

    #[error("Cannot allocate visitation bitmap for {width}x{height} plane")]
    Allocation { width: usize, height: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Unsupported color mode: {0}")]
    UnsupportedColorMode(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Empty frame sequence")]
    EmptySequence,
}

pub type Result<T> = std::result::Result<T, MaskCleanError>;
