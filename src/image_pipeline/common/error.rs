use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Malformed ImageBytes buffer: {0}")]
    DecodeError(String),

    #[error("Failed to encode raster: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported transmission element type: {0}")]
    UnsupportedElementType(i32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
