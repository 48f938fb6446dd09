use std::path::PathBuf;

use thiserror::Error;

use crate::raster::SampleType;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Invalid scale factor '{0}' (must be a positive number)")]
    InvalidScaleFactor(String),

    #[error("Input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input image must have 3 channels (H, W, 3), found {0}")]
    ChannelMismatch(usize),

    #[error("Input image must be of sample type f32, found {0}")]
    UnsupportedDtype(SampleType),

    #[error("Mask must be 2-dimensional or 3-dimensional, found {0} dimensions")]
    InvalidMaskRank(usize),

    #[error("Input raster has invalid dimensions: {0}x{1}")]
    InvalidDimensions(usize, usize),

    #[error("Scale factor {scale} shrinks {height}x{width} to an empty image")]
    EmptyOutput {
        height: usize,
        width: usize,
        scale: f64,
    },

    #[error("Unsupported TIFF layout: {0}")]
    UnsupportedTiff(String),

    #[error("Unsupported PNG layout: {0}")]
    UnsupportedPng(String),
}

pub type Result<T> = std::result::Result<T, ResizeError>;
