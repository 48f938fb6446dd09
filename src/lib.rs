// Library exports for testing and reuse

pub mod cli;
pub mod error;
pub mod image;
pub mod io;
pub mod mask;
pub mod pipeline;
pub mod raster;
pub mod resample;
pub mod scale;

// Re-export commonly used types
pub use error::{ResizeError, Result};
pub use image::resize_image;
pub use mask::{resize_mask, LabelCheck, ResizedMask};
pub use pipeline::{Job, ScaleOutput};
pub use raster::{Raster, SampleType};
pub use scale::{parse_scale_factors, ScaleFactor};
