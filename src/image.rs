//! Channel-wise resizing of 3-channel float32 images.

use log::debug;
use ndarray::{stack, Array2, Array3, ArrayView2, Axis};
use rayon::prelude::*;

use crate::error::{ResizeError, Result};
use crate::raster::Raster;
use crate::resample::{anti_alias_sigma, gaussian_filter, resize_bilinear};
use crate::scale::ScaleFactor;

/// Number of channels an input image must carry.
pub const IMAGE_CHANNELS: usize = 3;

/// Resize a (H, W, 3) f32 image to (floor(H·s), floor(W·s), 3).
///
/// Each channel is anti-aliased (when shrinking) and bilinearly resampled on
/// its own, in the channel's original value range. The result is clipped to
/// the per-channel input range, so no value falls outside what the source
/// encoded.
pub fn resize_image(image: &Raster, scale: ScaleFactor) -> Result<Array3<f32>> {
    let (height, width, channels) = image.dim();
    if channels != IMAGE_CHANNELS {
        return Err(ResizeError::ChannelMismatch(channels));
    }
    let data = match image {
        Raster::F32(data) => data,
        other => return Err(ResizeError::UnsupportedDtype(other.sample_type())),
    };
    if height == 0 || width == 0 {
        return Err(ResizeError::InvalidDimensions(width, height));
    }

    let (out_height, out_width) = scale.target_dims(height, width);
    if out_height == 0 || out_width == 0 {
        return Err(ResizeError::EmptyOutput {
            height,
            width,
            scale: scale.value(),
        });
    }

    debug!(
        "Resizing image {}x{} -> {}x{} (scale {})",
        height, width, out_height, out_width, scale
    );

    // Channels share nothing mutable, so they resample in parallel
    let resized: Vec<Array2<f32>> = (0..IMAGE_CHANNELS)
        .into_par_iter()
        .map(|channel| {
            debug!("Resampling channel {}", channel);
            resize_channel(data.index_axis(Axis(2), channel), out_height, out_width)
        })
        .collect();

    let views: Vec<ArrayView2<f32>> = resized.iter().map(|c| c.view()).collect();
    Ok(stack(Axis(2), &views)?)
}

/// Resize a single plane, keeping its values within the input's range.
fn resize_channel(plane: ArrayView2<f32>, out_height: usize, out_width: usize) -> Array2<f32> {
    let (height, width) = plane.dim();
    let sigma_rows = anti_alias_sigma(height, out_height);
    let sigma_cols = anti_alias_sigma(width, out_width);

    let source = plane.mapv(f64::from);
    let filtered = if sigma_rows > 0.0 || sigma_cols > 0.0 {
        debug!(
            "Anti-aliasing with sigma ({:.3}, {:.3})",
            sigma_rows, sigma_cols
        );
        gaussian_filter(source.view(), sigma_rows, sigma_cols)
    } else {
        source
    };

    let resized = resize_bilinear(filtered.view(), out_height, out_width);

    match value_range(plane) {
        Some((min, max)) => resized.mapv(|v| v.clamp(min, max) as f32),
        None => resized.mapv(|v| v as f32),
    }
}

/// Min and max of the non-NaN samples, or `None` if every sample is NaN.
fn value_range(plane: ArrayView2<f32>) -> Option<(f64, f64)> {
    plane
        .iter()
        .filter(|v| !v.is_nan())
        .fold(None, |range, &v| {
            let v = f64::from(v);
            match range {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            }
        })
}
