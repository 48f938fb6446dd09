//! Label-preserving mask resizing.

use std::collections::BTreeSet;

use log::{debug, warn};
use ndarray::{Array2, ArrayView2, ArrayViewD, Axis, Ix2};

use crate::error::{ResizeError, Result};
use crate::resample::resize_nearest;
use crate::scale::ScaleFactor;

/// Outcome of comparing the label sets before and after resizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCheck {
    /// Distinct labels in the source mask
    pub before: usize,
    /// Distinct labels in the resized mask
    pub after: usize,
    /// Source labels with no pixel left after resizing, sorted
    pub missing: Vec<u16>,
}

impl LabelCheck {
    pub fn compare(before: &BTreeSet<u16>, after: &BTreeSet<u16>) -> Self {
        Self {
            before: before.len(),
            after: after.len(),
            missing: before.difference(after).copied().collect(),
        }
    }

    /// True when every source label still has at least one pixel.
    pub fn labels_preserved(&self) -> bool {
        self.missing.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ResizedMask {
    pub mask: Array2<u16>,
    pub labels: LabelCheck,
}

/// Distinct values present in a mask.
pub fn label_set(mask: ArrayView2<u16>) -> BTreeSet<u16> {
    mask.iter().copied().collect()
}

/// View a 2-D mask as-is, or the first channel of a (H, W, C) mask.
pub fn collapse_channels(mask: ArrayViewD<'_, u16>) -> Result<ArrayView2<'_, u16>> {
    match mask.ndim() {
        2 => Ok(mask.into_dimensionality::<Ix2>()?),
        3 => {
            if mask.len_of(Axis(2)) == 0 {
                return Err(ResizeError::InvalidMaskRank(3));
            }
            Ok(mask.index_axis_move(Axis(2), 0).into_dimensionality::<Ix2>()?)
        }
        n => Err(ResizeError::InvalidMaskRank(n)),
    }
}

/// Resize a label mask to (floor(H·s), floor(W·s)) with nearest-neighbour
/// sampling and report any label that vanished.
///
/// Label loss is not an error: it is logged as a warning and returned in
/// [`ResizedMask::labels`] so the caller can still save the mask.
pub fn resize_mask(mask: ArrayViewD<'_, u16>, scale: ScaleFactor) -> Result<ResizedMask> {
    let mask = collapse_channels(mask)?;
    let (height, width) = mask.dim();
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
        "Resizing mask {}x{} -> {}x{} (scale {})",
        height, width, out_height, out_width, scale
    );

    let resized = resize_nearest(mask, out_height, out_width);
    let labels = LabelCheck::compare(&label_set(mask), &label_set(resized.view()));

    if !labels.labels_preserved() {
        warn!(
            "Some labels are missing after resizing: {:?} (original labels: {}, resized labels: {})",
            labels.missing, labels.before, labels.after
        );
    }

    Ok(ResizedMask {
        mask: resized,
        labels,
    })
}
