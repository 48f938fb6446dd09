//! Single-plane resampling kernels shared by the image and mask resizers.
//!
//! Output pixel `i` samples the input at `(i + 0.5) * in / out - 0.5`, so
//! pixel centers of both grids line up. Borders are mirrored without
//! repeating the edge sample (`dcb|abcd|cba`).

use ndarray::{Array2, ArrayView2, Axis};

/// Gaussian kernels are cut off at this many standard deviations.
const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Sigmas at or below this are treated as "no smoothing".
const MIN_SIGMA: f64 = 1e-15;

/// Map an out-of-range index back into `[0, len)` by mirroring about the
/// first and last samples.
pub fn mirror_index(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let len = len as isize;
    let period = 2 * (len - 1);
    let wrapped = index.rem_euclid(period);
    if wrapped < len {
        wrapped as usize
    } else {
        (period - wrapped) as usize
    }
}

/// Anti-aliasing sigma for one axis: `max(0, (in / out - 1) / 2)`.
/// Zero whenever the axis is not being shrunk.
pub fn anti_alias_sigma(input_len: usize, output_len: usize) -> f64 {
    ((input_len as f64 / output_len as f64 - 1.0) / 2.0).max(0.0)
}

/// Normalized, symmetric Gaussian weights covering `±4σ`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as isize;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 * (x * x) as f64 / (sigma * sigma)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Correlate every lane along `axis` with `kernel`, mirroring at the edges.
fn convolve_axis(data: &Array2<f64>, axis: Axis, kernel: &[f64]) -> Array2<f64> {
    let radius = (kernel.len() / 2) as isize;
    let len = data.len_of(axis);
    let mut out = Array2::zeros(data.raw_dim());

    for (src, mut dst) in data.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        for i in 0..len {
            let mut acc = 0.0;
            for (k, &weight) in kernel.iter().enumerate() {
                let j = mirror_index(i as isize + k as isize - radius, len);
                acc += weight * src[j];
            }
            dst[i] = acc;
        }
    }

    out
}

/// Separable Gaussian blur. An axis whose sigma is (effectively) zero is
/// left untouched.
pub fn gaussian_filter(data: ArrayView2<f64>, sigma_rows: f64, sigma_cols: f64) -> Array2<f64> {
    let mut out = data.to_owned();
    if sigma_rows > MIN_SIGMA {
        out = convolve_axis(&out, Axis(0), &gaussian_kernel(sigma_rows));
    }
    if sigma_cols > MIN_SIGMA {
        out = convolve_axis(&out, Axis(1), &gaussian_kernel(sigma_cols));
    }
    out
}

/// Two neighbouring source samples and the weight of the upper one.
#[derive(Debug, Clone, Copy)]
struct LinearTap {
    lo: usize,
    hi: usize,
    weight: f64,
}

fn linear_taps(input_len: usize, output_len: usize) -> Vec<LinearTap> {
    let step = input_len as f64 / output_len as f64;
    (0..output_len)
        .map(|i| {
            let coord = (i as f64 + 0.5) * step - 0.5;
            let base = coord.floor();
            let weight = coord - base;
            let base = base as isize;
            LinearTap {
                lo: mirror_index(base, input_len),
                hi: mirror_index(base + 1, input_len),
                weight,
            }
        })
        .collect()
}

/// Bilinear resize of one plane to `(out_rows, out_cols)`.
pub fn resize_bilinear(data: ArrayView2<f64>, out_rows: usize, out_cols: usize) -> Array2<f64> {
    let (in_rows, in_cols) = data.dim();
    debug_assert!(in_rows > 0 && in_cols > 0 && out_rows > 0 && out_cols > 0);

    let rows = linear_taps(in_rows, out_rows);
    let cols = linear_taps(in_cols, out_cols);

    Array2::from_shape_fn((out_rows, out_cols), |(r, c)| {
        let ty = rows[r];
        let tx = cols[c];
        let blend = |row: usize| {
            let left = data[[row, tx.lo]];
            if tx.weight == 0.0 {
                left
            } else {
                left * (1.0 - tx.weight) + data[[row, tx.hi]] * tx.weight
            }
        };
        let top = blend(ty.lo);
        if ty.weight == 0.0 {
            top
        } else {
            top * (1.0 - ty.weight) + blend(ty.hi) * ty.weight
        }
    })
}

/// Source index nearest to each output pixel center, clamped to the edge.
fn nearest_indices(input_len: usize, output_len: usize) -> Vec<usize> {
    let step = input_len as f64 / output_len as f64;
    (0..output_len)
        .map(|i| {
            let nearest = ((i as f64 + 0.5) * step).floor() as usize;
            nearest.min(input_len - 1)
        })
        .collect()
}

/// Nearest-neighbour resize. Every output value is copied from the input,
/// so no new values are ever introduced.
pub fn resize_nearest<T: Copy>(data: ArrayView2<T>, out_rows: usize, out_cols: usize) -> Array2<T> {
    let (in_rows, in_cols) = data.dim();
    debug_assert!(in_rows > 0 && in_cols > 0 && out_rows > 0 && out_cols > 0);

    let rows = nearest_indices(in_rows, out_rows);
    let cols = nearest_indices(in_cols, out_cols);

    Array2::from_shape_fn((out_rows, out_cols), |(r, c)| data[[rows[r], cols[c]]])
}
