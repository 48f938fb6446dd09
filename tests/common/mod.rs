use std::fs;
use std::path::{Path, PathBuf};

use ndarray::{Array2, Array3};
use tiff_mask_resize::io::{write_mask, write_tiff};

/// Fresh, empty directory under the system temp dir for one test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "tiff-mask-resize-e2e-{}-{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// Smooth float image with values far outside [0, 1].
pub fn float_image(height: usize, width: usize) -> Array3<f32> {
    Array3::from_shape_fn((height, width, 3), |(r, c, ch)| {
        let x = c as f32 / width as f32;
        let y = r as f32 / height as f32;
        (x * 3.0).sin() * 4000.0 + y * 2500.0 + ch as f32 * 10_000.0
    })
}

/// Stripes of labels 0, 1 and 2 with a single pixel of label 5 at the
/// origin, which halving skips.
pub fn striped_mask(height: usize, width: usize) -> Array2<u16> {
    let mut mask = Array2::from_shape_fn((height, width), |(_, c)| (c * 3 / width) as u16);
    mask[[0, 0]] = 5;
    mask
}

pub fn write_image_fixture(dir: &Path, name: &str, image: &Array3<f32>) -> PathBuf {
    let path = dir.join(name);
    write_tiff(&path, image).expect("write TIFF fixture");
    path
}

pub fn write_mask_fixture(dir: &Path, name: &str, mask: &Array2<u16>) -> PathBuf {
    let path = dir.join(name);
    write_mask(&path, mask).expect("write mask fixture");
    path
}
