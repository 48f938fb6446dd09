//! Multi-scale driver: load inputs once, resize and save per scale factor.

use std::path::{Path, PathBuf};

use log::info;
use ndarray::Array3;

use crate::error::Result;
use crate::image::resize_image;
use crate::io;
use crate::mask::{resize_mask, LabelCheck};
use crate::raster::Raster;
use crate::scale::ScaleFactor;

/// One invocation: a TIFF, an optional mask, and the scales to produce.
#[derive(Debug, Clone)]
pub struct Job {
    pub scale_factors: Vec<ScaleFactor>,
    pub tif_path: PathBuf,
    pub mask_path: Option<PathBuf>,
}

/// Files written for a single scale factor.
#[derive(Debug, Clone)]
pub struct ScaleOutput {
    pub scale: ScaleFactor,
    pub image_path: PathBuf,
    pub mask: Option<MaskOutput>,
}

#[derive(Debug, Clone)]
pub struct MaskOutput {
    pub path: PathBuf,
    pub labels: LabelCheck,
}

/// Inputs decoded once and shared read-only by every scale factor.
struct Inputs {
    image: Raster,
    mask: Option<Array3<u16>>,
}

impl Job {
    /// Process every scale factor in order. The first failure aborts the
    /// run; files already written stay on disk.
    pub fn run(&self) -> Result<Vec<ScaleOutput>> {
        let inputs = self.load()?;

        self.scale_factors
            .iter()
            .map(|&scale| self.process_scale(&inputs, scale))
            .collect()
    }

    fn load(&self) -> Result<Inputs> {
        io::ensure_input_exists(&self.tif_path)?;
        if let Some(mask_path) = &self.mask_path {
            io::ensure_input_exists(mask_path)?;
        }

        let image = io::read_tiff(&self.tif_path)?.into_f32();
        let mask = self
            .mask_path
            .as_deref()
            .map(io::read_mask)
            .transpose()?;

        Ok(Inputs { image, mask })
    }

    fn process_scale(&self, inputs: &Inputs, scale: ScaleFactor) -> Result<ScaleOutput> {
        info!("Processing scale factor {}", scale);

        let resized = resize_image(&inputs.image, scale)?;
        let image_path = io::image_output_path(&self.tif_path, scale);
        io::write_tiff(&image_path, &resized)?;
        info!("Resized TIFF saved to: {}", image_path.display());

        let mask = match (&inputs.mask, &self.mask_path) {
            (Some(mask), Some(mask_path)) => {
                Some(self.process_mask(mask, mask_path, scale)?)
            }
            _ => None,
        };

        Ok(ScaleOutput {
            scale,
            image_path,
            mask,
        })
    }

    fn process_mask(
        &self,
        mask: &Array3<u16>,
        mask_path: &Path,
        scale: ScaleFactor,
    ) -> Result<MaskOutput> {
        let resized = resize_mask(mask.view().into_dyn(), scale)?;
        let path = io::mask_output_path(&self.tif_path, mask_path, scale);
        io::write_mask(&path, &resized.mask)?;
        info!("Resized mask saved to: {}", path.display());

        Ok(MaskOutput {
            path,
            labels: resized.labels,
        })
    }
}
