use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "resize-tif-png")]
#[command(about = "Resize a float32 TIFF image and an optional PNG label mask to one or more scale factors")]
#[command(version)]
pub struct Args {
    /// Comma-separated list of scale factors (e.g., "0.9,0.8,0.7")
    #[arg(value_name = "SCALE_FACTORS")]
    pub scale_factors: String,

    /// Input TIFF image (3 channels, cast to float32)
    #[arg(value_name = "TIF_FILE")]
    pub tif_file: PathBuf,

    /// Input PNG label mask (optional)
    #[arg(value_name = "PNG_FILE")]
    pub png_file: Option<PathBuf>,
}
