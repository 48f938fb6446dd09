use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use tiff_mask_resize::cli::Args;
use tiff_mask_resize::{parse_scale_factors, Job, Result};

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = run(args) {
        error!("{}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: Args) -> Result<()> {
    // Scale factors are validated before any file is touched
    let scale_factors = parse_scale_factors(&args.scale_factors)?;

    info!(
        "Resizing {} to {} scale factor(s)",
        args.tif_file.display(),
        scale_factors.len()
    );

    let job = Job {
        scale_factors,
        tif_path: args.tif_file,
        mask_path: args.png_file,
    };
    let outputs = job.run()?;

    let lossy = outputs
        .iter()
        .filter_map(|output| output.mask.as_ref())
        .filter(|mask| !mask.labels.labels_preserved())
        .count();
    if lossy > 0 {
        warn!("{} resized mask(s) lost at least one label", lossy);
    }

    info!("=== Done! ===");
    Ok(())
}
