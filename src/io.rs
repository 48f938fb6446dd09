use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use ndarray::{Array2, Array3};
use png::{BitDepth, ColorType as PngColor, Transformations};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::RGB32Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::{PlanarConfiguration, Tag};
use tiff::ColorType as TiffColor;

use crate::error::{ResizeError, Result};
use crate::raster::Raster;
use crate::scale::ScaleFactor;

/// Fail early with a readable message when an input path is missing.
pub fn ensure_input_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ResizeError::InputNotFound(path.to_path_buf()))
    }
}

/// Read a TIFF as a (height, width, samples) raster in its native sample type
pub fn read_tiff(path: &Path) -> Result<Raster> {
    info!("Opening input TIFF: {}", path.display());
    let mut decoder = Decoder::new(BufReader::new(File::open(path)?))?;

    let (width, height) = decoder.dimensions()?;
    let (width, height) = (width as usize, height as usize);
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidDimensions(width, height));
    }

    let samples = match decoder.colortype()? {
        TiffColor::Gray(_) => 1,
        TiffColor::GrayA(_) => 2,
        TiffColor::RGB(_) => 3,
        TiffColor::RGBA(_) => 4,
        // BlackIsZero with several samples, e.g. non-RGB scientific bands
        TiffColor::Multiband { num_samples, .. } => usize::from(num_samples),
        other => return Err(ResizeError::UnsupportedTiff(format!("{:?}", other))),
    };

    // Only the first plane of a planar file would be decoded
    let planar = decoder.find_tag_unsigned::<u16>(Tag::PlanarConfiguration)?;
    if planar == Some(PlanarConfiguration::Planar.to_u16()) {
        return Err(ResizeError::UnsupportedTiff(
            "planar sample layout".to_string(),
        ));
    }

    debug!("TIFF dimensions: {}x{}x{}", height, width, samples);

    let shape = (height, width, samples);
    let raster = match decoder.read_image()? {
        DecodingResult::U8(data) => Raster::U8(Array3::from_shape_vec(shape, data)?),
        DecodingResult::U16(data) => Raster::U16(Array3::from_shape_vec(shape, data)?),
        DecodingResult::U32(data) => Raster::U32(Array3::from_shape_vec(shape, data)?),
        DecodingResult::U64(data) => Raster::U64(Array3::from_shape_vec(shape, data)?),
        DecodingResult::I8(data) => Raster::I8(Array3::from_shape_vec(shape, data)?),
        DecodingResult::I16(data) => Raster::I16(Array3::from_shape_vec(shape, data)?),
        DecodingResult::I32(data) => Raster::I32(Array3::from_shape_vec(shape, data)?),
        DecodingResult::I64(data) => Raster::I64(Array3::from_shape_vec(shape, data)?),
        DecodingResult::F32(data) => Raster::F32(Array3::from_shape_vec(shape, data)?),
        DecodingResult::F64(data) => Raster::F64(Array3::from_shape_vec(shape, data)?),
        // Half floats widen losslessly
        DecodingResult::F16(data) => {
            let widened: Vec<f32> = data.into_iter().map(f32::from).collect();
            Raster::F32(Array3::from_shape_vec(shape, widened)?)
        }
    };

    Ok(raster)
}

/// Write a (height, width, 3) f32 image as an RGB float TIFF
pub fn write_tiff(path: &Path, image: &Array3<f32>) -> Result<()> {
    let (height, width, channels) = image.dim();
    if channels != 3 {
        return Err(ResizeError::ChannelMismatch(channels));
    }
    let (w, h) = dims_u32(width, height)?;

    debug!("Writing {}x{} float TIFF: {}", height, width, path.display());

    // Row-major interleaved samples, whatever the array's memory layout
    let samples: Vec<f32> = image.iter().copied().collect();

    let mut file = BufWriter::new(File::create(path)?);
    {
        let mut encoder = TiffEncoder::new(&mut file)?;
        encoder.write_image::<RGB32Float>(w, h, &samples)?;
    }
    file.flush()?;

    Ok(())
}

fn dims_u32(width: usize, height: usize) -> Result<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(ResizeError::InvalidDimensions(width, height)),
    }
}

/// Read a PNG label mask as (height, width, channels) u16 samples.
///
/// Palettes and sub-byte depths are expanded to 8-bit samples; 8- and
/// 16-bit values are kept as-is.
pub fn read_mask(path: &Path) -> Result<Array3<u16>> {
    info!("Opening input mask: {}", path.display());
    let mut decoder = png::Decoder::new(BufReader::new(File::open(path)?));
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder.read_info()?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| ResizeError::UnsupportedPng("image too large to buffer".to_string()))?;
    let mut buf = vec![0u8; buf_size];
    let frame = reader.next_frame(&mut buf)?;

    let width = frame.width as usize;
    let height = frame.height as usize;
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidDimensions(width, height));
    }

    let (color, depth) = reader.output_color_type();
    let channels = match color {
        PngColor::Grayscale | PngColor::GrayscaleAlpha | PngColor::Rgb | PngColor::Rgba => {
            color.samples()
        }
        other => {
            return Err(ResizeError::UnsupportedPng(format!(
                "{:?} samples were not expanded",
                other
            )))
        }
    };

    let bytes = &buf[..frame.buffer_size()];
    let samples: Vec<u16> = match depth {
        BitDepth::Eight => bytes.iter().map(|&b| u16::from(b)).collect(),
        BitDepth::Sixteen => bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect(),
        other => {
            return Err(ResizeError::UnsupportedPng(format!(
                "{:?} at {:?} bits",
                color, other
            )))
        }
    };

    debug!("Mask dimensions: {}x{}x{}", height, width, channels);

    Ok(Array3::from_shape_vec((height, width, channels), samples)?)
}

/// Write a label mask as a 16-bit grayscale PNG
pub fn write_mask(path: &Path, mask: &Array2<u16>) -> Result<()> {
    let (height, width) = mask.dim();
    let (w, h) = dims_u32(width, height)?;

    debug!("Writing {}x{} 16-bit mask: {}", height, width, path.display());

    let mut file = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(&mut file, w, h);
    encoder.set_color(PngColor::Grayscale);
    encoder.set_depth(BitDepth::Sixteen);

    let data: Vec<u8> = mask.iter().flat_map(|v| v.to_be_bytes()).collect();

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&data)?;
    writer.finish()?;
    file.flush()?;

    Ok(())
}

fn base_name(tif_path: &Path) -> String {
    tif_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<tif_dir>/<tif_stem>_resS_FF.tiff`
pub fn image_output_path(tif_path: &Path, scale: ScaleFactor) -> PathBuf {
    tif_path.with_file_name(format!("{}_{}.tiff", base_name(tif_path), scale.token()))
}

/// `<mask_dir>/<tif_stem>_resS_FF_masks.png`. The mask takes the TIFF's
/// base name so image and mask outputs pair up.
pub fn mask_output_path(tif_path: &Path, mask_path: &Path, scale: ScaleFactor) -> PathBuf {
    mask_path.with_file_name(format!(
        "{}_{}_masks.png",
        base_name(tif_path),
        scale.token()
    ))
}
