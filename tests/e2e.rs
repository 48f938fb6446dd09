mod common;

use std::fs;

use common::{float_image, scratch_dir, striped_mask, write_image_fixture, write_mask_fixture};
use ndarray::Axis;
use tiff_mask_resize::io::{read_mask, read_tiff};
use tiff_mask_resize::{parse_scale_factors, Job, Raster, ResizeError, SampleType};

#[test]
fn single_scale_writes_half_size_tiff() {
    let dir = scratch_dir("scenario-a");
    let tif = write_image_fixture(&dir, "scan.tif", &float_image(100, 100));

    let job = Job {
        scale_factors: parse_scale_factors("0.5").unwrap(),
        tif_path: tif,
        mask_path: None,
    };
    let outputs = job.run().unwrap();

    assert_eq!(outputs.len(), 1);
    let expected = dir.join("scan_res0_50.tiff");
    assert_eq!(outputs[0].image_path, expected);
    assert!(outputs[0].mask.is_none());

    let raster = read_tiff(&expected).unwrap();
    assert_eq!(raster.sample_type(), SampleType::F32);
    assert_eq!(raster.dim(), (50, 50, 3));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn multiple_scales_write_one_tiff_each() {
    let dir = scratch_dir("scenario-b");
    let tif = write_image_fixture(&dir, "scan.tif", &float_image(100, 100));

    let job = Job {
        scale_factors: parse_scale_factors("0.5,0.25").unwrap(),
        tif_path: tif,
        mask_path: None,
    };
    let outputs = job.run().unwrap();
    assert_eq!(outputs.len(), 2);

    for (name, dims) in [("scan_res0_50.tiff", (50, 50, 3)), ("scan_res0_25.tiff", (25, 25, 3))] {
        let path = dir.join(name);
        assert!(path.is_file(), "missing {}", path.display());
        assert_eq!(read_tiff(&path).unwrap().dim(), dims);
    }

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn mask_is_resized_and_label_loss_reported() {
    let dir = scratch_dir("scenario-c");
    let mask_dir = dir.join("masks");
    fs::create_dir_all(&mask_dir).unwrap();

    let tif = write_image_fixture(&dir, "scan.tif", &float_image(100, 100));
    let png = write_mask_fixture(&mask_dir, "labels.png", &striped_mask(100, 100));

    let job = Job {
        scale_factors: parse_scale_factors("0.5").unwrap(),
        tif_path: tif,
        mask_path: Some(png),
    };
    let outputs = job.run().unwrap();

    // Named after the TIFF, placed next to the mask
    let mask_output = outputs[0].mask.as_ref().expect("mask output");
    let expected = mask_dir.join("scan_res0_50_masks.png");
    assert_eq!(mask_output.path, expected);

    // Label 5 had one pixel at an even coordinate and vanishes
    assert!(!mask_output.labels.labels_preserved());
    assert_eq!(mask_output.labels.missing, vec![5]);
    assert_eq!(mask_output.labels.before, 4);
    assert_eq!(mask_output.labels.after, 3);

    let written = read_mask(&expected).unwrap();
    assert_eq!(written.dim(), (50, 50, 1));
    let labels: Vec<u16> = {
        let mut seen: Vec<u16> = written.index_axis(Axis(2), 0).iter().copied().collect();
        seen.sort_unstable();
        seen.dedup();
        seen
    };
    assert_eq!(labels, vec![0, 1, 2]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn surviving_labels_produce_no_warning() {
    let dir = scratch_dir("labels-kept");
    let tif = write_image_fixture(&dir, "scan.tif", &float_image(40, 40));
    let mut mask = striped_mask(40, 40);
    mask[[0, 0]] = 0;
    let png = write_mask_fixture(&dir, "labels.png", &mask);

    let job = Job {
        scale_factors: parse_scale_factors("0.5").unwrap(),
        tif_path: tif,
        mask_path: Some(png),
    };
    let outputs = job.run().unwrap();

    let labels = &outputs[0].mask.as_ref().unwrap().labels;
    assert!(labels.labels_preserved());
    assert_eq!(labels.before, 3);
    assert_eq!(labels.after, 3);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn malformed_scale_factor_fails_before_io() {
    let err = parse_scale_factors("abc").unwrap_err();
    assert!(matches!(err, ResizeError::InvalidScaleFactor(_)));
}

#[test]
fn missing_input_is_reported() {
    let dir = scratch_dir("missing");
    let job = Job {
        scale_factors: parse_scale_factors("0.5").unwrap(),
        tif_path: dir.join("absent.tif"),
        mask_path: None,
    };
    assert!(matches!(job.run(), Err(ResizeError::InputNotFound(_))));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn single_channel_tiff_is_rejected() {
    let dir = scratch_dir("gray");
    let path = dir.join("gray.tif");
    {
        let file = fs::File::create(&path).unwrap();
        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::BufWriter::new(file)).unwrap();
        encoder
            .write_image::<tiff::encoder::colortype::Gray32Float>(4, 4, &[1.0f32; 16])
            .unwrap();
    }
    assert!(matches!(read_tiff(&path).unwrap(), Raster::F32(_)));

    let job = Job {
        scale_factors: parse_scale_factors("0.5").unwrap(),
        tif_path: path,
        mask_path: None,
    };
    assert!(matches!(job.run(), Err(ResizeError::ChannelMismatch(1))));

    fs::remove_dir_all(&dir).ok();
}
