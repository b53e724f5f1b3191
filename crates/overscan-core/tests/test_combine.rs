mod common;

use approx::assert_relative_eq;

use common::constant_frame;
use overscan_core::combine::{mean_combine, median_combine, sigma_clip_combine, SigmaClipParams};
use overscan_core::error::OverscanError;
use overscan_core::frame::{FrameImage, FrameKind};

#[test]
fn test_mean_of_two_bias_frames() {
    let frames = vec![
        constant_frame(4, 4, 1000.0, FrameKind::Bias),
        constant_frame(4, 4, 1010.0, FrameKind::Bias),
    ];
    let master = mean_combine(&frames).unwrap();
    assert_eq!(master.kind(), FrameKind::Bias);
    assert_relative_eq!(master.data()[[2, 3]], 1005.0);
}

#[test]
fn test_median_rejects_outlier() {
    let frames = vec![
        constant_frame(4, 4, 1000.0, FrameKind::Bias),
        constant_frame(4, 4, 1002.0, FrameKind::Bias),
        constant_frame(4, 4, 5000.0, FrameKind::Bias),
    ];
    let master = median_combine(&frames).unwrap();
    assert_relative_eq!(master.data()[[0, 0]], 1002.0);
}

#[test]
fn test_median_large_frame() {
    let frames: Vec<FrameImage> = [900.0, 1000.0, 1100.0]
        .iter()
        .map(|&v| constant_frame(300, 300, v, FrameKind::Flat))
        .collect();
    let master = median_combine(&frames).unwrap();
    assert_relative_eq!(master.data()[[150, 150]], 1000.0);
    assert_relative_eq!(master.data()[[299, 0]], 1000.0);
}

#[test]
fn test_sigma_clip_removes_cosmic_ray() {
    let mut frames: Vec<FrameImage> = (0..10)
        .map(|_| constant_frame(4, 4, 1000.0, FrameKind::Dark))
        .collect();
    frames.push(constant_frame(4, 4, 5000.0, FrameKind::Dark));
    let master = sigma_clip_combine(&frames, &SigmaClipParams::default()).unwrap();
    assert_relative_eq!(master.data()[[1, 1]], 1000.0, epsilon = 1e-3);
}

#[test]
fn test_exposure_carried_to_master() {
    let frames = vec![
        constant_frame(4, 4, 1030.0, FrameKind::Dark).with_exposure(60.0),
        constant_frame(4, 4, 1032.0, FrameKind::Dark).with_exposure(60.0),
    ];
    let master = mean_combine(&frames).unwrap();
    assert_eq!(master.exposure_time(), Some(60.0));

    let mixed = vec![
        constant_frame(4, 4, 1030.0, FrameKind::Dark).with_exposure(60.0),
        constant_frame(4, 4, 1032.0, FrameKind::Dark),
    ];
    assert_eq!(mean_combine(&mixed).unwrap().exposure_time(), None);
}

#[test]
fn test_empty_error() {
    let frames: Vec<FrameImage> = vec![];
    assert!(matches!(
        mean_combine(&frames),
        Err(OverscanError::EmptyFrame { .. })
    ));
}

#[test]
fn test_mixed_kinds_rejected() {
    let frames = vec![
        constant_frame(4, 4, 1000.0, FrameKind::Bias),
        constant_frame(4, 4, 1000.0, FrameKind::Dark),
    ];
    assert!(matches!(
        median_combine(&frames),
        Err(OverscanError::IncompatibleReference(_))
    ));
}

#[test]
fn test_mixed_shapes_rejected() {
    let frames = vec![
        constant_frame(4, 4, 1000.0, FrameKind::Bias),
        constant_frame(4, 5, 1000.0, FrameKind::Bias),
    ];
    let err = mean_combine(&frames).unwrap_err();
    assert!(err.to_string().contains("5x4"), "got: {err}");
}
