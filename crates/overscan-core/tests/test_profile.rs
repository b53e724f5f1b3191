mod common;

use approx::assert_relative_eq;
use ndarray::Array2;

use common::constant_frame;
use overscan_core::config::AnalyzerConfig;
use overscan_core::error::OverscanError;
use overscan_core::frame::{FrameImage, FrameKind, PixelUnit};
use overscan_core::plateau::find_plateau;
use overscan_core::profile::{compute_profile, ProfileVector};
use overscan_core::region::{Axis, OverscanRegion};

fn region(axis: Axis, nominal_start: usize, extent: usize) -> OverscanRegion {
    OverscanRegion {
        axis,
        nominal_start,
        extent,
        orthogonal_extent: 1,
    }
}

// ---------------------------------------------------------------------------
// compute_profile
// ---------------------------------------------------------------------------

#[test]
fn test_column_profile_averages_rows() {
    // Column c holds c on even rows and c + 2 on odd rows: mean c + 1.
    let data = Array2::from_shape_fn((4, 6), |(r, c)| (c + 2 * (r % 2)) as f32);
    let frame = FrameImage::new(data, FrameKind::Bias, PixelUnit::Count);
    let profile = compute_profile(&frame, Axis::Columns).unwrap();

    assert_eq!(profile.len(), 6);
    for (c, v) in profile.values.iter().enumerate() {
        assert_relative_eq!(*v, c as f64 + 1.0);
    }
}

#[test]
fn test_row_profile_averages_columns() {
    let data = Array2::from_shape_fn((5, 3), |(r, c)| (10 * r + c) as f32);
    let frame = FrameImage::new(data, FrameKind::Bias, PixelUnit::Count);
    let profile = compute_profile(&frame, Axis::Rows).unwrap();

    assert_eq!(profile.axis, Axis::Rows);
    assert_eq!(profile.len(), 5);
    assert_relative_eq!(profile.values[3], 31.0);
}

#[test]
fn test_large_frame_profile_matches_expected() {
    let data = Array2::from_shape_fn((300, 300), |(_, c)| (1000 + c) as f32);
    let frame = FrameImage::new(data, FrameKind::Science, PixelUnit::Count);
    let profile = compute_profile(&frame, Axis::Columns).unwrap();

    assert_eq!(profile.len(), 300);
    assert_relative_eq!(profile.values[0], 1000.0);
    assert_relative_eq!(profile.values[299], 1299.0);
}

#[test]
fn test_profile_of_empty_frame() {
    let frame = FrameImage::new(Array2::zeros((3, 0)), FrameKind::Bias, PixelUnit::Count);
    assert!(matches!(
        compute_profile(&frame, Axis::Columns),
        Err(OverscanError::EmptyFrame { rows: 3, cols: 0 })
    ));
}

// ---------------------------------------------------------------------------
// OverscanRegion
// ---------------------------------------------------------------------------

#[test]
fn test_region_bounds() {
    let frame = constant_frame(8, 32, 1000.0, FrameKind::Bias);
    let r = OverscanRegion::new(&frame, 24, Axis::Columns).unwrap();

    assert_eq!(r.len(), 8);
    assert_eq!(r.end(), 32);
    assert_eq!(r.orthogonal_extent, 8);
    assert!(r.contains(24));
    assert!(r.contains(31));
    assert!(!r.contains(23));
    assert!(!r.contains(32));
}

#[test]
fn test_region_rejects_start_at_extent() {
    let frame = constant_frame(8, 32, 1000.0, FrameKind::Bias);
    assert!(matches!(
        OverscanRegion::new(&frame, 8, Axis::Rows),
        Err(OverscanError::InvalidRegion {
            index: 8,
            extent: 8
        })
    ));
}

// ---------------------------------------------------------------------------
// find_plateau
// ---------------------------------------------------------------------------

#[test]
fn test_plateau_of_flat_strip() {
    let profile = ProfileVector {
        axis: Axis::Columns,
        values: vec![5000.0, 5000.0, 1000.0, 1000.5, 999.5, 1000.0],
    };
    let estimate = find_plateau(&profile, &region(Axis::Columns, 2, 6), &AnalyzerConfig::default())
        .unwrap();

    // Level comes from the trailing half of the strip: median(999.5, 1000).
    assert_eq!(estimate.effective_start, 2);
    assert_relative_eq!(estimate.level, 999.75);
    assert_relative_eq!(estimate.spread, 0.75);
    assert_relative_eq!(estimate.tolerance, 9.9975, epsilon = 1e-9);
}

#[test]
fn test_plateau_skips_decaying_values() {
    let profile = ProfileVector {
        axis: Axis::Columns,
        values: vec![3000.0, 1400.0, 1100.0, 1020.0, 1000.0, 1000.0, 1000.0, 1000.0],
    };
    let config = AnalyzerConfig {
        tail_window: 4,
        relative_tolerance: 0.0,
        uniformity_tolerance: 5.0,
        ..Default::default()
    };
    let estimate = find_plateau(&profile, &region(Axis::Columns, 1, 8), &config).unwrap();
    assert_eq!(estimate.effective_start, 4);
}

#[test]
fn test_plateau_relative_tolerance() {
    // 1% of 10000 counts absorbs the 50-count wiggle.
    let profile = ProfileVector {
        axis: Axis::Columns,
        values: vec![10050.0, 10000.0, 10030.0, 10000.0, 10000.0],
    };
    let estimate =
        find_plateau(&profile, &region(Axis::Columns, 0, 5), &AnalyzerConfig::default()).unwrap();
    assert_eq!(estimate.effective_start, 0);

    let strict = AnalyzerConfig {
        relative_tolerance: 0.0,
        ..Default::default()
    };
    let estimate = find_plateau(&profile, &region(Axis::Columns, 0, 5), &strict).unwrap();
    assert_eq!(estimate.effective_start, 3);
}

#[test]
fn test_plateau_rejects_mismatched_profile() {
    let profile = ProfileVector {
        axis: Axis::Columns,
        values: vec![1000.0; 4],
    };
    let result = find_plateau(&profile, &region(Axis::Columns, 1, 6), &AnalyzerConfig::default());
    assert!(matches!(
        result,
        Err(OverscanError::ProfileMismatch {
            profile_len: 4,
            region_extent: 6,
            ..
        })
    ));
}

#[test]
fn test_plateau_rejects_profile_on_other_axis() {
    let profile = ProfileVector {
        axis: Axis::Rows,
        values: vec![1000.0; 6],
    };
    let err = find_plateau(&profile, &region(Axis::Columns, 1, 6), &AnalyzerConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        OverscanError::ProfileMismatch {
            profile_axis: Axis::Rows,
            region_axis: Axis::Columns,
            ..
        }
    ));
    assert!(err.to_string().contains("Rows"), "got: {err}");
}

#[test]
fn test_plateau_level_ignores_leaked_half() {
    let profile = ProfileVector {
        axis: Axis::Columns,
        values: vec![2000.0, 1606.5, 1367.9, 1223.1, 1000.0, 1000.0, 1000.0, 1000.0],
    };
    let estimate =
        find_plateau(&profile, &region(Axis::Columns, 0, 8), &AnalyzerConfig::default()).unwrap();
    assert_relative_eq!(estimate.level, 1000.0);
    assert_eq!(estimate.effective_start, 4);
}
