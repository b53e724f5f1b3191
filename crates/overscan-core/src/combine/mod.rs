//! Per-pixel combination of several frames of one kind into a master frame.

pub mod mean;
pub mod median;
pub mod sigma_clip;

pub use mean::mean_combine;
pub use median::median_combine;
pub use sigma_clip::{sigma_clip_combine, SigmaClipParams};

use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{OverscanError, Result};
use crate::frame::FrameImage;

/// Check that every frame shares kind, unit and shape with the first.
pub(crate) fn ensure_compatible(frames: &[FrameImage]) -> Result<&FrameImage> {
    let Some(first) = frames.first() else {
        return Err(OverscanError::EmptyFrame { rows: 0, cols: 0 });
    };
    first.ensure_not_empty()?;

    for (i, frame) in frames.iter().enumerate().skip(1) {
        if frame.kind() != first.kind() || frame.unit() != first.unit() {
            return Err(OverscanError::IncompatibleReference(format!(
                "frame {i} is {} in {}, expected {} in {}",
                frame.kind(),
                frame.unit(),
                first.kind(),
                first.unit()
            )));
        }
        if frame.data().dim() != first.data().dim() {
            let (h, w) = frame.data().dim();
            let (fh, fw) = first.data().dim();
            return Err(OverscanError::IncompatibleReference(format!(
                "frame {i} is {w}x{h}, expected {fw}x{fh}"
            )));
        }
    }
    Ok(first)
}

/// Apply `combine` to the stack of values at every pixel position.
///
/// Parallelizes at the row level for images >= 256x256.
pub(crate) fn combine_per_pixel<F>(frames: &[FrameImage], combine: F) -> Array2<f32>
where
    F: Fn(&mut [f64]) -> f64 + Sync,
{
    let (h, w) = frames[0].data().dim();
    let n = frames.len();

    let fill_row = |row: usize, pixel_values: &mut [f64], out: &mut [f32]| {
        for (col, result) in out.iter_mut().enumerate() {
            for (i, frame) in frames.iter().enumerate() {
                pixel_values[i] = frame.data()[[row, col]] as f64;
            }
            *result = combine(pixel_values) as f32;
        }
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD && n > 1 {
        let rows: Vec<Vec<f32>> = (0..h)
            .into_par_iter()
            .map(|row| {
                let mut pixel_values = vec![0.0f64; n];
                let mut row_result = vec![0.0f32; w];
                fill_row(row, pixel_values.as_mut_slice(), row_result.as_mut_slice());
                row_result
            })
            .collect();

        let mut result = Array2::<f32>::zeros((h, w));
        for (row, row_data) in rows.into_iter().enumerate() {
            for (col, val) in row_data.into_iter().enumerate() {
                result[[row, col]] = val;
            }
        }
        result
    } else {
        let mut result = Array2::<f32>::zeros((h, w));
        let mut pixel_values = vec![0.0f64; n];
        let mut row_result = vec![0.0f32; w];
        for row in 0..h {
            fill_row(row, pixel_values.as_mut_slice(), row_result.as_mut_slice());
            for (col, val) in row_result.iter().enumerate() {
                result[[row, col]] = *val;
            }
        }
        result
    }
}

/// Build the master frame, carrying kind, unit and mean exposure time over.
pub(crate) fn master_frame(frames: &[FrameImage], data: Array2<f32>) -> FrameImage {
    let first = &frames[0];
    let master = FrameImage::new(data, first.kind(), first.unit());
    let exposures: Vec<f64> = frames.iter().filter_map(|f| f.exposure_time()).collect();
    if exposures.len() == frames.len() {
        master.with_exposure(crate::stats::mean(&exposures))
    } else {
        master
    }
}
