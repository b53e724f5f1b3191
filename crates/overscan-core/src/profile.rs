use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::Result;
use crate::frame::FrameImage;
use crate::region::Axis;

/// Mean counts of every column (or row) of a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileVector {
    pub axis: Axis,
    pub values: Vec<f64>,
}

impl ProfileVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values from `start` to the end of the profile.
    pub fn tail(&self, start: usize) -> &[f64] {
        &self.values[start.min(self.values.len())..]
    }
}

/// Average the frame over the axis orthogonal to `axis`, giving one mean
/// per column (`Axis::Columns`) or per row (`Axis::Rows`).
///
/// Accumulates in f64 so long lines of 16-bit counts keep full precision.
/// Parallelizes across lines for frames >= 256x256.
pub fn compute_profile(frame: &FrameImage, axis: Axis) -> Result<ProfileVector> {
    frame.ensure_not_empty()?;

    let n = frame.extent(axis);
    let (h, w) = frame.data().dim();

    let values = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..n)
            .into_par_iter()
            .map(|i| line_mean(frame, axis, i))
            .collect()
    } else {
        (0..n).map(|i| line_mean(frame, axis, i)).collect()
    };

    Ok(ProfileVector { axis, values })
}

fn line_mean(frame: &FrameImage, axis: Axis, index: usize) -> f64 {
    let line = frame.line(axis, index);
    let sum: f64 = line.iter().map(|&v| v as f64).sum();
    sum / line.len() as f64
}
