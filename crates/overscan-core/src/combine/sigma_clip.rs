use serde::{Deserialize, Serialize};
use tracing::info;

use crate::combine::{combine_per_pixel, ensure_compatible, master_frame};
use crate::error::Result;
use crate::frame::FrameImage;
use crate::stats::{masked_mean_stddev, mean};

/// Parameters for sigma-clipped mean combination.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SigmaClipParams {
    /// Number of rejection iterations (default: 2).
    pub iterations: usize,
    /// Values beyond mean +/- sigma*stddev are rejected (default: 2.5).
    pub sigma: f64,
}

impl Default for SigmaClipParams {
    fn default() -> Self {
        Self {
            iterations: 2,
            sigma: 2.5,
        }
    }
}

/// Combine frames using sigma-clipped mean.
///
/// Per pixel: compute mean and stddev, reject values more than `sigma` standard
/// deviations from the mean, then recompute the mean from remaining values.
/// Repeat for the configured number of iterations.
pub fn sigma_clip_combine(frames: &[FrameImage], params: &SigmaClipParams) -> Result<FrameImage> {
    let first = ensure_compatible(frames)?;
    let data = combine_per_pixel(frames, |values| clipped_mean(values, params));

    info!(
        count = frames.len(),
        kind = %first.kind(),
        sigma = params.sigma,
        "Sigma-clipped master frame built"
    );
    Ok(master_frame(frames, data))
}

fn clipped_mean(values: &mut [f64], params: &SigmaClipParams) -> f64 {
    let mut mask = vec![true; values.len()];

    for _ in 0..params.iterations {
        let (m, stddev) = masked_mean_stddev(values, &mask);
        if stddev < 1e-10 {
            break;
        }
        let lo = m - params.sigma * stddev;
        let hi = m + params.sigma * stddev;
        for (keep, &v) in mask.iter_mut().zip(values.iter()) {
            if *keep && (v < lo || v > hi) {
                *keep = false;
            }
        }
    }

    let (m, _) = masked_mean_stddev(values, &mask);
    if mask.iter().any(|&keep| keep) {
        m
    } else {
        // If all values rejected, fall back to full mean
        mean(values)
    }
}
