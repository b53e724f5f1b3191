use tracing::info;

use crate::combine::{ensure_compatible, master_frame};
use crate::error::Result;
use crate::frame::FrameImage;

/// Combine frames by computing the mean at each pixel.
pub fn mean_combine(frames: &[FrameImage]) -> Result<FrameImage> {
    let first = ensure_compatible(frames)?;

    let mut sum = first.data().mapv(|v| v as f64);
    for frame in &frames[1..] {
        sum.zip_mut_with(frame.data(), |acc, &v| *acc += v as f64);
    }
    let n = frames.len() as f64;
    let data = sum.mapv(|v| (v / n) as f32);

    info!(count = frames.len(), kind = %first.kind(), "Mean master frame built");
    Ok(master_frame(frames, data))
}
