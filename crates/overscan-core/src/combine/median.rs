use tracing::info;

use crate::combine::{combine_per_pixel, ensure_compatible, master_frame};
use crate::error::Result;
use crate::frame::FrameImage;
use crate::stats::median_in_place;

/// Combine frames by computing the median at each pixel position.
///
/// Robust against cosmic-ray hits that land in a single frame.
pub fn median_combine(frames: &[FrameImage]) -> Result<FrameImage> {
    let first = ensure_compatible(frames)?;
    let data = combine_per_pixel(frames, median_in_place);

    info!(count = frames.len(), kind = %first.kind(), "Median master frame built");
    Ok(master_frame(frames, data))
}
