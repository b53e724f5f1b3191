use std::fmt;

use ndarray::{s, Array2};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::frame::FrameImage;
use crate::region::{Axis, OverscanRegion};
use crate::stats::{mean, median_in_place};

/// How the overscan pixels of one line are reduced to a single bias value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverscanStatistic {
    Mean,
    #[default]
    Median,
}

impl fmt::Display for OverscanStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => write!(f, "Mean"),
            Self::Median => write!(f, "Median"),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubtractParams {
    pub statistic: OverscanStatistic,
    /// Drop the overscan band from the output frame.
    pub trim: bool,
}

/// Subtract the overscan level line by line.
///
/// For `Axis::Columns` every row gets its own bias value from the overscan
/// columns `start..width`; for `Axis::Rows` every column from the overscan
/// rows `start..height`. Pass the effective start of a usable verdict so
/// leaked light does not bias the estimate.
pub fn subtract_overscan(
    frame: &FrameImage,
    start: usize,
    axis: Axis,
    params: &SubtractParams,
) -> Result<FrameImage> {
    let region = OverscanRegion::new(frame, start, axis)?;

    let mut data = frame.data().mapv(|v| v as f64);
    let mut levels = Vec::with_capacity(region.orthogonal_extent);
    for mut line in data.axis_iter_mut(axis.cross_axis()) {
        let mut overscan: Vec<f64> = line.slice(s![start..]).to_vec();
        let level = match params.statistic {
            OverscanStatistic::Mean => mean(&overscan),
            OverscanStatistic::Median => median_in_place(&mut overscan),
        };
        line -= level;
        levels.push(level);
    }

    let subtracted = frame_like(frame, data.mapv(|v| v as f32));
    info!(
        axis = %axis,
        start,
        statistic = %params.statistic,
        mean_level = mean(&levels),
        trimmed = params.trim,
        "Overscan subtracted"
    );

    if params.trim {
        trim_overscan(&subtracted, start, axis)
    } else {
        Ok(subtracted)
    }
}

/// Drop every line from `start` to the end of `axis`.
pub fn trim_overscan(frame: &FrameImage, start: usize, axis: Axis) -> Result<FrameImage> {
    OverscanRegion::new(frame, start, axis)?;
    let data = match axis {
        Axis::Columns => frame.data().slice(s![.., ..start]).to_owned(),
        Axis::Rows => frame.data().slice(s![..start, ..]).to_owned(),
    };
    Ok(frame_like(frame, data))
}

fn frame_like(frame: &FrameImage, data: Array2<f32>) -> FrameImage {
    let result = FrameImage::new(data, frame.kind(), frame.unit());
    match frame.exposure_time() {
        Some(exposure) => result.with_exposure(exposure),
        None => result,
    }
}
