#![allow(dead_code)]

use ndarray::Array2;
use overscan_core::frame::{FrameImage, FrameKind, PixelUnit};

/// Frame of `rows` x `cols` with an illuminated area at `science` counts
/// and an overscan band from `overscan_start` at `plateau` counts.
pub fn flat_overscan_frame(
    rows: usize,
    cols: usize,
    overscan_start: usize,
    science: f32,
    plateau: f32,
    kind: FrameKind,
) -> FrameImage {
    let data = Array2::from_shape_fn((rows, cols), |(_, col)| {
        if col < overscan_start {
            science
        } else {
            plateau
        }
    });
    FrameImage::new(data, kind, PixelUnit::Count)
}

/// Like `flat_overscan_frame`, but the first `leak_cols` overscan columns
/// carry light leaking from the illuminated area:
/// `plateau + amplitude * exp(-j / tau)` for column offset `j`.
pub fn leaky_overscan_frame(
    rows: usize,
    cols: usize,
    overscan_start: usize,
    leak_cols: usize,
    plateau: f32,
    amplitude: f32,
    tau: f32,
) -> FrameImage {
    let data = Array2::from_shape_fn((rows, cols), |(_, col)| {
        if col < overscan_start {
            plateau + 2.0 * amplitude
        } else {
            let j = col - overscan_start;
            if j < leak_cols {
                plateau + amplitude * (-(j as f32) / tau).exp()
            } else {
                plateau
            }
        }
    });
    FrameImage::new(data, FrameKind::Science, PixelUnit::Count)
}

/// Same as `flat_overscan_frame` but with the overscan band along rows.
pub fn flat_overscan_rows_frame(
    rows: usize,
    cols: usize,
    overscan_start: usize,
    science: f32,
    plateau: f32,
) -> FrameImage {
    let data = Array2::from_shape_fn((rows, cols), |(row, _)| {
        if row < overscan_start {
            science
        } else {
            plateau
        }
    });
    FrameImage::new(data, FrameKind::Science, PixelUnit::Count)
}

/// Constant frame.
pub fn constant_frame(rows: usize, cols: usize, value: f32, kind: FrameKind) -> FrameImage {
    FrameImage::new(Array2::from_elem((rows, cols), value), kind, PixelUnit::Count)
}
