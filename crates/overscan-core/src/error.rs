use thiserror::Error;

use crate::region::Axis;

#[derive(Error, Debug)]
pub enum OverscanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Empty frame: {rows}x{cols}")]
    EmptyFrame { rows: usize, cols: usize },

    #[error("Overscan start {index} outside axis extent {extent}")]
    InvalidRegion { index: usize, extent: usize },

    #[error("Need {needed} reference frame(s) of another kind, got {supplied}")]
    InsufficientReferenceFrames { needed: usize, supplied: usize },

    #[error(
        "Profile of {profile_len} {profile_axis} does not match overscan region of {region_extent} {region_axis}"
    )]
    ProfileMismatch {
        profile_axis: Axis,
        profile_len: usize,
        region_axis: Axis,
        region_extent: usize,
    },

    #[error("Incompatible reference frame: {0}")]
    IncompatibleReference(String),

    #[error("Invalid analyzer config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, OverscanError>;
