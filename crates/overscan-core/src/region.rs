use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OverscanError, Result};
use crate::frame::FrameImage;

/// Which dimension of the frame holds the overscan band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Overscan is a band of trailing columns; profile has one value per column.
    #[default]
    Columns,
    /// Overscan is a band of trailing rows; profile has one value per row.
    Rows,
}

impl Axis {
    /// ndarray axis indexing a single line of this kind.
    pub(crate) fn lane_axis(self) -> ndarray::Axis {
        match self {
            Self::Columns => ndarray::Axis(1),
            Self::Rows => ndarray::Axis(0),
        }
    }

    /// ndarray axis indexing a line that crosses the overscan band.
    pub(crate) fn cross_axis(self) -> ndarray::Axis {
        match self {
            Self::Columns => ndarray::Axis(0),
            Self::Rows => ndarray::Axis(1),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Columns => write!(f, "Columns"),
            Self::Rows => write!(f, "Rows"),
        }
    }
}

/// The overscan band of a frame: every line from `nominal_start` to the
/// end of the profiled axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverscanRegion {
    pub axis: Axis,
    pub nominal_start: usize,
    /// Extent of the profiled axis.
    pub extent: usize,
    /// Extent of the axis averaged over.
    pub orthogonal_extent: usize,
}

impl OverscanRegion {
    pub fn new(frame: &FrameImage, nominal_start: usize, axis: Axis) -> Result<Self> {
        frame.ensure_not_empty()?;
        let extent = frame.extent(axis);
        if nominal_start >= extent {
            return Err(OverscanError::InvalidRegion {
                index: nominal_start,
                extent,
            });
        }
        Ok(Self {
            axis,
            nominal_start,
            extent,
            orthogonal_extent: frame.orthogonal_extent(axis),
        })
    }

    /// Number of lines in the band.
    pub fn len(&self) -> usize {
        self.extent - self.nominal_start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One past the last index of the band.
    pub fn end(&self) -> usize {
        self.extent
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.nominal_start..self.extent).contains(&index)
    }
}
