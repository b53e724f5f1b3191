use std::fmt;
use std::path::{Path, PathBuf};

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{OverscanError, Result};
use crate::region::Axis;

/// Kind of calibration or science exposure a frame came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    Bias,
    Dark,
    Flat,
    Science,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bias => write!(f, "Bias"),
            Self::Dark => write!(f, "Dark"),
            Self::Flat => write!(f, "Flat"),
            Self::Science => write!(f, "Science"),
        }
    }
}

/// Unit of the stored pixel values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelUnit {
    #[default]
    Count,
    Adu,
}

impl fmt::Display for PixelUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => write!(f, "count"),
            Self::Adu => write!(f, "adu"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameMetadata {
    /// Exposure time in seconds, when known.
    pub exposure_time_s: Option<f64>,
    /// File the frame was read from.
    pub source: Option<PathBuf>,
}

/// A single detector readout, raw counts in row-major order.
///
/// Shape = (rows, columns). The pixel grid cannot be mutated after
/// construction; derived frames are always new values.
#[derive(Clone, Debug)]
pub struct FrameImage {
    data: Array2<f32>,
    kind: FrameKind,
    unit: PixelUnit,
    metadata: FrameMetadata,
}

impl FrameImage {
    pub fn new(data: Array2<f32>, kind: FrameKind, unit: PixelUnit) -> Self {
        Self {
            data,
            kind,
            unit,
            metadata: FrameMetadata::default(),
        }
    }

    pub fn with_exposure(mut self, seconds: f64) -> Self {
        self.metadata.exposure_time_s = Some(seconds);
        self
    }

    pub fn with_source(mut self, path: &Path) -> Self {
        self.metadata.source = Some(path.to_path_buf());
        self
    }

    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn unit(&self) -> PixelUnit {
        self.unit
    }

    pub fn metadata(&self) -> &FrameMetadata {
        &self.metadata
    }

    pub fn exposure_time(&self) -> Option<f64> {
        self.metadata.exposure_time_s
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Number of lines along `axis` (columns for `Axis::Columns`).
    pub fn extent(&self, axis: Axis) -> usize {
        match axis {
            Axis::Columns => self.width(),
            Axis::Rows => self.height(),
        }
    }

    /// Number of pixels in each line of `axis`.
    pub fn orthogonal_extent(&self, axis: Axis) -> usize {
        match axis {
            Axis::Columns => self.height(),
            Axis::Rows => self.width(),
        }
    }

    /// The `index`-th column (or row) of the frame.
    pub fn line(&self, axis: Axis, index: usize) -> ArrayView1<'_, f32> {
        self.data.index_axis(axis.lane_axis(), index)
    }

    pub fn ensure_not_empty(&self) -> Result<()> {
        let (rows, cols) = self.data.dim();
        if rows == 0 || cols == 0 {
            return Err(OverscanError::EmptyFrame { rows, cols });
        }
        Ok(())
    }
}
