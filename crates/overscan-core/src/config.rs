use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CONSISTENCY_TOLERANCE, DEFAULT_DARK_CURRENT_TOLERANCE, DEFAULT_LARGE_OFFSET_THRESHOLD,
    DEFAULT_LEAKAGE_MARGIN, DEFAULT_RELATIVE_TOLERANCE, DEFAULT_TAIL_WINDOW,
    DEFAULT_UNIFORMITY_TOLERANCE,
};
use crate::error::{OverscanError, Result};

/// Thresholds driving plateau detection and usability classification.
///
/// Leakage extent and frame-kind offsets differ per camera, so every
/// threshold is tunable; the defaults suit a typical 16-bit CCD.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Absolute flatness tolerance in counts.
    pub uniformity_tolerance: f64,
    /// Flatness tolerance as a fraction of the plateau level.
    /// The larger of the two tolerances applies.
    pub relative_tolerance: f64,
    /// Number of trailing overscan values whose median is the plateau level.
    pub tail_window: usize,
    /// Leakage that leaves this many lines or fewer of flat overscan makes
    /// the region unusable.
    pub leakage_margin: usize,
    /// Largest spread (counts) of plateau levels across frame kinds that
    /// still counts as consistent.
    pub consistency_tolerance: f64,
    /// Spread (counts) above which the overscan is absorbing a
    /// frame-kind-dependent offset.
    pub large_offset_threshold: f64,
    /// Expected dark current in counts per second per pixel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_current_rate: Option<f64>,
    /// Accepted deviation (counts) of a dark's excess over bias from
    /// `dark_current_rate * exposure`.
    pub dark_current_tolerance: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            uniformity_tolerance: DEFAULT_UNIFORMITY_TOLERANCE,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            tail_window: DEFAULT_TAIL_WINDOW,
            leakage_margin: DEFAULT_LEAKAGE_MARGIN,
            consistency_tolerance: DEFAULT_CONSISTENCY_TOLERANCE,
            large_offset_threshold: DEFAULT_LARGE_OFFSET_THRESHOLD,
            dark_current_rate: None,
            dark_current_tolerance: DEFAULT_DARK_CURRENT_TOLERANCE,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<()> {
        let tolerances = [
            ("uniformity_tolerance", self.uniformity_tolerance),
            ("relative_tolerance", self.relative_tolerance),
            ("consistency_tolerance", self.consistency_tolerance),
            ("large_offset_threshold", self.large_offset_threshold),
            ("dark_current_tolerance", self.dark_current_tolerance),
        ];
        for (name, value) in tolerances {
            if !value.is_finite() || value < 0.0 {
                return Err(OverscanError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if let Some(rate) = self.dark_current_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(OverscanError::InvalidConfig(format!(
                    "dark_current_rate must be a finite non-negative number, got {rate}"
                )));
            }
        }
        if self.tail_window == 0 {
            return Err(OverscanError::InvalidConfig(
                "tail_window must be at least 1".into(),
            ));
        }
        if self.large_offset_threshold < self.consistency_tolerance {
            return Err(OverscanError::InvalidConfig(format!(
                "large_offset_threshold ({}) is below consistency_tolerance ({})",
                self.large_offset_threshold, self.consistency_tolerance
            )));
        }
        Ok(())
    }

    /// Flatness tolerance for a plateau at `level`.
    pub fn tolerance_at(&self, level: f64) -> f64 {
        self.uniformity_tolerance
            .max(self.relative_tolerance * level.abs())
    }
}
