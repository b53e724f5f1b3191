use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::{OverscanError, Result};
use crate::profile::ProfileVector;
use crate::region::OverscanRegion;
use crate::stats::median_in_place;

/// Where the leakage-free part of an overscan band begins, and its level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlateauEstimate {
    /// First profile index of the flat plateau. Never before the nominal start.
    pub effective_start: usize,
    /// Median of the trailing `tail_window` values of the band.
    pub level: f64,
    /// Largest absolute deviation from `level` inside the plateau.
    pub spread: f64,
    /// Flatness tolerance that was applied.
    pub tolerance: f64,
}

impl PlateauEstimate {
    /// Lines of overscan remaining from the effective start to the band end.
    pub fn width(&self, region: &OverscanRegion) -> usize {
        region.end() - self.effective_start
    }
}

/// Locate the plateau of the overscan band described by `region`.
///
/// The plateau level is the median of the last `tail_window` values, capped
/// at the trailing half of the band so leakage covering up to half of a
/// short band cannot drag the level. Moving
/// outward from the nominal start, the effective start is the first index
/// from which every value sits within tolerance of the level and every
/// successive difference is within tolerance. When no such index exists
/// the last line of the band is returned, i.e. leakage reached the edge.
pub fn find_plateau(
    profile: &ProfileVector,
    region: &OverscanRegion,
    config: &AnalyzerConfig,
) -> Result<PlateauEstimate> {
    if profile.len() != region.extent || profile.axis != region.axis {
        return Err(OverscanError::ProfileMismatch {
            profile_axis: profile.axis,
            profile_len: profile.len(),
            region_axis: region.axis,
            region_extent: region.extent,
        });
    }

    let strip = profile.tail(region.nominal_start);
    let n = strip.len();

    let window = config.tail_window.min(n.div_ceil(2));
    let mut tail = strip[n - window..].to_vec();
    let level = median_in_place(&mut tail);
    let tolerance = config.tolerance_at(level);

    // Grow the flat suffix backward until a value breaks it.
    let mut flat_from = n;
    while flat_from > 0 {
        let j = flat_from - 1;
        let near_level = (strip[j] - level).abs() <= tolerance;
        let smooth = j + 1 == n || (strip[j + 1] - strip[j]).abs() <= tolerance;
        if !(near_level && smooth) {
            break;
        }
        flat_from = j;
    }
    let offset = flat_from.min(n - 1);

    let spread = strip[offset..]
        .iter()
        .map(|v| (v - level).abs())
        .fold(0.0, f64::max);

    let estimate = PlateauEstimate {
        effective_start: region.nominal_start + offset,
        level,
        spread,
        tolerance,
    };
    debug!(
        nominal = region.nominal_start,
        effective = estimate.effective_start,
        level = estimate.level,
        tolerance,
        "Overscan plateau located"
    );
    Ok(estimate)
}
