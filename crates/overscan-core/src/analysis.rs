use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AnalyzerConfig;
use crate::error::{OverscanError, Result};
use crate::frame::{FrameImage, FrameKind};
use crate::plateau::{find_plateau, PlateauEstimate};
use crate::profile::{compute_profile, ProfileVector};
use crate::region::{Axis, OverscanRegion};
use crate::stats::mean;

/// Why an overscan region was judged usable or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rationale {
    /// Plateau is flat and agrees across frame kinds.
    Uniform,
    /// Leakage from the illuminated area covers (almost) the whole band.
    LightLeakage,
    /// A dark plateau sits above bias by the expected dark signal.
    /// The overscan still corrects bias and dark together.
    DarkCurrentDominant,
    /// Plateau level shifts with frame kind by more than the offset threshold.
    LargeFrameOffset,
    /// Not enough reference frames, or an offset between the two thresholds.
    Unknown,
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "Uniform"),
            Self::LightLeakage => write!(f, "Light Leakage"),
            Self::DarkCurrentDominant => write!(f, "Dark Current Dominant"),
            Self::LargeFrameOffset => write!(f, "Large Frame Offset"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Plateau of one reference frame compared against the analyzed frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferencePlateau {
    pub kind: FrameKind,
    pub level: f64,
    pub exposure_time_s: Option<f64>,
    /// Set when the level is accounted for by dark current over bias.
    pub dark_current_explained: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsabilityVerdict {
    pub usable: bool,
    /// First usable overscan line; only present when `usable`.
    pub effective_start: Option<usize>,
    pub rationale: Rationale,
    /// Plateau of the analyzed frame, reported whether usable or not.
    pub plateau: PlateauEstimate,
    /// Reference plateaus, in the order the references were supplied.
    pub references: Vec<ReferencePlateau>,
}

impl UsabilityVerdict {
    pub fn plateau_level(&self) -> f64 {
        self.plateau.level
    }
}

/// Judges whether the overscan band of a frame can be used for bias
/// correction. Holds only configuration; every call is independent.
#[derive(Clone, Debug, Default)]
pub struct OverscanAnalyzer {
    config: AnalyzerConfig,
}

impl OverscanAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Profile the frame and judge its overscan on its own.
    ///
    /// Without reference frames only leakage can be detected; a flat
    /// plateau is reported as `Uniform`.
    pub fn analyze(
        &self,
        frame: &FrameImage,
        nominal_start: usize,
        axis: Axis,
    ) -> Result<(ProfileVector, UsabilityVerdict)> {
        self.run(frame, nominal_start, axis, None)
    }

    /// Profile the frame and classify its plateau against frames of other
    /// kinds (bias, dark, flat, science) read out with the same geometry.
    ///
    /// Missing comparison kinds do not fail the call: the rationale falls
    /// back to `Unknown`.
    pub fn analyze_with_references(
        &self,
        frame: &FrameImage,
        nominal_start: usize,
        axis: Axis,
        references: &[FrameImage],
    ) -> Result<(ProfileVector, UsabilityVerdict)> {
        self.run(frame, nominal_start, axis, Some(references))
    }

    fn run(
        &self,
        frame: &FrameImage,
        nominal_start: usize,
        axis: Axis,
        references: Option<&[FrameImage]>,
    ) -> Result<(ProfileVector, UsabilityVerdict)> {
        let region = OverscanRegion::new(frame, nominal_start, axis)?;
        let profile = compute_profile(frame, axis)?;
        let plateau = find_plateau(&profile, &region, &self.config)?;

        // References are validated even when leakage already decides the verdict.
        let mut refs = match references {
            None => Vec::new(),
            Some(references) => references
                .iter()
                .map(|r| self.reference_plateau(frame, r, &region))
                .collect::<Result<Vec<_>>>()?,
        };

        let verdict = if self.is_leakage(&region, &plateau) {
            UsabilityVerdict {
                usable: false,
                effective_start: None,
                rationale: Rationale::LightLeakage,
                plateau,
                references: refs,
            }
        } else {
            let rationale = if references.is_none() {
                Rationale::Uniform
            } else {
                match self.classify(frame, &plateau, &mut refs) {
                    Ok(rationale) => rationale,
                    Err(e @ OverscanError::InsufficientReferenceFrames { .. }) => {
                        warn!(error = %e, "Overscan classification downgraded");
                        Rationale::Unknown
                    }
                    Err(e) => return Err(e),
                }
            };
            let usable = rationale != Rationale::LargeFrameOffset;
            UsabilityVerdict {
                usable,
                effective_start: usable.then_some(plateau.effective_start),
                rationale,
                plateau,
                references: refs,
            }
        };

        info!(
            kind = %frame.kind(),
            axis = %axis,
            nominal = nominal_start,
            effective = verdict.plateau.effective_start,
            usable = verdict.usable,
            rationale = %verdict.rationale,
            "Overscan analyzed"
        );
        Ok((profile, verdict))
    }

    fn is_leakage(&self, region: &OverscanRegion, plateau: &PlateauEstimate) -> bool {
        plateau.effective_start > region.nominal_start
            && plateau.width(region) <= self.config.leakage_margin
    }

    fn reference_plateau(
        &self,
        frame: &FrameImage,
        reference: &FrameImage,
        region: &OverscanRegion,
    ) -> Result<ReferencePlateau> {
        if reference.unit() != frame.unit() {
            return Err(OverscanError::IncompatibleReference(format!(
                "{} reference is in {}, analyzed frame is in {}",
                reference.kind(),
                reference.unit(),
                frame.unit()
            )));
        }
        let extent = reference.extent(region.axis);
        if extent != region.extent {
            return Err(OverscanError::IncompatibleReference(format!(
                "{} reference has {} {}, analyzed frame has {}",
                reference.kind(),
                extent,
                region.axis.to_string().to_lowercase(),
                region.extent
            )));
        }

        let ref_region = OverscanRegion::new(reference, region.nominal_start, region.axis)?;
        let profile = compute_profile(reference, region.axis)?;
        let plateau = find_plateau(&profile, &ref_region, &self.config)?;
        Ok(ReferencePlateau {
            kind: reference.kind(),
            level: plateau.level,
            exposure_time_s: reference.exposure_time(),
            dark_current_explained: false,
        })
    }

    /// Compare plateau levels across frame kinds.
    ///
    /// Darks whose excess over the bias plateau matches the configured dark
    /// current are set aside first; the spread of the remaining levels then
    /// decides between `Uniform`, `Unknown` and `LargeFrameOffset`.
    fn classify(
        &self,
        frame: &FrameImage,
        plateau: &PlateauEstimate,
        refs: &mut [ReferencePlateau],
    ) -> Result<Rationale> {
        let other_kinds = refs.iter().filter(|r| r.kind != frame.kind()).count();
        if other_kinds == 0 {
            return Err(OverscanError::InsufficientReferenceFrames {
                needed: 1,
                supplied: other_kinds,
            });
        }

        // Index 0 is the analyzed frame itself.
        let mut entries: Vec<ReferencePlateau> = std::iter::once(ReferencePlateau {
            kind: frame.kind(),
            level: plateau.level,
            exposure_time_s: frame.exposure_time(),
            dark_current_explained: false,
        })
        .chain(refs.iter().cloned())
        .collect();

        let bias_levels: Vec<f64> = entries
            .iter()
            .filter(|e| e.kind == FrameKind::Bias)
            .map(|e| e.level)
            .collect();

        let mut dark_explained = false;
        if let Some(rate) = self
            .config
            .dark_current_rate
            .filter(|_| !bias_levels.is_empty())
        {
            let bias = mean(&bias_levels);
            for entry in entries.iter_mut().filter(|e| e.kind == FrameKind::Dark) {
                let Some(exposure) = entry.exposure_time_s else {
                    continue;
                };
                let excess = entry.level - bias;
                let expected = rate * exposure;
                if excess > self.config.consistency_tolerance
                    && (excess - expected).abs() <= self.config.dark_current_tolerance
                {
                    entry.dark_current_explained = true;
                    dark_explained = true;
                }
            }
        }

        for (r, entry) in refs.iter_mut().zip(entries.iter().skip(1)) {
            r.dark_current_explained = entry.dark_current_explained;
        }

        let remaining: Vec<f64> = entries
            .iter()
            .filter(|e| !e.dark_current_explained)
            .map(|e| e.level)
            .collect();
        let spread = if remaining.is_empty() {
            0.0
        } else {
            let lo = remaining.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = remaining.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            hi - lo
        };

        let rationale = if spread > self.config.large_offset_threshold {
            Rationale::LargeFrameOffset
        } else if spread <= self.config.consistency_tolerance {
            if dark_explained {
                Rationale::DarkCurrentDominant
            } else {
                Rationale::Uniform
            }
        } else {
            Rationale::Unknown
        };
        Ok(rationale)
    }
}

/// One-shot analysis with an explicit configuration.
pub fn analyze(
    frame: &FrameImage,
    nominal_start: usize,
    axis: Axis,
    config: &AnalyzerConfig,
) -> Result<(ProfileVector, UsabilityVerdict)> {
    OverscanAnalyzer::new(config.clone())?.analyze(frame, nominal_start, axis)
}
