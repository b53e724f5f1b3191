use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use overscan_core::analysis::{OverscanAnalyzer, UsabilityVerdict};
use overscan_core::frame::{FrameImage, FrameKind, PixelUnit};
use overscan_core::io::image_io::load_frame;
use overscan_core::profile::ProfileVector;
use overscan_core::region::Axis;
use tracing::info;

#[derive(Clone, Copy, ValueEnum)]
pub enum AxisArg {
    Columns,
    Rows,
}

impl From<AxisArg> for Axis {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::Columns => Axis::Columns,
            AxisArg::Rows => Axis::Rows,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Bias,
    Dark,
    Flat,
    Science,
}

impl From<KindArg> for FrameKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Bias => FrameKind::Bias,
            KindArg::Dark => FrameKind::Dark,
            KindArg::Flat => FrameKind::Flat,
            KindArg::Science => FrameKind::Science,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UnitArg {
    Count,
    Adu,
}

impl From<UnitArg> for PixelUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Count => PixelUnit::Count,
            UnitArg::Adu => PixelUnit::Adu,
        }
    }
}

/// Reference frames and thresholds shared by commands that run the analyzer.
#[derive(Args)]
pub struct AnalyzerArgs {
    /// Bias reference frame (repeatable)
    #[arg(long)]
    pub bias: Vec<PathBuf>,

    /// Dark reference frame (repeatable)
    #[arg(long)]
    pub dark: Vec<PathBuf>,

    /// Exposure time of the dark reference frames in seconds
    #[arg(long)]
    pub dark_exposure: Option<f64>,

    /// Flat reference frame (repeatable)
    #[arg(long)]
    pub flat: Vec<PathBuf>,

    /// Analyzer thresholds as TOML (see `overscan config`)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Expected dark current in counts per second, overrides the config
    #[arg(long)]
    pub dark_rate: Option<f64>,
}

impl AnalyzerArgs {
    pub fn analyzer(&self) -> Result<OverscanAnalyzer> {
        let mut config = crate::commands::config::load(self.config.as_deref())?;
        if self.dark_rate.is_some() {
            config.dark_current_rate = self.dark_rate;
        }
        Ok(OverscanAnalyzer::new(config)?)
    }

    pub fn load_references(&self, unit: PixelUnit) -> Result<Vec<FrameImage>> {
        let mut references = Vec::new();
        for path in &self.bias {
            references.push(load_reference(path, FrameKind::Bias, unit, None)?);
        }
        for path in &self.dark {
            references.push(load_reference(path, FrameKind::Dark, unit, self.dark_exposure)?);
        }
        for path in &self.flat {
            references.push(load_reference(path, FrameKind::Flat, unit, None)?);
        }
        info!(count = references.len(), "Reference frames loaded");
        Ok(references)
    }

    /// Analyze with references when any were given, on the frame alone otherwise.
    pub fn run(
        &self,
        frame: &FrameImage,
        nominal_start: usize,
        axis: Axis,
    ) -> Result<(ProfileVector, UsabilityVerdict)> {
        let analyzer = self.analyzer()?;
        let references = self.load_references(frame.unit())?;
        let result = if references.is_empty() {
            analyzer.analyze(frame, nominal_start, axis)?
        } else {
            analyzer.analyze_with_references(frame, nominal_start, axis, &references)?
        };
        Ok(result)
    }
}

fn load_reference(
    path: &Path,
    kind: FrameKind,
    unit: PixelUnit,
    exposure: Option<f64>,
) -> Result<FrameImage> {
    load_frame(path, kind, unit, exposure)
        .with_context(|| format!("Failed to load {} reference {}", kind, path.display()))
}
