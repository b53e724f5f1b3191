use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use overscan_core::io::image_io::load_frame;

use crate::args::{AnalyzerArgs, AxisArg, KindArg, UnitArg};
use crate::summary::{print_analysis_summary, print_profile};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input frame (TIFF, PNG, ...)
    pub file: PathBuf,

    /// First nominal overscan column (or row)
    #[arg(long)]
    pub start: usize,

    /// Dimension holding the overscan band
    #[arg(long, value_enum, default_value = "columns")]
    pub axis: AxisArg,

    /// Kind of the input frame
    #[arg(long, value_enum, default_value = "science")]
    pub kind: KindArg,

    /// Unit of the pixel values
    #[arg(long, value_enum, default_value = "count")]
    pub unit: UnitArg,

    /// Exposure time of the input frame in seconds
    #[arg(long)]
    pub exposure: Option<f64>,

    #[command(flatten)]
    pub analyzer: AnalyzerArgs,

    /// Print the full overscan profile
    #[arg(long)]
    pub profile: bool,
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let frame = load_frame(&args.file, args.kind.into(), args.unit.into(), args.exposure)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let (profile, verdict) = args.analyzer.run(&frame, args.start, args.axis.into())?;

    print_analysis_summary(&args.file, &frame, args.start, &verdict);
    if args.profile {
        print_profile(&profile, args.start, &verdict);
    }
    Ok(())
}
