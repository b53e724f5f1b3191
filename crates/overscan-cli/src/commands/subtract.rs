use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use overscan_core::io::image_io::{load_frame, save_frame};
use overscan_core::subtract::{
    subtract_overscan, trim_overscan, OverscanStatistic, SubtractParams,
};

use crate::args::{AnalyzerArgs, AxisArg, KindArg, UnitArg};

#[derive(Clone, ValueEnum)]
pub enum StatisticArg {
    Mean,
    Median,
}

#[derive(Args)]
pub struct SubtractArgs {
    /// Input frame
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

    /// How overscan pixels of a line are combined
    #[arg(long, value_enum, default_value = "median")]
    pub statistic: StatisticArg,

    /// Remove the overscan band from the output
    #[arg(long)]
    pub trim: bool,

    /// Analyze first and subtract from the effective start past any leakage.
    /// With reference frames a frame-kind offset also blocks subtraction.
    #[arg(long)]
    pub auto: bool,

    /// Exposure time of the input frame in seconds, used with --auto
    #[arg(long)]
    pub exposure: Option<f64>,

    #[command(flatten)]
    pub analyzer: AnalyzerArgs,

    /// Output file path
    #[arg(short, long, default_value = "subtracted.tiff")]
    pub output: PathBuf,
}

pub fn run(args: &SubtractArgs) -> Result<()> {
    let frame = load_frame(&args.file, args.kind.into(), args.unit.into(), args.exposure)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let axis = args.axis.into();

    let start = if args.auto {
        let (_, verdict) = args.analyzer.run(&frame, args.start, axis)?;
        match verdict.effective_start {
            Some(start) => {
                println!(
                    "Effective overscan start: {} (nominal {})",
                    start, args.start
                );
                start
            }
            None => bail!(
                "Overscan of {} is not usable ({})",
                args.file.display(),
                verdict.rationale
            ),
        }
    } else {
        args.start
    };

    let params = SubtractParams {
        statistic: match args.statistic {
            StatisticArg::Mean => OverscanStatistic::Mean,
            StatisticArg::Median => OverscanStatistic::Median,
        },
        trim: false,
    };
    let mut result = subtract_overscan(&frame, start, axis, &params)?;
    if args.trim {
        // Leaked lines before the effective start are overscan too.
        result = trim_overscan(&result, args.start, axis)?;
    }

    save_frame(&result, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());
    Ok(())
}
