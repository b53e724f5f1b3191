use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use overscan_core::combine::{mean_combine, median_combine, sigma_clip_combine, SigmaClipParams};
use overscan_core::frame::FrameKind;
use overscan_core::io::image_io::{load_frame, save_frame};

use crate::args::{KindArg, UnitArg};

#[derive(Clone, ValueEnum)]
pub enum CombineMethodArg {
    Mean,
    Median,
    SigmaClip,
}

#[derive(Args)]
pub struct CombineArgs {
    /// Input frames, all of the same kind and size
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Kind of the input frames
    #[arg(long, value_enum, default_value = "bias")]
    pub kind: KindArg,

    /// Unit of the pixel values
    #[arg(long, value_enum, default_value = "count")]
    pub unit: UnitArg,

    /// Exposure time of every input frame in seconds
    #[arg(long)]
    pub exposure: Option<f64>,

    /// Combination method
    #[arg(long, value_enum, default_value = "median")]
    pub method: CombineMethodArg,

    /// Sigma threshold for sigma-clip combination
    #[arg(long, default_value = "2.5")]
    pub sigma: f64,

    /// Output file path
    #[arg(short, long, default_value = "master.tiff")]
    pub output: PathBuf,
}

pub fn run(args: &CombineArgs) -> Result<()> {
    let kind = FrameKind::from(args.kind);

    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Loading [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let mut frames = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let frame = load_frame(path, kind, args.unit.into(), args.exposure)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        frames.push(frame);
        pb.inc(1);
    }
    pb.finish();

    let method_name = match args.method {
        CombineMethodArg::Mean => "mean",
        CombineMethodArg::Median => "median",
        CombineMethodArg::SigmaClip => "sigma-clip",
    };
    println!("Combining {} {} frames ({})...", frames.len(), kind, method_name);

    let master = match args.method {
        CombineMethodArg::Mean => mean_combine(&frames)?,
        CombineMethodArg::Median => median_combine(&frames)?,
        CombineMethodArg::SigmaClip => {
            let params = SigmaClipParams {
                sigma: args.sigma,
                ..Default::default()
            };
            sigma_clip_combine(&frames, &params)?
        }
    };

    save_frame(&master, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());
    Ok(())
}
