mod args;
mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "overscan", about = "CCD overscan analysis tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile the overscan of a frame and judge whether it is usable
    Analyze(commands::analyze::AnalyzeArgs),
    /// Subtract the overscan level line by line
    Subtract(commands::subtract::SubtractArgs),
    /// Combine frames of one kind into a master frame
    Combine(commands::combine::CombineArgs),
    /// Print or save the default analyzer config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Subtract(args) => commands::subtract::run(args),
        Commands::Combine(args) => commands::combine::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract_auto_accepts_references() {
        let cli = Cli::try_parse_from([
            "overscan",
            "subtract",
            "science.tiff",
            "--start",
            "2048",
            "--auto",
            "--bias",
            "bias1.tiff",
            "--bias",
            "bias2.tiff",
            "--dark",
            "dark.tiff",
            "--dark-exposure",
            "60",
            "--dark-rate",
            "0.5",
        ])
        .unwrap();

        let Commands::Subtract(args) = cli.command else {
            panic!("expected subtract command");
        };
        assert!(args.auto);
        assert_eq!(args.analyzer.bias.len(), 2);
        assert_eq!(args.analyzer.dark.len(), 1);
        assert_eq!(args.analyzer.dark_exposure, Some(60.0));
        assert_eq!(args.analyzer.dark_rate, Some(0.5));
    }

    #[test]
    fn test_analyze_and_subtract_share_reference_flags() {
        for command in ["analyze", "subtract"] {
            let cli = Cli::try_parse_from([
                "overscan", command, "frame.png", "--start", "10", "--flat", "flat.png",
            ])
            .unwrap();
            let analyzer = match cli.command {
                Commands::Analyze(args) => args.analyzer,
                Commands::Subtract(args) => args.analyzer,
                _ => panic!("unexpected command"),
            };
            assert_eq!(analyzer.flat, vec![std::path::PathBuf::from("flat.png")]);
        }
    }
}
