use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use overscan_core::config::AnalyzerConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the default AnalyzerConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let toml_str = toml::to_string_pretty(&AnalyzerConfig::default())?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}

/// Read an AnalyzerConfig from TOML, or fall back to defaults.
pub fn load(path: Option<&Path>) -> Result<AnalyzerConfig> {
    let Some(path) = path else {
        return Ok(AnalyzerConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: AnalyzerConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(config)
}
