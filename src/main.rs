use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use seat_sentinel::{logger, Config, Landmark, PostureAnalyzer, ViewMode};

/// Seat adjustment advice for one frame of pose landmarks.
#[derive(Parser, Debug)]
#[command(name = "seat-sentinel", version, about)]
struct Cli {
    /// JSON array of landmarks; reads stdin when omitted or "-"
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Camera view: front or side (defaults to the config value)
    #[arg(short, long)]
    mode: Option<ViewMode>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the default configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn read_frame(input: Option<&PathBuf>) -> Result<Vec<Landmark>> {
    let raw = match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("reading landmarks from {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading landmarks from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("parsing landmark JSON")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if let Some(path) = &cli.write_config {
        Config::default()
            .save(path)
            .with_context(|| format!("writing config to {}", path.display()))?;
        tracing::info!("wrote default config to {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    let mode = cli.mode.unwrap_or(config.default_mode);

    let landmarks = read_frame(cli.input.as_ref())?;
    tracing::debug!(count = landmarks.len(), %mode, "analysing frame");

    let analyzer = PostureAnalyzer::from_config(&config);
    let result = analyzer.analyze(&landmarks, mode)?;
    if result.is_none() {
        tracing::info!("body not visible enough to analyse");
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
