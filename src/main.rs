use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use linklux::app::{App, AppEvent, Capabilities};
use linklux::clipboard::SystemClipboard;
use linklux::config::Config;
use linklux::keybindings::KeybindingRegistry;
use linklux::logging::init_logging;
use linklux::shortcode::RandomCodes;
use linklux::timer::TokioScheduler;
use linklux::ui;

/// Get the config directory path (~/.config/linklux/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("linklux");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(
    name = "linklux",
    version,
    about = "Premium link shortening, reimagined (simulated, nothing leaves your machine)"
)]
struct Args {
    /// Config file (default: ~/.config/linklux/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Display domain for short links
    #[arg(long, value_name = "DOMAIN")]
    domain: Option<String>,

    /// Simulated shortening delay in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Seed the short-code generator for reproducible codes
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Append logs to this file (logs are discarded otherwise)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref())?;

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // CLI flags win over the config file
    if let Some(domain) = args.domain {
        config.domain = domain;
    }
    if let Some(delay_ms) = args.delay_ms {
        config.shorten_delay_ms = delay_ms;
    }
    config.validate().context("Invalid command-line override")?;

    // Surface keybinding problems before the alternate screen hides stderr
    for warning in KeybindingRegistry::new().apply_overrides(&config.keybindings) {
        eprintln!("Warning: {}", warning);
    }

    let codes = match args.seed {
        Some(seed) => {
            tracing::info!(seed, "Using seeded short-code generator");
            RandomCodes::seeded(seed, config.code_length)
        }
        None => RandomCodes::from_entropy(config.code_length),
    };

    // Timer deliveries flow back to the UI loop through this channel
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    let capabilities = Capabilities {
        scheduler: Box::new(TokioScheduler::new(event_tx)),
        clipboard: Box::new(SystemClipboard::new()),
        codes: Box::new(codes),
    };
    let mut app = App::new(&config, capabilities);

    ui::run(&mut app, event_rx).await?;

    Ok(())
}
