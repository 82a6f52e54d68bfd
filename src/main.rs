//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `link_bypass` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::io::Read;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use link_bypass::app::{print_batch_summary, print_error_statistics};
use link_bypass::initialization::init_logger_with;
use link_bypass::{extract_urls, format_report, Config, Resolver};

/// Resolve shortened URLs found in text to their final destinations.
#[derive(Debug, Parser)]
#[command(name = "link_bypass", version, about)]
struct Cli {
    /// Text containing URLs; read from stdin when omitted
    text: Vec<String>,

    /// Print results as JSON instead of the reply text
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    config: Config,
}

fn read_input(text: &[String]) -> Result<String> {
    if !text.is_empty() {
        return Ok(text.join(" "));
    }
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read text from stdin")?;
    Ok(input)
}

async fn run(cli: Cli) -> Result<()> {
    let input = read_input(&cli.text)?;
    let urls = extract_urls(&input);
    if urls.is_empty() {
        info!("No URLs found in input");
        return Ok(());
    }
    info!("Resolving {} URL{}", urls.len(), if urls.len() == 1 { "" } else { "s" });

    let resolver = Resolver::from_config(&cli.config).context("Failed to initialize resolver")?;

    let start = Instant::now();
    let entries = resolver.resolve_batch(urls).await;

    if cli.json {
        let json = serde_json::to_string_pretty(&entries).context("Failed to serialize results")?;
        println!("{json}");
    } else {
        println!("{}", format_report(&entries));
    }

    print_error_statistics(resolver.stats());
    print_batch_summary(&entries, start.elapsed().as_secs_f64());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try the current directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    let log_level = cli.config.log_level.clone();
    let log_format = cli.config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("link_bypass error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
