//! Foodie CLI — a local recipe box.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "foodie",
    version,
    about = "Local recipe box — your recipes, your favorites, one JSON document"
)]
struct Cli {
    /// Path to foodie.yaml
    #[arg(short, long, global = true, default_value = "foodie.yaml")]
    config: PathBuf,

    /// Debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: foodie::cli::Commands,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        foodie::core::config::load_or_default(&cli.config)
            .map(|c| foodie::logging::parse_level(&c.log_level))
            .unwrap_or(tracing::Level::WARN)
    };
    foodie::logging::init(level);

    if let Err(e) = foodie::cli::dispatch(cli.command, &cli.config) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
