//! Galleon - Main entry point
//!
//! Interactive viewer for a glTF ship model: hover and click parts for their
//! metadata, disassemble the hull into an exploded layout, orbit and zoom.

mod app;
mod disassembly;
mod interaction;
mod model;
mod scene;
mod ui;

use anyhow::Result;
use clap::Parser;
use galleon_core::PartCatalog;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "galleon")]
#[command(about = "Interactive 3D ship model viewer")]
#[command(version)]
struct Args {
    /// Model file to load, relative to the assets directory
    #[arg(short, long, default_value = "ship.glb")]
    model: String,

    /// Part catalog TOML file (defaults to the built-in ship catalog)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print the part catalog as JSON and exit
    #[arg(long)]
    list_parts: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Galleon v{}", env!("CARGO_PKG_VERSION"));

    let catalog = match &args.catalog {
        Some(path) => PartCatalog::from_file(path)?,
        None => PartCatalog::builtin(),
    };

    if args.list_parts {
        let mut parts: Vec<_> = catalog.iter().collect();
        parts.sort_by(|a, b| a.id.cmp(&b.id));
        println!("{}", serde_json::to_string_pretty(&parts)?);
        return Ok(());
    }

    info!(model = %args.model, catalog_parts = catalog.len(), "Starting viewer");

    app::run(
        app::ViewerConfig {
            model_path: args.model,
        },
        catalog,
    );

    Ok(())
}
