#![forbid(unsafe_code)]

mod config;
mod constants;
mod gui;
mod mock;
mod persistence;
mod tour;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{Level as TraceLevel, info, warn};
use tracing_subscriber::FmtSubscriber;

use config::AppConfig;
use constants::storage::COMPLETION_KEY;
use persistence::{JsonFileStore, KeyValueStore, MemoryStore};
use tour::{StepCatalog, TourStore};

#[derive(Parser, Debug)]
#[command(name = "orbit-dashboard", version, about = "Productivity dashboard with a guided walkthrough")]
struct Cli {
    /// Config file path (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,

    /// Forget that the walkthrough was completed before launching
    #[arg(long)]
    restart_tour: bool,

    /// JSON step catalog to use instead of the built-in tour
    #[arg(long)]
    tour_file: Option<PathBuf>,

    /// Keep the completion flag in memory only
    #[arg(long)]
    memory_storage: bool,
}

fn parse_level(value: &str) -> TraceLevel {
    match value.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn load_catalog(path: Option<&Path>) -> StepCatalog {
    let Some(path) = path else {
        return StepCatalog::builtin();
    };
    match StepCatalog::from_json_file(path) {
        Ok(catalog) => {
            info!(path = %path.display(), steps = catalog.len(), "Loaded tour steps");
            catalog
        }
        Err(err) => {
            warn!(error = ?err, "Falling back to built-in tour steps");
            StepCatalog::builtin()
        }
    }
}

fn open_storage(memory_only: bool) -> Box<dyn KeyValueStore> {
    if memory_only {
        info!("Using in-memory tour storage");
        return Box::new(MemoryStore::new());
    }
    match JsonFileStore::default_path() {
        Ok(path) => {
            info!(path = %path.display(), "Using file-backed tour storage");
            Box::new(JsonFileStore::new(path))
        }
        Err(err) => {
            warn!(error = %err, "No data directory, tour storage kept in memory");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let loaded = AppConfig::load(&config_path);

    // CLI flag wins over LOG_LEVEL, which wins over the config file
    let level_name = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .or_else(|| loaded.as_ref().ok().map(|c| c.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&level_name))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match loaded {
        Ok(config) => config,
        Err(err) => {
            warn!(error = ?err, "Using default config");
            AppConfig::default()
        }
    };
    info!(path = %config_path.display(), "config={:#?}", config);

    let tour_file = cli.tour_file.as_deref().or(config.tour_file.as_deref());
    let catalog = load_catalog(tour_file);

    let mut storage = open_storage(cli.memory_storage);
    if cli.restart_tour {
        match storage.clear(COMPLETION_KEY) {
            Ok(()) => info!("Walkthrough completion flag cleared"),
            Err(err) => warn!(error = %err, "Failed to clear walkthrough completion flag"),
        }
    }

    let tour = TourStore::new(catalog, storage);
    gui::run_gui(config, config_path, tour)
}
