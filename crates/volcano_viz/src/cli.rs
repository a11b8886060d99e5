use crate::config::Config;
use crate::constants::DEFAULT_PREVIEW_ROWS;
use crate::csv_reader::VolcanoTable;
use crate::error::Result;

use clap::Args;
use log::{info, warn};
use std::path::PathBuf;

/// Flags shared by the binaries; each one overrides the config file
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/volcano.toml")]
    pub config: PathBuf,

    /// Input CSV (overrides [data].input)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Read Latitude/Longitude as labeled instead of swapping them
    #[arg(long)]
    pub no_swap: bool,

    /// Number of cleaned rows to log before processing
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview: usize,
}

impl CommonArgs {
    /// Config file if present, defaults otherwise, with CLI overrides applied
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = if self.config.exists() {
            let config = Config::load_from_file(&self.config)?;
            info!("Loaded configuration from {}", self.config.display());
            config
        } else {
            warn!(
                "Config file not found: {}, using default settings",
                self.config.display()
            );
            Config::default()
        };

        if let Some(input) = &self.input {
            config.data.input = input.clone();
        }
        if self.no_swap {
            config.data.swap_coordinates = false;
        }
        Ok(config)
    }
}

/// Logs the first `rows` records of the table
pub fn log_preview(table: &VolcanoTable, rows: usize) {
    if rows == 0 {
        return;
    }
    info!("--- Preview (first {} rows) ---", rows.min(table.len()));
    info!(
        "{:<32} {:>9} {:>10} {:>7} {:>6}",
        "Volcano", "Latitude", "Longitude", "Max VEI", "Visual"
    );
    for v in table.preview(rows) {
        info!(
            "{:<32} {:>9.3} {:>10.3} {:>7} {:>6}",
            v.name, v.latitude, v.longitude, v.vei, v.visual
        );
    }
}
