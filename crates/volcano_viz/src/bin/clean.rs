use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::{io::Write, path::PathBuf};

use volcano_viz::{
    cli::{CommonArgs, log_preview},
    Config,
    constants::DEFAULT_CSV_OUTPUT,
    error::exit_code_of,
    export_to_csv, export_to_json, read_volcanoes,
};

#[derive(Parser)]
#[command(author, version, about = "Clean volcano records and export the derived table", long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Output CSV path (overrides [output].csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the records as JSON next to the CSV
    #[arg(long)]
    to_json: bool,
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            error!("Error: {e:#}");
            let _ = std::io::stderr().flush();
            std::process::exit(exit_code_of(&e));
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.common.resolve_config()?;

    let table = read_volcanoes(&config.data.input, &config.data.load_options())
        .with_context(|| format!("loading {}", config.data.input.display()))?;
    log_preview(&table, args.common.preview);

    let report = table.report();
    info!(
        "Kept {} of {} rows ({} blank, {} bad VEI, {} bad coordinates)",
        report.kept, report.total_rows, report.blank_rows, report.dropped_vei, report.dropped_coordinates
    );

    let csv_path = csv_output(args, &config);
    export_to_csv(&table, &csv_path)?;
    info!("Wrote CSV to: {}", csv_path.display());

    let json_path = if args.to_json {
        Some(csv_path.with_extension("json"))
    } else {
        config.output.json.clone()
    };
    if let Some(json_path) = json_path {
        // JSON failure is logged only
        match export_to_json(&table, &json_path) {
            Ok(()) => info!("Wrote JSON to: {}", json_path.display()),
            Err(e) => error!("Failed to write JSON: {e}"),
        }
    }

    Ok(())
}

/// `--output`, then `[output].csv`, then the default
fn csv_output(args: &Args, config: &Config) -> PathBuf {
    args.output
        .clone()
        .or_else(|| config.output.csv.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_OUTPUT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_output_precedence() {
        let mut config = Config::default();
        config.output.csv = None;

        let args = Args::parse_from(["clean"]);
        assert_eq!(csv_output(&args, &config), PathBuf::from(DEFAULT_CSV_OUTPUT));

        config.output.csv = Some(PathBuf::from("from_config.csv"));
        assert_eq!(csv_output(&args, &config), PathBuf::from("from_config.csv"));

        let args = Args::parse_from(["clean", "-o", "cli.csv"]);
        assert_eq!(csv_output(&args, &config), PathBuf::from("cli.csv"));
    }
}
