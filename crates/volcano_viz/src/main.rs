use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::{io::Write, path::PathBuf};

use volcano_viz::{
    EventSummary, build_events,
    cli::{CommonArgs, log_preview},
    error::exit_code_of,
    export_to_csv, export_to_json, read_volcanoes, render_animation,
};

#[derive(Parser)]
#[command(author, version, about = "Render volcanoes as a staged constellation GIF", long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Output GIF path (overrides [output].gif)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Frame rate (overrides [animation].fps)
    #[arg(long)]
    fps: Option<u32>,
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
    let mut config = args.common.resolve_config()?;
    if let Some(output) = &args.output {
        config.output.gif = output.clone();
    }
    if let Some(fps) = args.fps {
        config.animation.fps = fps;
    }
    config.validate()?;

    let table = read_volcanoes(&config.data.input, &config.data.load_options())
        .with_context(|| format!("loading {}", config.data.input.display()))?;
    info!("--- Data loaded for staged animation ---");
    log_preview(&table, args.common.preview);

    if let Some(csv_path) = &config.output.csv {
        export_to_csv(&table, csv_path)?;
        info!("Wrote CSV to: {}", csv_path.display());
    }
    if let Some(json_path) = &config.output.json {
        export_to_json(&table, json_path)?;
        info!("Wrote JSON to: {}", json_path.display());
    }

    let events = build_events(table.volcanoes());
    let summary = EventSummary::of(&events);
    info!(
        "--- Created {} animation events ({} reveals, {} connections) ---",
        summary.total(),
        summary.reveals,
        summary.connects
    );

    info!("--- Starting staged animation rendering (this may take a while)... ---");
    render_animation(
        table.volcanoes(),
        &events,
        &config.animation,
        &config.output.gif,
        rand::thread_rng(),
    )?;

    info!("GIF saved to: {}", config.output.gif.display());
    Ok(())
}
