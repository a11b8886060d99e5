pub mod cli;
pub mod config;
pub mod constants;
pub mod csv_reader;
pub mod error;
pub mod events;
pub mod export;
pub mod render;
pub mod volcano;

pub use config::Config;
pub use csv_reader::{LoadOptions, LoadReport, VolcanoTable, read_volcanoes};
pub use error::{ErrorKind, Result, VizError};
pub use events::{Event, EventSummary, build_events};
pub use export::{export_to_csv, export_to_json};
pub use render::{StagedAnimation, render_animation, write_gif};
pub use volcano::{Volcano, visual_size};
