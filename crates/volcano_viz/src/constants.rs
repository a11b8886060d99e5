/// Column headers as published in the source dataset
pub const VOLCANO_HEADER: &str = "Volcano";
pub const LATITUDE_HEADER: &str = "Latitude";
pub const LONGITUDE_HEADER: &str = "Longitude";
pub const VEI_HEADER: &str = "Max VEI";
pub const VISUAL_HEADER: &str = "Visual";

/// visual = (vei + 1) * VISUAL_SCALE
pub const VISUAL_SCALE: u32 = 50;

/// Plot extent (degrees)
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;
pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;

/// Canvas layout (px)
pub const MARGIN_LEFT: f32 = 60.0;
pub const MARGIN_RIGHT: f32 = 20.0;
pub const MARGIN_TOP: f32 = 50.0;
pub const MARGIN_BOTTOM: f32 = 45.0;
pub const TITLE_FONT_SIZE: f32 = 20.0;
pub const LABEL_FONT_SIZE: f32 = 14.0;

/// matplotlib sizes markers in points^2 at 72pt/inch on a 100dpi figure
pub const POINTS_TO_PX: f32 = 100.0 / 72.0;

/// Defaults
pub const DEFAULT_INPUT: &str = "data/output.csv";
pub const DEFAULT_GIF_OUTPUT: &str = "volcano_animation_with_lines.gif";
pub const DEFAULT_CSV_OUTPUT: &str = "data/clean.csv";
pub const DEFAULT_FPS: u32 = 15;
pub const DEFAULT_WIDTH: u32 = 900;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_PREVIEW_ROWS: usize = 10;
