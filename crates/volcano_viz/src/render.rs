pub mod animation;
pub mod canvas;
pub mod colors;
pub mod gif;

pub use animation::{AnimationState, Scene, StagedAnimation};
pub use canvas::{FrameRenderer, PlotArea, marker_radius};
pub use colors::{Colors, VeiNorm, ylorrd};
pub use gif::write_gif;

use crate::config::AnimationConfig;
use crate::error::{Result, VizError};
use crate::events::Event;
use crate::volcano::Volcano;

use log::info;
use rand::Rng;
use std::path::Path;

/// Renders the staged animation for `events` and writes it as a GIF.
/// Returns the number of frames written.
pub fn render_animation<P: AsRef<Path>, R: Rng>(
    volcanoes: &[Volcano],
    events: &[Event],
    settings: &AnimationConfig,
    output: P,
    rng: R,
) -> Result<usize> {
    if events.is_empty() {
        return Err(VizError::NoData);
    }
    let renderer = FrameRenderer::new(settings);
    render_with(&renderer, volcanoes, events, settings, output, rng)
}

/// `render_animation` with a caller-supplied renderer
pub fn render_with<P: AsRef<Path>, R: Rng>(
    renderer: &FrameRenderer,
    volcanoes: &[Volcano],
    events: &[Event],
    settings: &AnimationConfig,
    output: P,
    rng: R,
) -> Result<usize> {
    if events.is_empty() {
        return Err(VizError::NoData);
    }

    let animation = StagedAnimation::new(renderer, volcanoes, events, rng);
    info!(
        "Rendering {} frames at {}x{} ({} fps)",
        animation.frame_count(),
        renderer.width,
        renderer.height,
        settings.fps
    );

    write_gif(output, animation, settings.fps, settings.gif_speed)
}
