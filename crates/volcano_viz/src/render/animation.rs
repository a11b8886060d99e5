use crate::events::Event;
use crate::volcano::Volcano;

use super::canvas::FrameRenderer;
use super::colors::VeiNorm;

use image::RgbaImage;
use log::debug;
use rand::Rng;

/// Everything made visible so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    revealed: Vec<usize>,
    lines: Vec<(usize, usize, u8)>,
}

impl Scene {
    pub fn apply(&mut self, event: &Event) {
        match *event {
            Event::Reveal { volcano } => self.revealed.push(volcano),
            Event::Connect { from, to, vei } => self.lines.push((from, to, vei)),
        }
    }

    /// Record positions in reveal order
    pub fn revealed(&self) -> &[usize] {
        &self.revealed
    }

    /// (from, to, vei) in emission order
    pub fn lines(&self) -> &[(usize, usize, u8)] {
        &self.lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    /// `frame` is the next frame to build
    Building { frame: usize },
    Done,
}

/// One frame per event, each a full redraw of the accumulated scene.
pub struct StagedAnimation<'a, R: Rng> {
    renderer: &'a FrameRenderer,
    volcanoes: &'a [Volcano],
    events: &'a [Event],
    norm: VeiNorm,
    scene: Scene,
    state: AnimationState,
    rng: R,
}

impl<'a, R: Rng> StagedAnimation<'a, R> {
    pub fn new(
        renderer: &'a FrameRenderer,
        volcanoes: &'a [Volcano],
        events: &'a [Event],
        rng: R,
    ) -> Self {
        let min = volcanoes.iter().map(|v| v.vei).min().unwrap_or(0);
        let max = volcanoes.iter().map(|v| v.vei).max().unwrap_or(0);
        Self {
            renderer,
            volcanoes,
            events,
            norm: VeiNorm::new(min, max),
            scene: Scene::default(),
            state: AnimationState::Idle,
            rng,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn frame_count(&self) -> usize {
        self.events.len()
    }
}

impl<R: Rng> Iterator for StagedAnimation<'_, R> {
    type Item = RgbaImage;

    fn next(&mut self) -> Option<RgbaImage> {
        let frame = match self.state {
            AnimationState::Idle => 0,
            AnimationState::Building { frame } => frame,
            AnimationState::Done => return None,
        };

        let Some(event) = self.events.get(frame) else {
            self.state = AnimationState::Done;
            return None;
        };

        self.scene.apply(event);
        let total = self.events.len();
        let title = format!("Volcano Constellation Sequence (Event {}/{})", frame + 1, total);
        let image = self
            .renderer
            .draw(&self.scene, self.volcanoes, &self.norm, &title, &mut self.rng);

        self.state = if frame + 1 < total {
            AnimationState::Building { frame: frame + 1 }
        } else {
            AnimationState::Done
        };
        if frame % 50 == 0 || frame + 1 == total {
            debug!("rendered frame {}/{}", frame + 1, total);
        }

        Some(image)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.state {
            AnimationState::Idle => self.events.len(),
            AnimationState::Building { frame } => self.events.len().saturating_sub(frame),
            AnimationState::Done => 0,
        };
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for StagedAnimation<'_, R> {}
