use crate::{
    config::AnimationConfig,
    constants::{
        LABEL_FONT_SIZE, LAT_MAX, LAT_MIN, LON_MAX, LON_MIN, MARGIN_BOTTOM, MARGIN_LEFT,
        MARGIN_RIGHT, MARGIN_TOP, POINTS_TO_PX, TITLE_FONT_SIZE,
    },
    volcano::Volcano,
};

use super::animation::Scene;
use super::colors::{Colors, VeiNorm};

use ab_glyph::{FontVec, PxScale};
use font_kit::{family_name::FamilyName, properties::Properties, source::SystemSource};
use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::{
    drawing::{
        Blend, draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut,
        draw_text_mut, text_size,
    },
    rect::Rect,
};
use log::warn;
use rand::Rng;

/// Pixel rectangle the lon/lat extent is mapped onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PlotArea {
    pub fn for_canvas(width: u32, height: u32) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: width as f32 - MARGIN_LEFT - MARGIN_RIGHT,
            height: height as f32 - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    /// (longitude, latitude) -> pixel, y axis flipped
    #[inline]
    pub fn to_px(&self, lon: f64, lat: f64) -> (f32, f32) {
        let fx = (lon - LON_MIN) / (LON_MAX - LON_MIN);
        let fy = (LAT_MAX - lat) / (LAT_MAX - LAT_MIN);
        (
            self.left + fx as f32 * self.width,
            self.top + fy as f32 * self.height,
        )
    }

    /// `to_px` held within one plot size of the plot area, so imageproc's
    /// integer arithmetic cannot overflow on far-off points. None for NaN.
    pub fn to_px_bounded(&self, lon: f64, lat: f64) -> Option<(f32, f32)> {
        let (x, y) = self.to_px(lon, lat);
        if x.is_nan() || y.is_nan() {
            return None;
        }
        Some((
            x.clamp(self.left - self.width, self.left + 2.0 * self.width),
            y.clamp(self.top - self.height, self.top + 2.0 * self.height),
        ))
    }
}

/// Marker radius in px for a matplotlib-style marker area `visual` (points^2)
#[inline]
pub fn marker_radius(visual: u32, scale: f32) -> i32 {
    let diameter_pt = (visual as f32).sqrt();
    ((diameter_pt / 2.0 * POINTS_TO_PX * scale).round() as i32).max(1)
}

/// Draws whole frames from a `Scene`
pub struct FrameRenderer {
    pub width: u32,
    pub height: u32,
    pub plot: PlotArea,
    settings: AnimationConfig,
    font: Option<FontVec>,
}

impl FrameRenderer {
    /// Renderer with a system font for titles and labels. Falls back to
    /// text-less frames when no font is available.
    pub fn new(settings: &AnimationConfig) -> Self {
        let font = load_system_font();
        if font.is_none() {
            warn!("No system font found; frames will be rendered without text");
        }
        Self::with_font(settings, font)
    }

    pub fn without_font(settings: &AnimationConfig) -> Self {
        Self::with_font(settings, None)
    }

    fn with_font(settings: &AnimationConfig, font: Option<FontVec>) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            plot: PlotArea::for_canvas(settings.width, settings.height),
            settings: settings.clone(),
            font,
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Redraws the full scene. Marker alphas are re-drawn from `rng` on every call.
    pub fn draw<R: Rng>(
        &self,
        scene: &Scene,
        volcanoes: &[Volcano],
        norm: &VeiNorm,
        title: &str,
        rng: &mut R,
    ) -> RgbaImage {
        let mut canvas = Blend(ImageBuffer::from_pixel(self.width, self.height, Colors::BLACK));

        self.draw_axes(&mut canvas, title);

        let line_alpha = self.settings.line_alpha;
        for &(from, to, vei) in scene.lines() {
            let (Some(a), Some(b)) = (volcanoes.get(from), volcanoes.get(to)) else {
                continue;
            };
            let (Some(start), Some(end)) = (
                self.plot.to_px_bounded(a.longitude, a.latitude),
                self.plot.to_px_bounded(b.longitude, b.latitude),
            ) else {
                continue;
            };
            self.draw_thick_line(&mut canvas, start, end, norm.color(vei, line_alpha));
        }

        // markers above lines
        let (alpha_min, alpha_max) = (self.settings.alpha_min, self.settings.alpha_max);
        for &i in scene.revealed() {
            let Some(v) = volcanoes.get(i) else {
                continue;
            };
            let alpha = rng.gen_range(alpha_min..=alpha_max);
            let Some((x, y)) = self.plot.to_px_bounded(v.longitude, v.latitude) else {
                continue;
            };
            draw_filled_circle_mut(
                &mut canvas,
                (x.round() as i32, y.round() as i32),
                marker_radius(v.visual, self.settings.marker_scale),
                norm.color(v.vei, alpha),
            );
        }

        canvas.0
    }

    fn draw_axes(&self, canvas: &mut Blend<RgbaImage>, title: &str) {
        let p = &self.plot;
        let frame = Rect::at(p.left as i32, p.top as i32).of_size(p.width as u32, p.height as u32);
        draw_hollow_rect_mut(canvas, frame, Colors::DARK_GRAY);

        let Some(font) = &self.font else {
            return;
        };

        let title_scale = PxScale::from(TITLE_FONT_SIZE);
        let (tw, th) = text_size(title_scale, font, title);
        let tx = (self.width as i32 - tw as i32) / 2;
        let ty = ((p.top - th as f32) / 2.0) as i32;
        draw_text_mut(canvas, Colors::WHITE, tx, ty, title_scale, font, title);

        let label_scale = PxScale::from(LABEL_FONT_SIZE);
        let (lw, _) = text_size(label_scale, font, "Longitude");
        let lx = (p.left + (p.width - lw as f32) / 2.0) as i32;
        let ly = (p.top + p.height + 22.0) as i32;
        draw_text_mut(canvas, Colors::GRAY, lx, ly, label_scale, font, "Longitude");
        let lat_y = (p.top - 18.0) as i32;
        draw_text_mut(canvas, Colors::GRAY, 4, lat_y, label_scale, font, "Latitude");

        for lon in [-180.0, -90.0, 0.0, 90.0, 180.0] {
            let (x, y) = p.to_px(lon, LAT_MIN);
            let text = format!("{lon}");
            let (w, _) = text_size(label_scale, font, &text);
            draw_text_mut(
                canvas,
                Colors::DARK_GRAY,
                x as i32 - w as i32 / 2,
                y as i32 + 4,
                label_scale,
                font,
                &text,
            );
        }
        for lat in [-90.0, -45.0, 0.0, 45.0, 90.0] {
            let (x, y) = p.to_px(LON_MIN, lat);
            let text = format!("{lat}");
            let (w, h) = text_size(label_scale, font, &text);
            draw_text_mut(
                canvas,
                Colors::DARK_GRAY,
                x as i32 - w as i32 - 6,
                y as i32 - h as i32 / 2,
                label_scale,
                font,
                &text,
            );
        }
    }

    /// `line_width` parallel 1px segments offset along the normal
    fn draw_thick_line(
        &self,
        canvas: &mut Blend<RgbaImage>,
        start: (f32, f32),
        end: (f32, f32),
        color: Rgba<u8>,
    ) {
        let strokes = self.settings.line_width.round().max(1.0) as i32;
        let (dx, dy) = (end.0 - start.0, end.1 - start.1);
        let len = (dx * dx + dy * dy).sqrt();
        let (nx, ny) = if len > f32::EPSILON {
            (-dy / len, dx / len)
        } else {
            (0.0, 0.0)
        };

        for k in 0..strokes {
            let offset = k as f32 - (strokes - 1) as f32 / 2.0;
            draw_line_segment_mut(
                canvas,
                (start.0 + nx * offset, start.1 + ny * offset),
                (end.0 + nx * offset, end.1 + ny * offset),
                color,
            );
        }
    }
}

/// First available font among a few common families
fn load_system_font() -> Option<FontVec> {
    let source = SystemSource::new();

    let font_families = [
        FamilyName::Title("Arial".to_string()),
        FamilyName::Title("Helvetica".to_string()),
        FamilyName::Title("DejaVu Sans".to_string()),
        FamilyName::SansSerif,
    ];

    for family in font_families {
        if let Ok(handle) = source.select_best_match(&[family], &Properties::new())
            && let Ok(font_kit_font) = handle.load()
            && let Some(font_bytes) = font_kit_font.copy_font_data()
            && let Ok(font) = FontVec::try_from_vec(font_bytes.to_vec())
        {
            return Some(font);
        }
    }

    None
}
