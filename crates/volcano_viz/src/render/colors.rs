use image::Rgba;

/// Fixed colors
pub struct Colors;

impl Colors {
    pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    pub const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);
    pub const DARK_GRAY: Rgba<u8> = Rgba([64, 64, 64, 255]);
}

/// ColorBrewer YlOrRd, 9 classes, light to dark
const YLORRD: [[u8; 3]; 9] = [
    [0xff, 0xff, 0xcc],
    [0xff, 0xed, 0xa0],
    [0xfe, 0xd9, 0x76],
    [0xfe, 0xb2, 0x4c],
    [0xfd, 0x8d, 0x3c],
    [0xfc, 0x4e, 0x2a],
    [0xe3, 0x1a, 0x1c],
    [0xbd, 0x00, 0x26],
    [0x80, 0x00, 0x26],
];

/// Sample YlOrRd at `t` (clamped to [0, 1]) with linear interpolation between stops
pub fn ylorrd(t: f64) -> [u8; 3] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (YLORRD.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(YLORRD.len() - 1);
    let frac = pos - lo as f64;

    let mut out = [0u8; 3];
    for (c, o) in out.iter_mut().enumerate() {
        let a = YLORRD[lo][c] as f64;
        let b = YLORRD[hi][c] as f64;
        *o = (a + (b - a) * frac).round() as u8;
    }
    out
}

/// Linear normalization of VEI onto the colormap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VeiNorm {
    pub min: u8,
    pub max: u8,
}

impl VeiNorm {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Degenerate range maps everything to 0
    pub fn normalize(&self, vei: u8) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        (vei as f64 - self.min as f64) / (self.max as f64 - self.min as f64)
    }

    pub fn color(&self, vei: u8, alpha: f32) -> Rgba<u8> {
        let [r, g, b] = ylorrd(self.normalize(vei));
        Rgba([r, g, b, alpha_to_u8(alpha)])
    }
}

#[inline]
pub fn alpha_to_u8(alpha: f32) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}
