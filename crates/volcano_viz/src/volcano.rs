use crate::constants::VISUAL_SCALE;
use serde::Serialize;

/// Derived marker size; depends on VEI only.
#[inline]
pub fn visual_size(vei: u8) -> u32 {
    (u32::from(vei) + 1) * VISUAL_SCALE
}

/// One cleaned volcano record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Volcano {
    /// position among the data rows of the input file (0-based)
    #[serde(skip)]
    pub index: usize,
    #[serde(rename = "Volcano")]
    pub name: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Max VEI")]
    pub vei: u8,
    #[serde(rename = "Visual")]
    pub visual: u32,
}

impl Volcano {
    pub fn new(index: usize, name: impl Into<String>, latitude: f64, longitude: f64, vei: u8) -> Self {
        Self {
            index,
            name: name.into(),
            latitude,
            longitude,
            vei,
            visual: visual_size(vei),
        }
    }

    /// (x, y) = (longitude, latitude)
    pub fn position(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}
