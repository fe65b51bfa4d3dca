use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

use crate::data::model::CategoryLabel;

// ---------------------------------------------------------------------------
// Category colours
// ---------------------------------------------------------------------------

/// Fixed colour for each production level.
pub fn category_color(label: CategoryLabel) -> Color32 {
    match label {
        CategoryLabel::Tinggi => Color32::from_rgb(0x90, 0xEE, 0x90),
        CategoryLabel::Sedang => Color32::from_rgb(0xFF, 0xD7, 0x00),
        CategoryLabel::Rendah => Color32::from_rgb(0xFF, 0x6F, 0x61),
    }
}

// ---------------------------------------------------------------------------
// Continuous colour scales for the bar charts
// ---------------------------------------------------------------------------

/// Piecewise-linear colour scale through evenly spaced stops.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<LinSrgb>,
}

impl ColorScale {
    pub fn new(stops: &[[u8; 3]]) -> Self {
        let stops = stops
            .iter()
            .map(|&[r, g, b]| -> LinSrgb { Srgb::new(r, g, b).into_format::<f32>().into_linear() })
            .collect();
        Self { stops }
    }

    /// Yellow → orange, used for total production.
    pub fn production() -> Self {
        Self::new(&[[0xFF, 0xF7, 0x00], [0xFF, 0xB4, 0x00], [0xFF, 0x88, 0x00]])
    }

    /// Light → dark blue, used for production per unit area.
    pub fn blues() -> Self {
        Self::new(&[[0xF7, 0xFB, 0xFF], [0x6B, 0xAE, 0xD6], [0x08, 0x30, 0x6B]])
    }

    /// Colour at `t` in `[0, 1]`; out-of-range values are clamped.
    pub fn at(&self, t: f64) -> Color32 {
        let Some(last) = self.stops.len().checked_sub(1) else {
            return Color32::GRAY;
        };
        if last == 0 || !t.is_finite() {
            return to_color32(self.stops[0]);
        }
        let pos = t.clamp(0.0, 1.0) as f32 * last as f32;
        let i = (pos.floor() as usize).min(last - 1);
        to_color32(self.stops[i].mix(self.stops[i + 1], pos - i as f32))
    }

    /// Colour for `value` relative to the `[min, max]` of the data shown.
    pub fn for_value(&self, value: f64, min: f64, max: f64) -> Color32 {
        let range = max - min;
        if range.abs() < f64::EPSILON {
            self.at(0.0)
        } else {
            self.at((value - min) / range)
        }
    }
}

fn to_color32(c: LinSrgb) -> Color32 {
    let srgb: Srgb<u8> = Srgb::from_linear(c);
    Color32::from_rgb(srgb.red, srgb.green, srgb.blue)
}
