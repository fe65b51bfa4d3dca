use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{category_color, ColorScale};
use crate::data::model::{CategoryLabel, LabeledRecord};
use crate::data::summary::{CategoryCounts, SortField};

// ---------------------------------------------------------------------------
// Category distribution (side panel)
// ---------------------------------------------------------------------------

/// Inner radius of the donut as a fraction of the outer radius.
pub const DONUT_HOLE: f32 = 0.4;

/// One wedge of the donut. `start` and `end` are fractions of a full turn,
/// clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutSlice {
    pub label: CategoryLabel,
    pub count: usize,
    pub start: f32,
    pub end: f32,
}

impl DonutSlice {
    pub fn share(&self) -> f32 {
        self.end - self.start
    }
}

/// Wedges for every present category, most frequent first.
pub fn donut_slices(counts: &CategoryCounts) -> Vec<DonutSlice> {
    let total = counts.total();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    counts
        .ordered()
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .map(|(label, count)| {
            let end = start + count as f32 / total as f32;
            let slice = DonutSlice {
                label,
                count,
                start,
                end,
            };
            start = end;
            slice
        })
        .collect()
}

/// The wedge under turn fraction `t` in `[0, 1)`.
pub fn slice_at(slices: &[DonutSlice], t: f32) -> Option<&DonutSlice> {
    slices.iter().find(|s| t < s.end).or(slices.last())
}

/// Point on a circle of `radius` at turn fraction `t` (screen y points down).
fn ring_point(center: Pos2, radius: f32, t: f32) -> Pos2 {
    center + radius * Vec2::angled(t * TAU - FRAC_PI_2)
}

/// Inverse of [`ring_point`]: turn fraction of an offset from the centre.
fn turn_fraction(offset: Vec2) -> f32 {
    ((offset.y.atan2(offset.x) + FRAC_PI_2) / TAU).rem_euclid(1.0)
}

/// Donut chart of the category distribution with percentage labels.
pub fn category_chart(ui: &mut Ui, counts: &CategoryCounts) {
    let slices = donut_slices(counts);
    if slices.is_empty() {
        ui.label("Tidak ada data");
        return;
    }

    let size = ui.available_width().min(240.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
    let center = response.rect.center();
    let outer = size * 0.5 - 4.0;
    let inner = outer * DONUT_HOLE;

    for slice in &slices {
        let color = category_color(slice.label);
        // About three degrees per quad keeps every piece convex.
        let steps = ((slice.share() * 120.0).ceil() as usize).max(1);
        for step in 0..steps {
            let t0 = slice.start + slice.share() * step as f32 / steps as f32;
            let t1 = slice.start + slice.share() * (step + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![
                    ring_point(center, outer, t0),
                    ring_point(center, outer, t1),
                    ring_point(center, inner, t1),
                    ring_point(center, inner, t0),
                ],
                color,
                Stroke::new(1.0, color),
            ));
        }
    }

    for slice in slices.iter().filter(|s| s.share() >= 0.04) {
        let mid = ring_point(center, (outer + inner) * 0.5, (slice.start + slice.end) * 0.5);
        painter.text(
            mid,
            Align2::CENTER_CENTER,
            format!("{:.1}%", slice.share() * 100.0),
            FontId::proportional(12.0),
            Color32::BLACK,
        );
    }
    painter.text(
        center,
        Align2::CENTER_CENTER,
        format!("{} data", counts.total()),
        FontId::proportional(13.0),
        ui.visuals().text_color(),
    );

    if let Some(pos) = response.hover_pos() {
        let offset = pos - center;
        let radius = offset.length();
        if radius < inner || radius > outer {
            return;
        }
        if let Some(slice) = slice_at(&slices, turn_fraction(offset)) {
            let text = format!(
                "{}: {} ({:.1}%)",
                slice.label,
                slice.count,
                slice.share() * 100.0
            );
            response.on_hover_text_at_pointer(text);
        }
    }
}

// ---------------------------------------------------------------------------
// Per-district horizontal bar charts (central panel)
// ---------------------------------------------------------------------------

/// Horizontal bars for `field`, one per district, in the order of `order`
/// (bottom to top), coloured along `scale`.
pub fn ranked_chart(
    ui: &mut Ui,
    id: &str,
    records: &[LabeledRecord],
    order: &[usize],
    field: SortField,
    scale: &ColorScale,
) {
    let values: Vec<f64> = order.iter().map(|&i| field.key(&records[i])).collect();
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let names: Vec<String> = order.iter().map(|&i| records[i].kecamatan.clone()).collect();

    let bars: Vec<Bar> = order
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(pos, (&i, &v))| {
            Bar::new(pos as f64, v)
                .name(&records[i].kecamatan)
                .fill(scale.for_value(v, min, max))
        })
        .collect();

    let height = (names.len() as f32 * 22.0).clamp(160.0, 640.0);

    Plot::new(id)
        .height(height)
        .x_axis_label(field_title(field))
        .y_axis_label("Kecamatan")
        .allow_scroll(false)
        .allow_boxed_zoom(true)
        .y_axis_formatter(move |mark, _range| axis_label(&names, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.8));
        });
}

pub fn field_title(field: SortField) -> &'static str {
    match field {
        SortField::TotalProduction => "Total Produksi",
        SortField::YieldPerArea => "Produksi per Satuan Luas",
    }
}

/// Category name for an axis tick sitting on a bar position; blank between.
pub fn axis_label(names: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    names.get(rounded as usize).cloned().unwrap_or_default()
}
