use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::category_color;
use crate::data::model::LabeledRecord;
use crate::data::schema::{PRODUCTION_LEVEL, REGION, TOTAL_PRODUCTION, YIELD_PER_AREA};

const HEADERS: [&str; 5] = ["#", REGION, TOTAL_PRODUCTION, YIELD_PER_AREA, PRODUCTION_LEVEL];

/// Render the prediction results, label text coloured per category.
pub fn results_table(ui: &mut Ui, records: &[LabeledRecord]) {
    ui.push_id("results_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(32.0))
            .column(Column::initial(180.0).at_least(100.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(170.0))
            .column(Column::remainder().at_least(120.0))
            .max_scroll_height(320.0)
            .header(22.0, |mut header| {
                for title in HEADERS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(20.0, records.len(), |mut row| {
                    let idx = row.index();
                    let rec = &records[idx];
                    row.col(|ui: &mut Ui| {
                        ui.label(idx.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.kecamatan.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_number(rec.total_production));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_number(rec.yield_per_area));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(
                            RichText::new(rec.label.as_str())
                                .color(category_color(rec.label))
                                .strong(),
                        );
                    });
                });
            });
    });
}

/// Whole numbers without decimals, everything else with two.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
