use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::{category_color, ColorScale};
use crate::data::loader::SUPPORTED_EXTENSIONS;
use crate::data::model::CategoryLabel;
use crate::data::summary::SortField;
use crate::state::{AppState, Status};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                ui.close_menu();
                open_file_dialog(state);
            }
        });

        ui.separator();

        if let Some(upload) = &state.upload {
            ui.label(format!(
                "{}: {} baris",
                upload.file_name,
                upload.analysis.records.len()
            ));
            ui.separator();
        }

        match &state.status {
            Some(Status::Success(msg)) => {
                ui.label(RichText::new(format!("✅ {msg}")).color(Color32::LIGHT_GREEN));
            }
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(format!("❌ {msg}")).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – category summary
// ---------------------------------------------------------------------------

/// Render the category distribution and per-category counts.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Distribusi Kategori Produksi");
    ui.separator();

    let Some(upload) = &state.upload else {
        ui.label("Belum ada data.");
        return;
    };
    let counts = &upload.analysis.summary.counts;

    plot::category_chart(ui, counts);

    ui.add_space(8.0);
    ui.strong("Jumlah Kategori:");
    for label in CategoryLabel::ALL {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("■").color(category_color(label)));
            ui.label(RichText::new(label.as_str()).strong());
            ui.label(format!("{} data", counts.get(label)));
        });
    }
}

// ---------------------------------------------------------------------------
// Central panel – results table and per-district charts
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(upload) = &state.upload else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload file Excel untuk memulai  (File → Open…)");
        });
        return;
    };
    let analysis = &upload.analysis;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Hasil Prediksi");
            table::results_table(ui, &analysis.records);

            ui.add_space(12.0);
            ui.heading("Total Produksi per Kecamatan");
            plot::ranked_chart(
                ui,
                "total_production_chart",
                &analysis.records,
                &analysis.summary.by_total_production,
                SortField::TotalProduction,
                &ColorScale::production(),
            );

            ui.add_space(12.0);
            ui.heading("Produksi per Satuan Luas per Kecamatan");
            plot::ranked_chart(
                ui,
                "yield_per_area_chart",
                &analysis.records,
                &analysis.summary.by_yield_per_area,
                SortField::YieldPerArea,
                &ColorScale::blues(),
            );
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload data produksi")
        .add_filter("Supported files", &SUPPORTED_EXTENSIONS)
        .add_filter("Excel", &["xlsx", "xlsm", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.ingest_file(&path);
    }
}
