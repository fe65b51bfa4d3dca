use eframe::egui;

use crate::ml::ArtifactStore;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HarvestLensApp {
    pub state: AppState,
}

impl HarvestLensApp {
    pub fn new(artifacts: ArtifactStore) -> Self {
        Self {
            state: AppState::new(artifacts),
        }
    }
}

impl eframe::App for HarvestLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: category summary ----
        egui::SidePanel::left("summary_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: table and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &self.state);
        });
    }
}
