use anyhow::{Context, Result};
use eframe::egui;
use harvest_lens::app::HarvestLensApp;
use harvest_lens::{AppConfig, ArtifactStore};

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::load().context("loading configuration")?;
    // Without both artifacts there is no way to predict anything.
    let artifacts = ArtifactStore::load(&config.artifacts).context("loading model artifacts")?;
    log::info!("Artifacts ready: {artifacts:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Prediksi Produksi Pertanian",
        options,
        Box::new(move |_cc| Ok(Box::new(HarvestLensApp::new(artifacts)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard exited with an error: {e}"))
}
