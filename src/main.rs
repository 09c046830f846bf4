mod app;
mod color;
mod state;
mod ui;

use anyhow::Context;
use app::NcatDashboardApp;
use eframe::egui;

use ncat_dashboard::config::DashboardConfig;
use ncat_dashboard::data::Catalog;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env()?;
    let full_years = config.full_years()?;
    let catalog = Catalog::load().context("building the dataset catalog")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NCAT Caseload Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(NcatDashboardApp::new(catalog, config, full_years)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
