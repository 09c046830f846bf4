use eframe::egui;

use ncat_dashboard::config::DashboardConfig;
use ncat_dashboard::data::model::YearWindow;
use ncat_dashboard::data::Catalog;

use crate::state::AppState;
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NcatDashboardApp {
    pub state: AppState,
}

impl NcatDashboardApp {
    pub fn new(catalog: Catalog, config: DashboardConfig, full_years: YearWindow) -> Self {
        Self {
            state: AppState::new(catalog, &config, full_years),
        }
    }
}

impl eframe::App for NcatDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: page and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and tables ----
        egui::CentralPanel::default().show(ctx, |ui| {
            pages::central_panel(ui, &mut self.state);
        });
    }
}
