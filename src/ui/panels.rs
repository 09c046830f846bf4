use std::collections::BTreeSet;

use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use ncat_dashboard::data::filter::CategoryScope;
use ncat_dashboard::data::model::{ListType, TableKey, FIRST_YEAR, LAST_YEAR};
use ncat_dashboard::data::views::category_labels;

use crate::state::{scope_name, AppState, Page};
use crate::ui::pages;

// ---------------------------------------------------------------------------
// Left side panel – page selector and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: page selector, then the current page's filters.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("NCAT Caseload");
    ui.separator();

    ui.strong("Page");
    let mut page = state.page;
    egui::ComboBox::from_id_salt("page")
        .selected_text(page.title())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for p in Page::ALL {
                ui.selectable_value(&mut page, p, p.title());
            }
        });
    state.set_page(page);
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.page {
            Page::Overview | Page::PartyAnalysis => {
                ui.label(format!(
                    "Averages use the full years {} to {}.",
                    state.full_years.start, state.full_years.end
                ));
            }
            Page::TenancyTrends => year_range(ui, state),
            Page::ApplicationCategories => {
                year_checkboxes(ui, "Years", FIRST_YEAR..=LAST_YEAR, &mut state.selected_years);
                ui.separator();
                let labels: Vec<String> = category_labels(&state.catalog)
                    .map(|ls| ls.into_iter().map(String::from).collect())
                    .unwrap_or_default();
                scope_selector(ui, state, &labels);
            }
            Page::PartyBreakdown => party_filters(ui, state),
            Page::GeographicDistribution => registry_filters(ui, state),
            Page::ListsComparison => list_filters(ui, state),
        });
}

fn year_range(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Year range");
    let lo = ui.add(egui::Slider::new(&mut state.trend_lo, FIRST_YEAR..=LAST_YEAR).text("from"));
    let hi = ui.add(egui::Slider::new(&mut state.trend_hi, FIRST_YEAR..=LAST_YEAR).text("to"));
    if lo.changed() || hi.changed() {
        log::debug!("trend range {}..={}", state.trend_lo, state.trend_hi);
    }
}

fn year_checkboxes(
    ui: &mut Ui,
    title: &str,
    years: impl IntoIterator<Item = i32>,
    selected: &mut BTreeSet<i32>,
) {
    ui.strong(title);
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for year in years {
            let mut checked = selected.contains(&year);
            if ui.checkbox(&mut checked, year.to_string()).changed() {
                AppState::toggle_year(selected, year);
            }
        }
    });
}

fn scope_selector(ui: &mut Ui, state: &mut AppState, labels: &[String]) {
    let Some(scope) = state.page_scope_mut() else {
        return;
    };
    ui.strong("Categories");
    let current = scope_name(scope);
    let mut choice: Option<CategoryScope> = None;
    egui::ComboBox::from_id_salt("scope")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            let custom = match &*scope {
                CategoryScope::Custom(chosen) => chosen.clone(),
                _ => labels.iter().cloned().collect(),
            };
            for option in [
                CategoryScope::All,
                CategoryScope::TerminationsOnly,
                CategoryScope::NonTerminationsOnly,
                CategoryScope::Custom(custom),
            ] {
                let name = scope_name(&option);
                if ui.selectable_label(name == current, name).clicked() {
                    choice = Some(option);
                }
            }
        });
    if let Some(next) = choice {
        AppState::set_scope(scope, next);
    }

    if let CategoryScope::Custom(selected) = &*scope {
        let selected = selected.clone();
        for label in labels {
            let mut checked = selected.contains(label);
            if ui.checkbox(&mut checked, label.as_str()).changed() {
                AppState::toggle_scope_label(scope, label);
            }
        }
    }
}

fn party_filters(ui: &mut Ui, state: &mut AppState) {
    let years: Vec<i32> = state.party_shares.years().into_iter().collect();
    year_checkboxes(ui, "Years", years, &mut state.selected_years);
    ui.separator();

    let labels: Vec<String> = state
        .party_shares
        .categories()
        .into_iter()
        .map(String::from)
        .collect();
    scope_selector(ui, state, &labels);
    ui.separator();

    ui.strong("Focus category");
    let mut focus = state.focus_category.clone();
    egui::ComboBox::from_id_salt("focus_category")
        .selected_text(focus.as_deref().unwrap_or("None"))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for label in &labels {
                ui.selectable_value(&mut focus, Some(label.clone()), label.as_str());
            }
        });
    if focus != state.focus_category {
        log::debug!("focus category -> {focus:?}");
        state.focus_category = focus;
    }
    ui.separator();

    ui.strong("Dominance");
    ui.add(egui::Slider::new(&mut state.reference_year, FIRST_YEAR..=LAST_YEAR).text("year"));
    ui.add(
        egui::Slider::new(&mut state.dominance_threshold_pct, 50.0..=95.0)
            .text("threshold %"),
    );
}

fn registry_filters(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Table");
    let mut key = state.registry_table;
    egui::ComboBox::from_id_salt("registry_table")
        .selected_text(key.title())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for k in TableKey::ALL.into_iter().filter(|k| k.is_registry_table()) {
                ui.selectable_value(&mut key, k, k.title());
            }
        });
    if key != state.registry_table {
        log::debug!("registry table -> {key}");
        state.registry_table = key;
    }

    ui.add(egui::Slider::new(&mut state.registry_year, FIRST_YEAR..=LAST_YEAR).text("year"));
    ui.separator();
    year_checkboxes(
        ui,
        "Compare years",
        FIRST_YEAR..=LAST_YEAR,
        &mut state.comparison_years,
    );
}

fn list_filters(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Year range");
    let lo = ui.add(egui::Slider::new(&mut state.lists_lo, FIRST_YEAR..=LAST_YEAR).text("from"));
    let hi = ui.add(egui::Slider::new(&mut state.lists_hi, FIRST_YEAR..=LAST_YEAR).text("to"));
    if lo.changed() || hi.changed() {
        log::debug!("lists range {}..={}", state.lists_lo, state.lists_hi);
    }
    ui.separator();
    ui.strong("Registry year");
    ui.add(egui::Slider::new(&mut state.reference_year, FIRST_YEAR..=LAST_YEAR).text("year"));
    ui.separator();
    ui.strong("Lists by registry");
    for list in ListType::ALL {
        let mut checked = state.selected_lists.contains(&list);
        if ui.checkbox(&mut checked, list.label()).changed() {
            state.toggle_list(list);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export view as CSV…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(format!(
            "{} tables, {} category-party rows",
            state.catalog.list_tables().len(),
            state.catalog.party_by_category().len()
        ));

        if let Some(err) = &state.view_error {
            ui.separator();
            ui.label(RichText::new(err).color(Color32::RED));
        } else if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(msg);
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export view as CSV")
        .set_file_name(format!("{}.csv", state.page.slug()))
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        let written = pages::current_view_csv(state).and_then(|bytes| {
            std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))
        });
        match written {
            Ok(()) => {
                log::info!("Exported {} to {}", state.page, path.display());
                state.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export view: {e:#}");
                state.status_message = Some(format!("Export failed: {e:#}"));
            }
        }
    }
}
