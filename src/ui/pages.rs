use eframe::egui::{self, Color32, RichText, Ui};

use ncat_dashboard::data::model::{ListType, Registry, YearWindow, FIRST_YEAR, LAST_YEAR};
use ncat_dashboard::data::views::{self, PartyShareRow};
use ncat_dashboard::data::DataResult;
use ncat_dashboard::export::rows_to_csv;

use super::plot::{self, series_entry, Series, XAxis};
use super::tables::{data_table, fmt_count, fmt_measure, fmt_opt, fmt_pct};
use crate::color::{generate_palette, ColorMap, LANDLORD, OTHER_PARTY, TENANT};
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the selected page. A failed computation shows a placeholder and
/// is reported on the status line instead of aborting.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(state.page.title());
    ui.separator();

    let result = egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| render(ui, state))
        .inner;

    match result {
        Ok(()) => state.view_error = None,
        Err(e) => {
            state.report_view_error(&e);
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new("No data for this selection").color(Color32::GRAY));
            });
        }
    }
}

fn render(ui: &mut Ui, state: &AppState) -> DataResult<()> {
    match state.page {
        Page::Overview => overview(ui, state),
        Page::TenancyTrends => tenancy_trends(ui, state),
        Page::ApplicationCategories => categories(ui, state),
        Page::PartyAnalysis => party_analysis(ui, state),
        Page::PartyBreakdown => party_breakdown(ui, state),
        Page::GeographicDistribution => geographic(ui, state),
        Page::ListsComparison => lists(ui, state),
    }
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(label);
            ui.heading(value);
        });
    });
}

fn registry_axis() -> XAxis {
    XAxis::Categories(Registry::ALL.iter().map(|r| r.to_string()).collect())
}

fn registry_x(registry: Registry) -> f64 {
    Registry::ALL.iter().position(|&r| r == registry).unwrap_or(0) as f64
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

fn overview(ui: &mut Ui, state: &AppState) -> DataResult<()> {
    let window = state.full_years;
    let m = views::overview(&state.catalog, window)?;

    ui.horizontal_wrapped(|ui: &mut Ui| {
        metric(ui, &format!("{} applications", m.latest_year), fmt_count(m.latest_total));
        metric(
            ui,
            "Peak year",
            format!("{} ({})", m.peak_year, fmt_count(m.peak_total)),
        );
        metric(ui, "Full-year average", fmt_opt(m.full_year_average, 0));
        metric(
            ui,
            &format!("Growth {} to {}", window.start, window.end),
            fmt_pct(m.growth_pct),
        );
    });

    let trend = views::tenancy_trend(&state.catalog, FIRST_YEAR, LAST_YEAR)?;
    let mut total = Series::new("Total Applications", TENANT);
    for p in &trend.points {
        total.push(p.year as f64, p.total.map(|v| v as f64));
    }
    ui.add_space(8.0);
    plot::line_chart(ui, "overview_trend", "Applications", &[total]);
    ui.label(
        RichText::new("2015 covers Q4 only, 2016 covers Q2 to Q4, 2025 covers Q1 only.")
            .italics(),
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tenancy trends
// ---------------------------------------------------------------------------

fn tenancy_trends(ui: &mut Ui, state: &AppState) -> DataResult<()> {
    let trend = views::tenancy_trend(&state.catalog, state.trend_lo, state.trend_hi)?;

    let mut total = Series::new("Total Applications", TENANT);
    for p in &trend.points {
        total.push(p.year as f64, p.total.map(|v| v as f64));
    }
    plot::line_chart(ui, "tenancy_trend", "Applications", &[total]);

    ui.columns(2, |cols| {
        cols[0].strong("Applications");
        let rows: Vec<Vec<String>> = trend
            .points
            .iter()
            .map(|p| vec![p.year.to_string(), fmt_count(p.total), p.coverage.to_string()])
            .collect();
        data_table(&mut cols[0], "trend_table", &["Year", "Applications", "Coverage"], &rows);

        cols[1].strong("Year-over-year");
        let rows: Vec<Vec<String>> = trend
            .yoy
            .iter()
            .map(|d| {
                vec![
                    d.year.to_string(),
                    d.abs_delta.map_or("n/a".to_string(), |v| format!("{v:+}")),
                    fmt_pct(d.pct_delta),
                ]
            })
            .collect();
        data_table(&mut cols[1], "trend_yoy", &["Year", "Change", "Change %"], &rows);
    });
    Ok(())
}

// ---------------------------------------------------------------------------
// Application categories
// ---------------------------------------------------------------------------

fn categories(ui: &mut Ui, state: &AppState) -> DataResult<()> {
    let b = views::category_breakdown(
        &state.catalog,
        &state.selected_years,
        &state.category_scope,
        state.full_years,
    )?;
    let colors = ColorMap::new(views::category_labels(&state.catalog)?);

    if b.rows.is_empty() {
        ui.label("No categories match the selected years and scope.");
    } else {
        let mut counts: Vec<Series> = Vec::new();
        for r in &b.rows {
            series_entry(&mut counts, &r.series, colors.color_for(&r.series))
                .push(r.year as f64, Some(r.value as f64));
        }
        ui.strong("Applications by category");
        plot::bar_chart(ui, "category_counts", XAxis::Years, "Applications", &counts, false);

        let mut shares: Vec<Series> = Vec::new();
        for r in &b.proportions {
            series_entry(&mut shares, &r.series, colors.color_for(&r.series))
                .push(r.year as f64, r.pct.value());
        }
        ui.strong("Share of each year's applications");
        plot::bar_chart(ui, "category_shares", XAxis::Years, "%", &shares, true);

        ui.strong("Year-over-year by category");
        let rows: Vec<Vec<String>> = b
            .yoy
            .iter()
            .map(|d| {
                vec![
                    d.series.clone(),
                    d.year.to_string(),
                    d.abs_delta.map_or("n/a".to_string(), |v| format!("{v:+}")),
                    fmt_pct(d.pct_delta),
                ]
            })
            .collect();
        data_table(ui, "category_yoy", &["Category", "Year", "Change", "Change %"], &rows);
    }

    ui.add_space(8.0);
    ui.strong(format!(
        "Full-year summary ({} to {})",
        state.full_years.start, state.full_years.end
    ));
    let rows: Vec<Vec<String>> = b
        .summary
        .iter()
        .map(|s| {
            vec![
                s.group.clone(),
                fmt_opt(s.mean, 0),
                fmt_opt(s.min, 0),
                fmt_opt(s.max, 0),
                fmt_opt(s.sum, 0),
                fmt_measure(s.std, 0),
                s.count_used.to_string(),
            ]
        })
        .collect();
    data_table(
        ui,
        "category_summary",
        &["Category", "Mean", "Min", "Max", "Total", "Std dev", "Years"],
        &rows,
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Party analysis
// ---------------------------------------------------------------------------

fn party_analysis(ui: &mut Ui, state: &AppState) -> DataResult<()> {
    let p = views::party_analysis(&state.catalog, state.full_years)?;

    ui.horizontal_wrapped(|ui: &mut Ui| {
        metric(ui, "Average landlord filings", fmt_opt(p.average_landlord, 0));
        metric(ui, "Average tenant filings", fmt_opt(p.average_tenant, 0));
        metric(ui, "Average landlord:tenant", fmt_opt(p.average_ratio, 2));
    });

    let mut landlord = Series::new("Landlord", LANDLORD);
    let mut tenant = Series::new("Tenant", TENANT);
    let mut other = Series::new("Other", OTHER_PARTY);
    for y in &p.years {
        let x = y.year as f64;
        landlord.push(x, Some(y.landlord as f64));
        tenant.push(x, Some(y.tenant as f64));
        other.push(x, y.other.map(|v| v as f64));
    }
    plot::line_chart(ui, "party_lines", "Applications", &[landlord, tenant, other]);

    let rows: Vec<Vec<String>> = p
        .years
        .iter()
        .map(|y| {
            vec![
                y.year.to_string(),
                fmt_count(Some(y.landlord)),
                fmt_count(Some(y.tenant)),
                fmt_count(y.other),
                fmt_measure(y.landlord_tenant_ratio, 2),
                fmt_pct(y.tenant_pct),
            ]
        })
        .collect();
    data_table(
        ui,
        "party_table",
        &["Year", "Landlord", "Tenant", "Other", "Landlord:Tenant", "Tenant %"],
        &rows,
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Detailed party breakdown
// ---------------------------------------------------------------------------

fn share_rows_table(ui: &mut Ui, id: &str, rows: &[PartyShareRow]) {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.year.to_string(),
                r.category.clone(),
                fmt_count(Some(r.landlord)),
                fmt_count(Some(r.tenant)),
                fmt_count(Some(r.total)),
                fmt_pct(r.landlord_pct),
                fmt_pct(r.tenant_pct),
            ]
        })
        .collect();
    data_table(
        ui,
        id,
        &["Year", "Category", "Landlord", "Tenant", "Total", "Landlord %", "Tenant %"],
        &cells,
    );
}

fn party_breakdown(ui: &mut Ui, state: &AppState) -> DataResult<()> {
    let shares = &state.party_shares;
    if !shares.flagged.is_empty() {
        let labels: Vec<&str> = shares.flagged.iter().map(String::as_str).collect();
        ui.label(
            RichText::new(format!("Unrecognised category labels: {}", labels.join(", ")))
                .color(Color32::from_rgb(0xd9, 0x77, 0x06)),
        );
    }

    let rows = views::party_breakdown(shares, &state.selected_years, &state.party_scope);
    if let Some(&latest) = state.selected_years.iter().next_back() {
        let split = views::party_split(&rows, latest);
        if !split.is_empty() {
            let names: Vec<String> = split.iter().map(|r| r.category.clone()).collect();
            let mut landlord = Series::new("Landlord", LANDLORD);
            let mut tenant = Series::new("Tenant", TENANT);
            for (i, r) in split.iter().enumerate() {
                landlord.push(i as f64, Some(r.landlord as f64));
                tenant.push(i as f64, Some(r.tenant as f64));
            }
            ui.strong(format!("Landlord and tenant filings, {latest}"));
            plot::bar_chart(
                ui,
                "party_split",
                XAxis::Categories(names),
                "Applications",
                &[landlord, tenant],
                true,
            );
        }
    }
    share_rows_table(ui, "party_rows", &rows);

    if let Some(category) = &state.focus_category {
        let focus = views::category_focus(&shares.rows, category);
        ui.add_space(8.0);
        ui.strong(format!("{category} over time"));
        ui.horizontal_wrapped(|ui: &mut Ui| {
            metric(ui, "Average landlord %", fmt_opt(focus.average_landlord_pct, 1));
            metric(ui, "Average tenant %", fmt_opt(focus.average_tenant_pct, 1));
            metric(ui, "Total applications", fmt_count(Some(focus.total_applications)));
        });
        let mut landlord = Series::new("Landlord %", LANDLORD);
        let mut tenant = Series::new("Tenant %", TENANT);
        for r in &focus.rows {
            landlord.push(r.year as f64, r.landlord_pct.value());
            tenant.push(r.year as f64, r.tenant_pct.value());
        }
        plot::line_chart(ui, "party_focus", "%", &[landlord, tenant]);
    }

    let report = views::dominance(shares, state.reference_year, state.dominance_threshold_pct);
    ui.add_space(8.0);
    ui.strong(format!(
        "Who files, {} (threshold {:.0}%)",
        state.reference_year, state.dominance_threshold_pct
    ));
    ui.columns(3, |cols| {
        let groups: [(&str, &[PartyShareRow], bool); 3] = [
            ("Tenant-dominated", &report.tenant_dominated, true),
            ("Mixed", &report.mixed, true),
            ("Landlord-dominated", &report.landlord_dominated, false),
        ];
        for (col, (title, rows, by_tenant)) in cols.iter_mut().zip(groups) {
            col.label(RichText::new(title).strong());
            if rows.is_empty() {
                col.label("None");
            }
            for r in rows {
                let pct = if by_tenant { r.tenant_pct } else { r.landlord_pct };
                col.label(format!("{} ({})", r.category, fmt_pct(pct)));
            }
        }
    });
    Ok(())
}

// ---------------------------------------------------------------------------
// Geographic distribution
// ---------------------------------------------------------------------------

fn geographic(ui: &mut Ui, state: &AppState) -> DataResult<()> {
    let key = state.registry_table;
    let shares = views::registry_distribution(&state.catalog, key, state.registry_year)?;
    let palette = generate_palette(Registry::ALL.len());

    ui.strong(format!("{}, {}", key.title(), state.registry_year));
    if shares.is_empty() {
        ui.label("No figures for this year.");
    } else {
        let bars: Vec<Series> = shares
            .iter()
            .map(|s| {
                let mut series = Series::new(s.registry.to_string(), palette[registry_x(s.registry) as usize]);
                series.push(registry_x(s.registry), s.applications.map(|v| v as f64));
                series
            })
            .collect();
        plot::bar_chart(ui, "registry_bars", registry_axis(), "Applications", &bars, true);
        let rows: Vec<Vec<String>> = shares
            .iter()
            .map(|s| vec![s.registry.to_string(), fmt_count(s.applications), fmt_pct(s.pct)])
            .collect();
        data_table(ui, "registry_shares", &["Registry", "Applications", "Share"], &rows);
    }

    let trend = views::registry_trend(&state.catalog, key, state.full_years)?;
    let mut by_registry: Vec<Series> = Vec::new();
    for c in &trend {
        let name = c.registry.to_string();
        series_entry(&mut by_registry, &name, palette[registry_x(c.registry) as usize])
            .push(c.year as f64, c.applications.map(|v| v as f64));
    }
    ui.add_space(8.0);
    ui.strong(format!(
        "Trends by registry over time ({} to {})",
        state.full_years.start, state.full_years.end
    ));
    plot::line_chart(ui, "registry_trend", "Applications", &by_registry);

    let comparison = views::registry_comparison(&state.catalog, key, &state.comparison_years)?;
    if !comparison.is_empty() {
        let colors = ColorMap::new(state.comparison_years.iter().map(|y| y.to_string()));
        let mut by_year: Vec<Series> = Vec::new();
        for c in &comparison {
            let year = c.year.to_string();
            series_entry(&mut by_year, &year, colors.color_for(&year))
                .push(registry_x(c.registry), c.applications.map(|v| v as f64));
        }
        ui.add_space(8.0);
        ui.strong("Registry comparison");
        plot::bar_chart(ui, "registry_compare", registry_axis(), "Applications", &by_year, false);
    }

    let stats = views::registry_summary(&state.catalog, key, state.full_years)?;
    ui.add_space(8.0);
    ui.strong(format!(
        "Full-year statistics ({} to {})",
        state.full_years.start, state.full_years.end
    ));
    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|s| {
            vec![
                s.group.to_string(),
                fmt_opt(s.mean, 0),
                fmt_opt(s.min, 0),
                fmt_opt(s.max, 0),
                fmt_measure(s.std, 0),
            ]
        })
        .collect();
    data_table(ui, "registry_stats", &["Registry", "Mean", "Min", "Max", "Std dev"], &rows);
    Ok(())
}

// ---------------------------------------------------------------------------
// Lists comparison
// ---------------------------------------------------------------------------

fn lists(ui: &mut Ui, state: &AppState) -> DataResult<()> {
    let window = YearWindow::new(state.lists_lo, state.lists_hi)?;
    let shares = views::list_shares(&state.catalog, window)?;
    let colors = ColorMap::new(shares.iter().map(|s| s.series.as_str()));

    let mut counts: Vec<Series> = Vec::new();
    let mut pcts: Vec<Series> = Vec::new();
    for s in &shares {
        let color = colors.color_for(&s.series);
        series_entry(&mut counts, &s.series, color).push(s.year as f64, Some(s.value as f64));
        series_entry(&mut pcts, &s.series, color).push(s.year as f64, s.pct.value());
    }
    ui.strong(format!("Applications by list ({} to {})", window.start, window.end));
    plot::line_chart(ui, "list_counts", "Applications", &counts);
    ui.strong("Share of all lists");
    plot::bar_chart(ui, "list_shares", XAxis::Years, "%", &pcts, true);

    let summary = views::list_summary(&state.catalog, window)?;
    let rows: Vec<Vec<String>> = summary
        .iter()
        .map(|s| {
            vec![
                s.list.clone(),
                fmt_opt(s.annual_average, 0),
                fmt_opt(s.total, 0),
                fmt_measure(s.std, 0),
                fmt_pct(s.market_share_pct),
            ]
        })
        .collect();
    data_table(
        ui,
        "list_summary",
        &["List", "Annual average", "Total", "Std dev", "Market share"],
        &rows,
    );

    let year = state.reference_year;
    let specialization = views::registry_specialization(&state.catalog, year)?;
    let top = views::top_registries(&specialization)?;
    ui.add_space(8.0);
    ui.strong(format!("Busiest registry per list, {year}"));
    let rows: Vec<Vec<String>> = top
        .iter()
        .map(|r| {
            vec![
                r.list_type.to_string(),
                r.registry.to_string(),
                fmt_count(r.applications),
                fmt_pct(r.pct_of_type),
            ]
        })
        .collect();
    data_table(ui, "top_registries", &["List", "Registry", "Applications", "Share of list"], &rows);

    let matrix = views::specialization_matrix(&specialization, year);
    let mut headers = vec!["Registry"];
    headers.extend(ListType::ALL.iter().map(|l| l.label()));
    let rows: Vec<Vec<String>> = matrix
        .rows
        .iter()
        .map(|(registry, cells)| {
            std::iter::once(registry.to_string())
                .chain(cells.iter().map(|&m| fmt_pct(m)))
                .collect()
        })
        .collect();
    ui.add_space(8.0);
    ui.strong(format!("Registry specialization, share of each list, {year}"));
    data_table(ui, "specialization_matrix", &headers, &rows);

    let selected: Vec<ListType> = state.selected_lists.iter().copied().collect();
    let mix = views::registry_list_mix(&state.catalog, &selected, year)?;
    if !mix.is_empty() {
        let colors = ColorMap::new(selected.iter().map(|l| l.label()));
        let mut by_list: Vec<Series> = Vec::new();
        for m in &mix {
            let label = m.list_type.label();
            series_entry(&mut by_list, label, colors.color_for(label))
                .push(registry_x(m.registry), m.applications.map(|v| v as f64));
        }
        ui.add_space(8.0);
        ui.strong(format!("Selected lists by registry, {year}"));
        plot::bar_chart(ui, "list_mix", registry_axis(), "Applications", &by_list, false);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV export of the current page
// ---------------------------------------------------------------------------

/// The current page's primary rows as CSV.
pub fn current_view_csv(state: &AppState) -> anyhow::Result<Vec<u8>> {
    let catalog = &state.catalog;
    match state.page {
        Page::Overview => rows_to_csv(&views::tenancy_trend(catalog, FIRST_YEAR, LAST_YEAR)?.points),
        Page::TenancyTrends => {
            rows_to_csv(&views::tenancy_trend(catalog, state.trend_lo, state.trend_hi)?.points)
        }
        Page::ApplicationCategories => {
            let b = views::category_breakdown(
                catalog,
                &state.selected_years,
                &state.category_scope,
                state.full_years,
            )?;
            rows_to_csv(&b.proportions)
        }
        Page::PartyAnalysis => rows_to_csv(&views::party_analysis(catalog, state.full_years)?.years),
        Page::PartyBreakdown => rows_to_csv(&views::party_breakdown(
            &state.party_shares,
            &state.selected_years,
            &state.party_scope,
        )),
        Page::GeographicDistribution => rows_to_csv(&views::registry_distribution(
            catalog,
            state.registry_table,
            state.registry_year,
        )?),
        Page::ListsComparison => {
            let window = YearWindow::new(state.lists_lo, state.lists_hi)?;
            rows_to_csv(&views::list_summary(catalog, window)?)
        }
    }
}
