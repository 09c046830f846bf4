use std::collections::BTreeSet;
use std::fmt;

use ncat_dashboard::config::DashboardConfig;
use ncat_dashboard::data::filter::CategoryScope;
use ncat_dashboard::data::model::{ListType, TableKey, YearWindow, FIRST_YEAR, LAST_YEAR};
use ncat_dashboard::data::views::{party_shares, PartyShares};
use ncat_dashboard::data::Catalog;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    TenancyTrends,
    ApplicationCategories,
    PartyAnalysis,
    PartyBreakdown,
    GeographicDistribution,
    ListsComparison,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Overview,
        Page::TenancyTrends,
        Page::ApplicationCategories,
        Page::PartyAnalysis,
        Page::PartyBreakdown,
        Page::GeographicDistribution,
        Page::ListsComparison,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::TenancyTrends => "Tenancy Trends",
            Page::ApplicationCategories => "Application Categories",
            Page::PartyAnalysis => "Party Analysis",
            Page::PartyBreakdown => "Detailed Party Breakdown",
            Page::GeographicDistribution => "Geographic Distribution",
            Page::ListsComparison => "Lists Comparison",
        }
    }

    /// File stem used for CSV exports of this page.
    pub fn slug(self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::TenancyTrends => "tenancy_trends",
            Page::ApplicationCategories => "application_categories",
            Page::PartyAnalysis => "party_analysis",
            Page::PartyBreakdown => "party_breakdown",
            Page::GeographicDistribution => "geographic_distribution",
            Page::ListsComparison => "lists_comparison",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Human name for a scope, used by the scope selector.
pub fn scope_name(scope: &CategoryScope) -> &'static str {
    match scope {
        CategoryScope::All => "All categories",
        CategoryScope::TerminationsOnly => "Terminations only",
        CategoryScope::NonTerminationsOnly => "Non-terminations only",
        CategoryScope::Custom(_) => "Custom selection",
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub catalog: Catalog,
    pub full_years: YearWindow,

    /// Canonicalised category-party rows, computed once.
    pub party_shares: PartyShares,

    pub page: Page,

    /// Year range on the tenancy trends page.
    pub trend_lo: i32,
    pub trend_hi: i32,

    /// Years selected on the category and party breakdown pages.
    pub selected_years: BTreeSet<i32>,
    /// Category scopes, kept apart because the two pages label categories
    /// differently.
    pub category_scope: CategoryScope,
    pub party_scope: CategoryScope,
    pub focus_category: Option<String>,

    pub registry_table: TableKey,
    pub registry_year: i32,
    pub comparison_years: BTreeSet<i32>,

    pub reference_year: i32,
    pub dominance_threshold_pct: f64,

    /// Year range on the lists comparison page.
    pub lists_lo: i32,
    pub lists_hi: i32,
    pub selected_lists: BTreeSet<ListType>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Why the current page could not be computed, if it could not.
    pub view_error: Option<String>,
}

impl AppState {
    pub fn new(catalog: Catalog, config: &DashboardConfig, full_years: YearWindow) -> Self {
        let party_shares = party_shares(&catalog);
        let focus_category = party_shares.categories().into_iter().next().map(String::from);
        Self {
            party_shares,
            trend_lo: FIRST_YEAR,
            trend_hi: LAST_YEAR,
            selected_years: config.comparison_year_set(),
            category_scope: CategoryScope::All,
            party_scope: CategoryScope::All,
            focus_category,
            registry_table: TableKey::RegistryPrivateTenancy,
            registry_year: config.reference_year,
            comparison_years: config.comparison_year_set(),
            reference_year: config.reference_year,
            dominance_threshold_pct: config.dominance_threshold_pct,
            lists_lo: full_years.start,
            lists_hi: full_years.end,
            selected_lists: [ListType::PrivateTenancy, ListType::SocialHousing]
                .into_iter()
                .collect(),
            page: Page::Overview,
            status_message: None,
            view_error: None,
            catalog,
            full_years,
        }
    }

    pub fn set_page(&mut self, page: Page) {
        if self.page != page {
            log::debug!("page -> {page}");
            self.page = page;
            self.view_error = None;
        }
    }

    /// Toggle a year in a year-set filter.
    pub fn toggle_year(years: &mut BTreeSet<i32>, year: i32) {
        if !years.remove(&year) {
            years.insert(year);
        }
        log::debug!("selected years {years:?}");
    }

    /// The scope edited by the current page's filters, if it has one.
    pub fn page_scope_mut(&mut self) -> Option<&mut CategoryScope> {
        match self.page {
            Page::ApplicationCategories => Some(&mut self.category_scope),
            Page::PartyBreakdown => Some(&mut self.party_scope),
            _ => None,
        }
    }

    pub fn set_scope(scope: &mut CategoryScope, next: CategoryScope) {
        log::debug!("scope -> {next:?}");
        *scope = next;
    }

    /// Toggle a label inside a custom scope; other scopes become a custom
    /// scope holding just this label.
    pub fn toggle_scope_label(scope: &mut CategoryScope, label: &str) {
        let mut labels = match scope {
            CategoryScope::Custom(labels) => std::mem::take(labels),
            _ => BTreeSet::new(),
        };
        if !labels.remove(label) {
            labels.insert(label.to_string());
        }
        Self::set_scope(scope, CategoryScope::Custom(labels));
    }

    pub fn toggle_list(&mut self, list: ListType) {
        if !self.selected_lists.remove(&list) {
            self.selected_lists.insert(list);
        }
        log::debug!("selected lists {:?}", self.selected_lists);
    }

    /// Record a failed view computation. Logged once per distinct message,
    /// not once per frame.
    pub fn report_view_error(&mut self, err: &dyn fmt::Display) {
        let message = format!("{}: {err}", self.page);
        if self.view_error.as_deref() != Some(message.as_str()) {
            log::error!("{message}");
            self.view_error = Some(message);
        }
    }
}
