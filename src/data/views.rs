//! Derived views, one group per dashboard page. Each function reads the
//! catalog, runs the aggregation primitives, and returns plain rows the UI
//! can chart, tabulate, or export.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use super::aggregate::{
    field_summary, melt_labelled, percentage_of_total, summary_stats, top_group,
    year_over_year_series, Summary, SummaryOrder, YoyDelta,
};
use super::canonical::canonicalize_party_records;
use super::catalog::Catalog;
use super::error::{DataError, DataResult};
use super::filter::{filter_year_range, filter_years, CategoryScope};
use super::model::{
    Coverage, Frame, ListType, LongRow, Measure, Registry, TableKey, YearKeyed, YearWindow,
};

pub const TOTAL_APPLICATIONS: &str = "Total_Applications";

fn counted(v: Option<u64>) -> Option<f64> {
    v.map(|v| v as f64)
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewMetrics {
    pub latest_year: i32,
    pub latest_total: Option<u64>,
    /// Peak over every year, partial years included.
    pub peak_year: i32,
    pub peak_total: Option<u64>,
    pub full_year_average: Option<f64>,
    /// Change from the window's first year to its last.
    pub growth_pct: Measure,
}

pub fn overview(catalog: &Catalog, window: YearWindow) -> DataResult<OverviewMetrics> {
    let frame = catalog.annual(TableKey::TenancyTotals)?.frame();
    let idx = frame.field_index(TOTAL_APPLICATIONS)?;
    let total_in = |year: i32| frame.record(year).and_then(|r| r.values[idx]);

    let peak = top_group(frame.records, |_| (), |r| counted(r.values[idx]))?
        .first()
        .copied()
        .ok_or(DataError::EmptyInput)?;

    let full_years = filter_year_range(frame, window.start, window.end)?;
    let full_year_average = field_summary(full_years, TOTAL_APPLICATIONS)?.mean;

    let first = total_in(window.start);
    let last = total_in(window.end);
    let change = match (first, last) {
        (Some(a), Some(b)) => Some(b as f64 - a as f64),
        _ => None,
    };

    Ok(OverviewMetrics {
        latest_year: window.end,
        latest_total: last,
        peak_year: peak.year,
        peak_total: peak.values[idx],
        full_year_average,
        growth_pct: Measure::percent(change, counted(first)),
    })
}

// ---------------------------------------------------------------------------
// Tenancy trends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub total: Option<u64>,
    pub coverage: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TenancyTrend {
    pub points: Vec<TrendPoint>,
    pub yoy: Vec<YoyDelta>,
}

pub fn tenancy_trend(catalog: &Catalog, lo: i32, hi: i32) -> DataResult<TenancyTrend> {
    let frame = catalog.annual(TableKey::TenancyTotals)?.frame();
    let window = filter_year_range(frame, lo, hi)?;
    let column = window.column(TOTAL_APPLICATIONS)?;
    let points = column
        .iter()
        .map(|&(year, total)| TrendPoint {
            year,
            total,
            coverage: Coverage::for_year(year).map_or("", Coverage::label),
        })
        .collect();
    Ok(TenancyTrend {
        points,
        yoy: year_over_year_series(&column),
    })
}

// ---------------------------------------------------------------------------
// Shares and per-series deltas over long rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareRow {
    pub year: i32,
    pub series: String,
    pub value: u64,
    pub pct: Measure,
}

/// Each row's share of its year's total.
pub fn share_rows(rows: &[LongRow]) -> Vec<ShareRow> {
    percentage_of_total(rows, |r| r.year, |r| Some(r.value as f64))
        .into_iter()
        .map(|share| ShareRow {
            year: share.row.year,
            series: share.row.series.clone(),
            value: share.row.value,
            pct: share.pct,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesDelta {
    pub series: String,
    pub year: i32,
    pub abs_delta: Option<i64>,
    pub pct_delta: Measure,
}

/// Year-over-year change within each series, comparing consecutive years
/// present in `rows` (which need not be adjacent calendar years).
pub fn series_deltas(rows: &[LongRow]) -> Vec<SeriesDelta> {
    let mut by_series: IndexMap<&str, Vec<(i32, Option<u64>)>> = IndexMap::new();
    for row in rows {
        by_series
            .entry(row.series.as_str())
            .or_default()
            .push((row.year, Some(row.value)));
    }

    let mut out = Vec::new();
    for (series, mut points) in by_series {
        points.sort_by_key(|&(year, _)| year);
        out.extend(year_over_year_series(&points).into_iter().map(|d| SeriesDelta {
            series: series.to_string(),
            year: d.year,
            abs_delta: d.abs_delta,
            pct_delta: d.pct_delta,
        }));
    }
    out
}

// ---------------------------------------------------------------------------
// Application categories
// ---------------------------------------------------------------------------

/// Category counts in long form, labelled for display, absent years dropped.
pub fn category_rows(catalog: &Catalog) -> DataResult<Vec<LongRow>> {
    melt_labelled(catalog.annual(TableKey::TenancyCategories)?.frame())
}

pub fn category_labels(catalog: &Catalog) -> DataResult<Vec<&'static str>> {
    let table = catalog.annual(TableKey::TenancyCategories)?;
    Ok(table.fields.iter().map(|f| f.label).collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    /// Rows in the selected years and scope.
    pub rows: Vec<LongRow>,
    pub proportions: Vec<ShareRow>,
    pub yoy: Vec<SeriesDelta>,
    /// Every category over the full-year window, highest average first.
    pub summary: Vec<Summary<String>>,
}

pub fn category_breakdown(
    catalog: &Catalog,
    years: &BTreeSet<i32>,
    scope: &CategoryScope,
    window: YearWindow,
) -> DataResult<CategoryBreakdown> {
    let all = category_rows(catalog)?;
    let rows: Vec<LongRow> = filter_years(&all, years)
        .into_iter()
        .filter(|r| scope.matches(&r.series))
        .cloned()
        .collect();

    let full_years: Vec<&LongRow> = all.iter().filter(|r| window.contains(r.year)).collect();
    let summary = summary_stats(
        &full_years,
        |r| r.series.clone(),
        |r| Some(r.value as f64),
        SummaryOrder::MeanDescending,
    );

    Ok(CategoryBreakdown {
        proportions: share_rows(&rows),
        yoy: series_deltas(&rows),
        rows,
        summary,
    })
}

// ---------------------------------------------------------------------------
// Party analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyYear {
    pub year: i32,
    pub landlord: u64,
    pub tenant: u64,
    pub other: Option<u64>,
    pub landlord_tenant_ratio: Measure,
    pub tenant_pct: Measure,
}

impl YearKeyed for PartyYear {
    fn year(&self) -> i32 {
        self.year
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartyAnalysis {
    /// Years where both landlord and tenant counts are present.
    pub years: Vec<PartyYear>,
    pub average_landlord: Option<f64>,
    pub average_tenant: Option<f64>,
    pub average_ratio: Option<f64>,
}

pub fn party_analysis(catalog: &Catalog, window: YearWindow) -> DataResult<PartyAnalysis> {
    let frame = catalog.annual(TableKey::PartyTotals)?.frame();
    let landlord = frame.field_index("Landlord")?;
    let tenant = frame.field_index("Tenant")?;
    let other = frame.field_index("Other")?;

    let years: Vec<PartyYear> = frame
        .records
        .iter()
        .filter_map(|r| {
            let (l, t) = (r.values[landlord]?, r.values[tenant]?);
            Some(PartyYear {
                year: r.year,
                landlord: l,
                tenant: t,
                other: r.values[other],
                landlord_tenant_ratio: Measure::from_ratio(Some(l as f64), Some(t as f64)),
                tenant_pct: Measure::percent(Some(t as f64), Some((l + t) as f64)),
            })
        })
        .collect();

    let full: Vec<&PartyYear> = years.iter().filter(|p| window.contains(p.year)).collect();
    let mean_of = |value: fn(&PartyYear) -> Option<f64>| {
        summary_stats(&full, |_| (), |p| value(p), SummaryOrder::InputOrder)
            .first()
            .and_then(|s| s.mean)
    };
    let average_landlord = mean_of(|p| Some(p.landlord as f64));
    let average_tenant = mean_of(|p| Some(p.tenant as f64));
    let average_ratio = mean_of(|p| p.landlord_tenant_ratio.value());

    Ok(PartyAnalysis {
        years,
        average_landlord,
        average_tenant,
        average_ratio,
    })
}

// ---------------------------------------------------------------------------
// Detailed party breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyShareRow {
    pub year: i32,
    pub category: String,
    /// `false` when the label did not canonicalise onto a known category.
    pub recognized: bool,
    pub landlord: u64,
    pub tenant: u64,
    pub total: u64,
    pub landlord_pct: Measure,
    pub tenant_pct: Measure,
}

impl YearKeyed for PartyShareRow {
    fn year(&self) -> i32 {
        self.year
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartyShares {
    pub rows: Vec<PartyShareRow>,
    /// Labels left outside the canonical set, for review.
    pub flagged: BTreeSet<String>,
}

impl PartyShares {
    pub fn years(&self) -> BTreeSet<i32> {
        self.rows.iter().map(|r| r.year).collect()
    }

    pub fn categories(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.category.as_str()).collect()
    }
}

/// Canonicalised category-party rows with landlord and tenant shares of the
/// published total, rounded to one decimal.
pub fn party_shares(catalog: &Catalog) -> PartyShares {
    let canonical = canonicalize_party_records(catalog.party_by_category());
    let rows = canonical
        .records
        .into_iter()
        .map(|rec| PartyShareRow {
            recognized: !canonical.flagged.contains(&rec.category),
            landlord_pct: Measure::percent(Some(rec.landlord as f64), Some(rec.total as f64))
                .round_to(1),
            tenant_pct: Measure::percent(Some(rec.tenant as f64), Some(rec.total as f64))
                .round_to(1),
            year: rec.year,
            category: rec.category,
            landlord: rec.landlord,
            tenant: rec.tenant,
            total: rec.total,
        })
        .collect();
    PartyShares {
        rows,
        flagged: canonical.flagged,
    }
}

pub fn party_breakdown(
    shares: &PartyShares,
    years: &BTreeSet<i32>,
    scope: &CategoryScope,
) -> Vec<PartyShareRow> {
    filter_years(&shares.rows, years)
        .into_iter()
        .filter(|r| scope.matches(&r.category))
        .cloned()
        .collect()
}

/// One year's rows, largest total first.
pub fn party_split(rows: &[PartyShareRow], year: i32) -> Vec<PartyShareRow> {
    let mut out: Vec<PartyShareRow> = rows.iter().filter(|r| r.year == year).cloned().collect();
    out.sort_by(|a, b| b.total.cmp(&a.total));
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFocus {
    pub category: String,
    pub rows: Vec<PartyShareRow>,
    pub average_landlord_pct: Option<f64>,
    pub average_tenant_pct: Option<f64>,
    pub total_applications: u64,
}

pub fn category_focus(rows: &[PartyShareRow], category: &str) -> CategoryFocus {
    let rows: Vec<PartyShareRow> = rows
        .iter()
        .filter(|r| r.category == category)
        .cloned()
        .collect();
    let mean_of = |value: fn(&PartyShareRow) -> Option<f64>| {
        summary_stats(&rows, |_| (), value, SummaryOrder::InputOrder)
            .first()
            .and_then(|s| s.mean)
    };
    CategoryFocus {
        category: category.to_string(),
        average_landlord_pct: mean_of(|r| r.landlord_pct.value()),
        average_tenant_pct: mean_of(|r| r.tenant_pct.value()),
        total_applications: rows.iter().map(|r| r.total).sum(),
        rows,
    }
}

/// Categories grouped by which party files more than the threshold share of
/// them; everything else is mixed. Each list is sorted by its party's share.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DominanceReport {
    pub tenant_dominated: Vec<PartyShareRow>,
    pub mixed: Vec<PartyShareRow>,
    pub landlord_dominated: Vec<PartyShareRow>,
}

pub fn dominance(shares: &PartyShares, year: i32, threshold_pct: f64) -> DominanceReport {
    let rows: Vec<&PartyShareRow> = shares.rows.iter().filter(|r| r.year == year).collect();
    let pick = |keep: &dyn Fn(&PartyShareRow) -> bool, key: fn(&PartyShareRow) -> Measure| {
        let mut out: Vec<PartyShareRow> = rows.iter().filter(|r| keep(r)).map(|r| (*r).clone()).collect();
        out.sort_by(|a, b| {
            let (a, b) = (key(a).value(), key(b).value());
            b.unwrap_or(f64::NEG_INFINITY)
                .total_cmp(&a.unwrap_or(f64::NEG_INFINITY))
        });
        out
    };
    let above = |m: Measure| m.value().is_some_and(|v| v > threshold_pct);

    DominanceReport {
        tenant_dominated: pick(&|r| above(r.tenant_pct), |r| r.tenant_pct),
        mixed: pick(
            &|r| !above(r.tenant_pct) && !above(r.landlord_pct),
            |r| r.tenant_pct,
        ),
        landlord_dominated: pick(&|r| above(r.landlord_pct), |r| r.landlord_pct),
    }
}

// ---------------------------------------------------------------------------
// Geographic distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryCount {
    pub registry: Registry,
    pub year: i32,
    pub applications: Option<u64>,
}

impl YearKeyed for RegistryCount {
    fn year(&self) -> i32 {
        self.year
    }
}

/// Registry columns of a `registry_*` frame in long form, record-major.
pub fn registry_counts(frame: Frame<'_>) -> DataResult<Vec<RegistryCount>> {
    let columns = Registry::ALL
        .iter()
        .map(|&reg| Ok((reg, frame.field_index(reg.as_str())?)))
        .collect::<DataResult<Vec<_>>>()?;
    Ok(frame
        .records
        .iter()
        .flat_map(|rec| {
            columns.iter().map(move |&(registry, idx)| RegistryCount {
                registry,
                year: rec.year,
                applications: rec.values[idx],
            })
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryShare {
    pub registry: Registry,
    pub year: i32,
    pub applications: Option<u64>,
    pub pct: Measure,
}

/// Each registry's share of one year of a registry table. A year the table
/// does not cover gives no rows.
pub fn registry_distribution(catalog: &Catalog, key: TableKey, year: i32) -> DataResult<Vec<RegistryShare>> {
    let frame = catalog.annual(key)?.frame();
    let counts = registry_counts(filter_year_range(frame, year, year)?)?;
    Ok(percentage_of_total(&counts, |c| c.year, |c| counted(c.applications))
        .into_iter()
        .map(|share| RegistryShare {
            registry: share.row.registry,
            year: share.row.year,
            applications: share.row.applications,
            pct: share.pct,
        })
        .collect())
}

/// Per-registry statistics over the window, highest average first.
pub fn registry_summary(catalog: &Catalog, key: TableKey, window: YearWindow) -> DataResult<Vec<Summary<Registry>>> {
    let frame = catalog.annual(key)?.frame();
    let counts = registry_counts(filter_year_range(frame, window.start, window.end)?)?;
    Ok(summary_stats(
        &counts,
        |c| c.registry,
        |c| counted(c.applications),
        SummaryOrder::MeanDescending,
    ))
}

/// One series per registry across the window, for the registry trend chart.
pub fn registry_trend(catalog: &Catalog, key: TableKey, window: YearWindow) -> DataResult<Vec<RegistryCount>> {
    let frame = catalog.annual(key)?.frame();
    registry_counts(filter_year_range(frame, window.start, window.end)?)
}

/// Registry counts for a chosen set of years.
pub fn registry_comparison(catalog: &Catalog, key: TableKey, years: &BTreeSet<i32>) -> DataResult<Vec<RegistryCount>> {
    let counts = registry_counts(catalog.annual(key)?.frame())?;
    Ok(filter_years(&counts, years).into_iter().cloned().collect())
}

// ---------------------------------------------------------------------------
// Lists comparison
// ---------------------------------------------------------------------------

/// Each list's share of the year's total over the window.
pub fn list_shares(catalog: &Catalog, window: YearWindow) -> DataResult<Vec<ShareRow>> {
    let frame = catalog.annual(TableKey::OtherListsTotals)?.frame();
    let rows = melt_labelled(filter_year_range(frame, window.start, window.end)?)?;
    Ok(share_rows(&rows))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSummary {
    pub list: String,
    pub annual_average: Option<f64>,
    pub total: Option<f64>,
    pub std: Measure,
    /// This list's total as a share of all lists' totals.
    pub market_share_pct: Measure,
}

pub fn list_summary(catalog: &Catalog, window: YearWindow) -> DataResult<Vec<ListSummary>> {
    let frame = catalog.annual(TableKey::OtherListsTotals)?.frame();
    let rows = melt_labelled(filter_year_range(frame, window.start, window.end)?)?;
    let stats = summary_stats(
        &rows,
        |r| r.series.clone(),
        |r| Some(r.value as f64),
        SummaryOrder::MeanDescending,
    );
    let grand_total: f64 = stats.iter().filter_map(|s| s.sum).sum();
    Ok(stats
        .into_iter()
        .map(|s| ListSummary {
            market_share_pct: Measure::percent(s.sum, Some(grand_total)).round_to(1),
            list: s.group,
            annual_average: s.mean,
            total: s.sum,
            std: s.std,
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecializationRow {
    pub list_type: ListType,
    pub registry: Registry,
    pub year: i32,
    pub applications: Option<u64>,
    /// Share of this list type's applications handled by the registry.
    pub pct_of_type: Measure,
}

impl YearKeyed for SpecializationRow {
    fn year(&self) -> i32 {
        self.year
    }
}

pub fn registry_specialization(catalog: &Catalog, year: i32) -> DataResult<Vec<SpecializationRow>> {
    let mut out = Vec::new();
    for list_type in ListType::ALL {
        let frame = catalog.registry_table(list_type).frame();
        let counts = registry_counts(filter_year_range(frame, year, year)?)?;
        out.extend(
            percentage_of_total(&counts, |c| c.year, |c| counted(c.applications))
                .into_iter()
                .map(|share| SpecializationRow {
                    list_type,
                    registry: share.row.registry,
                    year: share.row.year,
                    applications: share.row.applications,
                    pct_of_type: share.pct,
                }),
        );
    }
    Ok(out)
}

/// Specialization pivoted for display: one row per registry, one
/// `pct_of_type` cell per list type in `ListType::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecializationMatrix {
    pub year: i32,
    pub rows: Vec<(Registry, Vec<Measure>)>,
}

pub fn specialization_matrix(rows: &[SpecializationRow], year: i32) -> SpecializationMatrix {
    let rows = Registry::ALL
        .iter()
        .map(|&registry| {
            let cells = ListType::ALL
                .iter()
                .map(|&list_type| {
                    rows.iter()
                        .find(|r| r.year == year && r.registry == registry && r.list_type == list_type)
                        .map_or(Measure::Absent, |r| r.pct_of_type)
                })
                .collect();
            (registry, cells)
        })
        .collect();
    SpecializationMatrix { year, rows }
}

/// The busiest registry for each list type, most applications first.
pub fn top_registries(rows: &[SpecializationRow]) -> DataResult<Vec<SpecializationRow>> {
    let mut top: Vec<SpecializationRow> = top_group(rows, |r| r.list_type, |r| counted(r.applications))?
        .into_iter()
        .cloned()
        .collect();
    top.sort_by(|a, b| b.applications.cmp(&a.applications));
    Ok(top)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRegistryCount {
    pub list_type: ListType,
    pub registry: Registry,
    pub applications: Option<u64>,
}

/// Per-registry counts of the chosen list types for one year.
pub fn registry_list_mix(catalog: &Catalog, lists: &[ListType], year: i32) -> DataResult<Vec<ListRegistryCount>> {
    let mut out = Vec::new();
    for &list_type in lists {
        let frame = catalog.registry_table(list_type).frame();
        for count in registry_counts(filter_year_range(frame, year, year)?)? {
            out.push(ListRegistryCount {
                list_type,
                registry: count.registry,
                applications: count.applications,
            });
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn catalog() -> Catalog {
        Catalog::load().expect("catalog")
    }

    fn years(ys: &[i32]) -> BTreeSet<i32> {
        ys.iter().copied().collect()
    }

    #[test]
    fn overview_headline_numbers() {
        let m = overview(&catalog(), YearWindow::FULL_YEARS).unwrap();
        assert_eq!(m.latest_total, Some(27873));
        assert_eq!((m.peak_year, m.peak_total), (2022, Some(32654)));
        assert_relative_eq!(m.full_year_average.unwrap(), 29468.25);
        assert_relative_eq!(m.growth_pct.value().unwrap(), -6.403626595, epsilon = 1e-6);
    }

    #[test]
    fn tenancy_trend_marks_partial_years() {
        let trend = tenancy_trend(&catalog(), 2015, 2017).unwrap();
        let coverage: Vec<_> = trend.points.iter().map(|p| p.coverage).collect();
        assert_eq!(coverage, vec!["Q4 Only", "Q2, Q3, Q4", "Full Year"]);
        assert_eq!(trend.yoy.len(), 2);
    }

    #[test]
    fn category_breakdown_respects_scope_and_years() {
        let b = category_breakdown(
            &catalog(),
            &years(&[2020, 2022, 2024]),
            &CategoryScope::TerminationsOnly,
            YearWindow::FULL_YEARS,
        )
        .unwrap();
        assert!(b.rows.iter().all(|r| r.series.contains("Termination")));
        // breach and co-tenant series have no 2024 figure
        assert_eq!(b.rows.len(), 3 + 3 + 2 + 2);

        let per_year: f64 = b
            .proportions
            .iter()
            .filter(|r| r.year == 2022)
            .filter_map(|r| r.pct.value())
            .sum();
        assert_relative_eq!(per_year, 100.0, epsilon = 1e-9);

        assert_eq!(b.summary[0].group, "Termination (Non-Payment)");
        assert_eq!(b.summary.len(), 8);
    }

    #[test]
    fn series_deltas_compare_consecutive_selected_years() {
        let b = category_breakdown(
            &catalog(),
            &years(&[2020, 2022]),
            &CategoryScope::Custom(["Repairs".to_string()].into_iter().collect()),
            YearWindow::FULL_YEARS,
        )
        .unwrap();
        assert_eq!(b.yoy.len(), 1);
        assert_eq!(b.yoy[0].year, 2022);
        assert_eq!(b.yoy[0].abs_delta, Some(464 - 394));
    }

    #[test]
    fn party_analysis_ratios() {
        let p = party_analysis(&catalog(), YearWindow::FULL_YEARS).unwrap();
        assert_eq!(p.years.len(), 11);
        let y2017 = &p.years[2];
        assert_relative_eq!(y2017.landlord_tenant_ratio.value().unwrap(), 23476.0 / 6304.0);
        assert_relative_eq!(
            y2017.tenant_pct.value().unwrap(),
            6304.0 / (23476.0 + 6304.0) * 100.0,
            epsilon = 1e-9
        );
        assert_eq!(p.years[3].other, None);
        assert!(p.average_landlord.is_some() && p.average_ratio.is_some());
    }

    #[test]
    fn party_shares_flag_unmapped_labels() {
        let shares = party_shares(&catalog());
        assert_eq!(shares.rows.len(), 62);
        assert!(shares.flagged.contains("Termination other"));
        let labels = shares.categories();
        assert!(labels.contains("Rental Bonds"));
        assert!(!labels.contains("Rental bonds"));
        assert!(labels.contains("Termination by co-tenant (s.102)"));
    }

    #[test]
    fn party_share_percentages_use_published_total() {
        let shares = party_shares(&catalog());
        let repairs_2018 = shares
            .rows
            .iter()
            .find(|r| r.year == 2018 && r.category == "Repairs")
            .unwrap();
        // 284 of 308: the remainder is filed by neither party
        assert_eq!(repairs_2018.landlord_pct, Measure::Value(0.0));
        assert_eq!(repairs_2018.tenant_pct, Measure::Value(92.2));
    }

    #[test]
    fn dominance_groups_for_reference_year() {
        let report = dominance(&party_shares(&catalog()), 2024, 70.0);
        let tenant: Vec<_> = report.tenant_dominated.iter().map(|r| r.category.as_str()).collect();
        assert!(tenant.is_empty());
        let landlord: Vec<_> = report
            .landlord_dominated
            .iter()
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(landlord[0], "Termination non-payment of rent");
        assert!(report.mixed.iter().any(|r| r.category == "Repairs"));
        assert_eq!(report.mixed.len() + landlord.len(), 6);
        // highest tenant share first
        assert_eq!(report.mixed[0].category, "Repairs");
    }

    #[test]
    fn category_focus_averages_shares() {
        let shares = party_shares(&catalog());
        let focus = category_focus(&shares.rows, "Termination non-payment of rent");
        assert_eq!(focus.rows.len(), 8);
        assert_eq!(focus.average_tenant_pct.map(|v| v > 0.0), Some(true));
        assert_eq!(
            focus.total_applications,
            15224 + 14380 + 13695 + 10462 + 9851 + 10833 + 10599 + 9108
        );
    }

    #[test]
    fn registry_distribution_sums_to_one_hundred() {
        let shares = registry_distribution(&catalog(), TableKey::RegistryTotalCcd, 2024).unwrap();
        assert_eq!(shares.len(), 6);
        let sum: f64 = shares.iter().filter_map(|s| s.pct.value()).sum();
        assert_relative_eq!(sum, 100.0, epsilon = 1e-9);
        assert!(registry_distribution(&catalog(), TableKey::RegistryTotalCcd, 2030)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn registry_distribution_rejects_non_registry_tables() {
        assert!(matches!(
            registry_distribution(&catalog(), TableKey::TenancyTotals, 2024),
            Err(DataError::UnknownField { .. })
        ));
    }

    #[test]
    fn registry_summary_puts_sydney_first() {
        let stats = registry_summary(&catalog(), TableKey::RegistryTotalCcd, YearWindow::FULL_YEARS).unwrap();
        assert_eq!(stats[0].group, Registry::Sydney);
        assert!(stats.iter().all(|s| s.count_used == 8));
    }

    #[test]
    fn list_summary_market_shares_cover_everything() {
        let summary = list_summary(&catalog(), YearWindow::FULL_YEARS).unwrap();
        assert_eq!(summary[0].list, "Tenancy");
        let share: f64 = summary.iter().filter_map(|s| s.market_share_pct.value()).sum();
        assert_relative_eq!(share, 100.0, epsilon = 0.5);
    }

    #[test]
    fn specialization_and_top_registries() {
        let rows = registry_specialization(&catalog(), 2024).unwrap();
        assert_eq!(rows.len(), 9 * 6);
        let top = top_registries(&rows).unwrap();
        assert_eq!(top.len(), 9);
        assert_eq!(top[0].list_type, ListType::PrivateTenancy);
        assert_eq!(top[0].registry, Registry::Sydney);
        let rv = top.iter().find(|r| r.list_type == ListType::RetirementVillages).unwrap();
        assert_eq!(rv.registry, Registry::Newcastle);
    }

    #[test]
    fn registry_trend_has_a_point_per_registry_and_year() {
        let window = YearWindow::FULL_YEARS;
        let trend = registry_trend(&catalog(), TableKey::RegistryTotalCcd, window).unwrap();
        for registry in Registry::ALL {
            let ys: Vec<i32> = trend
                .iter()
                .filter(|c| c.registry == registry)
                .map(|c| c.year)
                .collect();
            assert_eq!(ys, (window.start..=window.end).collect::<Vec<_>>(), "{registry}");
        }
        assert!(trend.iter().all(|c| c.applications.is_some()));
    }

    #[test]
    fn specialization_matrix_is_registries_by_list_types() {
        let rows = registry_specialization(&catalog(), 2024).unwrap();
        let matrix = specialization_matrix(&rows, 2024);
        let registries: Vec<Registry> = matrix.rows.iter().map(|(r, _)| *r).collect();
        assert_eq!(registries, Registry::ALL.to_vec());
        assert!(matrix.rows.iter().all(|(_, cells)| cells.len() == ListType::ALL.len()));

        let col = ListType::ALL
            .iter()
            .position(|&l| l == ListType::PrivateTenancy)
            .unwrap();
        let sum: f64 = matrix.rows.iter().filter_map(|(_, cells)| cells[col].value()).sum();
        assert_relative_eq!(sum, 100.0, epsilon = 1e-9);

        let (registry, cells) = &matrix.rows[0];
        let expected = rows
            .iter()
            .find(|r| r.registry == *registry && r.list_type == ListType::PrivateTenancy)
            .unwrap()
            .pct_of_type;
        assert_eq!(cells[col], expected);
    }

    #[test]
    fn specialization_matrix_for_an_uncovered_year_is_absent() {
        let matrix = specialization_matrix(&registry_specialization(&catalog(), 2024).unwrap(), 2016);
        assert_eq!(matrix.rows.len(), 6);
        assert!(matrix
            .rows
            .iter()
            .all(|(_, cells)| cells.iter().all(|m| *m == Measure::Absent)));
    }

    #[test]
    fn list_summary_honours_the_window() {
        let narrow = YearWindow::new(2023, 2024).unwrap();
        let shares = list_shares(&catalog(), narrow).unwrap();
        assert!(shares.iter().all(|r| narrow.contains(r.year)));
        let full = list_summary(&catalog(), YearWindow::FULL_YEARS).unwrap();
        let part = list_summary(&catalog(), narrow).unwrap();
        let tenancy = |s: &[ListSummary]| s.iter().find(|r| r.list == "Tenancy").and_then(|r| r.total);
        assert!(tenancy(&part).unwrap() < tenancy(&full).unwrap());
    }

    #[test]
    fn registry_list_mix_has_one_row_per_list_and_registry() {
        let rows = registry_list_mix(
            &catalog(),
            &[ListType::PrivateTenancy, ListType::SocialHousing],
            2024,
        )
        .unwrap();
        assert_eq!(rows.len(), 12);
    }
}
