mod common;

use approx::assert_relative_eq;

use ncat_dashboard::data::aggregate::{
    field_summary, melt, percentage_of_total, summary_stats, top_group, year_over_year,
    SummaryOrder,
};
use ncat_dashboard::data::canonical::canonicalize_category_label;
use ncat_dashboard::data::filter::filter_year_range;
use ncat_dashboard::data::{DataError, Measure, TableKey};

use common::{catalog, tenancy_totals};

#[test]
fn full_year_filter_on_tenancy_totals() {
    let catalog = catalog();
    let frame = filter_year_range(tenancy_totals(&catalog).frame(), 2017, 2024).unwrap();
    assert_eq!(frame.len(), 8);
    assert_eq!(frame.years().collect::<Vec<_>>(), (2017..=2024).collect::<Vec<_>>());
    let values: Vec<Option<u64>> = frame
        .column("Total_Applications")
        .unwrap()
        .into_iter()
        .map(|(_, v)| v)
        .collect();
    let expected = [29780, 28849, 29167, 29905, 29798, 32654, 27720, 27873];
    assert_eq!(values, expected.map(Some).to_vec());
}

#[test]
fn inverted_range_fails() {
    let catalog = catalog();
    assert_eq!(
        filter_year_range(tenancy_totals(&catalog).frame(), 2024, 2017),
        Err(DataError::InvalidRange { lo: 2024, hi: 2017 })
    );
}

#[test]
fn yoy_2021_to_2022() {
    let catalog = catalog();
    let frame = filter_year_range(tenancy_totals(&catalog).frame(), 2021, 2022).unwrap();
    let deltas = year_over_year(frame, "Total_Applications").unwrap();
    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].year, 2022);
    assert_eq!(deltas[0].abs_delta, Some(2856));
    assert_relative_eq!(deltas[0].pct_delta.value().unwrap(), 9.58, epsilon = 0.01);
}

#[test]
fn yoy_unknown_field_fails() {
    let catalog = catalog();
    assert!(matches!(
        year_over_year(tenancy_totals(&catalog).frame(), "Total"),
        Err(DataError::UnknownField { .. })
    ));
}

#[test]
fn full_year_summary_of_total_applications() {
    let catalog = catalog();
    let frame = filter_year_range(tenancy_totals(&catalog).frame(), 2017, 2024).unwrap();
    let s = field_summary(frame, "Total_Applications").unwrap();
    assert_eq!(s.count_used, 8);
    assert_relative_eq!(s.mean.unwrap(), 29468.25);
    assert_eq!(s.min, Some(27720.0));
    assert_eq!(s.max, Some(32654.0));
    assert_relative_eq!(s.std.value().unwrap(), 1540.92, epsilon = 0.01);
}

#[test]
fn absent_years_are_excluded_from_summaries() {
    let catalog = catalog();
    let frame = catalog.annual(TableKey::TenancyCategories).unwrap().frame();
    let s = field_summary(frame, "Termination_Breach_s87").unwrap();
    assert_eq!(s.count_used, 8);
    let present = [734.0, 845.0, 690.0, 660.0, 614.0, 700.0, 765.0, 744.0];
    assert_relative_eq!(s.mean.unwrap(), present.iter().sum::<f64>() / 8.0);
}

#[test]
fn melt_drops_absent_cells_in_record_order() {
    let catalog = catalog();
    let frame = catalog.annual(TableKey::PartyTotals).unwrap().frame();
    let rows = melt(frame, &["Tenant", "Other"]).unwrap();
    // Other is missing in five of the eleven years
    assert_eq!(rows.len(), 11 + 6);
    assert_eq!(
        (rows[0].year, rows[0].series.as_str(), rows[1].series.as_str()),
        (2015, "Tenant", "Other")
    );
    assert_eq!((rows[4].year, rows[4].series.as_str()), (2017, "Tenant"));
    assert_eq!((rows[5].year, rows[5].series.as_str()), (2018, "Tenant"));
}

#[test]
fn registry_shares_sum_to_one_hundred_per_year() {
    let catalog = catalog();
    let frame = catalog.annual(TableKey::RegistryPrivateTenancy).unwrap().frame();
    let fields: Vec<&str> = frame.fields.iter().map(|f| f.name).collect();
    let rows = melt(frame, &fields).unwrap();
    let shares = percentage_of_total(&rows, |r| r.year, |r| Some(r.value as f64));
    for year in 2015..=2025 {
        let sum: f64 = shares
            .iter()
            .filter(|s| s.row.year == year)
            .filter_map(|s| s.pct.value())
            .sum();
        assert_relative_eq!(sum, 100.0, epsilon = 1e-9);
    }
}

#[test]
fn summary_groups_sort_by_mean() {
    let catalog = catalog();
    let frame = catalog.annual(TableKey::OtherListsTotals).unwrap().frame();
    let fields: Vec<&str> = frame.fields.iter().map(|f| f.name).collect();
    let rows = melt(frame, &fields).unwrap();
    let stats = summary_stats(&rows, |r| r.series.clone(), |r| Some(r.value as f64), SummaryOrder::default());
    let means: Vec<f64> = stats.iter().filter_map(|s| s.mean).collect();
    assert!(means.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(stats[0].group, "Tenancy");
}

#[test]
fn top_group_edge_cases() {
    let catalog = catalog();
    let records = &tenancy_totals(&catalog).records;
    assert_eq!(
        top_group(&records[..0], |_| (), |r| r.values[0].map(|v| v as f64)),
        Err(DataError::EmptyInput)
    );
    let single = top_group(&records[..1], |_| (), |_| None).unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].year, 2015);

    let peak = top_group(records, |_| (), |r| r.values[0].map(|v| v as f64)).unwrap();
    assert_eq!(peak[0].year, 2022);
}

#[test]
fn canonical_labels_are_idempotent_on_catalog_data() {
    let catalog = catalog();
    for rec in catalog.party_by_category() {
        let once = canonicalize_category_label(&rec.category);
        let twice = canonicalize_category_label(&once.label);
        assert_eq!(once, twice, "{}", rec.category);
    }
}

#[test]
fn zero_totals_yield_undefined_shares() {
    let rows = [(2020, 0u64), (2020, 0)];
    let shares = percentage_of_total(&rows, |r| r.0, |r| Some(r.1 as f64));
    assert!(shares.iter().all(|s| s.pct == Measure::Undefined));
}
