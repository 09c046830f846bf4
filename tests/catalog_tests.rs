mod common;

use ncat_dashboard::data::model::Coverage;
use ncat_dashboard::data::{DataError, TableKey, TableRef};

use common::catalog;

#[test]
fn lists_tables_in_declaration_order() {
    let catalog = catalog();
    let names: Vec<&str> = catalog.list_tables().iter().map(|k| k.as_str()).collect();
    assert_eq!(names.len(), 15);
    assert_eq!(names[0], "tenancy_totals");
    assert_eq!(names[4], "other_lists_totals");
    assert_eq!(names[14], "party_by_category");
}

#[test]
fn get_table_by_name() {
    let catalog = catalog();
    let table = catalog.get_table("registry_strata").unwrap();
    let annual = table.as_annual().unwrap();
    assert_eq!(annual.key, TableKey::RegistryStrata);
    assert_eq!(annual.records.len(), 11);

    match catalog.get_table("party_by_category").unwrap() {
        TableRef::CategoryParty(rows) => assert_eq!(rows.len(), 62),
        TableRef::Annual(_) => panic!("party_by_category is not an annual table"),
    }
}

#[test]
fn unknown_table_name_is_rejected() {
    let catalog = catalog();
    assert!(matches!(
        catalog.get_table("tenancy_total"),
        Err(DataError::UnknownTable(name)) if name == "tenancy_total"
    ));
}

#[test]
fn every_annual_table_covers_every_year_once() {
    let catalog = catalog();
    for &key in catalog.list_tables() {
        let Some(table) = catalog.table(key).as_annual() else {
            continue;
        };
        let years: Vec<i32> = table.records.iter().map(|r| r.year).collect();
        assert_eq!(years, (2015..=2025).collect::<Vec<_>>(), "{key}");
        assert!(
            table.records.iter().all(|r| r.values.len() == table.fields.len()),
            "{key}"
        );
    }
}

#[test]
fn coverage_follows_the_reporting_periods() {
    assert_eq!(Coverage::for_year(2015), Some(Coverage::Q4Only));
    assert_eq!(Coverage::for_year(2016), Some(Coverage::Partial));
    assert!((2017..=2024).all(|y| Coverage::for_year(y).is_some_and(Coverage::is_full_year)));
    assert_eq!(Coverage::for_year(2025), Some(Coverage::Q1Only));
    assert_eq!(Coverage::for_year(2026), None);
}

#[test]
fn untracked_counts_stay_absent() {
    let catalog = catalog();
    let frame = catalog.annual(TableKey::TenancyCategories).unwrap().frame();
    let breach = frame.column("Termination_Breach_s87").unwrap();
    let absent: Vec<i32> = breach.iter().filter(|(_, v)| v.is_none()).map(|(y, _)| *y).collect();
    assert_eq!(absent, vec![2015, 2024, 2025]);
}
