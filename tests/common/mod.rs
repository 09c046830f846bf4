#![allow(dead_code)]

use ncat_dashboard::data::model::Table;
use ncat_dashboard::data::{Catalog, TableKey};

pub fn catalog() -> Catalog {
    Catalog::load().expect("embedded catalog is valid")
}

pub fn tenancy_totals(catalog: &Catalog) -> &Table {
    catalog
        .annual(TableKey::TenancyTotals)
        .expect("tenancy_totals is an annual table")
}
