use std::collections::BTreeSet;

use super::error::{DataError, DataResult};
use super::model::{
    CategoryPartyRecord, Field, ListType, Registry, Table, TableKey, YearRecord, FIRST_YEAR,
    FULL_YEAR_END, FULL_YEAR_START, LAST_YEAR,
};
use super::records::{AnnualSource, ANNUAL_SOURCES, PARTY_BY_CATEGORY};

// ---------------------------------------------------------------------------
// TableRef – a borrowed table of either shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableRef<'a> {
    Annual(&'a Table),
    CategoryParty(&'a [CategoryPartyRecord]),
}

impl<'a> TableRef<'a> {
    pub fn as_annual(&self) -> Option<&'a Table> {
        match *self {
            TableRef::Annual(t) => Some(t),
            TableRef::CategoryParty(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TableRef::Annual(t) => t.records.len(),
            TableRef::CategoryParty(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Every registered table, validated once and read-only afterwards. Build it
/// at startup and pass it by reference; it holds no interior mutability.
#[derive(Debug, Clone)]
pub struct Catalog {
    tenancy_totals: Table,
    tenancy_categories: Table,
    party_totals: Table,
    registry_private_tenancy: Table,
    other_lists_totals: Table,
    registry_total_ccd: Table,
    registry_social_housing: Table,
    registry_general: Table,
    registry_home_building: Table,
    registry_strata: Table,
    registry_motor_vehicles: Table,
    registry_commercial: Table,
    registry_residential_communities: Table,
    registry_retirement_villages: Table,
    party_by_category: Vec<CategoryPartyRecord>,
}

impl Catalog {
    /// Build the catalog from the embedded records, failing on any table
    /// whose shape breaks the catalog invariants.
    pub fn load() -> DataResult<Self> {
        let table = |key: TableKey| -> DataResult<Table> {
            let source = ANNUAL_SOURCES
                .iter()
                .find(|s| s.key == key)
                .ok_or_else(|| DataError::invalid(key, "no embedded source"))?;
            build_table(source)
        };

        let party_by_category = PARTY_BY_CATEGORY
            .iter()
            .map(|&(year, category, landlord, tenant, total)| CategoryPartyRecord {
                year,
                category: category.to_string(),
                landlord,
                tenant,
                total,
            })
            .collect::<Vec<_>>();
        validate_category_party(&party_by_category)?;

        let catalog = Catalog {
            tenancy_totals: table(TableKey::TenancyTotals)?,
            tenancy_categories: table(TableKey::TenancyCategories)?,
            party_totals: table(TableKey::PartyTotals)?,
            registry_private_tenancy: table(TableKey::RegistryPrivateTenancy)?,
            other_lists_totals: table(TableKey::OtherListsTotals)?,
            registry_total_ccd: table(TableKey::RegistryTotalCcd)?,
            registry_social_housing: table(TableKey::RegistrySocialHousing)?,
            registry_general: table(TableKey::RegistryGeneral)?,
            registry_home_building: table(TableKey::RegistryHomeBuilding)?,
            registry_strata: table(TableKey::RegistryStrata)?,
            registry_motor_vehicles: table(TableKey::RegistryMotorVehicles)?,
            registry_commercial: table(TableKey::RegistryCommercial)?,
            registry_residential_communities: table(TableKey::RegistryResidentialCommunities)?,
            registry_retirement_villages: table(TableKey::RegistryRetirementVillages)?,
            party_by_category,
        };
        log::info!(
            "Loaded catalog: {} tables, {} category-party rows",
            TableKey::ALL.len(),
            catalog.party_by_category.len()
        );
        Ok(catalog)
    }

    /// Registered keys in declaration order.
    pub fn list_tables(&self) -> &'static [TableKey] {
        &TableKey::ALL
    }

    pub fn table(&self, key: TableKey) -> TableRef<'_> {
        let annual = match key {
            TableKey::TenancyTotals => &self.tenancy_totals,
            TableKey::TenancyCategories => &self.tenancy_categories,
            TableKey::PartyTotals => &self.party_totals,
            TableKey::RegistryPrivateTenancy => &self.registry_private_tenancy,
            TableKey::OtherListsTotals => &self.other_lists_totals,
            TableKey::RegistryTotalCcd => &self.registry_total_ccd,
            TableKey::RegistrySocialHousing => &self.registry_social_housing,
            TableKey::RegistryGeneral => &self.registry_general,
            TableKey::RegistryHomeBuilding => &self.registry_home_building,
            TableKey::RegistryStrata => &self.registry_strata,
            TableKey::RegistryMotorVehicles => &self.registry_motor_vehicles,
            TableKey::RegistryCommercial => &self.registry_commercial,
            TableKey::RegistryResidentialCommunities => &self.registry_residential_communities,
            TableKey::RegistryRetirementVillages => &self.registry_retirement_villages,
            TableKey::PartyByCategory => return TableRef::CategoryParty(&self.party_by_category),
        };
        TableRef::Annual(annual)
    }

    /// Look a table up by its case-sensitive key.
    pub fn get_table(&self, name: &str) -> DataResult<TableRef<'_>> {
        let key: TableKey = name.parse()?;
        Ok(self.table(key))
    }

    /// The annual table behind `key`; `party_by_category` is not annual.
    pub fn annual(&self, key: TableKey) -> DataResult<&Table> {
        self.table(key)
            .as_annual()
            .ok_or_else(|| DataError::UnknownTable(key.to_string()))
    }

    pub fn party_by_category(&self) -> &[CategoryPartyRecord] {
        &self.party_by_category
    }

    pub fn registry_table(&self, list: ListType) -> &Table {
        match list {
            ListType::PrivateTenancy => &self.registry_private_tenancy,
            ListType::SocialHousing => &self.registry_social_housing,
            ListType::General => &self.registry_general,
            ListType::HomeBuilding => &self.registry_home_building,
            ListType::StrataSchemes => &self.registry_strata,
            ListType::MotorVehicles => &self.registry_motor_vehicles,
            ListType::Commercial => &self.registry_commercial,
            ListType::ResidentialCommunities => &self.registry_residential_communities,
            ListType::RetirementVillages => &self.registry_retirement_villages,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn build_table(source: &AnnualSource) -> DataResult<Table> {
    build_from_columns(source.key, source.years, source.columns)
}

/// Transpose column literals into year records, checking every invariant
/// the aggregation engine relies on.
pub(crate) fn build_from_columns(
    key: TableKey,
    years: &[i32],
    columns: &[(&'static str, &'static str, &'static [Option<u64>])],
) -> DataResult<Table> {
    if !years.iter().copied().eq(FIRST_YEAR..=LAST_YEAR) {
        return Err(DataError::invalid(
            key,
            format!("years must be exactly {FIRST_YEAR}..={LAST_YEAR}, got {years:?}"),
        ));
    }
    if columns.is_empty() {
        return Err(DataError::invalid(key, "no fields"));
    }

    let mut seen = BTreeSet::new();
    for (name, _, values) in columns {
        if !seen.insert(*name) {
            return Err(DataError::invalid(key, format!("duplicate field {name:?}")));
        }
        if values.len() != years.len() {
            return Err(DataError::invalid(
                key,
                format!(
                    "field {name:?} has {} values for {} years",
                    values.len(),
                    years.len()
                ),
            ));
        }
    }

    if key.is_registry_table() {
        let names: Vec<&str> = columns.iter().map(|(name, _, _)| *name).collect();
        if names != Registry::field_names() {
            return Err(DataError::invalid(
                key,
                format!("registry columns must be {:?}, got {names:?}", Registry::field_names()),
            ));
        }
    }

    let fields = columns
        .iter()
        .map(|&(name, label, _)| Field { name, label })
        .collect();
    let records = years
        .iter()
        .enumerate()
        .map(|(i, &year)| YearRecord {
            year,
            values: columns.iter().map(|(_, _, values)| values[i]).collect(),
        })
        .collect();

    Ok(Table {
        key,
        fields,
        records,
    })
}

fn validate_category_party(rows: &[CategoryPartyRecord]) -> DataResult<()> {
    let key = TableKey::PartyByCategory;
    let mut seen = BTreeSet::new();
    for row in rows {
        if !(FULL_YEAR_START..=FULL_YEAR_END).contains(&row.year) {
            return Err(DataError::invalid(
                key,
                format!("row {:?} outside {FULL_YEAR_START}..={FULL_YEAR_END}", row.category),
            ));
        }
        if !seen.insert((row.year, row.category.as_str())) {
            return Err(DataError::invalid(
                key,
                format!("duplicate row ({}, {:?})", row.year, row.category),
            ));
        }
    }
    Ok(())
}
