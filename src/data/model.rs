use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use super::error::{DataError, DataResult};

/// First year present in every annual table (Q4 only).
pub const FIRST_YEAR: i32 = 2015;
/// Last year present in every annual table (Q1 only).
pub const LAST_YEAR: i32 = 2025;
/// First year with complete annual coverage.
pub const FULL_YEAR_START: i32 = 2017;
/// Last year with complete annual coverage.
pub const FULL_YEAR_END: i32 = 2024;

// ---------------------------------------------------------------------------
// TableKey – the fixed set of registered tables
// ---------------------------------------------------------------------------

/// Every table the catalog registers, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKey {
    TenancyTotals,
    TenancyCategories,
    PartyTotals,
    RegistryPrivateTenancy,
    OtherListsTotals,
    RegistryTotalCcd,
    RegistrySocialHousing,
    RegistryGeneral,
    RegistryHomeBuilding,
    RegistryStrata,
    RegistryMotorVehicles,
    RegistryCommercial,
    RegistryResidentialCommunities,
    RegistryRetirementVillages,
    PartyByCategory,
}

impl TableKey {
    pub const ALL: [TableKey; 15] = [
        TableKey::TenancyTotals,
        TableKey::TenancyCategories,
        TableKey::PartyTotals,
        TableKey::RegistryPrivateTenancy,
        TableKey::OtherListsTotals,
        TableKey::RegistryTotalCcd,
        TableKey::RegistrySocialHousing,
        TableKey::RegistryGeneral,
        TableKey::RegistryHomeBuilding,
        TableKey::RegistryStrata,
        TableKey::RegistryMotorVehicles,
        TableKey::RegistryCommercial,
        TableKey::RegistryResidentialCommunities,
        TableKey::RegistryRetirementVillages,
        TableKey::PartyByCategory,
    ];

    /// The case-sensitive key callers use to address the table.
    pub fn as_str(self) -> &'static str {
        match self {
            TableKey::TenancyTotals => "tenancy_totals",
            TableKey::TenancyCategories => "tenancy_categories",
            TableKey::PartyTotals => "party_totals",
            TableKey::RegistryPrivateTenancy => "registry_private_tenancy",
            TableKey::OtherListsTotals => "other_lists_totals",
            TableKey::RegistryTotalCcd => "registry_total_ccd",
            TableKey::RegistrySocialHousing => "registry_social_housing",
            TableKey::RegistryGeneral => "registry_general",
            TableKey::RegistryHomeBuilding => "registry_home_building",
            TableKey::RegistryStrata => "registry_strata",
            TableKey::RegistryMotorVehicles => "registry_motor_vehicles",
            TableKey::RegistryCommercial => "registry_commercial",
            TableKey::RegistryResidentialCommunities => "registry_residential_communities",
            TableKey::RegistryRetirementVillages => "registry_retirement_villages",
            TableKey::PartyByCategory => "party_by_category",
        }
    }

    /// Human-readable title for headings and exports.
    pub fn title(self) -> &'static str {
        match self {
            TableKey::TenancyTotals => "Annual tenancy applications",
            TableKey::TenancyCategories => "Tenancy applications by category",
            TableKey::PartyTotals => "Lodgements by party",
            TableKey::RegistryPrivateTenancy => "Private tenancy by registry",
            TableKey::OtherListsTotals => "Applications by list",
            TableKey::RegistryTotalCcd => "Total CCD applications by registry",
            TableKey::RegistrySocialHousing => "Social housing by registry",
            TableKey::RegistryGeneral => "General list by registry",
            TableKey::RegistryHomeBuilding => "Home building by registry",
            TableKey::RegistryStrata => "Strata schemes by registry",
            TableKey::RegistryMotorVehicles => "Motor vehicles by registry",
            TableKey::RegistryCommercial => "Commercial by registry",
            TableKey::RegistryResidentialCommunities => "Residential communities by registry",
            TableKey::RegistryRetirementVillages => "Retirement villages by registry",
            TableKey::PartyByCategory => "Landlord vs tenant by category",
        }
    }

    /// Whether the table's columns are the six registries.
    pub fn is_registry_table(self) -> bool {
        self.as_str().starts_with("registry_")
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableKey {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| DataError::UnknownTable(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Registry – regional tribunal offices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Registry {
    Liverpool,
    Newcastle,
    Penrith,
    Sydney,
    Tamworth,
    Wollongong,
}

impl Registry {
    pub const ALL: [Registry; 6] = [
        Registry::Liverpool,
        Registry::Newcastle,
        Registry::Penrith,
        Registry::Sydney,
        Registry::Tamworth,
        Registry::Wollongong,
    ];

    /// Column key used by every `registry_*` table.
    pub fn as_str(self) -> &'static str {
        match self {
            Registry::Liverpool => "Liverpool",
            Registry::Newcastle => "Newcastle",
            Registry::Penrith => "Penrith",
            Registry::Sydney => "Sydney",
            Registry::Tamworth => "Tamworth",
            Registry::Wollongong => "Wollongong",
        }
    }

    pub fn field_names() -> [&'static str; 6] {
        Registry::ALL.map(Registry::as_str)
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ListType – case list groupings with a per-registry table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ListType {
    PrivateTenancy,
    SocialHousing,
    General,
    HomeBuilding,
    StrataSchemes,
    MotorVehicles,
    Commercial,
    ResidentialCommunities,
    RetirementVillages,
}

impl ListType {
    pub const ALL: [ListType; 9] = [
        ListType::PrivateTenancy,
        ListType::SocialHousing,
        ListType::General,
        ListType::HomeBuilding,
        ListType::StrataSchemes,
        ListType::MotorVehicles,
        ListType::Commercial,
        ListType::ResidentialCommunities,
        ListType::RetirementVillages,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ListType::PrivateTenancy => "Private Tenancy",
            ListType::SocialHousing => "Social Housing",
            ListType::General => "General",
            ListType::HomeBuilding => "Home Building",
            ListType::StrataSchemes => "Strata Schemes",
            ListType::MotorVehicles => "Motor Vehicles",
            ListType::Commercial => "Commercial",
            ListType::ResidentialCommunities => "Residential Communities",
            ListType::RetirementVillages => "Retirement Villages",
        }
    }

    /// The registry table holding this list's per-office counts.
    pub fn table_key(self) -> TableKey {
        match self {
            ListType::PrivateTenancy => TableKey::RegistryPrivateTenancy,
            ListType::SocialHousing => TableKey::RegistrySocialHousing,
            ListType::General => TableKey::RegistryGeneral,
            ListType::HomeBuilding => TableKey::RegistryHomeBuilding,
            ListType::StrataSchemes => TableKey::RegistryStrata,
            ListType::MotorVehicles => TableKey::RegistryMotorVehicles,
            ListType::Commercial => TableKey::RegistryCommercial,
            ListType::ResidentialCommunities => TableKey::RegistryResidentialCommunities,
            ListType::RetirementVillages => TableKey::RegistryRetirementVillages,
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Coverage – how much of a year the counts represent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coverage {
    Q4Only,
    Partial,
    FullYear,
    Q1Only,
}

impl Coverage {
    /// Coverage of a catalog year; `None` outside 2015-2025.
    pub fn for_year(year: i32) -> Option<Coverage> {
        match year {
            2015 => Some(Coverage::Q4Only),
            2016 => Some(Coverage::Partial),
            FULL_YEAR_START..=FULL_YEAR_END => Some(Coverage::FullYear),
            2025 => Some(Coverage::Q1Only),
            _ => None,
        }
    }

    pub fn is_full_year(self) -> bool {
        self == Coverage::FullYear
    }

    pub fn label(self) -> &'static str {
        match self {
            Coverage::Q4Only => "Q4 Only",
            Coverage::Partial => "Q2, Q3, Q4",
            Coverage::FullYear => "Full Year",
            Coverage::Q1Only => "Q1 Only",
        }
    }
}

// ---------------------------------------------------------------------------
// YearWindow – an inclusive, validated year range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearWindow {
    pub start: i32,
    pub end: i32,
}

impl YearWindow {
    /// Years with complete annual coverage.
    pub const FULL_YEARS: YearWindow = YearWindow {
        start: FULL_YEAR_START,
        end: FULL_YEAR_END,
    };

    pub fn new(start: i32, end: i32) -> DataResult<Self> {
        if start > end {
            return Err(DataError::InvalidRange { lo: start, hi: end });
        }
        Ok(YearWindow { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

// ---------------------------------------------------------------------------
// Measure – a derived value that may be missing or undefined
// ---------------------------------------------------------------------------

/// A computed number that keeps "no input" apart from "zero denominator".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Value(f64),
    /// An input was missing from the source table.
    Absent,
    /// The denominator was zero, or too few observations were available.
    Undefined,
}

impl Measure {
    pub fn value(self) -> Option<f64> {
        match self {
            Measure::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_value(self) -> bool {
        matches!(self, Measure::Value(_))
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Measure {
        match self {
            Measure::Value(v) => Measure::Value(f(v)),
            other => other,
        }
    }

    /// Round to `decimals` places, half away from zero.
    pub fn round_to(self, decimals: i32) -> Measure {
        let scale = 10f64.powi(decimals);
        self.map(|v| (v * scale).round() / scale)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Value(v) => match f.precision() {
                Some(p) => write!(f, "{v:.p$}"),
                None => write!(f, "{v}"),
            },
            Measure::Absent => f.write_str("n/a"),
            Measure::Undefined => f.write_str("undefined"),
        }
    }
}

/// Serialises as a number, or as an empty cell / `null` when not a value.
impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Measure::Value(v) => serializer.serialize_f64(*v),
            _ => serializer.serialize_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// Annual tables
// ---------------------------------------------------------------------------

/// A named numeric column of an annual table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Column key, e.g. `Total_Applications`.
    pub name: &'static str,
    /// Display label, e.g. `Total Applications`.
    pub label: &'static str,
}

/// One year of an annual table; `values` align with the table's fields.
/// `None` marks a count that was not filed or not separately tracked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRecord {
    pub year: i32,
    pub values: Vec<Option<u64>>,
}

/// A validated annual table covering exactly 2015-2025.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub key: TableKey,
    pub fields: Vec<Field>,
    pub records: Vec<YearRecord>,
}

impl Table {
    /// Borrow the whole table as a frame.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            fields: &self.fields,
            records: &self.records,
        }
    }
}

/// A borrowed, year-ordered window over an annual table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    pub fields: &'a [Field],
    pub records: &'a [YearRecord],
}

impl<'a> Frame<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn field_index(&self, name: &str) -> DataResult<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| DataError::unknown_field(name))
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + 'a {
        self.records.iter().map(|r| r.year)
    }

    pub fn record(&self, year: i32) -> Option<&'a YearRecord> {
        self.records.iter().find(|r| r.year == year)
    }

    /// `(year, value)` pairs for one field, in record order.
    pub fn column(&self, name: &str) -> DataResult<Vec<(i32, Option<u64>)>> {
        let idx = self.field_index(name)?;
        Ok(self
            .records
            .iter()
            .map(|r| (r.year, r.values[idx]))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Category-party rows
// ---------------------------------------------------------------------------

/// One (year, category) row of the landlord/tenant breakdown. `total` is
/// supplied independently and may exceed `landlord + tenant`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPartyRecord {
    pub year: i32,
    pub category: String,
    pub landlord: u64,
    pub tenant: u64,
    pub total: u64,
}

// ---------------------------------------------------------------------------
// Long-format rows
// ---------------------------------------------------------------------------

/// A melted `(year, series, value)` observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongRow {
    pub year: i32,
    pub series: String,
    pub value: u64,
}

/// Rows that belong to a year; used for tie-breaking and year selection.
pub trait YearKeyed {
    fn year(&self) -> i32;
}

impl YearKeyed for YearRecord {
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearKeyed for CategoryPartyRecord {
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearKeyed for LongRow {
    fn year(&self) -> i32 {
        self.year
    }
}

impl<T: YearKeyed> YearKeyed for &T {
    fn year(&self) -> i32 {
        (**self).year()
    }
}
