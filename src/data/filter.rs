use std::collections::BTreeSet;

use super::error::{DataError, DataResult};
use super::model::{Frame, YearKeyed};

// ---------------------------------------------------------------------------
// Year filters
// ---------------------------------------------------------------------------

/// Records with `lo <= year <= hi`. Records are year-ordered, so the result
/// is a contiguous sub-frame; no match yields an empty frame.
pub fn filter_year_range<'a>(frame: Frame<'a>, lo: i32, hi: i32) -> DataResult<Frame<'a>> {
    if lo > hi {
        return Err(DataError::InvalidRange { lo, hi });
    }
    let start = frame.records.partition_point(|r| r.year < lo);
    let end = frame.records.partition_point(|r| r.year <= hi);
    Ok(Frame {
        fields: frame.fields,
        records: &frame.records[start..end.max(start)],
    })
}

/// Rows whose year is in `years`. An empty selection selects nothing.
pub fn filter_years<'a, R: YearKeyed>(rows: &'a [R], years: &BTreeSet<i32>) -> Vec<&'a R> {
    rows.iter().filter(|r| years.contains(&r.year())).collect()
}

// ---------------------------------------------------------------------------
// Category scope
// ---------------------------------------------------------------------------

/// Which categories a view keeps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryScope {
    #[default]
    All,
    TerminationsOnly,
    NonTerminationsOnly,
    /// Exactly these labels.
    Custom(BTreeSet<String>),
}

impl CategoryScope {
    pub fn matches(&self, label: &str) -> bool {
        match self {
            CategoryScope::All => true,
            CategoryScope::TerminationsOnly => is_termination(label),
            CategoryScope::NonTerminationsOnly => !is_termination(label),
            CategoryScope::Custom(labels) => labels.contains(label),
        }
    }
}

pub fn is_termination(label: &str) -> bool {
    label.contains("Termination")
}
