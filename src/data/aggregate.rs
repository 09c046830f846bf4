//! Stateless transformations over frames and long-format rows.
//!
//! Absent counts (`None`) are never folded into arithmetic as zero: they are
//! skipped by statistics and propagate as [`Measure::Absent`] through ratios.

use std::cmp::Ordering;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::Serialize;

use super::error::{DataError, DataResult};
use super::model::{Frame, LongRow, Measure, YearKeyed};

// ---------------------------------------------------------------------------
// Ratios
// ---------------------------------------------------------------------------

/// `num / den`, failing with [`DataError::DivisionUndefined`] when `den == 0`.
pub fn ratio(num: f64, den: f64) -> DataResult<f64> {
    if den == 0.0 {
        return Err(DataError::DivisionUndefined);
    }
    Ok(num / den)
}

impl Measure {
    /// Ratio of two optional inputs, folding the failure modes into the
    /// measure instead of an error.
    pub fn from_ratio(num: Option<f64>, den: Option<f64>) -> Measure {
        match (num, den) {
            (Some(n), Some(d)) => match ratio(n, d) {
                Ok(v) => Measure::Value(v),
                Err(_) => Measure::Undefined,
            },
            _ => Measure::Absent,
        }
    }

    /// `num / den * 100`.
    pub fn percent(num: Option<f64>, den: Option<f64>) -> Measure {
        Measure::from_ratio(num, den).map(|v| v * 100.0)
    }
}

fn as_f64(v: Option<u64>) -> Option<f64> {
    v.map(|v| v as f64)
}

// ---------------------------------------------------------------------------
// Year-over-year
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YoyDelta {
    pub year: i32,
    pub abs_delta: Option<i64>,
    pub pct_delta: Measure,
}

/// Differences between each point and the one before it. The first point
/// has no predecessor and produces no row.
pub fn year_over_year_series(points: &[(i32, Option<u64>)]) -> Vec<YoyDelta> {
    points
        .windows(2)
        .map(|pair| {
            let (_, prev) = pair[0];
            let (year, cur) = pair[1];
            let abs_delta = match (prev, cur) {
                (Some(p), Some(c)) => Some(c as i64 - p as i64),
                _ => None,
            };
            YoyDelta {
                year,
                abs_delta,
                pct_delta: Measure::percent(abs_delta.map(|d| d as f64), as_f64(prev)),
            }
        })
        .collect()
}

pub fn year_over_year(frame: Frame<'_>, field: &str) -> DataResult<Vec<YoyDelta>> {
    let column = frame.column(field)?;
    Ok(year_over_year_series(&column))
}

// ---------------------------------------------------------------------------
// Melt
// ---------------------------------------------------------------------------

/// Unpivot `fields` into `(year, field, value)` rows, record-major, dropping
/// absent values. Every field is resolved before any row is produced.
pub fn melt(frame: Frame<'_>, fields: &[&str]) -> DataResult<Vec<LongRow>> {
    let indices = fields
        .iter()
        .map(|name| frame.field_index(name))
        .collect::<DataResult<Vec<_>>>()?;

    let mut rows = Vec::with_capacity(frame.len() * fields.len());
    for rec in frame.records {
        for (&idx, name) in indices.iter().zip(fields) {
            if let Some(value) = rec.values[idx] {
                rows.push(LongRow {
                    year: rec.year,
                    series: name.to_string(),
                    value,
                });
            }
        }
    }
    Ok(rows)
}

/// Melt every field of the frame, relabelled with each field's display label.
pub fn melt_labelled(frame: Frame<'_>) -> DataResult<Vec<LongRow>> {
    let names: Vec<&str> = frame.fields.iter().map(|f| f.name).collect();
    let mut rows = melt(frame, &names)?;
    for row in &mut rows {
        let idx = frame.field_index(&row.series)?;
        row.series = frame.fields[idx].label.to_string();
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Per-group statistics over the values that are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary<G> {
    pub group: G,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub sum: Option<f64>,
    pub count_used: usize,
    /// Sample (N-1) standard deviation; undefined below two observations.
    pub std: Measure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryOrder {
    /// Highest mean first; groups without a mean go last.
    #[default]
    MeanDescending,
    GroupAscending,
    /// Order in which groups first appear in the input.
    InputOrder,
}

fn summarize<G>(group: G, values: &[f64]) -> Summary<G> {
    let count_used = values.len();
    if count_used == 0 {
        return Summary {
            group,
            mean: None,
            min: None,
            max: None,
            sum: None,
            count_used,
            std: Measure::Undefined,
        };
    }
    let sum: f64 = values.iter().sum();
    let mean = sum / count_used as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let std = if count_used < 2 {
        Measure::Undefined
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        Measure::Value((ss / (count_used - 1) as f64).sqrt())
    };
    Summary {
        group,
        mean: Some(mean),
        min: Some(min),
        max: Some(max),
        sum: Some(sum),
        count_used,
        std,
    }
}

pub fn summary_stats<R, G>(
    rows: &[R],
    group: impl Fn(&R) -> G,
    value: impl Fn(&R) -> Option<f64>,
    order: SummaryOrder,
) -> Vec<Summary<G>>
where
    G: Clone + Eq + Hash + Ord,
{
    let mut groups: IndexMap<G, Vec<f64>> = IndexMap::new();
    for row in rows {
        let values = groups.entry(group(row)).or_default();
        if let Some(v) = value(row) {
            values.push(v);
        }
    }

    let mut out: Vec<Summary<G>> = groups
        .into_iter()
        .map(|(g, values)| summarize(g, &values))
        .collect();

    match order {
        SummaryOrder::MeanDescending => out.sort_by(|a, b| match (a.mean, b.mean) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SummaryOrder::GroupAscending => out.sort_by(|a, b| a.group.cmp(&b.group)),
        SummaryOrder::InputOrder => {}
    }
    out
}

/// Statistics for a single table column.
pub fn field_summary(frame: Frame<'_>, field: &str) -> DataResult<Summary<String>> {
    let column = frame.column(field)?;
    let values: Vec<f64> = column.iter().filter_map(|(_, v)| as_f64(*v)).collect();
    Ok(summarize(field.to_string(), &values))
}

// ---------------------------------------------------------------------------
// Percentage of total
// ---------------------------------------------------------------------------

/// A row annotated with its share of its group's total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Share<'a, R> {
    pub row: &'a R,
    pub pct: Measure,
}

/// Annotate each row with `value / group_total * 100`. Absent values add
/// nothing to the total and get an absent share; a zero total yields an
/// undefined share.
pub fn percentage_of_total<'a, R, G>(
    rows: &'a [R],
    group: impl Fn(&R) -> G,
    value: impl Fn(&R) -> Option<f64>,
) -> Vec<Share<'a, R>>
where
    G: Eq + Hash,
{
    let mut totals: IndexMap<G, f64> = IndexMap::new();
    for row in rows {
        *totals.entry(group(row)).or_insert(0.0) += value(row).unwrap_or(0.0);
    }

    rows.iter()
        .map(|row| {
            let total = totals.get(&group(row)).copied();
            Share {
                row,
                pct: Measure::percent(value(row), total),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Top row per group
// ---------------------------------------------------------------------------

/// For each group (in order of first appearance) the row with the largest
/// value. Ties go to the earliest year, then to the earlier row. Rows with an
/// absent value rank below any present value.
pub fn top_group<'a, R, G>(
    rows: &'a [R],
    group: impl Fn(&R) -> G,
    value: impl Fn(&R) -> Option<f64>,
) -> DataResult<Vec<&'a R>>
where
    R: YearKeyed,
    G: Eq + Hash,
{
    if rows.is_empty() {
        return Err(DataError::EmptyInput);
    }

    let mut best: IndexMap<G, &'a R> = IndexMap::new();
    for row in rows {
        let current = best.entry(group(row)).or_insert(row);
        if outranks(row, *current, &value) {
            *current = row;
        }
    }
    Ok(best.into_values().collect())
}

fn outranks<R: YearKeyed>(candidate: &R, current: &R, value: &impl Fn(&R) -> Option<f64>) -> bool {
    let by_value = match (value(candidate), value(current)) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    };
    match by_value {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => candidate.year() < current.year(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Field, Table, TableKey, YearRecord};
    use approx::assert_relative_eq;

    fn table(values: &[(i32, Option<u64>, Option<u64>)]) -> Table {
        Table {
            key: TableKey::PartyTotals,
            fields: vec![
                Field { name: "A", label: "Alpha" },
                Field { name: "B", label: "Beta" },
            ],
            records: values
                .iter()
                .map(|&(year, a, b)| YearRecord { year, values: vec![a, b] })
                .collect(),
        }
    }

    #[derive(Debug, PartialEq)]
    struct Obs {
        year: i32,
        group: &'static str,
        value: Option<f64>,
    }

    impl YearKeyed for Obs {
        fn year(&self) -> i32 {
            self.year
        }
    }

    fn obs(year: i32, group: &'static str, value: Option<f64>) -> Obs {
        Obs { year, group, value }
    }

    #[test]
    fn ratio_rejects_zero_denominator() {
        assert_eq!(ratio(1.0, 0.0), Err(DataError::DivisionUndefined));
        assert_eq!(ratio(3.0, 4.0), Ok(0.75));
        assert_eq!(Measure::from_ratio(Some(1.0), Some(0.0)), Measure::Undefined);
        assert_eq!(Measure::from_ratio(None, Some(2.0)), Measure::Absent);
    }

    #[test]
    fn yoy_drops_first_year_and_propagates_absence() {
        let t = table(&[
            (2019, Some(100), None),
            (2020, Some(150), Some(5)),
            (2021, Some(0), Some(6)),
            (2022, Some(30), None),
        ]);
        let deltas = year_over_year(t.frame(), "A").unwrap();
        assert_eq!(deltas.len(), 3);
        assert_eq!(deltas[0].year, 2020);
        assert_eq!(deltas[0].abs_delta, Some(50));
        assert_relative_eq!(deltas[0].pct_delta.value().unwrap(), 50.0);
        assert_eq!(deltas[1].abs_delta, Some(-150));
        assert_eq!(deltas[2].abs_delta, Some(30));
        assert_eq!(deltas[2].pct_delta, Measure::Undefined);

        let b = year_over_year(t.frame(), "B").unwrap();
        assert_eq!(b[0].abs_delta, None);
        assert_eq!(b[0].pct_delta, Measure::Absent);
        assert_eq!(b[1].abs_delta, Some(1));
        assert_eq!(b[2].pct_delta, Measure::Absent);
    }

    #[test]
    fn yoy_on_unknown_field_fails() {
        let t = table(&[(2019, Some(1), Some(1))]);
        assert_eq!(
            year_over_year(t.frame(), "C"),
            Err(DataError::UnknownField { field: "C".into() })
        );
    }

    #[test]
    fn melt_is_record_major_and_drops_absent() {
        let t = table(&[(2019, Some(1), None), (2020, Some(2), Some(3))]);
        let rows = melt(t.frame(), &["B", "A"]).unwrap();
        let flat: Vec<_> = rows
            .iter()
            .map(|r| (r.year, r.series.as_str(), r.value))
            .collect();
        assert_eq!(flat, vec![(2019, "A", 1), (2020, "B", 3), (2020, "A", 2)]);
    }

    #[test]
    fn melt_fails_before_emitting_rows_on_unknown_field() {
        let t = table(&[(2019, Some(1), Some(2))]);
        assert!(matches!(
            melt(t.frame(), &["A", "Z"]),
            Err(DataError::UnknownField { .. })
        ));
    }

    #[test]
    fn melt_labelled_uses_display_labels() {
        let t = table(&[(2019, Some(1), None)]);
        let rows = melt_labelled(t.frame()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].series, "Alpha");
    }

    #[test]
    fn melt_labelled_keeps_melt_row_order() {
        let t = table(&[(2019, Some(1), None), (2020, Some(2), Some(3))]);
        let plain = melt(t.frame(), &["A", "B"]).unwrap();
        let labelled = melt_labelled(t.frame()).unwrap();
        let key = |rows: &[LongRow]| rows.iter().map(|r| (r.year, r.value)).collect::<Vec<_>>();
        assert_eq!(key(&plain), key(&labelled));
        let series: Vec<_> = labelled.iter().map(|r| r.series.as_str()).collect();
        assert_eq!(series, vec!["Alpha", "Alpha", "Beta"]);
    }

    #[test]
    fn summary_excludes_absent_values() {
        let rows = vec![
            obs(2017, "x", Some(2.0)),
            obs(2018, "x", None),
            obs(2019, "x", Some(4.0)),
            obs(2017, "y", Some(10.0)),
        ];
        let stats = summary_stats(&rows, |r| r.group, |r| r.value, SummaryOrder::default());
        assert_eq!(stats[0].group, "y");
        assert_eq!(stats[0].count_used, 1);
        assert_eq!(stats[0].std, Measure::Undefined);

        let x = &stats[1];
        assert_eq!(x.count_used, 2);
        assert_eq!(x.mean, Some(3.0));
        assert_eq!(x.sum, Some(6.0));
        assert_eq!(x.min, Some(2.0));
        assert_eq!(x.max, Some(4.0));
        assert_relative_eq!(x.std.value().unwrap(), 2f64.sqrt());
    }

    #[test]
    fn summary_of_all_absent_group_has_no_mean_and_sorts_last() {
        let rows = vec![obs(2017, "empty", None), obs(2017, "full", Some(1.0))];
        let stats = summary_stats(&rows, |r| r.group, |r| r.value, SummaryOrder::MeanDescending);
        assert_eq!(stats[0].group, "full");
        assert_eq!(stats[1].group, "empty");
        assert_eq!(stats[1].count_used, 0);
        assert_eq!(stats[1].mean, None);
        assert_eq!(stats[1].sum, None);
    }

    #[test]
    fn summary_honours_requested_order() {
        let rows = vec![obs(2017, "b", Some(1.0)), obs(2017, "a", Some(5.0))];
        let input = summary_stats(&rows, |r| r.group, |r| r.value, SummaryOrder::InputOrder);
        assert_eq!(input[0].group, "b");
        let asc = summary_stats(&rows, |r| r.group, |r| r.value, SummaryOrder::GroupAscending);
        assert_eq!(asc[0].group, "a");
    }

    #[test]
    fn field_summary_skips_absent_years() {
        let t = table(&[(2019, Some(1), None), (2020, Some(2), Some(8)), (2021, Some(3), None)]);
        let b = field_summary(t.frame(), "B").unwrap();
        assert_eq!(b.count_used, 1);
        assert_eq!(b.mean, Some(8.0));
        assert_eq!(b.std, Measure::Undefined);
    }

    #[test]
    fn percentages_within_a_group_sum_to_one_hundred() {
        let rows = vec![
            obs(2020, "a", Some(1.0)),
            obs(2020, "b", Some(3.0)),
            obs(2021, "a", Some(2.0)),
        ];
        let shares = percentage_of_total(&rows, |r| r.year, |r| r.value);
        assert_relative_eq!(shares[0].pct.value().unwrap(), 25.0);
        assert_relative_eq!(shares[1].pct.value().unwrap(), 75.0);
        assert_relative_eq!(shares[2].pct.value().unwrap(), 100.0);
    }

    #[test]
    fn percentage_handles_absent_and_zero_totals() {
        let rows = vec![
            obs(2020, "a", None),
            obs(2020, "b", Some(4.0)),
            obs(2021, "a", Some(0.0)),
            obs(2021, "b", Some(0.0)),
        ];
        let shares = percentage_of_total(&rows, |r| r.year, |r| r.value);
        assert_eq!(shares[0].pct, Measure::Absent);
        assert_relative_eq!(shares[1].pct.value().unwrap(), 100.0);
        assert_eq!(shares[2].pct, Measure::Undefined);
        assert_eq!(shares[3].pct, Measure::Undefined);
    }

    #[test]
    fn top_group_rejects_empty_input() {
        let rows: Vec<Obs> = Vec::new();
        assert_eq!(
            top_group(&rows, |r| r.group, |r| r.value),
            Err(DataError::EmptyInput)
        );
    }

    #[test]
    fn top_group_returns_single_row_whatever_its_value() {
        let rows = vec![obs(2020, "a", None)];
        let top = top_group(&rows, |r| r.group, |r| r.value).unwrap();
        assert_eq!(top, vec![&rows[0]]);
    }

    #[test]
    fn top_group_breaks_ties_by_year_then_input_order() {
        let rows = vec![
            obs(2021, "a", Some(5.0)),
            obs(2019, "a", Some(5.0)),
            obs(2019, "a", Some(5.0)),
            obs(2020, "b", Some(1.0)),
            obs(2020, "b", Some(7.0)),
        ];
        let top = top_group(&rows, |r| r.group, |r| r.value).unwrap();
        assert_eq!(top.len(), 2);
        assert!(std::ptr::eq(top[0], &rows[1]));
        assert!(std::ptr::eq(top[1], &rows[4]));
    }
}
