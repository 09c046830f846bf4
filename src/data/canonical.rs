use std::collections::BTreeSet;

use serde::Serialize;

use super::model::CategoryPartyRecord;

/// Literal substring replacements, applied in this order.
pub const LABEL_SUBSTITUTIONS: [(&str, &str); 8] = [
    ("Rental bonds", "Rental Bonds"),
    ("General orders", "General Orders"),
    ("Termination - breach", "Termination - Breach"),
    ("Termination - non-payment of rent", "Termination non-payment of rent"),
    ("Termination - other", "Termination - Other"),
    ("Termination by co-tenant (s102)", "Termination by co-tenant (s.102)"),
    ("Termination by a co-tenant (s 102)", "Termination by co-tenant (s.102)"),
    ("Termination - Breach (s 87)", "Termination - Breach (s.87)"),
];

/// The labels category-party rows are expected to collapse onto.
pub const CANONICAL_CATEGORY_LABELS: [&str; 8] = [
    "Rental Bonds",
    "General Orders",
    "Rent and other payments",
    "Repairs",
    "Termination - Breach (s.87)",
    "Termination non-payment of rent",
    "Termination by co-tenant (s.102)",
    "Termination - Other",
];

/// Result of canonicalising one raw label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalLabel {
    pub label: String,
    /// `false` when the label is outside the canonical set and needs review.
    pub recognized: bool,
}

pub fn canonicalize_category_label(raw: &str) -> CanonicalLabel {
    let label = LABEL_SUBSTITUTIONS
        .iter()
        .fold(raw.to_string(), |acc, (from, to)| acc.replace(from, to));
    let recognized = CANONICAL_CATEGORY_LABELS.contains(&label.as_str());
    CanonicalLabel { label, recognized }
}

/// Category-party rows with canonical labels, plus every label that could
/// not be mapped onto the canonical set.
#[derive(Debug, Clone, Default)]
pub struct CanonicalizedRecords {
    pub records: Vec<CategoryPartyRecord>,
    pub flagged: BTreeSet<String>,
}

pub fn canonicalize_party_records(records: &[CategoryPartyRecord]) -> CanonicalizedRecords {
    let mut out = CanonicalizedRecords::default();
    for rec in records {
        let canonical = canonicalize_category_label(&rec.category);
        if !canonical.recognized && out.flagged.insert(canonical.label.clone()) {
            log::warn!(
                "category label {:?} ({}) is not in the canonical set",
                canonical.label,
                rec.year
            );
        }
        out.records.push(CategoryPartyRecord {
            category: canonical.label,
            ..rec.clone()
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn casing_and_statute_variants_collapse() {
        let cases = [
            ("Rental bonds", "Rental Bonds"),
            ("General orders", "General Orders"),
            ("Termination - breach (s.87)", "Termination - Breach (s.87)"),
            ("Termination - Breach (s 87)", "Termination - Breach (s.87)"),
            ("Termination - non-payment of rent", "Termination non-payment of rent"),
            ("Termination - other", "Termination - Other"),
            ("Termination by co-tenant (s102)", "Termination by co-tenant (s.102)"),
            ("Termination by a co-tenant (s 102)", "Termination by co-tenant (s.102)"),
        ];
        for (raw, expected) in cases {
            let canonical = canonicalize_category_label(raw);
            assert_eq!(canonical.label, expected, "raw label {raw:?}");
            assert!(canonical.recognized);
        }
    }

    #[test]
    fn chained_rules_reach_the_statute_form() {
        // lower-case "breach" plus "s 87" needs rules 3 and 8 in sequence
        let canonical = canonicalize_category_label("Termination - breach (s 87)");
        assert_eq!(canonical.label, "Termination - Breach (s.87)");
    }

    #[test]
    fn unmatched_labels_pass_through_flagged() {
        let canonical = canonicalize_category_label("Termination other");
        assert_eq!(canonical.label, "Termination other");
        assert!(!canonical.recognized);
    }

    #[test]
    fn batch_collects_flagged_labels_without_dropping_rows() {
        let records = vec![
            CategoryPartyRecord {
                year: 2018,
                category: "Rental bonds".into(),
                landlord: 1496,
                tenant: 3124,
                total: 4747,
            },
            CategoryPartyRecord {
                year: 2024,
                category: "Termination other".into(),
                landlord: 3714,
                tenant: 534,
                total: 4418,
            },
        ];
        let out = canonicalize_party_records(&records);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].category, "Rental Bonds");
        assert_eq!(out.records[1].category, "Termination other");
        assert_eq!(out.flagged.len(), 1);
        assert!(out.flagged.contains("Termination other"));
    }

    #[test]
    fn canonical_labels_are_fixed_points() {
        for label in CANONICAL_CATEGORY_LABELS {
            assert_eq!(canonicalize_category_label(label).label, label);
        }
    }

    fn fragment() -> impl Strategy<Value = String> {
        let mut pieces: Vec<String> = LABEL_SUBSTITUTIONS
            .iter()
            .flat_map(|(from, to)| [from.to_string(), to.to_string()])
            .collect();
        pieces.extend(["Termination other", "Repairs", " ", "-"].map(String::from));
        prop_oneof![
            proptest::sample::select(pieces),
            "[a-zA-Z .()-]{0,8}",
        ]
    }

    proptest! {
        #[test]
        fn canonicalization_is_idempotent(parts in proptest::collection::vec(fragment(), 0..4)) {
            let raw = parts.concat();
            let once = canonicalize_category_label(&raw);
            let twice = canonicalize_category_label(&once.label);
            prop_assert_eq!(once, twice);
        }
    }
}
