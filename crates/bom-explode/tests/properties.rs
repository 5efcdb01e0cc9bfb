//! Property tests: totals against an independent closed-form computation.

use std::collections::BTreeMap;

use bom_core::{ComponentRow, ItemId, Tolerances, nearly_equal};
use bom_explode::{ExplodeSettings, NodeClass, classify_fields, explode_rows};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Buy,
    Make,
    Phantom,
}

/// One generated row: item `I{index}` below `parent` (None = root).
#[derive(Debug, Clone)]
struct Spec {
    kind: Kind,
    parent_choice: usize,
    qty: f64,
    is_length: bool,
}

fn id(s: &str) -> ItemId {
    ItemId::new(s).unwrap()
}

fn spec_strategy() -> impl Strategy<Value = Spec> {
    (
        prop_oneof![Just(Kind::Buy), Just(Kind::Make), Just(Kind::Phantom)],
        any::<usize>(),
        prop_oneof![Just(0.5), Just(1.0), Just(2.0), Just(3.0), Just(12.5)],
        any::<bool>(),
    )
        .prop_map(|(kind, parent_choice, qty, is_length)| Spec {
            kind,
            parent_choice,
            qty,
            is_length,
        })
}

/// Parents are the root or an earlier phantom, so the table is acyclic.
fn build_table(specs: &[Spec]) -> (Vec<ComponentRow>, Vec<Option<usize>>) {
    let mut rows = vec![ComponentRow::root(id("R"))];
    let mut parents = Vec::with_capacity(specs.len());
    let mut phantoms: Vec<usize> = Vec::new();

    for (i, spec) in specs.iter().enumerate() {
        let choice = spec.parent_choice % (phantoms.len() + 1);
        let parent = if choice == 0 {
            None
        } else {
            Some(phantoms[choice - 1])
        };
        parents.push(parent);

        let parent_id = parent.map_or_else(|| id("R"), |p| id(&format!("I{p}")));
        let mut row = ComponentRow::new(id(&format!("I{i}")), Some(parent_id), spec.qty);
        row = match spec.kind {
            Kind::Buy => row.with_procurement("Purchased"),
            Kind::Make => row.with_procurement("Production"),
            Kind::Phantom => row.with_procurement("Production").with_line_type("Phantom"),
        };
        if spec.is_length {
            row = row.with_template("Profile 30mm");
        }
        rows.push(row);

        if matches!(spec.kind, Kind::Phantom) {
            phantoms.push(i);
        }
    }
    (rows, parents)
}

/// Expected (counts, lengths) computed without traversal.
fn expected(
    specs: &[Spec],
    parents: &[Option<usize>],
) -> (BTreeMap<String, f64>, BTreeMap<String, f64>) {
    let mut multiplier = vec![0.0; specs.len()];
    for i in 0..specs.len() {
        let base = parents[i].map_or(1.0, |p| multiplier[p]);
        multiplier[i] = base * specs[i].qty;
    }

    let mut counts = BTreeMap::new();
    let mut lengths = BTreeMap::new();
    for (i, spec) in specs.iter().enumerate() {
        let has_children = parents.contains(&Some(i));
        let name = format!("I{i}");
        match spec.kind {
            Kind::Buy | Kind::Make if spec.is_length => {
                *lengths.entry(name).or_insert(0.0) += multiplier[i];
            }
            Kind::Buy | Kind::Make => {
                *counts.entry(name).or_insert(0.0) += multiplier[i];
            }
            Kind::Phantom if !has_children => {
                *counts.entry(name).or_insert(0.0) += multiplier[i];
            }
            Kind::Phantom => {}
        }
    }
    if specs.is_empty() {
        counts.insert("R".to_string(), 1.0);
    }
    (counts, lengths)
}

fn same_totals(actual: &BTreeMap<String, f64>, expected: &BTreeMap<String, f64>) -> bool {
    let tol = Tolerances::default();
    actual.len() == expected.len()
        && actual
            .iter()
            .all(|(k, v)| expected.get(k).is_some_and(|e| nearly_equal(*v, *e, tol)))
}

proptest! {
    #[test]
    fn totals_match_closed_form(specs in prop::collection::vec(spec_strategy(), 0..16)) {
        let (rows, parents) = build_table(&specs);
        let (want_counts, want_lengths) = expected(&specs, &parents);

        let result = explode_rows(rows, &ExplodeSettings::default()).unwrap();
        let counts: BTreeMap<String, f64> = result
            .orders
            .iter()
            .map(|l| (l.item.to_string(), l.total_quantity))
            .collect();
        let lengths: BTreeMap<String, f64> = result
            .lengths
            .iter()
            .map(|l| (l.item.to_string(), l.total_mm))
            .collect();

        prop_assert!(same_totals(&counts, &want_counts), "{counts:?} != {want_counts:?}");
        prop_assert!(same_totals(&lengths, &want_lengths), "{lengths:?} != {want_lengths:?}");
        prop_assert_eq!(result.skipped_unknown, 0);
    }

    #[test]
    fn duplicating_a_row_changes_nothing(
        specs in prop::collection::vec(spec_strategy(), 1..16),
        pick in any::<usize>(),
    ) {
        let (rows, _) = build_table(&specs);
        let baseline = explode_rows(rows.clone(), &ExplodeSettings::default()).unwrap();

        let mut doubled = rows.clone();
        let dup = 1 + pick % (rows.len() - 1);
        doubled.insert(dup + 1, rows[dup].clone());
        let result = explode_rows(doubled, &ExplodeSettings::default()).unwrap();

        prop_assert_eq!(&baseline.orders, &result.orders);
        prop_assert_eq!(&baseline.lengths, &result.lengths);
    }

    #[test]
    fn counts_and_lengths_are_disjoint(specs in prop::collection::vec(spec_strategy(), 0..16)) {
        let (rows, _) = build_table(&specs);
        let result = explode_rows(rows, &ExplodeSettings::default()).unwrap();
        for line in &result.lengths {
            prop_assert!(result.order(line.item.as_str()).is_none());
        }
    }

    #[test]
    fn classification_is_pure(procurement in ".{0,20}", line_type in ".{0,20}") {
        let first = classify_fields(&procurement, &line_type);
        let second = classify_fields(&procurement, &line_type);
        prop_assert_eq!(first, second);
        if procurement.to_lowercase().contains("purch") {
            prop_assert_eq!(first, NodeClass::Buy);
        }
    }
}
