//! Property-based tests for the compilation pipeline
//!
//! Uses proptest to generate random well-formed formulas and verify the
//! determinism, bijection, and dedup invariants.

use formulac::{Compiler, FormulaParser, FormulaRegistry, ParseErrorPolicy};
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_formula() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        prop::sample::select(vec!["a", "b", "c", "d", "x", "y", "rate", "total"])
            .prop_map(String::from),
        (1i64..1000).prop_map(|n| n.to_string()),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        (
            inner.clone(),
            prop::sample::select(vec!["+", "-", "*", "/"]),
            inner,
        )
            .prop_map(|(left, op, right)| format!("({} {} {})", left, op, right))
    })
}

/// First whole-token occurrence of `ident` in `text`.
fn first_token_position(text: &str, ident: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while let Some(pos) = text[start..].find(ident) {
        let abs = start + pos;
        let before_ok = abs == 0 || !bytes[abs - 1].is_ascii_alphanumeric();
        let after = abs + ident.len();
        let after_ok = after >= bytes.len() || !bytes[after].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return Some(abs);
        }
        start = abs + 1;
    }
    None
}

proptest! {
    #[test]
    fn every_generated_formula_parses(formula in arb_formula()) {
        prop_assert!(FormulaParser::is_valid(&formula));
    }

    #[test]
    fn variable_extraction_is_deterministic(formula in arb_formula()) {
        let first = FormulaParser::extract_variables(&formula).unwrap();
        let second = FormulaParser::extract_variables(&formula).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn variables_come_out_in_first_seen_text_order(formula in arb_formula()) {
        let vars = FormulaParser::extract_variables(&formula).unwrap();
        let positions: Vec<usize> = vars
            .iter()
            .map(|v| first_token_position(&formula, v).expect("extracted var not in text"))
            .collect();
        for pair in positions.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn minted_names_biject_with_distinct_texts(
        formulas in prop::collection::vec(arb_formula(), 1..12),
    ) {
        let registry = FormulaRegistry::new();
        let mut names = HashSet::new();
        for formula in &formulas {
            let (name, _) = registry.assign_name(formula);
            names.insert(name);
        }
        let distinct: HashSet<_> = formulas.iter().collect();
        prop_assert_eq!(names.len(), distinct.len());
        prop_assert_eq!(registry.len(), distinct.len());
    }

    #[test]
    fn resubmitting_n_times_yields_one_descriptor(
        formula in arb_formula(),
        repeats in 1usize..6,
    ) {
        let compiler = Compiler::new();
        let batch = vec![formula; repeats];
        let report = compiler.compile_batch(&batch, ParseErrorPolicy::Abort).unwrap();
        prop_assert_eq!(report.compiled.len(), 1);
        prop_assert_eq!(report.duplicates.len(), repeats - 1);
    }
}
