//! Property-based tests for text matching and facet state
//!
//! Tests invariants:
//! - Empty query matches every name
//! - A name always matches itself, any substring of itself, and any query
//!   that contains it, regardless of case
//! - Range facet values stay within `[min, max]` after any update

use proptest::prelude::*;

use crate::core::search::{text_matches, FacetChoice, FacetValue};

proptest! {
    #[test]
    fn prop_empty_query_matches_everything(name in ".{0,40}") {
        prop_assert!(text_matches(&name, ""));
    }

    #[test]
    fn prop_match_is_symmetric(a in "[a-zA-Z ]{1,20}", b in "[a-zA-Z ]{1,20}") {
        prop_assert_eq!(text_matches(&a, &b), text_matches(&b, &a));
    }

    #[test]
    fn prop_substring_of_name_matches(
        name in "[a-zA-Z' ]{1,30}",
        start in 0usize..30,
        len in 1usize..30,
    ) {
        let start = start % name.len();
        let end = (start + len).min(name.len());
        let query = name[start..end].to_uppercase();
        prop_assert!(text_matches(&name, &query));
    }

    #[test]
    fn prop_extended_query_matches(name in "[a-zA-Z]{1,20}", suffix in "[a-z ]{0,20}") {
        let query = format!("{}{}", name.to_lowercase(), suffix);
        prop_assert!(text_matches(&name, &query));
    }

    #[test]
    fn prop_range_value_is_clamped(value in -1000.0f64..1000.0) {
        let mut facet = FacetChoice::range("Challenge Rating", 0.0, 50.0, 0.0);
        facet.apply(FacetValue::Number(value)).unwrap();
        let stored = facet.range_value().unwrap();
        prop_assert!((0.0..=50.0).contains(&stored));
        if (0.0..=50.0).contains(&value) {
            prop_assert_eq!(stored, value);
        }
    }
}
