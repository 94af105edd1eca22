use std::collections::HashSet;

use kite::hints::alphabet::{HINT_ALPHABET, generate_labels};
use kite::hints::discovery::{MAX_CANDIDATES, parse_candidates};
use serde_json::json;

mod common;

use crate::common::pages::discovery_result;

// =========================================================================
// Label generation
// =========================================================================

#[test]
fn labels_are_distinct_for_every_count_up_to_cap() {
    for n in 0..=MAX_CANDIDATES {
        let labels = generate_labels(n);
        assert_eq!(labels.len(), n, "wrong label count for n={}", n);
        let unique: HashSet<&String> = labels.iter().collect();
        assert_eq!(unique.len(), n, "duplicate labels for n={}", n);
    }
}

#[test]
fn lengths_split_at_alphabet_size() {
    let labels = generate_labels(26);
    assert!(labels.iter().all(|l| l.len() == 1));

    let labels = generate_labels(100);
    assert!(labels[..26].iter().all(|l| l.len() == 1));
    assert!(labels[26..].iter().all(|l| l.len() == 2));
}

#[test]
fn generation_is_deterministic() {
    assert_eq!(generate_labels(313), generate_labels(313));
}

#[test]
fn zero_candidates_yield_no_labels() {
    assert!(generate_labels(0).is_empty());
}

#[test]
fn singles_follow_alphabet_order() {
    let labels = generate_labels(5);
    assert_eq!(labels, vec!["a", "s", "d", "f", "g"]);
    assert_eq!(labels[0], HINT_ALPHABET[0].to_string());
}

#[test]
fn thirty_labels_are_26_singles_plus_nested_pairs() {
    let labels = generate_labels(30);
    let singles: Vec<String> = HINT_ALPHABET.iter().map(|c| c.to_string()).collect();
    assert_eq!(&labels[..26], singles.as_slice());
    // Pairs come from the first alphabet letter in the outer loop, inner
    // loop in alphabet order.
    assert_eq!(&labels[26..], ["aa", "as", "ad", "af"]);
}

#[test]
fn every_single_is_a_prefix_of_pairs_once_past_26() {
    let labels = generate_labels(52);
    let pair_firsts: HashSet<char> = labels[26..]
        .iter()
        .filter_map(|l| l.chars().next())
        .collect();
    for first in &pair_firsts {
        assert!(labels[..26].contains(&first.to_string()));
    }
}

// =========================================================================
// Discovery result parsing
// =========================================================================

#[test]
fn parse_caps_at_400_candidates() {
    let value = discovery_result(450);
    let candidates = parse_candidates(&value);
    assert_eq!(candidates.len(), MAX_CANDIDATES);
    assert_eq!(candidates[0].element_id, "h0");
    assert_eq!(candidates[399].element_id, "h399");
}

#[test]
fn parse_treats_non_list_as_empty() {
    assert!(parse_candidates(&serde_json::Value::Null).is_empty());
    assert!(parse_candidates(&json!(false)).is_empty());
    assert!(parse_candidates(&json!({"id": "h0"})).is_empty());
}

#[test]
fn parse_skips_malformed_items_and_defaults_text() {
    let value = json!([
        {"id": "h0", "text": "Sign in"},
        {"no_id": true},
        {"id": "h2"},
    ]);
    let candidates = parse_candidates(&value);
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].accessible_text, "Sign in");
    assert_eq!(candidates[1].element_id, "h2");
    assert_eq!(candidates[1].accessible_text, "");
}
