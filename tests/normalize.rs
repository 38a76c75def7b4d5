use dataset_scout::nlp::normalize::{normalize, tokenize};
use proptest::prelude::*;

#[test]
fn strips_punctuation_to_single_spaces() {
    assert_eq!(
        normalize("the (ADNI) data-set!", false, false),
        "the ADNI data set"
    );
}

#[test]
fn lowercases_when_asked() {
    assert_eq!(normalize("ADNI Dataset", true, false), "adni dataset");
}

#[test]
fn trims_boundary_noise() {
    assert_eq!(normalize("  ...hello...  ", false, false), "hello");
    assert_eq!(normalize("", false, true), "");
}

#[test]
fn tokenize_splits_normalized_words() {
    assert_eq!(
        tokenize("the ADNI data-set."),
        vec!["the", "ADNI", "data", "set"]
    );
    assert!(tokenize("  ...  ").is_empty());
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in ".*") {
        let once = normalize(&s, true, true);
        prop_assert_eq!(normalize(&once, true, true), once);
    }

    #[test]
    fn output_is_alphanumeric_and_spaces(s in ".*") {
        let out = normalize(&s, false, false);
        prop_assert!(out.chars().all(|c| c.is_ascii_alphanumeric() || c == ' '));
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
    }
}
