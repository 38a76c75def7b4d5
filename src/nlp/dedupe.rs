//! Near-duplicate suppression over candidate label strings.

use std::collections::HashSet;

use crate::nlp::normalize::normalize;

/// Token-set Jaccard similarity of two label strings.
///
/// Two empty token sets compare as 0 (maximally dissimilar) rather
/// than dividing by zero; that is part of the contract.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let set_a: HashSet<&str> = a.split_whitespace().collect();
    let set_b: HashSet<&str> = b.split_whitespace().collect();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}

/// Greedily keep labels whose normalised form is not too similar to
/// anything already kept.
///
/// Input order encodes priority: callers place literal matches before
/// model predictions, so a literal match is never suppressed in
/// favour of a near-duplicate prediction arriving later. Labels are
/// normalised (lowercase, non-alphanumerics stripped) both for
/// comparison and in the output.
pub fn dedupe<I>(labels: I, max_similarity: f64) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut kept: Vec<String> = Vec::new();
    for label in labels {
        let label = normalize(&label, true, true);
        if kept
            .iter()
            .all(|existing| jaccard_similarity(&label, existing) < max_similarity)
        {
            kept.push(label);
        }
    }
    kept
}

/// Join a kept label set into the pipe-separated submission string.
pub fn format_labels(labels: &[String]) -> String {
    labels.join("|")
}
