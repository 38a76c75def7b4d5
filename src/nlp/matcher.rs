//! Literal substring matching against a bank of known dataset names.

use indexmap::IndexSet;

use crate::{
    data::{meta::MetaRow, papers::Section},
    nlp::normalize::normalize,
};

/// Read-only set of lowercased dataset name strings, built once per
/// run from metadata and shared across papers.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBank {
    labels: IndexSet<String>,
}

impl KnowledgeBank {
    /// Collect every known name variant (title, surface label, cleaned
    /// label) from ungrouped metadata rows.
    pub fn from_meta(rows: &[MetaRow]) -> Self {
        let mut labels = IndexSet::new();
        for row in rows {
            labels.insert(row.dataset_title.to_lowercase());
            labels.insert(row.dataset_label.to_lowercase());
            labels.insert(row.cleaned_label.to_lowercase());
        }
        labels.retain(|label| !label.is_empty());
        Self { labels }
    }

    pub fn from_labels<I: IntoIterator<Item = String>>(labels: I) -> Self {
        Self {
            labels: labels
                .into_iter()
                .map(|label| label.to_lowercase())
                .filter(|label| !label.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// Find bank entries literally present in a paper, independent of any
/// model. Candidates are probed against both the raw lowercased text
/// and its fully normalised form; hits are reported normalised.
pub fn literal_match(paper: &[Section], bank: &KnowledgeBank) -> IndexSet<String> {
    let raw = paper
        .iter()
        .map(|section| section.text.as_str())
        .collect::<Vec<_>>()
        .join(". ")
        .to_lowercase();
    let cleaned = normalize(&raw, true, true);

    let mut found = IndexSet::new();
    for candidate in bank.iter() {
        if raw.contains(candidate) || cleaned.contains(candidate) {
            found.insert(normalize(candidate, true, true));
        }
    }
    found
}
