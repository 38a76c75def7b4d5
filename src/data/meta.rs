//! Metadata CSV loading: paper ids and their ground-truth labels.

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

/// One metadata row. After grouping, the three label columns hold
/// pipe-joined variants accumulated across a paper's rows.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaRow {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "pub_title", default)]
    pub pub_title: String,
    #[serde(rename = "dataset_title", default)]
    pub dataset_title: String,
    #[serde(rename = "dataset_label", default)]
    pub dataset_label: String,
    #[serde(rename = "cleaned_label", default)]
    pub cleaned_label: String,
}

/// Load metadata rows, optionally aggregating the label columns so
/// each paper appears exactly once (first title wins, labels joined
/// with `|` in row order).
pub fn load_meta(path: &Path, group_by_id: bool) -> Result<Vec<MetaRow>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: MetaRow = result.with_context(|| format!("parsing {}", path.display()))?;
        rows.push(row);
    }

    if group_by_id {
        let mut grouped: IndexMap<String, MetaRow> = IndexMap::new();
        for row in rows {
            match grouped.entry(row.id.clone()) {
                indexmap::map::Entry::Occupied(mut slot) => {
                    let existing = slot.get_mut();
                    join_pipe(&mut existing.dataset_title, &row.dataset_title);
                    join_pipe(&mut existing.dataset_label, &row.dataset_label);
                    join_pipe(&mut existing.cleaned_label, &row.cleaned_label);
                }
                indexmap::map::Entry::Vacant(slot) => {
                    slot.insert(row);
                }
            }
        }
        rows = grouped.into_values().collect();
    }

    info!(rows = rows.len(), path = %path.display(), "loaded metadata");
    Ok(rows)
}

/// Split a pipe-joined label column into its variants.
pub fn split_labels(column: &str) -> Vec<String> {
    column
        .split('|')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_pipe(target: &mut String, addition: &str) {
    if addition.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push('|');
    }
    target.push_str(addition);
}
