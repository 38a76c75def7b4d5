//! Paper collection loading from per-paper JSON files.

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::PipelineError;

/// One titled block of paper text. Both fields may be empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Section {
    #[serde(rename = "section_title", default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// A paper is its ordered sections.
pub type Paper = Vec<Section>;

/// Read-only collection of papers keyed by id (the JSON file stem).
#[derive(Debug, Default)]
pub struct PaperSet {
    papers: HashMap<String, Paper>,
}

impl PaperSet {
    /// Load every `*.json` file under `dir`. An unreadable or
    /// unparseable file is logged and skipped so one bad paper never
    /// aborts the corpus.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut papers = HashMap::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match read_paper(path) {
                Ok(paper) => {
                    papers.insert(id.to_string(), paper);
                }
                Err(err) => warn!(path = %path.display(), %err, "skipping unreadable paper"),
            }
        }
        info!(papers = papers.len(), dir = %dir.display(), "loaded papers");
        Ok(Self { papers })
    }

    pub fn get(&self, id: &str) -> Result<&Paper, PipelineError> {
        self.papers
            .get(id)
            .ok_or_else(|| PipelineError::NotFound(format!("paper {id}")))
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Paper ids in lexicographic order, for deterministic iteration
    /// when no external ordering is supplied.
    pub fn sorted_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.papers.keys().cloned().collect();
        ids.sort();
        ids
    }
}

fn read_paper(path: &Path) -> Result<Paper> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let paper =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(paper)
}
