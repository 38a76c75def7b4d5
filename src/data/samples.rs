//! The JSONL exchange format shared with the external model trainer.

use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::PipelineError, nlp::tagger::Tag};

/// Sentinel the external tokenizer assigns to sub-tokens ignored by
/// the loss; it must never survive word-id alignment.
pub const IGNORED_TAG: i64 = -100;

/// One token/tag row: `{"tokens": [...], "ner_tags": [...]}` with the
/// fixed `O=0, I=1, B=2` integer encoding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LabeledSample {
    pub tokens: Vec<String>,
    pub ner_tags: Vec<u8>,
}

impl LabeledSample {
    pub fn new(tokens: Vec<String>, tags: &[Tag]) -> Self {
        Self {
            tokens,
            ner_tags: tags.iter().map(|tag| tag.id()).collect(),
        }
    }

    /// Decode the integer tags, validating length and value range.
    pub fn tags(&self) -> Result<Vec<Tag>, PipelineError> {
        if self.tokens.len() != self.ner_tags.len() {
            return Err(PipelineError::MalformedInput(format!(
                "{} tokens but {} tags",
                self.tokens.len(),
                self.ner_tags.len()
            )));
        }
        self.ner_tags.iter().map(|&id| Tag::from_id(id)).collect()
    }
}

/// Predicted tag row coming back from the model runtime. When
/// `word_ids` is present the tags are per sub-token and need
/// [`retain_original`] before decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRow {
    pub ner_tags: Vec<i64>,
    #[serde(default)]
    pub word_ids: Option<Vec<Option<usize>>>,
}

impl PredictionRow {
    /// Original-token-aligned tags for this row.
    pub fn aligned_tags(&self) -> Result<Vec<Tag>, PipelineError> {
        let ids = match &self.word_ids {
            Some(word_ids) => retain_original(&self.ner_tags, word_ids)?,
            None => self.ner_tags.clone(),
        };
        ids.iter()
            .map(|&id| {
                u8::try_from(id)
                    .map_err(|_| {
                        PipelineError::MalformedInput(format!("tag id {id} is not a tag"))
                    })
                    .and_then(Tag::from_id)
            })
            .collect()
    }
}

/// Drop tags belonging to special tokens and non-initial sub-tokens,
/// keeping the first sub-token's tag for each original word.
pub fn retain_original(
    tags: &[i64],
    word_ids: &[Option<usize>],
) -> Result<Vec<i64>, PipelineError> {
    if tags.len() != word_ids.len() {
        return Err(PipelineError::MalformedInput(format!(
            "{} tags but {} word ids",
            tags.len(),
            word_ids.len()
        )));
    }

    let mut kept = Vec::new();
    let mut previous = None;
    for (&tag, &word_id) in tags.iter().zip(word_ids) {
        if word_id.is_some() && word_id != previous {
            if tag == IGNORED_TAG {
                return Err(PipelineError::MalformedInput(
                    "ignored-tag sentinel on an original token".to_string(),
                ));
            }
            kept.push(tag);
        }
        previous = word_id;
    }
    Ok(kept)
}

/// Per-paper row count, recorded by `prepare` and consumed by
/// `decode` to slice the flat row stream back into papers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaperRows {
    pub id: String,
    pub rows: usize,
}

/// Append or write samples as one JSON object per line.
pub fn write_jsonl(samples: &[LabeledSample], path: &Path, append: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for sample in samples {
        serde_json::to_writer(&mut writer, sample)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_jsonl(path: &Path) -> Result<Vec<LabeledSample>> {
    read_lines(path)
}

pub fn read_predictions(path: &Path) -> Result<Vec<PredictionRow>> {
    read_lines(path)
}

/// Write the per-paper row manifest as a JSON array.
pub fn write_manifest(manifest: &[PaperRows], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), manifest)?;
    info!(papers = manifest.len(), path = %path.display(), "wrote manifest");
    Ok(())
}

pub fn read_manifest(path: &Path) -> Result<Vec<PaperRows>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let manifest = serde_json::from_reader(BufReader::new(file))?;
    Ok(manifest)
}

fn read_lines<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rows = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(serde_json::from_str(&line)?);
    }
    Ok(rows)
}
