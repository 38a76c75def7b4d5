//! Runtime configuration utilities for dataset-scout.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{error::PipelineError, nlp::segment::SegmentMode};

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root folder for cached data artefacts.
    pub data_dir: PathBuf,
    /// Root folder for generated corpora and predictions.
    pub outputs_dir: PathBuf,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));

        std::fs::create_dir_all(&data_dir).context("creating data dir")?;
        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            data_dir,
            outputs_dir,
        })
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}

/// Which negative (all-`O`) samples to retain in a training corpus.
///
/// Exactly one policy is active; callers building one from optional
/// inputs give keywords precedence over probability.
#[derive(Debug, Clone)]
pub enum NegativePolicy {
    /// Keep a negative only if its lowercased text contains one of
    /// these substrings.
    Keywords(Vec<String>),
    /// Keep each negative independently with this probability.
    Probability(f64),
    /// Keep every negative.
    KeepAll,
}

impl NegativePolicy {
    /// Resolve the policy from optional CLI inputs, keywords first.
    pub fn resolve(keywords: Vec<String>, probability: Option<f64>) -> Self {
        if !keywords.is_empty() {
            Self::Keywords(keywords)
        } else if let Some(p) = probability {
            Self::Probability(p)
        } else {
            Self::KeepAll
        }
    }
}

/// Parameters for building a training corpus from one paper at a time.
///
/// Passed explicitly at every call site; there are no process-wide
/// defaults beyond [`CorpusConfig::default`].
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Segmentation granularity for candidate units.
    pub mode: SegmentMode,
    /// Maximum tokens per emitted unit.
    pub max_length: usize,
    /// Token overlap between successive windows of an over-long unit.
    pub overlap: usize,
    /// Units whose joined text is at most this many characters are dropped.
    pub min_chars: usize,
    /// Wrap section titles in `AAAsTITLE … ZZZsTITLE` sentinels.
    pub mark_title: bool,
    /// Wrap section texts in `AAAsTEXT … ZZZsTEXT` sentinels.
    pub mark_text: bool,
    /// Retention policy for negative samples.
    pub negative_policy: NegativePolicy,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            mode: SegmentMode::Sentence,
            max_length: 64,
            overlap: 20,
            min_chars: 10,
            mark_title: false,
            mark_text: false,
            negative_policy: NegativePolicy::Keywords(vec![
                "data".to_string(),
                "study".to_string(),
            ]),
        }
    }
}

impl CorpusConfig {
    /// Reject parameter combinations that would degenerate windowing
    /// or sampling.
    pub fn validate(&self) -> Result<(), PipelineError> {
        validate_window(self.max_length, self.overlap)?;
        if let NegativePolicy::Probability(p) = self.negative_policy {
            if !(0.0..=1.0).contains(&p) {
                return Err(PipelineError::Configuration(format!(
                    "negative sample probability {p} outside [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Parameters for building inference rows (dummy-tagged units).
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub mode: SegmentMode,
    pub max_length: usize,
    pub overlap: usize,
    pub min_chars: usize,
    pub mark_title: bool,
    pub mark_text: bool,
    /// Keep only units whose lowercased text contains one of these
    /// substrings; empty means keep everything.
    pub contains_keywords: Vec<String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            mode: SegmentMode::Sentence,
            max_length: 64,
            overlap: 20,
            min_chars: 10,
            mark_title: false,
            mark_text: false,
            contains_keywords: vec!["data".to_string(), "study".to_string()],
        }
    }
}

impl InferenceConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        validate_window(self.max_length, self.overlap)
    }
}

fn validate_window(max_length: usize, overlap: usize) -> Result<(), PipelineError> {
    if max_length == 0 {
        return Err(PipelineError::Configuration(
            "max_length must be positive".to_string(),
        ));
    }
    if overlap >= max_length {
        return Err(PipelineError::Configuration(format!(
            "overlap {overlap} must be smaller than max_length {max_length}"
        )));
    }
    Ok(())
}
