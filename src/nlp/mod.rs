//! Mention-extraction core: segmentation, tagging, decoding, matching.

pub mod decode;
pub mod dedupe;
pub mod matcher;
pub mod normalize;
pub mod segment;
pub mod tagger;

use indexmap::IndexSet;
use rand::Rng;
use tracing::debug;

use crate::{
    config::{CorpusConfig, InferenceConfig},
    data::{papers::Section, samples::LabeledSample},
    error::PipelineError,
    nlp::{
        normalize::tokenize,
        segment::{segment, shorten, Markers},
        tagger::{keep_negative, tag_sentence, Tag},
    },
};

/// Positive/negative sample counts for one paper.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleStats {
    pub positives: usize,
    pub negatives: usize,
}

/// Build training samples for one paper against its ground-truth
/// labels. Pure apart from the caller-supplied RNG used by the
/// negative retention policy.
pub fn paper_training_samples<R: Rng>(
    paper: &[Section],
    labels: &[String],
    cfg: &CorpusConfig,
    rng: &mut R,
) -> Result<(SampleStats, Vec<LabeledSample>), PipelineError> {
    cfg.validate()?;

    let label_tokens: Vec<Vec<String>> = labels
        .iter()
        .map(|label| tokenize(label))
        .filter(|tokens| !tokens.is_empty())
        .collect();

    let units = tokenized_units(paper, cfg.mode, markers_of(cfg.mark_title, cfg.mark_text));
    let units = shorten(units, cfg.max_length, cfg.overlap)?;

    let mut stats = SampleStats::default();
    let mut samples = Vec::new();
    for tokens in units {
        if tokens.join(" ").len() <= cfg.min_chars {
            continue;
        }
        let (positive, tags) = tag_sentence(&tokens, &label_tokens);
        if positive {
            stats.positives += 1;
            samples.push(LabeledSample::new(tokens, &tags));
        } else if keep_negative(&cfg.negative_policy, &tokens, rng) {
            stats.negatives += 1;
            samples.push(LabeledSample::new(tokens, &tags));
        }
    }

    debug!(
        positives = stats.positives,
        negatives = stats.negatives,
        "tagged paper"
    );
    Ok((stats, samples))
}

/// Build inference rows for one paper: the exchange shape with all-`O`
/// dummy tags, filtered the same way training units are.
pub fn paper_inference_rows(
    paper: &[Section],
    cfg: &InferenceConfig,
) -> Result<Vec<LabeledSample>, PipelineError> {
    cfg.validate()?;

    let units = tokenized_units(paper, cfg.mode, markers_of(cfg.mark_title, cfg.mark_text));
    let units = shorten(units, cfg.max_length, cfg.overlap)?;

    let mut rows = Vec::new();
    for tokens in units {
        if tokens.join(" ").len() <= cfg.min_chars {
            continue;
        }
        if !cfg.contains_keywords.is_empty() {
            let text = tokens.join(" ").to_lowercase();
            if !cfg
                .contains_keywords
                .iter()
                .any(|keyword| text.contains(keyword))
            {
                continue;
            }
        }
        let tags = vec![Tag::Outside; tokens.len()];
        rows.push(LabeledSample::new(tokens, &tags));
    }
    Ok(rows)
}

/// Concatenate literal-match and model-derived candidates for one
/// paper, literal first so deduplication keeps them over
/// near-duplicate predictions.
pub fn combine_candidates(
    literal: IndexSet<String>,
    model: IndexSet<String>,
) -> Vec<String> {
    literal.into_iter().chain(model).collect()
}

fn markers_of(title: bool, text: bool) -> Markers {
    Markers { title, text }
}

fn tokenized_units(
    paper: &[Section],
    mode: segment::SegmentMode,
    markers: Markers,
) -> Vec<Vec<String>> {
    segment(paper, mode, markers)
        .iter()
        .map(|unit| tokenize(unit))
        .collect()
}
