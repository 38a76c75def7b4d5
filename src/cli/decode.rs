//! CLI entry-point turning model predictions into final labels.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    data::{meta, papers::PaperSet, samples},
    nlp::{
        self, decode,
        dedupe::{dedupe, format_labels},
        matcher::{literal_match, KnowledgeBank},
    },
};

/// Args for the `decode` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Inference rows written by `prepare`.
    #[arg(long)]
    pub rows: PathBuf,
    /// Model predictions, one JSONL row per inference row; rows may
    /// carry sub-token `word_ids` needing alignment.
    #[arg(long)]
    pub predictions: PathBuf,
    /// Manifest written by `prepare`.
    #[arg(long)]
    pub manifest: PathBuf,
    /// Directory of per-paper JSON files, for literal matching.
    #[arg(long)]
    pub papers: PathBuf,
    /// Metadata CSV the knowledge bank is built from.
    #[arg(long)]
    pub meta: PathBuf,
    /// Output submission CSV (defaults to outputs/submission.csv).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Suppress a candidate whose token-set Jaccard similarity to a
    /// kept label reaches this threshold.
    #[arg(long, default_value_t = 0.75)]
    pub max_similarity: f64,
}

#[instrument(skip(args, settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| settings.join_output("submission.csv"));

    let rows = samples::read_jsonl(&args.rows)?;
    let predictions = samples::read_predictions(&args.predictions)?;
    if rows.len() != predictions.len() {
        bail!(
            "{} inference rows but {} prediction rows",
            rows.len(),
            predictions.len()
        );
    }
    let manifest = samples::read_manifest(&args.manifest)?;

    let token_rows: Vec<Vec<String>> = rows.into_iter().map(|row| row.tokens).collect();
    let tag_rows = predictions
        .iter()
        .map(|row| row.aligned_tags())
        .collect::<Result<Vec<_>, _>>()?;
    let paper_lengths: Vec<usize> = manifest.iter().map(|entry| entry.rows).collect();
    let model_sets = decode::paper_label_sets(&token_rows, &tag_rows, &paper_lengths)?;

    let papers = PaperSet::load_dir(&args.papers)?;
    let bank = KnowledgeBank::from_meta(&meta::load_meta(&args.meta, false)?);
    info!(bank = bank.len(), "built knowledge bank");

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer =
        csv::Writer::from_path(&out).with_context(|| format!("creating {}", out.display()))?;
    writer.write_record(["Id", "PredictionString"])?;
    for (entry, model_set) in manifest.iter().zip(model_sets) {
        let paper = papers.get(&entry.id)?;
        let literal = literal_match(paper, &bank);
        let candidates = nlp::combine_candidates(literal, model_set);
        let kept = dedupe(candidates, args.max_similarity);
        writer.write_record([entry.id.as_str(), format_labels(&kept).as_str()])?;
    }
    writer.flush()?;

    info!(papers = manifest.len(), out = %out.display(), "wrote predictions");
    Ok(())
}
