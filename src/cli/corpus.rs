//! CLI entry-point for training corpus construction.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, instrument};

use crate::{
    config::{CorpusConfig, NegativePolicy, Settings},
    data::{meta, papers::PaperSet, samples},
    nlp::{self, segment::SegmentMode, SampleStats},
};

/// Args for the `corpus` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Directory of per-paper JSON files.
    #[arg(long)]
    pub papers: PathBuf,
    /// Metadata CSV with Id and label columns.
    #[arg(long)]
    pub meta: PathBuf,
    /// Output JSONL path (defaults to outputs/train_ner.jsonl).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Segmentation granularity.
    #[arg(long, default_value = "sentence", value_enum)]
    pub mode: SegmentMode,
    /// Maximum tokens per emitted unit.
    #[arg(long, default_value_t = 64)]
    pub max_length: usize,
    /// Token overlap between windows of an over-long unit.
    #[arg(long, default_value_t = 20)]
    pub overlap: usize,
    /// Drop units at or under this many characters.
    #[arg(long, default_value_t = 10)]
    pub min_chars: usize,
    /// Wrap section titles in structural sentinels.
    #[arg(long)]
    pub mark_title: bool,
    /// Wrap section texts in structural sentinels.
    #[arg(long)]
    pub mark_text: bool,
    /// Keep a negative only if it contains one of these substrings
    /// (defaults to "data" and "study"; takes precedence over
    /// --neg-prob).
    #[arg(long = "neg-keyword")]
    pub neg_keywords: Vec<String>,
    /// Keep each negative with this probability instead.
    #[arg(long)]
    pub neg_prob: Option<f64>,
    /// Keep every negative sample.
    #[arg(long)]
    pub keep_all_negatives: bool,
    /// RNG seed for reproducible negative sampling.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    fn negative_policy(&self) -> NegativePolicy {
        if self.keep_all_negatives {
            return NegativePolicy::KeepAll;
        }
        if self.neg_keywords.is_empty() && self.neg_prob.is_none() {
            return NegativePolicy::Keywords(vec!["data".to_string(), "study".to_string()]);
        }
        NegativePolicy::resolve(self.neg_keywords.clone(), self.neg_prob)
    }
}

#[instrument(skip(args, settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| settings.join_output("train_ner.jsonl"));

    let cfg = CorpusConfig {
        mode: args.mode,
        max_length: args.max_length,
        overlap: args.overlap,
        min_chars: args.min_chars,
        mark_title: args.mark_title,
        mark_text: args.mark_text,
        negative_policy: args.negative_policy(),
    };
    cfg.validate()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let papers = PaperSet::load_dir(&args.papers)?;
    let rows = meta::load_meta(&args.meta, true)?;

    let mut totals = SampleStats::default();
    for (i, row) in rows.iter().enumerate() {
        let paper = papers.get(&row.id)?;
        let labels = meta::split_labels(&row.dataset_label);
        let (stats, batch) = nlp::paper_training_samples(paper, &labels, &cfg, &mut rng)?;
        totals.positives += stats.positives;
        totals.negatives += stats.negatives;
        samples::write_jsonl(&batch, &out, i > 0)?;
    }

    info!(
        positives = totals.positives,
        negatives = totals.negatives,
        out = %out.display(),
        "wrote training corpus"
    );
    Ok(())
}
