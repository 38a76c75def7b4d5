//! CLI entry-point for inference row preparation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::{InferenceConfig, Settings},
    data::{
        meta,
        papers::PaperSet,
        samples::{self, PaperRows},
    },
    nlp::{self, segment::SegmentMode},
};

/// Args for the `prepare` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Directory of per-paper JSON files.
    #[arg(long)]
    pub papers: PathBuf,
    /// Optional metadata CSV fixing the paper order; without it papers
    /// are processed in sorted-id order.
    #[arg(long)]
    pub meta: Option<PathBuf>,
    /// Output JSONL path (defaults to outputs/test_ner.jsonl).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Manifest path (defaults to outputs/test_manifest.json).
    #[arg(long)]
    pub manifest: Option<PathBuf>,
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
    /// Keep only units containing one of these substrings (defaults
    /// to "data" and "study").
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,
    /// Disable the keyword prefilter entirely.
    #[arg(long)]
    pub no_keyword_filter: bool,
}

impl Args {
    fn contains_keywords(&self) -> Vec<String> {
        if self.no_keyword_filter {
            return Vec::new();
        }
        if self.keywords.is_empty() {
            return vec!["data".to_string(), "study".to_string()];
        }
        self.keywords.clone()
    }
}

#[instrument(skip(args, settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| settings.join_output("test_ner.jsonl"));
    let manifest_path = args
        .manifest
        .clone()
        .unwrap_or_else(|| settings.join_output("test_manifest.json"));

    let cfg = InferenceConfig {
        mode: args.mode,
        max_length: args.max_length,
        overlap: args.overlap,
        min_chars: args.min_chars,
        mark_title: args.mark_title,
        mark_text: args.mark_text,
        contains_keywords: args.contains_keywords(),
    };
    cfg.validate()?;

    let papers = PaperSet::load_dir(&args.papers)?;
    let ids = match &args.meta {
        Some(meta_path) => meta::load_meta(meta_path, true)?
            .into_iter()
            .map(|row| row.id)
            .collect(),
        None => papers.sorted_ids(),
    };

    let mut manifest = Vec::with_capacity(ids.len());
    let mut total_rows = 0;
    for (i, id) in ids.iter().enumerate() {
        let paper = papers.get(id)?;
        let rows = nlp::paper_inference_rows(paper, &cfg)?;
        manifest.push(PaperRows {
            id: id.clone(),
            rows: rows.len(),
        });
        total_rows += rows.len();
        samples::write_jsonl(&rows, &out, i > 0)?;
    }

    samples::write_manifest(&manifest, &manifest_path)?;
    info!(
        papers = ids.len(),
        rows = total_rows,
        out = %out.display(),
        "wrote inference rows"
    );
    Ok(())
}
