use dataset_scout::config::{CorpusConfig, InferenceConfig, NegativePolicy};
use dataset_scout::data::papers::Section;
use dataset_scout::error::PipelineError;
use dataset_scout::nlp::{
    self,
    dedupe::{dedupe, format_labels},
    matcher::{literal_match, KnowledgeBank},
    segment::SegmentMode,
};
use indexmap::IndexSet;
use rand::{rngs::StdRng, SeedableRng};

fn section(title: &str, text: &str) -> Section {
    Section {
        title: title.to_string(),
        text: text.to_string(),
    }
}

#[test]
fn training_samples_tag_known_labels() {
    let paper = vec![section(
        "Methods",
        "Our study relies on the ADNI dataset for cohort selection. \
         Weather was sunny throughout.",
    )];
    let labels = vec!["ADNI dataset".to_string()];
    let cfg = CorpusConfig::default();
    let mut rng = StdRng::seed_from_u64(0);

    let (stats, samples) = nlp::paper_training_samples(&paper, &labels, &cfg, &mut rng).unwrap();
    assert_eq!(stats.positives, 1);
    // The weather sentence has no keyword and is filtered out.
    assert_eq!(stats.negatives, 0);
    assert_eq!(samples.len(), 1);
    let sample = &samples[0];
    assert_eq!(sample.tokens.len(), sample.ner_tags.len());
    assert!(sample.ner_tags.contains(&2));
    assert!(sample.ner_tags.contains(&1));
}

#[test]
fn keep_all_policy_retains_negatives() {
    let paper = vec![section("", "Weather was sunny throughout the year")];
    let cfg = CorpusConfig {
        negative_policy: NegativePolicy::KeepAll,
        ..CorpusConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(0);
    let (stats, samples) = nlp::paper_training_samples(&paper, &[], &cfg, &mut rng).unwrap();
    assert_eq!(stats.positives, 0);
    assert_eq!(stats.negatives, 1);
    assert!(samples[0].ner_tags.iter().all(|&id| id == 0));
}

#[test]
fn invalid_window_is_a_configuration_error() {
    let cfg = CorpusConfig {
        max_length: 10,
        overlap: 10,
        ..CorpusConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(0);
    let err = nlp::paper_training_samples(&[], &[], &cfg, &mut rng).unwrap_err();
    assert!(matches!(err, PipelineError::Configuration(_)));
}

#[test]
fn inference_rows_are_dummy_tagged_and_filtered() {
    let paper = vec![section(
        "",
        "This study uses a large survey. Completely unrelated sentence here.",
    )];
    let cfg = InferenceConfig::default();
    let rows = nlp::paper_inference_rows(&paper, &cfg).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].ner_tags.iter().all(|&id| id == 0));

    let unfiltered = InferenceConfig {
        contains_keywords: Vec::new(),
        ..InferenceConfig::default()
    };
    let rows = nlp::paper_inference_rows(&paper, &unfiltered).unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn literal_matches_outrank_model_predictions() {
    let paper = vec![section("", "We used the ADNI dataset extensively.")];
    let bank = KnowledgeBank::from_labels(vec!["adni dataset".to_string()]);
    let literal = literal_match(&paper, &bank);

    let mut model: IndexSet<String> = IndexSet::new();
    model.insert("the ADNI dataset".to_string());
    model.insert("PISA".to_string());

    let candidates = nlp::combine_candidates(literal, model);
    assert_eq!(candidates[0], "adni dataset");

    let kept = dedupe(candidates, 0.5);
    // The near-duplicate model phrase is suppressed, the literal kept.
    assert_eq!(format_labels(&kept), "adni dataset|pisa");
}
