use dataset_scout::data::samples::{
    read_jsonl, read_manifest, retain_original, write_jsonl, write_manifest, LabeledSample,
    PaperRows, PredictionRow,
};
use dataset_scout::error::PipelineError;
use dataset_scout::nlp::tagger::Tag;

fn sample(words: &[&str], tags: &[Tag]) -> LabeledSample {
    LabeledSample::new(words.iter().map(|w| w.to_string()).collect(), tags)
}

#[test]
fn sample_encodes_fixed_tag_ids() {
    let row = sample(&["ADNI", "data"], &[Tag::Begin, Tag::Inside]);
    assert_eq!(row.ner_tags, vec![2, 1]);
    assert_eq!(row.tags().unwrap(), vec![Tag::Begin, Tag::Inside]);
}

#[test]
fn sample_rejects_length_mismatch_and_bad_ids() {
    let mut row = sample(&["a", "b"], &[Tag::Outside, Tag::Outside]);
    row.ner_tags.pop();
    assert!(matches!(row.tags(), Err(PipelineError::MalformedInput(_))));

    let mut row = sample(&["a"], &[Tag::Outside]);
    row.ner_tags[0] = 9;
    assert!(matches!(row.tags(), Err(PipelineError::MalformedInput(_))));
}

#[test]
fn jsonl_round_trip_preserves_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.jsonl");
    let first = vec![sample(&["a"], &[Tag::Outside])];
    let second = vec![sample(&["ADNI", "data"], &[Tag::Begin, Tag::Inside])];

    write_jsonl(&first, &path, false).unwrap();
    write_jsonl(&second, &path, true).unwrap();

    let rows = read_jsonl(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].tokens, vec!["ADNI", "data"]);
    assert_eq!(rows[1].ner_tags, vec![2, 1]);
}

#[test]
fn serialized_shape_matches_exchange_format() {
    let row = sample(&["ADNI"], &[Tag::Begin]);
    let json = serde_json::to_string(&row).unwrap();
    assert_eq!(json, r#"{"tokens":["ADNI"],"ner_tags":[2]}"#);
}

#[test]
fn manifest_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    let manifest = vec![
        PaperRows {
            id: "p1".to_string(),
            rows: 3,
        },
        PaperRows {
            id: "p2".to_string(),
            rows: 0,
        },
    ];
    write_manifest(&manifest, &path).unwrap();
    let loaded = read_manifest(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, "p1");
    assert_eq!(loaded[1].rows, 0);
}

#[test]
fn retain_original_keeps_first_subtoken_per_word() {
    // [CLS] wo ##rd1 word2 [SEP] layout from a fast tokenizer.
    let tags = vec![-100, 2, 1, 1, -100];
    let word_ids = vec![None, Some(0), Some(0), Some(1), None];
    assert_eq!(retain_original(&tags, &word_ids).unwrap(), vec![2, 1]);
}

#[test]
fn retain_original_rejects_sentinel_on_original_token() {
    let tags = vec![-100, -100];
    let word_ids = vec![None, Some(0)];
    assert!(matches!(
        retain_original(&tags, &word_ids),
        Err(PipelineError::MalformedInput(_))
    ));
}

#[test]
fn retain_original_rejects_length_mismatch() {
    assert!(matches!(
        retain_original(&[0, 0], &[None]),
        Err(PipelineError::MalformedInput(_))
    ));
}

#[test]
fn prediction_row_aligns_when_word_ids_present() {
    let row: PredictionRow = serde_json::from_str(
        r#"{"ner_tags":[-100,2,1,0,-100],"word_ids":[null,0,0,1,null]}"#,
    )
    .unwrap();
    assert_eq!(row.aligned_tags().unwrap(), vec![Tag::Begin, Tag::Outside]);

    let plain: PredictionRow = serde_json::from_str(r#"{"ner_tags":[0,2]}"#).unwrap();
    assert_eq!(plain.aligned_tags().unwrap(), vec![Tag::Outside, Tag::Begin]);
}
