use dataset_scout::data::papers::Section;
use dataset_scout::error::PipelineError;
use dataset_scout::nlp::segment::{
    segment, shorten, Markers, SegmentMode, TEXT_START, TITLE_END, TITLE_START,
};

fn section(title: &str, text: &str) -> Section {
    Section {
        title: title.to_string(),
        text: text.to_string(),
    }
}

fn words(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("w{i}")).collect()
}

#[test]
fn sentence_mode_splits_on_periods_in_order() {
    let paper = vec![
        section("Intro", "First. Second."),
        section("Methods", ""),
        section("Results", "Third"),
    ];
    let units = segment(&paper, SegmentMode::Sentence, Markers::default());
    assert_eq!(units, vec!["First", "Second", "", "Third"]);
}

#[test]
fn sentence_mode_keeps_repeated_sentences() {
    let paper = vec![section("", "Same thing. Same thing.")];
    let units = segment(&paper, SegmentMode::Sentence, Markers::default());
    assert_eq!(units, vec!["Same thing", "Same thing", ""]);
}

#[test]
fn period_free_text_is_one_unit() {
    let paper = vec![section("", "no periods here")];
    let units = segment(&paper, SegmentMode::Sentence, Markers::default());
    assert_eq!(units, vec!["no periods here"]);
}

#[test]
fn section_mode_joins_title_and_text() {
    let paper = vec![section("Methods", "We used data."), section("", "")];
    let units = segment(&paper, SegmentMode::Section, Markers::default());
    assert_eq!(units, vec!["Methods\n\nWe used data."]);
}

#[test]
fn section_markers_wrap_parts() {
    let paper = vec![section("Methods", "Body")];
    let markers = Markers {
        title: true,
        text: true,
    };
    let units = segment(&paper, SegmentMode::Section, markers);
    assert!(units[0].starts_with(&format!("{TITLE_START} Methods {TITLE_END}")));
    assert!(units[0].contains(TEXT_START));
}

#[test]
fn paper_mode_is_a_single_unit() {
    let paper = vec![section("A", "one"), section("B", "two")];
    let units = segment(&paper, SegmentMode::Paper, Markers::default());
    assert_eq!(units.len(), 1);
    assert!(units[0].contains("one") && units[0].contains("two"));
}

#[test]
fn shorten_windows_overlong_units() {
    let windows = shorten(vec![words(12)], 5, 2).unwrap();
    let starts: Vec<&String> = windows.iter().map(|w| &w[0]).collect();
    assert_eq!(starts, ["w0", "w3", "w6", "w9"]);
    assert!(windows.iter().all(|w| w.len() <= 5));
    assert_eq!(windows.last().unwrap().as_slice(), &words(12)[9..]);
}

#[test]
fn shorten_passes_short_units_through() {
    let unit = words(5);
    let windows = shorten(vec![unit.clone()], 5, 2).unwrap();
    assert_eq!(windows, vec![unit]);
}

#[test]
fn shorten_rejects_degenerate_overlap() {
    let err = shorten(vec![words(3)], 5, 5).unwrap_err();
    assert!(matches!(err, PipelineError::Configuration(_)));
    let err = shorten(vec![words(3)], 0, 0).unwrap_err();
    assert!(matches!(err, PipelineError::Configuration(_)));
}
