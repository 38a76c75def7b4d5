//! Sentence segmentation and length-bounded windowing.

use clap::ValueEnum;

use crate::{data::papers::Section, error::PipelineError};

/// Start-of-title sentinel. Alphanumeric so it survives normalisation.
pub const TITLE_START: &str = "AAAsTITLE";
/// End-of-title sentinel.
pub const TITLE_END: &str = "ZZZsTITLE";
/// Start-of-text sentinel.
pub const TEXT_START: &str = "AAAsTEXT";
/// End-of-text sentinel.
pub const TEXT_END: &str = "ZZZsTEXT";

/// Granularity at which a paper is cut into candidate units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SegmentMode {
    /// Split each section text on the literal period character.
    Sentence,
    /// One unit per section: title, blank line, text.
    Section,
    /// The whole paper as a single unit.
    Paper,
}

/// Optional structural sentinels wrapped around section parts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Markers {
    pub title: bool,
    pub text: bool,
}

/// Cut a paper into raw text units at the requested granularity.
///
/// Order-preserving and duplicate-preserving: units appear in section
/// order, then intra-section split order, and a legitimately repeated
/// sentence is kept every time it occurs.
pub fn segment(paper: &[Section], mode: SegmentMode, markers: Markers) -> Vec<String> {
    match mode {
        SegmentMode::Sentence => paper
            .iter()
            .filter(|section| !section.text.is_empty())
            .flat_map(|section| section.text.split('.'))
            .map(|fragment| fragment.trim().to_string())
            .collect(),
        SegmentMode::Section => paper
            .iter()
            .filter(|section| !section.title.is_empty() || !section.text.is_empty())
            .map(|section| section_unit(section, markers))
            .collect(),
        SegmentMode::Paper => {
            let joined = paper
                .iter()
                .map(|section| section_unit(section, markers))
                .collect::<Vec<_>>()
                .join("\n\n");
            vec![joined]
        }
    }
}

fn section_unit(section: &Section, markers: Markers) -> String {
    let mut out = String::new();
    if !section.title.is_empty() {
        if markers.title {
            out = format!("{TITLE_START} {} {TITLE_END}", section.title);
        } else {
            out = section.title.clone();
        }
    }
    if !section.text.is_empty() {
        if markers.text {
            out.push_str(&format!("\n\n{TEXT_START} {} {TEXT_END}", section.text));
        } else {
            out.push_str(&format!("\n\n{}", section.text));
        }
    }
    out
}

/// Bound each token unit to `max_length` tokens, cutting over-long
/// units into windows that share `overlap` tokens with their
/// predecessor. The final partial window is kept; units at or under
/// the limit pass through unchanged.
pub fn shorten(
    units: Vec<Vec<String>>,
    max_length: usize,
    overlap: usize,
) -> Result<Vec<Vec<String>>, PipelineError> {
    if max_length == 0 || overlap >= max_length {
        return Err(PipelineError::Configuration(format!(
            "window overlap {overlap} must be smaller than max_length {max_length}"
        )));
    }

    let stride = max_length - overlap;
    let mut short = Vec::new();
    for unit in units {
        if unit.len() <= max_length {
            short.push(unit);
            continue;
        }
        let mut start = 0;
        while start < unit.len() {
            let end = (start + max_length).min(unit.len());
            short.push(unit[start..end].to_vec());
            start += stride;
        }
    }
    Ok(short)
}
