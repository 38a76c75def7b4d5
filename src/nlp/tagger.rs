//! BIO tagging of token units against known dataset labels.

use rand::Rng;

use crate::{config::NegativePolicy, error::PipelineError};

/// Per-token BIO tag with its fixed integer encoding.
///
/// Downstream consumers persist these as integers, so the mapping
/// `O=0, I=1, B=2` is part of the exchange contract and never varies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Token outside any dataset mention.
    Outside = 0,
    /// Non-initial token of a mention.
    Inside = 1,
    /// First token of a mention.
    Begin = 2,
}

impl Tag {
    /// Tag names in id order.
    pub const NAMES: [&'static str; 3] = ["O", "I", "B"];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Result<Self, PipelineError> {
        match id {
            0 => Ok(Tag::Outside),
            1 => Ok(Tag::Inside),
            2 => Ok(Tag::Begin),
            other => Err(PipelineError::MalformedInput(format!(
                "tag id {other} outside the O/I/B encoding"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self.id() as usize]
    }

    pub fn from_name(name: &str) -> Result<Self, PipelineError> {
        match name {
            "O" => Ok(Tag::Outside),
            "I" => Ok(Tag::Inside),
            "B" => Ok(Tag::Begin),
            other => Err(PipelineError::MalformedInput(format!(
                "unknown tag name {other:?}"
            ))),
        }
    }
}

/// All start offsets at which `needle` occurs as a contiguous
/// subsequence of `haystack`, including overlapping occurrences.
/// Comparison folds ASCII case so a label's casing never misses a
/// surface mention.
pub fn find_sublist(haystack: &[String], needle: &[String]) -> Vec<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }
    (0..=haystack.len() - needle.len())
        .filter(|&start| {
            haystack[start..start + needle.len()]
                .iter()
                .zip(needle)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
        })
        .collect()
}

/// Tag one token unit against tokenised label phrases.
///
/// A unit is positive iff at least one label occurs as a contiguous
/// subsequence. Every occurrence of every label is marked `B` at its
/// first token and `I` after; labels are applied in input order, so
/// at a shared position the last-applied label wins. That tie-break
/// is deterministic and part of the contract.
pub fn tag_sentence(tokens: &[String], labels: &[Vec<String>]) -> (bool, Vec<Tag>) {
    let mut tags = vec![Tag::Outside; tokens.len()];
    let mut positive = false;

    for label in labels {
        for pos in find_sublist(tokens, label) {
            positive = true;
            tags[pos] = Tag::Begin;
            for tag in tags.iter_mut().take(pos + label.len()).skip(pos + 1) {
                *tag = Tag::Inside;
            }
        }
    }

    (positive, tags)
}

/// Decide whether an all-`O` unit is kept in the training corpus.
pub fn keep_negative<R: Rng>(policy: &NegativePolicy, tokens: &[String], rng: &mut R) -> bool {
    match policy {
        NegativePolicy::Keywords(keywords) => {
            let text = tokens.join(" ").to_lowercase();
            keywords.iter().any(|keyword| text.contains(keyword))
        }
        NegativePolicy::Probability(p) => rng.gen::<f64>() < *p,
        NegativePolicy::KeepAll => true,
    }
}
