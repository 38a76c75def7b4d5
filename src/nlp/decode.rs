//! Span reconstruction: predicted tag sequences back into label strings.

use indexmap::IndexSet;

use crate::{error::PipelineError, nlp::tagger::Tag};

/// Rebuild the set of mention strings from one token unit and its
/// parallel predicted tags.
///
/// Scan policy, applied to untrusted model output without raising:
/// `B` closes any open phrase and opens a new one (so `B B` yields
/// two mentions); `I` with no open phrase is dropped as if it were
/// `O`; a phrase still open at the end of the unit is closed there.
/// Duplicate strings across spans collapse; first-seen order is kept.
pub fn reconstruct(tokens: &[String], tags: &[Tag]) -> Result<IndexSet<String>, PipelineError> {
    if tokens.len() != tags.len() {
        return Err(PipelineError::MalformedInput(format!(
            "{} tokens but {} tags",
            tokens.len(),
            tags.len()
        )));
    }

    let mut mentions = IndexSet::new();
    let mut phrase: Vec<&str> = Vec::new();
    for (token, tag) in tokens.iter().zip(tags) {
        match tag {
            Tag::Begin => {
                if !phrase.is_empty() {
                    mentions.insert(phrase.join(" "));
                    phrase.clear();
                }
                phrase.push(token);
            }
            Tag::Inside if !phrase.is_empty() => phrase.push(token),
            _ => {
                if !phrase.is_empty() {
                    mentions.insert(phrase.join(" "));
                    phrase.clear();
                }
            }
        }
    }
    if !phrase.is_empty() {
        mentions.insert(phrase.join(" "));
    }
    Ok(mentions)
}

/// Regroup a flat stream of decoded rows into per-paper mention sets.
///
/// `paper_lengths[i]` is the number of consecutive rows belonging to
/// paper `i`; slicing is index-based over the immutable inputs.
pub fn paper_label_sets(
    token_rows: &[Vec<String>],
    tag_rows: &[Vec<Tag>],
    paper_lengths: &[usize],
) -> Result<Vec<IndexSet<String>>, PipelineError> {
    if token_rows.len() != tag_rows.len() {
        return Err(PipelineError::MalformedInput(format!(
            "{} token rows but {} tag rows",
            token_rows.len(),
            tag_rows.len()
        )));
    }
    let total: usize = paper_lengths.iter().sum();
    if total != token_rows.len() {
        return Err(PipelineError::MalformedInput(format!(
            "paper lengths sum to {total} but there are {} rows",
            token_rows.len()
        )));
    }

    let mut all_mentions = Vec::with_capacity(paper_lengths.len());
    let mut start = 0;
    for &length in paper_lengths {
        let mut mentions = IndexSet::new();
        for i in start..start + length {
            mentions.extend(reconstruct(&token_rows[i], &tag_rows[i])?);
        }
        all_mentions.push(mentions);
        start += length;
    }
    Ok(all_mentions)
}
