//! Typed errors for the extraction core.

use thiserror::Error;

/// Failures the core validates for on entry.
///
/// Noisy model output (malformed BIO order) is deliberately *not* an
/// error: span reconstruction degrades per its documented policy.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Invalid caller-supplied parameters, e.g. `overlap >= max_length`.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Shape or value violations in input data, e.g. a tags/tokens
    /// length mismatch or a tag id outside the `{O, I, B}` encoding.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A paper id referenced by metadata is absent from the collection.
    #[error("not found: {0}")]
    NotFound(String),
}
