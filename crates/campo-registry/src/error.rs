//! # Registry Errors

use thiserror::Error;

use crate::review::Issue;

/// Errors raised by registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Submission blocked by one or more error-severity issues.
    #[error("submission rejected: {}", summarize(.0))]
    Rejected(Vec<Issue>),

    /// An index-addressed edit pointed past the end of a collection.
    #[error("{collection} index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Collection being addressed (`fazendas`, `culturas`).
        collection: &'static str,
        /// Requested index.
        index: usize,
        /// Current collection length.
        len: usize,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

fn summarize(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
