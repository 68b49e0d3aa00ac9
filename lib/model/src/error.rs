use thiserror::Error;

/// A pattern term that does not belong to any term kind this engine matches on.
///
/// The query parser is trusted to only emit variables, IRIs and literals for
/// the supported query subset, so this error indicates a violated parser
/// contract rather than a user mistake.
#[derive(Debug, Clone, Error)]
#[error("Unsupported term in triple pattern: {term}")]
pub struct MalformedTermError {
    term: String,
}

impl MalformedTermError {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }
}
