use thiserror::Error;

/// The source is not syntactically valid JavaScript. Raised by the parser
/// boundary; the extractor is never invoked for a rejected source.
#[derive(Debug, Clone, Error)]
#[error("parse error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn at(line: usize, column: usize, what: &str) -> Self {
        Self::new(format!("{what} at line {line}, column {column}"))
    }
}

/// Traversal over a syntax tree could not complete. Unreachable for trees
/// produced by the parser; a defensive fallback for trees handed in directly.
#[derive(Debug, Clone, Error)]
#[error("analysis error: {message}")]
pub struct AnalysisError {
    pub message: String,
}

impl AnalysisError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The external commentary provider failed. Degrades to a reported error in
/// the combined result rather than aborting the request.
#[derive(Debug, Clone, Error)]
#[error("summarization error: {message}")]
pub struct SummarizationError {
    pub message: String,
}

impl SummarizationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
