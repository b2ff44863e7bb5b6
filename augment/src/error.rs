//! Error types for the remote calls made by the pipeline
//!
//! None of these cross the orchestrator boundary: sources map them to
//! "no result", the oracle and summarizer map them to fixed defaults.

use thiserror::Error;

/// Failure of a single source adapter call
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{source_name} returned HTTP {status}")]
    Status { source_name: &'static str, status: u16 },

    #[error("unexpected response from {source_name}: {detail}")]
    Shape {
        source_name: &'static str,
        detail: String,
    },
}

impl SourceError {
    pub fn shape(source_name: &'static str, detail: impl Into<String>) -> Self {
        SourceError::Shape {
            source_name,
            detail: detail.into(),
        }
    }
}

/// Failure of a chat-completion call
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM API key not configured")]
    NotConfigured,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("LLM returned no content")]
    Empty,
}
