//! Sentiment analysis client.
//!
//! [`Analyzer`] is the seam between the session and the external classification
//! service. [`GeminiClient`] talks to the Gemini REST API; tests substitute their
//! own implementations.

mod gemini;
pub mod prompt;

use async_trait::async_trait;
pub use gemini::GeminiClient;

use crate::models::{AnalysisResult, ResultViolation};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("API key is missing")]
    MissingCredential,
    #[error("input text is empty")]
    EmptyInput,
    #[error("empty response from the analysis service")]
    EmptyResponse,
    #[error("malformed analysis response: {reason}")]
    MalformedResponse { reason: String },
    #[error("analysis service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("request to the analysis service failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<ResultViolation> for AnalysisError {
    fn from(violation: ResultViolation) -> Self {
        AnalysisError::MalformedResponse { reason: violation.to_string() }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::MalformedResponse { reason: err.to_string() }
    }
}

/// Classifies one piece of text.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError>;

    /// Human-readable name of the backing model, shown in the header
    fn model_name(&self) -> &str;
}

/// Parse the structured payload returned by the service.
///
/// Blank payloads are [`AnalysisError::EmptyResponse`]; anything that does not
/// match the schema or breaks its constraints is [`AnalysisError::MalformedResponse`].
pub fn parse_payload(payload: &str) -> Result<AnalysisResult, AnalysisError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    Ok(serde_json::from_str(payload)?)
}
