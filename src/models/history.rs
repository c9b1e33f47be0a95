use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::sentiment::AnalysisResult;

/// A completed analysis together with the text it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

impl HistoryItem {
    /// Stamp a fresh result with the current time and a time-ordered id.
    pub fn new(result: AnalysisResult, text: impl Into<String>) -> Self {
        Self::with_timestamp(result, text, Utc::now())
    }

    pub fn with_timestamp(
        result: AnalysisResult,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self { id: Uuid::now_v7().to_string(), text: text.into(), timestamp, result }
    }
}
