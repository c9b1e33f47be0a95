//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sentiment_scope::{AnalysisError, AnalysisResult, Analyzer, HistoryItem, HistoryStore, Sentiment};

/// Build a valid result with fixed reasoning
pub fn result(sentiment: Sentiment, score: i64) -> AnalysisResult {
    AnalysisResult::new(
        sentiment,
        score,
        "Test reasoning.",
        vec!["Joy".to_string()],
        vec!["test".to_string()],
    )
    .expect("valid test result")
}

/// Fixed, strictly increasing timestamps
pub fn timestamp(offset_secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap() + chrono::Duration::seconds(offset_secs)
}

/// Store filled oldest-first from `(sentiment, score)` pairs
pub fn history_of(entries: &[(Sentiment, i64)]) -> HistoryStore {
    let mut store = HistoryStore::new();
    for (i, (sentiment, score)) in entries.iter().enumerate() {
        store.append(HistoryItem::with_timestamp(
            result(*sentiment, *score),
            format!("entry {}", i),
            timestamp(i as i64),
        ));
    }
    store
}

/// Analyzer answering by keyword, counting calls
pub struct MockAnalyzer {
    pub calls: AtomicUsize,
    pub delay: Duration,
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self { calls: AtomicUsize::new(0), delay: Duration::ZERO }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { calls: AtomicUsize::new(0), delay }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let lowered = text.to_lowercase();
        let sentiment = if lowered.contains("love") || lowered.contains("great") {
            Sentiment::Positive
        } else if lowered.contains("hate") || lowered.contains("awful") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };
        Ok(result(sentiment, 92))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
