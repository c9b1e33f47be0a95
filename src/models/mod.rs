//! Data models for sentiment analysis results.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`Sentiment`] - The closed set of sentiment classes
//! - [`AnalysisResult`] - One classification returned by the analysis service
//! - [`HistoryItem`] - A past analysis paired with its input text and creation time
//!
//! [`AnalysisResult`] doubles as the wire shape the service is asked to produce, so
//! its serde field names are part of the external contract.

pub mod history;
pub mod sentiment;

pub use history::HistoryItem;
pub use sentiment::{AnalysisResult, MAX_EMOTIONS, MAX_SCORE, ResultViolation, Sentiment};
