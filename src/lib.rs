//! SentimentScope - interactive sentiment analysis dashboard
//!
//! Free-form text is sent to an LLM classification service which returns a
//! structured verdict: a sentiment class, a 0-100 confidence score, a short
//! reasoning, emotions and keywords. The crate provides:
//!
//! - The analysis client and its [`Analyzer`] seam
//! - An in-memory, newest-first session history
//! - Aggregate views (class distribution, recent confidence trend)
//! - The [`Session`] state machine driving the terminal dashboard
//!
//! # Example
//!
//! ```no_run
//! use sentiment_scope::{AnalyzerConfig, Analyzer, GeminiClient};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = AnalyzerConfig::new(std::env::var("GEMINI_API_KEY").ok());
//! let client = GeminiClient::new(config);
//! let result = client.analyze("I love this product!").await?;
//! println!("{} ({}%)", result.sentiment(), result.score());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod history;
pub mod logging;
pub mod models;
pub mod session;
pub mod stats;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use analysis::{AnalysisError, Analyzer, GeminiClient};
pub use config::AnalyzerConfig;
pub use history::HistoryStore;
pub use models::{AnalysisResult, HistoryItem, Sentiment};
pub use session::{Phase, Session};
