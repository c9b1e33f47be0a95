//! Session state machine behind the dashboard.
//!
//! A [`Session`] owns the input text, the displayed result, the history store and
//! the current [`Phase`]. It knows nothing about terminals or runtimes: the caller
//! asks for an [`AnalysisTicket`], runs the analysis however it likes, and hands
//! the outcome back through [`Session::complete_analysis`].
//!
//! ```text
//! Idle ──begin──▶ Loading ──ok──▶ Success ─┐
//!                    │                      ├─begin──▶ Loading
//!                    └──err──▶ Error ───────┘
//! any ──clear──▶ Idle
//! ```
//!
//! Every ticket carries a generation number. Clearing bumps the generation, so a
//! response that arrives after a clear is dropped instead of resurrecting state.

use chrono::{DateTime, Utc};

use crate::analysis::AnalysisError;
use crate::history::HistoryStore;
use crate::models::{AnalysisResult, HistoryItem};

/// Shown for every analysis failure; the concrete error goes to the log.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Failed to analyze sentiment. Please check your API key or try again.";

/// Upper bound on input length (characters)
pub const MAX_INPUT_CHARS: usize = 10_000;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Where the displayed result came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultOrigin {
    Fresh,
    History { id: String, timestamp: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedResult {
    pub result: AnalysisResult,
    /// Text the result was computed from
    pub text: String,
    pub origin: ResultOrigin,
}

/// Permission to run one analysis. Returned to the session with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    generation: u64,
    text: String,
}

impl AnalysisTicket {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Succeeded,
    Failed,
    /// The ticket was superseded; the outcome was discarded
    Stale,
}

#[derive(Debug, Default)]
pub struct Session {
    input: String,
    phase: Phase,
    displayed: Option<DisplayedResult>,
    error_message: Option<&'static str>,
    history: HistoryStore,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn displayed(&self) -> Option<&DisplayedResult> {
        self.displayed.as_ref()
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error_message
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Analyze is enabled when the input has content and nothing is in flight.
    pub fn can_analyze(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty()
    }

    pub fn push_char(&mut self, c: char) -> bool {
        if self.input.chars().count() >= MAX_INPUT_CHARS {
            return false;
        }
        self.input.push(c);
        true
    }

    pub fn pop_char(&mut self) -> bool {
        self.input.pop().is_some()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into().chars().take(MAX_INPUT_CHARS).collect();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Move to `Loading` and hand out a ticket, or `None` when analyze is disabled.
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        if !self.can_analyze() {
            return None;
        }

        self.generation += 1;
        self.phase = Phase::Loading;
        self.displayed = None;
        self.error_message = None;
        tracing::info!(generation = self.generation, "analysis started");

        Some(AnalysisTicket { generation: self.generation, text: self.input.clone() })
    }

    /// Apply the outcome of a ticket issued by [`Session::begin_analysis`].
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Completion {
        if ticket.generation != self.generation || self.phase != Phase::Loading {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale analysis outcome"
            );
            return Completion::Stale;
        }

        match outcome {
            Ok(result) => {
                self.history.append(HistoryItem::new(result.clone(), ticket.text.clone()));
                self.displayed =
                    Some(DisplayedResult { result, text: ticket.text, origin: ResultOrigin::Fresh });
                self.phase = Phase::Success;
                tracing::info!(
                    generation = ticket.generation,
                    history = self.history.len(),
                    "analysis succeeded"
                );
                Completion::Succeeded
            }
            Err(err) => {
                tracing::warn!(generation = ticket.generation, error = %err, "analysis failed");
                self.error_message = Some(GENERIC_ERROR_MESSAGE);
                self.phase = Phase::Error;
                Completion::Failed
            }
        }
    }

    /// Re-display a past item without touching the store. Ignored while loading.
    pub fn select_history(&mut self, index: usize) -> bool {
        if self.is_loading() {
            return false;
        }
        let Some(item) = self.history.get(index) else {
            return false;
        };

        self.displayed = Some(DisplayedResult {
            result: item.result.clone(),
            text: item.text.clone(),
            origin: ResultOrigin::History { id: item.id.clone(), timestamp: item.timestamp },
        });
        self.input = item.text.clone();
        self.error_message = None;
        self.phase = Phase::Success;
        true
    }

    /// Drop history, result and input; back to `Idle`. Any in-flight ticket goes stale.
    pub fn clear(&mut self) {
        self.history.clear();
        self.displayed = None;
        self.error_message = None;
        self.input.clear();
        self.phase = Phase::Idle;
        self.generation += 1;
        tracing::info!("session cleared");
    }
}
