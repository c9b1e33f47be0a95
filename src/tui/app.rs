//! TUI application state and event handling.
//!
//! The `App` wraps a [`Session`] with everything that only matters on screen:
//!
//! - **Focus**: keystrokes go to the input box or the history list
//! - **Background analysis**: analyses run on the tokio runtime and report back
//!   over a channel drained once per loop iteration
//! - **Status messages**: transient feedback for clipboard operations and
//!   rejected actions
//! - **Dirty state tracking**: redraw only when state changed, or every 100ms
//!
//! # Example
//!
//! ```rust,ignore
//! let runtime = tokio::runtime::Runtime::new()?;
//! let analyzer = Arc::new(GeminiClient::new(config));
//! let mut app = App::new(analyzer, runtime.handle().clone());
//! app.run(&mut terminal)?;
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::analysis::{AnalysisError, Analyzer};
use crate::clipboard::copy_result;
use crate::models::AnalysisResult;
use crate::session::{AnalysisTicket, Completion, Session};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// History rows skipped by PageUp/PageDown
const PAGE_SIZE: isize = 5;

type Outcome = (AnalysisTicket, Result<AnalysisResult, AnalysisError>);

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Pane receiving keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    History,
}

pub struct App {
    session: Session,
    analyzer: Arc<dyn Analyzer>,
    runtime: Handle,
    outcome_tx: UnboundedSender<Outcome>,
    outcome_rx: UnboundedReceiver<Outcome>,
    focus: Focus,
    history_cursor: usize,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    spinner_frame: usize,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(analyzer: Arc<dyn Analyzer>, runtime: Handle) -> Self {
        let (outcome_tx, outcome_rx) = unbounded_channel();
        Self {
            session: Session::new(),
            analyzer,
            runtime,
            outcome_tx,
            outcome_rx,
            focus: Focus::Input,
            history_cursor: 0,
            should_quit: false,
            status_message: None,
            spinner_frame: 0,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let expired =
            self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at);
        if expired {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.drain_outcomes();

            // Draw if dirty or if it's been >100ms (spinner, terminal resize)
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100) {
                if self.session.is_loading() {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
                terminal.draw(|f| {
                    let state = RenderState {
                        session: &self.session,
                        model_name: self.analyzer.model_name(),
                        focus: self.focus,
                        history_cursor: self.history_cursor,
                        spinner_frame: self.spinner_frame,
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Apply every analysis outcome that has arrived since the last call
    fn drain_outcomes(&mut self) {
        while let Ok((ticket, outcome)) = self.outcome_rx.try_recv() {
            match self.session.complete_analysis(ticket, outcome) {
                Completion::Succeeded => self.history_cursor = 0,
                Completion::Failed | Completion::Stale => {}
            }
            self.needs_redraw = true;
        }
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Cancel => match self.focus {
                Focus::History => self.set_focus(Focus::Input),
                Focus::Input if self.session.input().is_empty() => self.should_quit = true,
                Focus::Input => {
                    self.session.clear_input();
                    self.needs_redraw = true;
                }
            },
            Action::Submit => match self.focus {
                Focus::Input => self.start_analysis(),
                Focus::History => self.select_highlighted(),
            },
            Action::ToggleFocus => {
                let next = match self.focus {
                    Focus::Input => Focus::History,
                    Focus::History => Focus::Input,
                };
                self.set_focus(next);
            }
            Action::MoveUp => self.move_cursor(-1),
            Action::MoveDown => self.move_cursor(1),
            Action::PageUp => self.move_cursor(-PAGE_SIZE),
            Action::PageDown => self.move_cursor(PAGE_SIZE),
            Action::ClearSession => self.clear_session(),
            Action::CopyResult => self.copy_displayed(),
            Action::Input(c) => {
                self.set_focus(Focus::Input);
                if self.session.push_char(c) {
                    self.needs_redraw = true;
                }
            }
            Action::Paste(text) => {
                self.set_focus(Focus::Input);
                for c in text.chars() {
                    if !self.session.push_char(c) {
                        break;
                    }
                }
                self.needs_redraw = true;
            }
            Action::DeleteChar => {
                if self.focus == Focus::Input && self.session.pop_char() {
                    self.needs_redraw = true;
                }
            }
            Action::None => {}
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.needs_redraw = true;
        }
    }

    /// Issue a ticket and run the analysis in the background
    fn start_analysis(&mut self) {
        let Some(ticket) = self.session.begin_analysis() else {
            if self.session.is_loading() {
                self.set_status("✗ Analysis already in progress", MessageType::Error, STATUS_ERROR_DURATION_MS);
            } else {
                self.set_status("✗ Enter some text to analyze", MessageType::Error, STATUS_ERROR_DURATION_MS);
            }
            return;
        };

        let analyzer = Arc::clone(&self.analyzer);
        let outcome_tx = self.outcome_tx.clone();
        self.runtime.spawn(async move {
            let outcome = analyzer.analyze(ticket.text()).await;
            // Receiver gone means the app is shutting down
            let _ = outcome_tx.send((ticket, outcome));
        });
        self.needs_redraw = true;
    }

    fn select_highlighted(&mut self) {
        if self.session.history().is_empty() {
            return;
        }
        if self.session.select_history(self.history_cursor) {
            self.focus = Focus::Input;
        } else {
            self.set_status("✗ Wait for the running analysis to finish", MessageType::Error, STATUS_ERROR_DURATION_MS);
        }
        self.needs_redraw = true;
    }

    fn move_cursor(&mut self, delta: isize) {
        let total = self.session.history().len();
        if total == 0 {
            self.history_cursor = 0;
            return;
        }

        let old = self.history_cursor;
        let new = (self.history_cursor as isize + delta).max(0) as usize;
        self.history_cursor = new.min(total - 1);
        if old != self.history_cursor {
            self.needs_redraw = true;
        }
    }

    fn clear_session(&mut self) {
        self.session.clear();
        self.history_cursor = 0;
        self.focus = Focus::Input;
        self.set_status("✓ Session cleared", MessageType::Success, STATUS_SUCCESS_DURATION_MS);
    }

    fn copy_displayed(&mut self) {
        let Some(displayed) = self.session.displayed() else {
            self.set_status("✗ No result to copy", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        match copy_result(&displayed.text, &displayed.result) {
            Ok(()) => {
                self.set_status("✓ Copied to clipboard", MessageType::Success, STATUS_SUCCESS_DURATION_MS)
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard copy failed");
                self.set_status(format!("✗ Clipboard error: {}", e), MessageType::Error, STATUS_ERROR_DURATION_MS);
            }
        }
    }
}
