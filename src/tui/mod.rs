//! Terminal dashboard: input, result card, session overview and history list
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use std::sync::Arc;

use anyhow::Result;
pub use app::App;
use terminal::TerminalManager;
use tokio::runtime::Handle;

use crate::analysis::Analyzer;

/// Run the interactive dashboard until the user quits
///
/// Analyses are spawned onto `runtime`; the calling thread owns the terminal.
pub fn run_dashboard(analyzer: Arc<dyn Analyzer>, runtime: Handle) -> Result<()> {
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(analyzer, runtime);

    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    tracing::info!(analyses = app.session().history().len(), "dashboard closed");
    res
}
