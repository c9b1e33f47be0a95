//! Copy the displayed analysis to the system clipboard.

use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::models::AnalysisResult;

/// Largest report we hand to the clipboard (1MB)
const MAX_CLIPBOARD_BYTES: usize = 1024 * 1024;

/// Clipboard seam so the copy path can be exercised without a display server
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Plain-text report of one analysis, suitable for pasting elsewhere.
pub fn format_report(text: &str, result: &AnalysisResult) -> String {
    let mut report = format!(
        "Text: {}\nSentiment: {} ({}% confidence)\nReasoning: {}\n",
        text.trim(),
        result.sentiment(),
        result.score(),
        result.reasoning()
    );
    if !result.emotions().is_empty() {
        report.push_str(&format!("Emotions: {}\n", result.emotions().join(", ")));
    }
    if !result.keywords().is_empty() {
        let tags: Vec<String> = result.keywords().iter().map(|k| format!("#{}", k)).collect();
        report.push_str(&format!("Keywords: {}\n", tags.join(" ")));
    }
    report
}

fn validate_report(report: &str) -> Result<()> {
    if report.trim().is_empty() {
        anyhow::bail!("Nothing to copy: report is empty");
    }
    if report.len() > MAX_CLIPBOARD_BYTES {
        anyhow::bail!(
            "Report too large for clipboard ({} bytes, max {})",
            report.len(),
            MAX_CLIPBOARD_BYTES
        );
    }
    Ok(())
}

fn copy_with_provider(report: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_report(report)?;
    provider.set_text(report)
}

/// Format `result` and place it on the system clipboard.
///
/// Fails when the report is empty or oversized, or when no clipboard is
/// available (headless sessions, denied access).
pub fn copy_result(text: &str, result: &AnalysisResult) -> Result<()> {
    let report = format_report(text, result);
    // Validate before touching the system clipboard so CI gets the real reason
    validate_report(&report)?;
    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(&report, &mut clipboard)
}
