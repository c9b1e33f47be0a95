use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap,
};

use super::app::{Focus, MessageType, StatusMessage};
use super::layout::DashboardLayout;
use super::timestamps::{format_clock, format_timestamp};
use crate::models::{AnalysisResult, HistoryItem, Sentiment};
use crate::session::{DisplayedResult, Phase, ResultOrigin, Session};
use crate::stats::{self, SentimentCounts, TREND_WINDOW};
use crate::utils::{sanitize, single_line};

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const SURFACE: Color = Color::Rgb(24, 24, 27);
const TRACK: Color = Color::Rgb(39, 39, 42);
const ACCENT: Color = Color::Rgb(59, 130, 246);
const KEYWORD: Color = Color::Rgb(129, 140, 248);
const ERROR: Color = Color::Rgb(239, 68, 68);

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shared colour per class: share bar, tallies, trend bars, history badges
pub fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::Rgb(16, 185, 129),
        Sentiment::Negative => Color::Rgb(239, 68, 68),
        Sentiment::Neutral => Color::Rgb(156, 163, 175),
    }
}

/// Everything the draw pass needs, borrowed from the app
pub struct RenderState<'a> {
    pub session: &'a Session,
    pub model_name: &'a str,
    pub focus: Focus,
    pub history_cursor: usize,
    pub spinner_frame: usize,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = DashboardLayout::new(frame.area());

    render_header(frame, layout.header_area, state.model_name);
    render_input(frame, layout.input_area, state);
    render_result(frame, layout.result_area, state);
    render_overview(frame, layout.overview_area, state.session);
    render_history(frame, layout.history_area, state);
    render_status_bar(frame, layout.status_area, state);
}

fn panel(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { ACCENT } else { MUTED };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", title))
}

fn render_header(frame: &mut Frame, area: Rect, model_name: &str) {
    let line = Line::from(vec![
        Span::styled(" SentimentScope ", Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  Powered by {}", model_name), Style::default().fg(MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_input(frame: &mut Frame, area: Rect, state: &RenderState) {
    let session = state.session;
    let focused = state.focus == Focus::Input;

    let mut text = sanitize(session.input());
    if focused {
        text.push('▏');
    }
    let content = if session.input().is_empty() && !focused {
        Text::styled("Paste a review, social media post, or any text here...", Style::default().fg(MUTED))
    } else {
        Text::from(text)
    };

    let hint = if session.is_loading() {
        Span::styled(
            format!(" {} Analyzing... ", SPINNER[state.spinner_frame % SPINNER.len()]),
            Style::default().fg(ACCENT),
        )
    } else if session.can_analyze() {
        Span::styled(" Enter: Analyze Sentiment ", Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(" Enter: Analyze Sentiment ", Style::default().fg(MUTED))
    };

    let block = panel("Enter text for analysis", focused)
        .title_bottom(Line::from(hint).alignment(Alignment::Right));
    let inner = block.inner(area);

    // Keep the tail of the input and the cursor in view
    let body = Paragraph::new(content).wrap(Wrap { trim: false });
    let offset = input_scroll(body.line_count(inner.width), inner.height);
    let paragraph = body.block(block).scroll((offset, 0));

    frame.render_widget(paragraph, area);
}

/// Rows to skip so the last wrapped line sits on the bottom row
fn input_scroll(wrapped_lines: usize, visible_rows: u16) -> u16 {
    let hidden = wrapped_lines.saturating_sub(usize::from(visible_rows));
    u16::try_from(hidden).unwrap_or(u16::MAX)
}

fn render_result(frame: &mut Frame, area: Rect, state: &RenderState) {
    let session = state.session;
    let block = panel("Result", false);

    match (session.phase(), session.displayed()) {
        (Phase::Loading, _) => {
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("{} Analyzing sentiment...", SPINNER[state.spinner_frame % SPINNER.len()]),
                    Style::default().fg(ACCENT),
                )),
                Line::from(Span::styled("░░░░░░░░░░░░░░░░░░░░", Style::default().fg(TRACK))),
                Line::from(Span::styled("░░░░░░░░░░░░░░", Style::default().fg(TRACK))),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(placeholder, area);
        }
        (Phase::Error, _) => {
            let message = session.error_message().unwrap_or_default();
            let paragraph = Paragraph::new(Line::from(vec![
                Span::styled("✗ ", Style::default().fg(ERROR).add_modifier(Modifier::BOLD)),
                Span::styled(message, Style::default().fg(ERROR)),
            ]))
            .block(block.border_style(Style::default().fg(ERROR)))
            .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
        (_, Some(displayed)) => render_result_card(frame, area, displayed),
        (_, None) => {
            let hint = Paragraph::new("Type or paste text above and press Enter to analyze.")
                .style(Style::default().fg(MUTED))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(hint, area);
        }
    }
}

fn render_result_card(frame: &mut Frame, area: Rect, displayed: &DisplayedResult) {
    let result = &displayed.result;
    let color = sentiment_color(result.sentiment());

    let title = match &displayed.origin {
        ResultOrigin::Fresh => " Classification Result ".to_string(),
        ResultOrigin::History { timestamp, .. } => {
            format!(" Classification Result · from history ({}) ", format_clock(timestamp))
        }
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Sentiment
            Constraint::Length(1), // Confidence gauge
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Details
        ])
        .split(inner);

    let heading = Line::from(vec![
        Span::styled(result.sentiment().as_str(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled("  Confidence Score", Style::default().fg(MUTED)),
    ]);
    frame.render_widget(Paragraph::new(heading), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(TRACK))
        .percent(u16::from(result.score()))
        .label(format!("{}%", result.score()));
    frame.render_widget(gauge, rows[1]);

    let details = Paragraph::new(result_details(result)).wrap(Wrap { trim: true });
    frame.render_widget(details, rows[3]);
}

fn result_details(result: &AnalysisResult) -> Text<'static> {
    let heading = Style::default().fg(MUTED).add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled("ANALYSIS", heading))];
    lines.extend(sanitize(result.reasoning()).lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("DETECTED EMOTIONS", heading)));
    lines.push(chip_line(result.emotions(), "", BRIGHT));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("KEYWORDS", heading)));
    lines.push(chip_line(result.keywords(), "#", KEYWORD));

    Text::from(lines)
}

fn chip_line(labels: &[String], prefix: &str, color: Color) -> Line<'static> {
    if labels.is_empty() {
        return Line::from(Span::styled("none", Style::default().fg(MUTED)));
    }
    let spans: Vec<Span> = labels
        .iter()
        .flat_map(|label| {
            [
                Span::styled(format!("[{}{}]", prefix, single_line(label, 40)), Style::default().fg(color)),
                Span::raw(" "),
            ]
        })
        .collect();
    Line::from(spans)
}

fn render_overview(frame: &mut Frame, area: Rect, session: &Session) {
    let block = panel("Session Overview", false);

    let Some(overview) = stats::overview(session.history()) else {
        let hint = Paragraph::new("Analyze some text to see statistics.")
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Share bar
            Constraint::Length(1), // Tallies
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Trend title
            Constraint::Min(0),    // Trend chart
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(share_bar(&overview.counts, rows[0].width as usize)), rows[0]);
    frame.render_widget(Paragraph::new(tallies(&overview.counts)).alignment(Alignment::Center), rows[1]);
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("Confidence Trend (Last {})", TREND_WINDOW),
            Style::default().fg(MUTED),
        )),
        rows[3],
    );

    let bars: Vec<Bar> = overview.trend.iter().map(|item| trend_bar(item)).collect();
    let bar_width = trend_bar_width(rows[4].width, bars.len());
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(100);
    frame.render_widget(chart, rows[4]);
}

fn trend_bar(item: &HistoryItem) -> Bar<'static> {
    let color = sentiment_color(item.result.sentiment());
    Bar::default()
        .value(u64::from(item.result.score()))
        .text_value(item.result.score().to_string())
        .label(Line::from(item.result.sentiment().short_label()))
        .style(Style::default().fg(color))
        .value_style(Style::default().fg(SURFACE).bg(color))
}

/// Widest bars that still fit `count` bars with single-column gaps
fn trend_bar_width(available: u16, count: usize) -> u16 {
    if count == 0 {
        return 1;
    }
    let count = count as u16;
    let gaps = count.saturating_sub(1);
    (available.saturating_sub(gaps) / count).clamp(1, 5)
}

/// Split `width` columns between the classes in proportion to their counts.
/// Largest-remainder rounding keeps the sum equal to `width`.
fn share_widths(counts: &SentimentCounts, width: usize) -> [usize; 3] {
    let total = counts.total();
    if total == 0 || width == 0 {
        return [0; 3];
    }

    let mut widths = [0usize; 3];
    let mut remainders = [(0usize, 0usize); 3];
    for (i, sentiment) in Sentiment::ALL.iter().enumerate() {
        let exact = counts.get(*sentiment) * width;
        widths[i] = exact / total;
        remainders[i] = (exact % total, i);
    }

    let assigned: usize = widths.iter().sum();
    remainders.sort_by(|a, b| b.0.cmp(&a.0));
    for (_, i) in remainders.iter().take(width - assigned) {
        widths[*i] += 1;
    }
    widths
}

fn share_bar(counts: &SentimentCounts, width: usize) -> Line<'static> {
    let widths = share_widths(counts, width);
    let spans: Vec<Span> = Sentiment::ALL
        .iter()
        .zip(widths)
        .filter(|(_, w)| *w > 0)
        .map(|(sentiment, w)| Span::styled("█".repeat(w), Style::default().fg(sentiment_color(*sentiment))))
        .collect();
    Line::from(spans)
}

fn tallies(counts: &SentimentCounts) -> Line<'static> {
    let mut spans = Vec::new();
    for sentiment in Sentiment::ALL {
        let color = sentiment_color(sentiment);
        spans.push(Span::styled(
            format!(" {} ", counts.get(sentiment)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!("{}   ", sentiment.short_label().to_uppercase()), Style::default().fg(color)));
    }
    Line::from(spans)
}

fn render_history(frame: &mut Frame, area: Rect, state: &RenderState) {
    let history = state.session.history();
    let focused = state.focus == Focus::History;
    let mut block = panel(&format!("Recent Analysis ({})", history.len()), focused);

    if history.is_empty() {
        let empty = Paragraph::new("No history yet.")
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }
    block = block.title_bottom(
        Line::from(Span::styled(" Ctrl+L: clear ", Style::default().fg(MUTED))).alignment(Alignment::Right),
    );

    let preview_width = area.width.saturating_sub(4).max(8) as usize;
    let items: Vec<ListItem> = history
        .iter()
        .map(|item| {
            let color = sentiment_color(item.result.sentiment());
            let badge = Line::from(vec![
                Span::styled(
                    format!(" {} ", item.result.sentiment()),
                    Style::default().fg(SURFACE).bg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {}", format_timestamp(&item.timestamp)), Style::default().fg(MUTED)),
            ]);
            let preview = Line::from(single_line(&item.text, preview_width));
            ListItem::new(vec![badge, preview])
        })
        .collect();

    let highlight = if focused {
        Style::default().bg(Color::Rgb(39, 39, 42)).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight).highlight_symbol("▌");

    let mut list_state = ListState::default().with_selected(Some(state.history_cursor.min(history.len() - 1)));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (text, style) = if let Some(message) = state.status_message {
        let fg = match message.message_type {
            MessageType::Success => sentiment_color(Sentiment::Positive),
            MessageType::Error => ERROR,
        };
        (format!(" {} ", message.text), Style::default().fg(fg).bg(SURFACE))
    } else {
        let mut parts = vec![match state.session.phase() {
            Phase::Idle => "[IDLE]",
            Phase::Loading => "[ANALYZING]",
            Phase::Success => "[DONE]",
            Phase::Error => "[ERROR]",
        }
        .to_string()];

        match state.focus {
            Focus::Input => parts.push("Enter: analyze".to_string()),
            Focus::History => parts.push("Enter: show entry".to_string()),
        }
        parts.push("Tab: switch pane".to_string());
        if state.session.displayed().is_some() {
            parts.push("Ctrl+Y: copy".to_string());
        }
        if !state.session.history().is_empty() {
            parts.push("Ctrl+L: clear".to_string());
        }
        parts.push("Ctrl+C: quit".to_string());

        (format!(" {} ", parts.join(" | ")), Style::default().fg(BRIGHT).bg(SURFACE))
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
