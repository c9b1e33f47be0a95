use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Dashboard layout:
/// - header row
/// - left column (62%): input box over the result panel
/// - right column (38%): session overview over the history list
/// - status bar row
pub struct DashboardLayout {
    pub header_area: Rect,
    pub input_area: Rect,
    pub result_area: Rect,
    pub overview_area: Rect,
    pub history_area: Rect,
    pub status_area: Rect,
}

/// Rows for the input box (including borders)
const INPUT_HEIGHT: u16 = 7;
/// Rows for the overview panel (including borders)
const OVERVIEW_HEIGHT: u16 = 17;

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(rows[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(INPUT_HEIGHT), Constraint::Min(3)])
            .split(columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(OVERVIEW_HEIGHT), Constraint::Min(3)])
            .split(columns[1]);

        Self {
            header_area: rows[0],
            input_area: left[0],
            result_area: left[1],
            overview_area: right[0],
            history_area: right[1],
            status_area: rows[2],
        }
    }
}
