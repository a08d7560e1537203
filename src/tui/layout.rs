use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Stacked layout: search bar, results list, status bar
pub struct AppLayout {
    pub search_area: Rect,
    pub results_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar with border
                Constraint::Min(3),    // Results (at least 3 rows)
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self { search_area: chunks[0], results_area: chunks[1], status_area: chunks[2] }
    }
}
