use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage, ViewKind};
use super::layout::AppLayout;
use crate::models::{SearchResult, SessionState};
use crate::sources::ONBOARDING_TEXT;
use crate::utils::sanitize_for_display;

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// Everything one frame needs, borrowed from the app
pub struct RenderState<'a> {
    pub view: &'a ViewKind,
    pub query: &'a str,
    pub session: &'a SessionState,
    pub selected_idx: usize,
    /// Number of views on the navigation stack
    pub depth: usize,
    pub status_message: Option<&'a StatusMessage>,
}

impl RenderState<'_> {
    /// Onboarding replaces the list once the project lookup has settled without a file
    fn shows_onboarding(&self) -> bool {
        matches!(self.view, ViewKind::Projects)
            && !self.session.is_loading
            && !self.session.has_source_file
    }
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_search_bar(frame, layout.search_area, state);
    if state.shows_onboarding() {
        render_onboarding(frame, layout.results_area);
    } else {
        render_results_list(
            frame,
            layout.results_area,
            &state.session.results,
            state.selected_idx,
        );
    }
    render_status_bar(frame, layout.status_area, state);
}

fn breadcrumb(view: &ViewKind) -> String {
    match view {
        ViewKind::Projects => " GCP Projects ".to_string(),
        ViewKind::Services { project } => {
            format!(" GCP Projects › {} ", sanitize_for_display(project))
        }
    }
}

fn render_search_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let mut title = breadcrumb(state.view);
    if state.session.is_loading {
        title.push_str("(loading…) ");
    }

    let line = if state.query.is_empty() {
        Line::from(Span::styled(state.view.placeholder(), Style::default().fg(MUTED)))
    } else {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(ACCENT)),
            Span::styled(sanitize_for_display(state.query), Style::default().fg(BRIGHT)),
        ])
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(title),
    );

    frame.render_widget(paragraph, area);
}

fn render_results_list(frame: &mut Frame, area: Rect, results: &[SearchResult], selected: usize) {
    let items: Vec<ListItem> = results
        .iter()
        .map(|result| ListItem::new(sanitize_for_display(&result.name)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(format!(" Results ({}) ", results.len())),
        )
        .style(Style::default().fg(MUTED))
        .highlight_style(Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD));

    let mut list_state = ListState::default();
    if !results.is_empty() {
        list_state.select(Some(selected.min(results.len() - 1)));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_onboarding(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = ONBOARDING_TEXT.lines().map(Line::from).collect();

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(" Getting started "),
        )
        .style(Style::default().fg(BRIGHT))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    if let Some(msg) = state.status_message {
        let color = match msg.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => ERROR,
        };
        let paragraph = Paragraph::new(format!(" {} ", sanitize_for_display(&msg.text)))
            .style(Style::default().fg(color).bg(BAR_BG));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut parts = vec![];

    let total = state.session.results.len();
    if total > 0 {
        parts.push(format!("{}/{}", state.selected_idx.min(total - 1) + 1, total));
    }

    let enter_hint = match state.view {
        ViewKind::Projects => "Enter: services",
        ViewKind::Services { .. } => "Enter: open",
    };
    parts.push(enter_hint.to_string());
    parts.push("Ctrl+O: open".to_string());
    parts.push("Ctrl+Y: copy URL".to_string());
    parts.push("Ctrl+R: reload".to_string());

    let esc_hint = if !state.query.is_empty() {
        "Esc: clear"
    } else if state.depth > 1 {
        "Esc: back"
    } else {
        "Esc: quit"
    };
    parts.push(esc_hint.to_string());

    let paragraph = Paragraph::new(format!(" {} ", parts.join(" | ")))
        .style(Style::default().fg(BRIGHT).bg(BAR_BG));

    frame.render_widget(paragraph, area);
}
