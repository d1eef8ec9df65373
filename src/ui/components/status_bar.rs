//! Status bar component

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::router::Route;

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Render the current location, background activity and a shortcut hint
    pub fn render(f: &mut Frame, area: Rect, route: Route, busy_tasks: usize, hint: &str) {
        let chunks = Layout::horizontal([Constraint::Length(36), Constraint::Min(0)]).split(area);

        let mut left = vec![Span::styled(route.path(), Style::default().fg(Color::Cyan))];
        if busy_tasks > 0 {
            left.push(Span::styled(
                format!("  ⟳ {busy_tasks} request(s)"),
                Style::default().fg(Color::Yellow),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(left)), chunks[0]);

        let status_bar = Paragraph::new(hint.to_string())
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(status_bar, chunks[1]);
    }
}
