//! Modal gate in front of a destructive action.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::common::create_dialog_block;
use crate::constants::{DELETE_COURSE_MESSAGE, DELETE_COURSE_TITLE};
use crate::ui::core::{Action, Component};
use crate::ui::layout::LayoutManager;

/// Confirmation dialog for deleting one course.
///
/// Confirming raises [`Action::ConfirmDelete`]; the dialog then shows
/// "Deleting..." and ignores input until the owner calls [`Self::close`].
#[derive(Debug, Default)]
pub struct DeleteConfirmation {
    target: Option<i64>,
    pending: bool,
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, target: i64) {
        self.target = Some(target);
        self.pending = false;
    }

    pub fn close(&mut self) {
        self.target = None;
        self.pending = false;
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn target(&self) -> Option<i64> {
        self.target
    }

    pub fn confirm_label(&self) -> &'static str {
        if self.pending {
            "Deleting..."
        } else {
            "Delete"
        }
    }
}

impl Component for DeleteConfirmation {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        let Some(target) = self.target else {
            return Action::None;
        };
        if self.pending {
            return Action::None;
        }

        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => Action::ConfirmDelete(target),
            KeyCode::Char('n') | KeyCode::Esc => Action::CancelDelete,
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if !self.is_open() {
            return;
        }

        let area = LayoutManager::centered_rect_lines(60, 9, rect);
        f.render_widget(Clear, area);
        let block = create_dialog_block(DELETE_COURSE_TITLE, Color::Red);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(inner);

        let message = Paragraph::new(DELETE_COURSE_MESSAGE)
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(message, chunks[0]);

        let (confirm_style, cancel_style) = if self.pending {
            (Style::default().fg(Color::DarkGray), Style::default().fg(Color::DarkGray))
        } else {
            (
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            )
        };
        let buttons = Paragraph::new(Line::from(vec![
            Span::styled(format!("[y] {}", self.confirm_label()), confirm_style),
            Span::raw("    "),
            Span::styled("[n] Cancel", cancel_style),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(buttons, chunks[1]);
    }
}
