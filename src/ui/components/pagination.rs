//! Page navigation controls for the course table.
//!
//! The control never fetches anything: it mirrors the envelope it was last
//! synced with and reports requested page/size changes as actions.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::PAGE_SIZE_OPTIONS;
use crate::entities::Page;
use crate::ui::core::{Action, Component};

#[derive(Debug, Clone)]
pub struct PaginationControl {
    pub page_index: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub can_previous_page: bool,
    pub can_next_page: bool,
    pub jump_input: Option<String>,
    pub jump_error: Option<String>,
    pub disabled: bool,
}

impl PaginationControl {
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size,
            total_pages: 0,
            total_count: 0,
            can_previous_page: false,
            can_next_page: false,
            jump_input: None,
            jump_error: None,
            disabled: false,
        }
    }

    /// Take totals and navigation flags verbatim from the server envelope.
    pub fn sync<T>(&mut self, page: &Page<T>) {
        self.page_index = page.page_index;
        self.total_pages = page.total_pages;
        self.total_count = page.total_count;
        self.can_previous_page = page.can_previous_page;
        self.can_next_page = page.can_next_page;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page_index, self.total_pages.max(1))
    }

    /// Parse and range check a jump target against `1..=total_pages`.
    pub fn validate_jump(&self, input: &str) -> Result<u32, String> {
        let target: u32 = input
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not a page number", input.trim()))?;
        if target == 0 || target > self.total_pages {
            return Err(format!("Page must be between 1 and {}", self.total_pages));
        }
        Ok(target)
    }

    pub fn go_to(&self, target: u32) -> Action {
        if self.disabled || target == self.page_index || target == 0 || target > self.total_pages {
            return Action::None;
        }
        Action::GoToPage(target)
    }

    pub fn first(&self) -> Action {
        self.go_to(1)
    }

    pub fn last(&self) -> Action {
        self.go_to(self.total_pages)
    }

    pub fn next(&self) -> Action {
        if !self.can_next_page {
            return Action::None;
        }
        self.go_to(self.page_index + 1)
    }

    pub fn previous(&self) -> Action {
        if !self.can_previous_page {
            return Action::None;
        }
        self.go_to(self.page_index.saturating_sub(1))
    }

    /// Next entry of the page-size option list, wrapping around.
    pub fn cycle_page_size(&self) -> Action {
        if self.disabled {
            return Action::None;
        }
        let position = PAGE_SIZE_OPTIONS.iter().position(|size| *size == self.page_size);
        let next = match position {
            Some(index) => PAGE_SIZE_OPTIONS[(index + 1) % PAGE_SIZE_OPTIONS.len()],
            None => PAGE_SIZE_OPTIONS[0],
        };
        Action::SetPageSize(next)
    }

    pub fn start_jump(&mut self) {
        if !self.disabled {
            self.jump_input = Some(String::new());
            self.jump_error = None;
        }
    }

    /// Commit the jump input. Invalid input keeps the prompt open.
    pub fn commit_jump(&mut self) -> Action {
        let Some(input) = self.jump_input.clone() else {
            return Action::None;
        };
        match self.validate_jump(&input) {
            Ok(target) => {
                self.jump_input = None;
                self.jump_error = None;
                self.go_to(target)
            }
            Err(message) => {
                self.jump_error = Some(message);
                Action::None
            }
        }
    }

    fn handle_jump_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(input) = self.jump_input.as_mut() {
                    input.push(c);
                }
                self.jump_error = None;
                Action::None
            }
            KeyCode::Backspace => {
                if let Some(input) = self.jump_input.as_mut() {
                    input.pop();
                }
                Action::None
            }
            KeyCode::Enter => self.commit_jump(),
            KeyCode::Esc => {
                self.jump_input = None;
                self.jump_error = None;
                Action::None
            }
            _ => Action::None,
        }
    }

    fn control(label: &str, enabled: bool) -> Span<'static> {
        let style = if enabled {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(label.to_string(), style)
    }
}

impl Component for PaginationControl {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.jump_input.is_some() {
            return self.handle_jump_key(key);
        }

        match key.code {
            KeyCode::Right | KeyCode::Char('n') => self.next(),
            KeyCode::Left | KeyCode::Char('p') => self.previous(),
            KeyCode::Home => self.first(),
            KeyCode::End => self.last(),
            KeyCode::Char('s') => self.cycle_page_size(),
            KeyCode::Char(':') => {
                self.start_jump();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn is_editing(&self) -> bool {
        self.jump_input.is_some()
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let enabled = !self.disabled;
        let can_first = enabled && self.page_index > 1 && self.total_pages > 0;
        let can_last = enabled && self.page_index < self.total_pages;

        let mut spans = vec![
            Self::control("«", can_first),
            Span::raw(" "),
            Self::control("‹", enabled && self.can_previous_page),
            Span::raw(" "),
            Span::styled(self.label(), Style::default().fg(Color::White)),
            Span::raw(" "),
            Self::control("›", enabled && self.can_next_page),
            Span::raw(" "),
            Self::control("»", can_last),
            Span::styled(
                format!("  {} per page  {} total", self.page_size, self.total_count),
                Style::default().fg(Color::Gray),
            ),
        ];

        if let Some(input) = &self.jump_input {
            spans.push(Span::styled(
                format!("  Go to page: {input}█"),
                Style::default().fg(Color::Yellow),
            ));
        }
        if let Some(error) = &self.jump_error {
            spans.push(Span::styled(format!("  {error}"), Style::default().fg(Color::Red)));
        }

        f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), rect);
    }
}
