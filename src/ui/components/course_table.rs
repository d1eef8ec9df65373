//! Table of courses for the list page.
//!
//! The table only displays what it is given and raises intents; fetching and
//! deleting are the owning page's business.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::constants::EMPTY_COURSES;
use crate::entities::Course;
use crate::ui::components::badge::{create_category_badge, create_status_badge};
use crate::ui::core::{Action, Component};

/// What the table body shows, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableView {
    Loading,
    Empty,
    Rows,
}

#[derive(Debug, Default)]
pub struct CourseTable {
    pub courses: Vec<Course>,
    pub loading: bool,
    pub selected: usize,
    state: TableState,
}

impl CourseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows, keeping the selection in range.
    pub fn set_courses(&mut self, courses: Vec<Course>) {
        self.courses = courses;
        self.selected = self.selected.min(self.courses.len().saturating_sub(1));
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn view(&self) -> TableView {
        if self.loading {
            TableView::Loading
        } else if self.courses.is_empty() {
            TableView::Empty
        } else {
            TableView::Rows
        }
    }

    pub fn selected_course(&self) -> Option<&Course> {
        self.courses.get(self.selected)
    }

    fn select_next(&mut self) {
        if !self.courses.is_empty() {
            self.selected = (self.selected + 1) % self.courses.len();
        }
    }

    fn select_previous(&mut self) {
        if !self.courses.is_empty() {
            self.selected = if self.selected == 0 {
                self.courses.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    fn intent(&self, make: fn(i64) -> Action) -> Action {
        if self.view() != TableView::Rows {
            return Action::None;
        }
        self.selected_course()
            .and_then(|course| course.id)
            .map_or(Action::None, make)
    }

    fn row(course: &Course) -> Row<'static> {
        Row::new(vec![
            Line::from(course.name.clone()),
            Line::from(create_category_badge(course.category)),
            Line::from(create_status_badge(course.status)),
            Line::from(course.lesson_count().to_string()).alignment(Alignment::Right),
            Line::from(vec![
                Span::styled("v", Style::default().fg(Color::Cyan)),
                Span::raw("iew "),
                Span::styled("e", Style::default().fg(Color::Yellow)),
                Span::raw("dit "),
                Span::styled("d", Style::default().fg(Color::Red)),
                Span::raw("elete"),
            ]),
        ])
    }
}

impl Component for CourseTable {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Action::None
            }
            KeyCode::Enter | KeyCode::Char('v') => self.intent(Action::ViewCourse),
            KeyCode::Char('e') => self.intent(Action::EditCourse),
            KeyCode::Char('d') => self.intent(Action::RequestDelete),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::NextRow => {
                self.select_next();
                Action::None
            }
            Action::PreviousRow => {
                self.select_previous();
                Action::None
            }
            other => other,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Courses ")
            .border_style(Style::default().fg(Color::Gray));

        match self.view() {
            TableView::Loading => {
                let loading = Paragraph::new("⟳ Loading courses...")
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center)
                    .block(block);
                f.render_widget(loading, rect);
            }
            TableView::Empty => {
                let empty = Paragraph::new(EMPTY_COURSES)
                    .style(Style::default().fg(Color::Gray))
                    .alignment(Alignment::Center)
                    .block(block);
                f.render_widget(empty, rect);
            }
            TableView::Rows => {
                let header = Row::new(vec!["Name", "Category", "Status", "Lessons", "Actions"])
                    .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                    .bottom_margin(1);

                let rows: Vec<Row> = self.courses.iter().map(Self::row).collect();
                let table = Table::new(
                    rows,
                    [
                        Constraint::Min(20),
                        Constraint::Length(12),
                        Constraint::Length(10),
                        Constraint::Length(8),
                        Constraint::Length(18),
                    ],
                )
                .header(header)
                .block(block)
                .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
                .highlight_symbol("▶ ");

                self.state.select(Some(self.selected));
                f.render_stateful_widget(table, rect, &mut self.state);
            }
        }
    }
}
