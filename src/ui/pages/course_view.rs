//! Read-only detail page for one course.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::backend::{RequestLifecycle, RequestOptions};
use crate::constants::{COURSE_NOT_FOUND, NO_LESSONS, TOAST_LOAD_FAILED};
use crate::entities::Course;
use crate::router::Route;
use crate::ui::components::badge::{create_category_badge, create_count_badge, create_status_badge};
use crate::ui::components::Toast;
use crate::ui::core::{Action, AppContext, Component, Job, MountId};
use crate::utils::datetime::format_optional_timestamp;

pub struct CourseViewPage {
    mount: MountId,
    course_id: i64,
    load: RequestLifecycle<Course>,
    selected_lesson: usize,
    list_state: ListState,
    jobs: Vec<Job>,
}

impl CourseViewPage {
    pub fn new(ctx: &AppContext, mount: MountId, course_id: i64) -> Self {
        let api = &ctx.api;
        let mut load: RequestLifecycle<Course> =
            api.lifecycle(RequestOptions::get(api.endpoints.course(course_id)).depends_on(vec![course_id.to_string()]));

        let mut jobs = Vec::new();
        if let Some(future) = load.mount() {
            jobs.push(Job::new(format!("Load course {course_id}"), async move {
                Action::CourseLoaded {
                    mount,
                    outcome: future.await.map(|_| ()),
                }
            }));
        }

        Self {
            mount,
            course_id,
            load,
            selected_lesson: 0,
            list_state: ListState::default(),
            jobs,
        }
    }

    pub fn course(&self) -> Option<Course> {
        self.load.data()
    }

    fn refresh(&mut self) {
        if self.load.loading() {
            return;
        }
        let future = self.load.trigger(None);
        let mount = self.mount;
        self.jobs.push(Job::new(format!("Reload course {}", self.course_id), async move {
            Action::CourseLoaded {
                mount,
                outcome: future.await.map(|_| ()),
            }
        }));
    }

    fn open_selected_lesson(&self) -> Action {
        let lesson_id = self
            .course()
            .and_then(|course| course.lessons.get(self.selected_lesson).and_then(|lesson| lesson.id));
        match lesson_id {
            Some(lesson_id) => Action::OpenLesson {
                course_id: self.course_id,
                lesson_id,
            },
            None => Action::None,
        }
    }

    fn move_selection(&mut self, forward: bool) {
        let count = self.course().map_or(0, |course| course.lesson_count());
        if count == 0 {
            return;
        }
        self.selected_lesson = if forward {
            (self.selected_lesson + 1) % count
        } else {
            (self.selected_lesson + count - 1) % count
        };
    }

    fn render_course(&mut self, f: &mut Frame, rect: Rect, course: &Course) {
        let chunks = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Min(3),
        ])
        .split(rect);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                course.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                create_category_badge(course.category),
                Span::raw(" "),
                create_status_badge(course.status),
                Span::raw(" "),
                create_count_badge(course.lesson_count()),
            ]),
        ]);
        f.render_widget(header, chunks[0]);

        let description = Paragraph::new(course.description.clone().unwrap_or_else(|| "No description".to_string()))
            .block(panel(" Description "))
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        f.render_widget(description, chunks[1]);

        let label = Style::default().fg(Color::DarkGray);
        let information = Paragraph::new(vec![
            Line::from(vec![Span::styled("Category  ", label), Span::raw(course.category.to_string())]),
            Line::from(vec![Span::styled("Status    ", label), Span::raw(course.status.to_string())]),
            Line::from(vec![
                Span::styled("Created   ", label),
                Span::raw(format_optional_timestamp(course.created_at.as_deref())),
            ]),
            Line::from(vec![
                Span::styled("Updated   ", label),
                Span::raw(format_optional_timestamp(course.updated_at.as_deref())),
            ]),
        ])
        .block(panel(" Information "));
        f.render_widget(information, chunks[2]);

        if course.lessons.is_empty() {
            let empty = Paragraph::new(NO_LESSONS)
                .block(panel(" Lessons "))
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(empty, chunks[3]);
            return;
        }

        let items: Vec<ListItem> = course
            .lessons
            .iter()
            .enumerate()
            .map(|(index, lesson)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>2}. ", index + 1), Style::default().fg(Color::Cyan)),
                    Span::styled(lesson.name.clone(), Style::default().fg(Color::White)),
                    Span::styled(format!("  {}", lesson.youtube_url), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();
        let lessons = List::new(items)
            .block(panel(" Lessons - Enter to play "))
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");
        self.list_state.select(Some(self.selected_lesson.min(course.lessons.len() - 1)));
        f.render_stateful_widget(lessons, chunks[3], &mut self.list_state);
    }
}

pub(crate) fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(Style::default().fg(Color::Gray))
}

impl Component for CourseViewPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(true);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(false);
                Action::None
            }
            KeyCode::Enter => self.open_selected_lesson(),
            KeyCode::Char('e') => Action::Navigate(Route::CourseEdit(self.course_id)),
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Esc | KeyCode::Char('b') => Action::Back,
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::OpenLesson { course_id, lesson_id } => Action::Navigate(Route::LessonView { course_id, lesson_id }),
            Action::Refresh => {
                self.refresh();
                Action::None
            }
            Action::CourseLoaded { mount, outcome } => {
                if mount != self.mount {
                    log::debug!("dropping result for unmounted page {}", mount);
                    return Action::None;
                }
                match outcome {
                    Ok(()) => Action::None,
                    Err(e) => Action::Notify(Toast::error(TOAST_LOAD_FAILED).with_description(e.user_message())),
                }
            }
            other => other,
        }
    }

    fn take_jobs(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.jobs)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let state = self.load.snapshot();
        match (state.loading, state.data, state.error) {
            (true, None, _) => {
                let loading = Paragraph::new("⟳ Loading course...")
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center);
                f.render_widget(loading, rect);
            }
            (_, Some(course), _) => self.render_course(f, rect, &course),
            (_, None, error) => {
                let message = error.unwrap_or_else(|| COURSE_NOT_FOUND.to_string());
                let paragraph = Paragraph::new(format!("⚠ {message}"))
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center);
                f.render_widget(paragraph, rect);
            }
        }
    }
}
