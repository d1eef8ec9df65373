//! Playback page for one lesson of a course.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::course_view::panel;
use crate::backend::{RequestLifecycle, RequestOptions};
use crate::constants::{LESSON_NOT_FOUND, TOAST_LOAD_FAILED};
use crate::entities::{Course, Lesson};
use crate::router::Route;
use crate::ui::components::Toast;
use crate::ui::core::{Action, AppContext, Component, Job, MountId};
use crate::utils::youtube;

/// Playback details derived from a lesson's video URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    pub video_id: Option<String>,
    pub embed_url: Option<String>,
}

impl Playback {
    pub fn for_lesson(lesson: &Lesson) -> Self {
        let video_id = youtube::video_id(&lesson.youtube_url);
        let embed_url = video_id.as_deref().map(youtube::embed_url);
        Self { video_id, embed_url }
    }
}

pub struct LessonViewPage {
    mount: MountId,
    course_id: i64,
    lesson_id: i64,
    load: RequestLifecycle<Course>,
    selected: Option<usize>,
    list_state: ListState,
    jobs: Vec<Job>,
}

impl LessonViewPage {
    pub fn new(ctx: &AppContext, mount: MountId, course_id: i64, lesson_id: i64) -> Self {
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
            lesson_id,
            load,
            selected: None,
            list_state: ListState::default(),
            jobs,
        }
    }

    /// The lesson this page was opened for, once the course has loaded.
    pub fn lesson(&self) -> Option<Lesson> {
        self.load
            .data()
            .and_then(|course| course.lesson(self.lesson_id).cloned())
    }

    pub fn playback(&self) -> Option<Playback> {
        self.lesson().as_ref().map(Playback::for_lesson)
    }

    fn selected_index(&self, course: &Course) -> usize {
        self.selected
            .or_else(|| course.lessons.iter().position(|lesson| lesson.id == Some(self.lesson_id)))
            .unwrap_or(0)
    }

    fn move_selection(&mut self, forward: bool) {
        let Some(course) = self.load.data() else {
            return;
        };
        let count = course.lesson_count();
        if count == 0 {
            return;
        }
        let current = self.selected_index(&course);
        self.selected = Some(if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        });
    }

    fn open_selected(&self) -> Action {
        let Some(course) = self.load.data() else {
            return Action::None;
        };
        let index = self.selected_index(&course);
        match course.lessons.get(index).and_then(|lesson| lesson.id) {
            Some(lesson_id) if lesson_id != self.lesson_id => Action::OpenLesson {
                course_id: self.course_id,
                lesson_id,
            },
            _ => Action::None,
        }
    }

    fn render_lesson(&mut self, f: &mut Frame, rect: Rect, course: &Course, lesson: &Lesson) {
        let chunks = Layout::vertical([Constraint::Length(2), Constraint::Length(6), Constraint::Min(3)]).split(rect);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                lesson.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(course.name.clone(), Style::default().fg(Color::Gray))),
        ]);
        f.render_widget(header, chunks[0]);

        let playback = Playback::for_lesson(lesson);
        let label = Style::default().fg(Color::DarkGray);
        let player_lines = match (&playback.video_id, &playback.embed_url) {
            (Some(video_id), Some(embed_url)) => vec![
                Line::from(vec![Span::styled("Video id  ", label), Span::raw(video_id.clone())]),
                Line::from(vec![
                    Span::styled("Player    ", label),
                    Span::styled(embed_url.clone(), Style::default().fg(Color::Cyan)),
                ]),
                Line::from(vec![Span::styled("Source    ", label), Span::raw(lesson.youtube_url.clone())]),
            ],
            _ => vec![
                Line::from(Span::styled(
                    "No playable YouTube video in this lesson's URL",
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(vec![Span::styled("Source    ", label), Span::raw(lesson.youtube_url.clone())]),
            ],
        };
        f.render_widget(
            Paragraph::new(player_lines)
                .block(panel(" Player "))
                .wrap(Wrap { trim: true }),
            chunks[1],
        );

        let items: Vec<ListItem> = course
            .lessons
            .iter()
            .enumerate()
            .map(|(index, other)| {
                let current = other.id == Some(self.lesson_id);
                let style = if current {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let marker = if current { "● " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(format!("{}. {}", index + 1, other.name), style),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(panel(" Course lessons - Enter to switch "))
            .highlight_style(Style::default().bg(Color::DarkGray));
        self.list_state.select(Some(self.selected_index(course)));
        f.render_stateful_widget(list, chunks[2], &mut self.list_state);
    }
}

impl Component for LessonViewPage {
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
            KeyCode::Enter => self.open_selected(),
            KeyCode::Esc | KeyCode::Char('b') => Action::Back,
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::OpenLesson { course_id, lesson_id } => Action::Navigate(Route::LessonView { course_id, lesson_id }),
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
        if state.loading && state.data.is_none() {
            let loading = Paragraph::new("⟳ Loading lesson...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            f.render_widget(loading, rect);
            return;
        }

        let found = state
            .data
            .as_ref()
            .and_then(|course| course.lesson(self.lesson_id).map(|lesson| (course.clone(), lesson.clone())));
        match found {
            Some((course, lesson)) => self.render_lesson(f, rect, &course, &lesson),
            None => {
                let message = state.error.unwrap_or_else(|| LESSON_NOT_FOUND.to_string());
                let paragraph = Paragraph::new(format!("⚠ {message}"))
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center);
                f.render_widget(paragraph, rect);
            }
        }
    }
}
