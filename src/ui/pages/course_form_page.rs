//! Create and edit pages sharing the course form.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use reqwest::Method;

use crate::backend::{CourseApi, EmptyPayload, RequestError, RequestLifecycle, RequestOptions, RequestOverride};
use crate::constants::{
    TOAST_COURSE_CREATED, TOAST_COURSE_CREATED_DESC, TOAST_COURSE_UPDATED, TOAST_COURSE_UPDATED_DESC,
    TOAST_CREATE_FAILED, TOAST_CREATE_FAILED_DESC, TOAST_LOAD_FAILED, TOAST_UPDATE_FAILED, TOAST_UPDATE_FAILED_DESC,
};
use crate::entities::Course;
use crate::form::CourseDraft;
use crate::router::Route;
use crate::ui::components::{CourseForm, Toast};
use crate::ui::core::{Action, AppContext, Component, Job, MountId};

pub struct CourseFormPage {
    mount: MountId,
    course_id: Option<i64>,
    load: Option<RequestLifecycle<Course>>,
    save: RequestLifecycle<EmptyPayload>,
    form: CourseForm,
    jobs: Vec<Job>,
}

impl CourseFormPage {
    /// Empty form persisting with `POST /courses`.
    pub fn create(ctx: &AppContext, mount: MountId) -> Self {
        let api = &ctx.api;
        let save = api.lifecycle(RequestOptions::new(Method::POST, api.endpoints.courses()).manual());
        Self {
            mount,
            course_id: None,
            load: None,
            save,
            form: CourseForm::new(),
            jobs: Vec::new(),
        }
    }

    /// Form seeded from `GET /courses/{id}`, persisting with `PUT`.
    pub fn edit(ctx: &AppContext, mount: MountId, course_id: i64) -> Self {
        let api: &CourseApi = &ctx.api;
        let mut load: RequestLifecycle<Course> =
            api.lifecycle(RequestOptions::get(api.endpoints.course(course_id)).depends_on(vec![course_id.to_string()]));
        let save = api.lifecycle(RequestOptions::new(Method::PUT, api.endpoints.course(course_id)).manual());

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
            course_id: Some(course_id),
            load: Some(load),
            save,
            form: CourseForm::new(),
            jobs,
        }
    }

    pub fn form(&self) -> &CourseForm {
        &self.form
    }

    pub fn is_edit(&self) -> bool {
        self.course_id.is_some()
    }

    fn is_loading(&self) -> bool {
        self.load.as_ref().is_some_and(RequestLifecycle::loading)
    }

    /// The edited course could not be fetched, so there is nothing to edit.
    fn load_failed(&self) -> Option<String> {
        let load = self.load.as_ref()?;
        if load.data().is_some() {
            return None;
        }
        load.error()
    }

    fn submit(&mut self, course: Course) -> Action {
        if self.save.loading() {
            return Action::None;
        }
        let body = match serde_json::to_value(&course) {
            Ok(body) => body,
            Err(e) => {
                return Action::Notify(Toast::error(self.failure_title()).with_description(e.to_string()));
            }
        };

        self.form.set_saving(true);
        let future = self.save.trigger(Some(RequestOverride::body(body)));
        let mount = self.mount;
        let description = match self.course_id {
            Some(id) => format!("Update course {id}"),
            None => "Create course".to_string(),
        };
        self.jobs.push(Job::new(description, async move {
            Action::CourseSaved {
                mount,
                outcome: future.await.map(|_| ()),
            }
        }));
        Action::None
    }

    fn failure_title(&self) -> &'static str {
        if self.is_edit() {
            TOAST_UPDATE_FAILED
        } else {
            TOAST_CREATE_FAILED
        }
    }

    fn saved(&mut self, outcome: Result<(), RequestError>) -> Action {
        self.form.set_saving(false);
        match outcome {
            Ok(()) => {
                let toast = if self.is_edit() {
                    Toast::success(TOAST_COURSE_UPDATED).with_description(TOAST_COURSE_UPDATED_DESC)
                } else {
                    Toast::success(TOAST_COURSE_CREATED).with_description(TOAST_COURSE_CREATED_DESC)
                };
                Action::batch([Action::Notify(toast), Action::Navigate(Route::CourseList)])
            }
            Err(e) => {
                log::warn!("saving course failed: {}", e.user_message());
                let description = if self.is_edit() {
                    TOAST_UPDATE_FAILED_DESC
                } else {
                    TOAST_CREATE_FAILED_DESC
                };
                Action::Notify(Toast::error(self.failure_title()).with_description(description))
            }
        }
    }
}

impl Component for CourseFormPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.is_loading() || self.load_failed().is_some() {
            return match key.code {
                KeyCode::Esc => Action::Back,
                _ => Action::None,
            };
        }
        self.form.handle_key_events(key)
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::SubmitCourse(course) => self.submit(course),
            Action::CancelForm => Action::Back,
            Action::CourseLoaded { mount, outcome } if mount == self.mount => match outcome {
                Ok(()) => {
                    if let Some(course) = self.load.as_ref().and_then(RequestLifecycle::data) {
                        self.form.seed(CourseDraft::from_course(&course));
                    }
                    Action::None
                }
                Err(e) => Action::Notify(Toast::error(TOAST_LOAD_FAILED).with_description(e.user_message())),
            },
            Action::CourseSaved { mount, outcome } if mount == self.mount => self.saved(outcome),
            Action::CourseLoaded { .. } | Action::CourseSaved { .. } => {
                log::debug!("dropping result for unmounted form page");
                Action::None
            }
            other => other,
        }
    }

    fn take_jobs(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.jobs)
    }

    fn is_editing(&self) -> bool {
        !self.is_loading() && self.load_failed().is_none()
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if self.is_loading() {
            let loading = Paragraph::new("⟳ Loading course...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            f.render_widget(loading, rect);
            return;
        }

        if let Some(error) = self.load_failed() {
            let message = Paragraph::new(format!("⚠ {error}\n\nEsc to go back"))
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center);
            f.render_widget(message, rect);
            return;
        }

        self.form.render(f, rect);
    }
}
