//! Paginated course list with delete support.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::backend::{CourseApi, EmptyPayload, RequestFuture, RequestLifecycle, RequestOptions, RequestOverride};
use crate::constants::{
    TOAST_COURSE_DELETED, TOAST_COURSE_DELETED_DESC, TOAST_DELETE_FAILED, TOAST_LIST_FAILED,
};
use crate::entities::{Course, Listing, Page};
use crate::router::Route;
use crate::ui::components::{CourseTable, DeleteConfirmation, PaginationControl, Toast};
use crate::ui::core::{Action, AppContext, Component, Job, MountId};
use reqwest::Method;

pub struct CourseListPage {
    mount: MountId,
    api: CourseApi,
    paginate: bool,
    page: u32,
    per_page: u32,
    list: RequestLifecycle<Listing<Course>>,
    delete: RequestLifecycle<EmptyPayload>,
    table: CourseTable,
    pagination: PaginationControl,
    confirmation: DeleteConfirmation,
    jobs: Vec<Job>,
}

impl CourseListPage {
    pub fn new(ctx: &AppContext, mount: MountId) -> Self {
        let api = ctx.api.clone();
        let per_page = ctx.config.ui.default_page_size;
        let paginate = ctx.config.ui.paginate;

        let list = api.lifecycle(RequestOptions::get(api.endpoints.courses()));
        let delete = api.lifecycle(RequestOptions::new(Method::DELETE, api.endpoints.courses()).manual());

        let mut page = Self {
            mount,
            api,
            paginate,
            page: 1,
            per_page,
            list,
            delete,
            table: CourseTable::new(),
            pagination: PaginationControl::new(1, per_page),
            confirmation: DeleteConfirmation::new(),
            jobs: Vec::new(),
        };
        page.run_list_effect();
        page.sync_children();
        page
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn table(&self) -> &CourseTable {
        &self.table
    }

    pub fn pagination(&self) -> &PaginationControl {
        &self.pagination
    }

    pub fn confirmation(&self) -> &DeleteConfirmation {
        &self.confirmation
    }

    /// Current listing as a page envelope, if one has arrived.
    pub fn current_page(&self) -> Option<Page<Course>> {
        self.list.data().map(Listing::into_page)
    }

    pub fn error(&self) -> Option<String> {
        self.list.error()
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.page.to_string(), self.per_page.to_string()]
    }

    fn list_url(&self) -> String {
        if self.paginate {
            self.api.endpoints.paginated(self.page, self.per_page)
        } else {
            self.api.endpoints.courses()
        }
    }

    /// Re-fetch when `[page, per_page]` changed since the last automatic run.
    fn run_list_effect(&mut self) {
        self.list.set_url(self.list_url());
        if let Some(future) = self.list.run_effect(self.dependencies()) {
            self.queue_list(future);
        }
    }

    fn refresh(&mut self) {
        if self.list.loading() {
            return;
        }
        let future = self.list.trigger(None);
        self.queue_list(future);
    }

    fn queue_list(&mut self, future: RequestFuture<Listing<Course>>) {
        let mount = self.mount;
        let description = format!("Load courses (page {}, {} per page)", self.page, self.per_page);
        self.jobs.push(Job::new(description, async move {
            Action::CoursesLoaded {
                mount,
                outcome: future.await.map(|_| ()),
            }
        }));
    }

    fn delete_course(&mut self, id: i64) {
        if self.delete.loading() {
            return;
        }
        self.confirmation.set_pending(true);
        let future = self.delete.trigger(Some(RequestOverride::url(self.api.endpoints.course(id))));
        let mount = self.mount;
        self.jobs.push(Job::new(format!("Delete course {id}"), async move {
            Action::CourseDeleted {
                mount,
                outcome: future.await.map(|_| ()),
            }
        }));
    }

    /// Push lifecycle state down into the child components.
    fn sync_children(&mut self) {
        let state = self.list.snapshot();
        let page = state.data.map(Listing::into_page);

        self.table.set_loading(state.loading);
        self.table
            .set_courses(page.as_ref().map(|page| page.data.clone()).unwrap_or_default());
        if let Some(page) = &page {
            self.pagination.sync(page);
        }
        self.pagination.page_size = self.per_page;
        self.pagination.set_disabled(state.loading);
        self.confirmation.set_pending(self.delete.loading());
    }

    /// Targets outside `1..=totalPages` of the shown listing are rejected.
    fn page_in_range(&self, page: u32) -> bool {
        self.current_page()
            .is_some_and(|current| (1..=current.total_pages).contains(&page))
    }

    /// After a failed fetch, point back at the page still on screen so that
    /// requesting the failed page again fires a new call.
    fn roll_back_to_loaded_page(&mut self) {
        let Some(shown) = self.current_page() else {
            self.list.reset_effect(None);
            return;
        };
        if self.paginate {
            self.page = shown.page_index;
            if shown.page_size > 0 {
                self.per_page = shown.page_size;
            }
        }
        self.list.set_url(self.list_url());
        self.list.reset_effect(Some(self.dependencies()));
    }

    fn is_current(&self, mount: MountId) -> bool {
        if mount != self.mount {
            log::debug!("dropping result for unmounted page {}", mount);
        }
        mount == self.mount
    }
}

impl Component for CourseListPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.confirmation.is_open() {
            return self.confirmation.handle_key_events(key);
        }
        if self.pagination.is_editing() {
            return self.pagination.handle_key_events(key);
        }

        match key.code {
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('a') => Action::Navigate(Route::CourseCreate),
            _ => {
                let action = self.table.handle_key_events(key);
                if action.is_none() {
                    self.pagination.handle_key_events(key)
                } else {
                    action
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Action {
        let result = match action {
            Action::GoToPage(page) => {
                if self.page_in_range(page) {
                    self.page = page;
                    self.run_list_effect();
                } else {
                    log::debug!("ignoring request for page {}", page);
                }
                Action::None
            }
            Action::SetPageSize(per_page) => {
                self.per_page = per_page;
                self.page = 1;
                self.run_list_effect();
                Action::None
            }
            Action::Refresh => {
                self.refresh();
                Action::None
            }
            Action::ViewCourse(id) => Action::Navigate(Route::CourseView(id)),
            Action::EditCourse(id) => Action::Navigate(Route::CourseEdit(id)),
            Action::RequestDelete(id) => {
                self.confirmation.open(id);
                Action::None
            }
            Action::CancelDelete => {
                self.confirmation.close();
                Action::None
            }
            Action::ConfirmDelete(id) => {
                self.delete_course(id);
                Action::None
            }
            Action::CoursesLoaded { mount, outcome } => {
                if !self.is_current(mount) {
                    return Action::None;
                }
                match outcome {
                    Ok(()) => Action::None,
                    Err(e) => {
                        self.roll_back_to_loaded_page();
                        Action::Notify(Toast::error(TOAST_LIST_FAILED).with_description(e.user_message()))
                    }
                }
            }
            Action::CourseDeleted { mount, outcome } => {
                if !self.is_current(mount) {
                    return Action::None;
                }
                self.confirmation.close();
                match outcome {
                    Ok(()) => {
                        self.refresh();
                        Action::Notify(Toast::success(TOAST_COURSE_DELETED).with_description(TOAST_COURSE_DELETED_DESC))
                    }
                    Err(e) => Action::Notify(Toast::error(TOAST_DELETE_FAILED).with_description(e.user_message())),
                }
            }
            other => self.table.update(other),
        };

        self.sync_children();
        result
    }

    fn take_jobs(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.jobs)
    }

    fn is_editing(&self) -> bool {
        self.pagination.is_editing()
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        self.sync_children();

        let error = self.list.error();
        let chunks = Layout::vertical([
            Constraint::Length(u16::from(error.is_some())),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(rect);

        if let Some(error) = error {
            f.render_widget(
                Paragraph::new(format!("⚠ {error}")).style(Style::default().fg(Color::Red)),
                chunks[0],
            );
        }
        self.table.render(f, chunks[1]);
        self.pagination.render(f, chunks[2]);
        self.confirmation.render(f, rect);
    }
}
