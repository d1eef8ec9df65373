use std::collections::VecDeque;
use std::time::Instant;

use crate::logger::Logger;
use crate::router::{Route, Router};
use crate::ui::components::{DialogComponent, StatusBar, ToastQueue};
use crate::ui::core::{
    actions::{Action, DialogType},
    event_handler::EventType,
    task_manager::TaskManager,
    AppContext, Component, MountCounter, MountId,
};
use crate::ui::layout::LayoutManager;
use crate::ui::pages::{mount_page, page_hint, page_title};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tokio::sync::mpsc;

/// Root component: owns the router, the mounted page and the overlays.
///
/// Key events go to the open dialog, then the page, then global shortcuts.
/// Actions a page returns are applied here; background results are fed
/// back to the page on each tick.
pub struct AppComponent {
    ctx: AppContext,
    router: Router,
    page: Box<dyn Component>,
    mounts: MountCounter,
    current_mount: MountId,
    dialog: DialogComponent,
    toasts: ToastQueue,
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    logger: Logger,
    should_quit: bool,
}

impl AppComponent {
    /// Build the app and mount the course list. Must run inside a tokio runtime.
    pub fn new(ctx: AppContext) -> Self {
        let (task_manager, background_action_rx) = TaskManager::new();
        let mut mounts = MountCounter::default();
        let current_mount = mounts.next();
        let router = Router::new();
        let page = mount_page(router.current(), &ctx, current_mount);

        let mut app = Self {
            dialog: DialogComponent::new(ctx.logger.clone()),
            toasts: ToastQueue::new(ctx.config.notifications.duration()),
            logger: ctx.logger.clone(),
            ctx,
            router,
            page,
            mounts,
            current_mount,
            task_manager,
            background_action_rx,
            should_quit: false,
        };
        app.logger.log(format!("AppComponent: mounted {}", app.router.current()));
        app.spawn_page_jobs();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn current_route(&self) -> Route {
        self.router.current()
    }

    pub fn current_mount(&self) -> MountId {
        self.current_mount
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn dialog_type(&self) -> Option<&DialogType> {
        self.dialog.dialog_type.as_ref()
    }

    /// Get the number of active background tasks
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Navigate to a path, redirecting unknown ones to the course list.
    pub fn navigate_to_path(&mut self, path: &str) {
        let route = self.router.resolve(path);
        self.dispatch(Action::Navigate(route));
    }

    fn spawn_page_jobs(&mut self) {
        for job in self.page.take_jobs() {
            self.task_manager.spawn(job);
        }
    }

    fn remount(&mut self) {
        let route = self.router.current();
        self.current_mount = self.mounts.next();
        self.page = mount_page(route, &self.ctx, self.current_mount);
        self.logger
            .log(format!("Navigation: mounted {} (mount {})", route, self.current_mount));
        self.spawn_page_jobs();
    }

    /// Handle global keyboard shortcuts that aren't page-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => {
                self.logger.log("Global key: 'q' - quitting application".to_string());
                Action::Quit
            }
            KeyCode::Char('?') => Action::ShowDialog(DialogType::Help),
            KeyCode::Char('G') => Action::ShowDialog(DialogType::Logs),
            KeyCode::Char('x') => Action::DismissToasts,
            _ => Action::None,
        }
    }

    /// Apply an action and every follow-up it produces.
    pub fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([(action, false)]);

        while let Some((action, from_page)) = queue.pop_front() {
            match action {
                Action::None => {}
                Action::Batch(actions) => queue.extend(actions.into_iter().map(|action| (action, from_page))),
                Action::Quit => self.should_quit = true,
                Action::Navigate(route) => {
                    self.router.push(route);
                    self.remount();
                }
                Action::Back => {
                    self.router.back();
                    self.remount();
                }
                Action::Notify(toast) => self.toasts.push(toast),
                Action::DismissToasts => self.toasts.dismiss_all(),
                action @ (Action::ShowDialog(_) | Action::HideDialog) => {
                    self.logger.log(format!("Dialog: {:?}", action));
                    self.dialog.update(action);
                }
                action if from_page => {
                    // Pages hand back only what they did not consume.
                    log::debug!("unhandled page action {:?}", action);
                }
                action => {
                    let follow_up = self.page.update(action);
                    self.spawn_page_jobs();
                    queue.push_back((follow_up, true));
                }
            }
        }
    }

    /// Process background actions from task manager
    pub fn process_background_actions(&mut self) -> usize {
        let mut actions = Vec::new();
        while let Ok(action) = self.background_action_rx.try_recv() {
            self.logger.log(format!("Background: Received action {:?}", action));
            actions.push(action);
        }

        let finished = self.task_manager.cleanup_finished_tasks();
        if !finished.is_empty() {
            log::debug!("cleaned up {} finished tasks", finished.len());
        }

        let count = actions.len();
        for action in actions {
            self.dispatch(action);
        }
        count
    }

    /// Drop expired toasts. Returns whether any were visible.
    pub fn tick(&mut self, now: Instant) -> bool {
        let had_toasts = !self.toasts.is_empty();
        self.toasts.expire(now);
        had_toasts
    }

    /// Process an event through the component hierarchy
    pub fn handle_event(&mut self, event_type: EventType) {
        let action = match event_type {
            EventType::Key(key) => self.handle_key_events(key),
            EventType::Mouse(mouse) if self.ctx.config.ui.mouse_enabled && !self.dialog.is_visible() => {
                match mouse.kind {
                    MouseEventKind::ScrollDown => Action::NextRow,
                    MouseEventKind::ScrollUp => Action::PreviousRow,
                    _ => Action::None,
                }
            }
            EventType::Tick => {
                self.tick(Instant::now());
                Action::None
            }
            EventType::Mouse(_) | EventType::Resize(_, _) | EventType::Other => Action::None,
        };

        self.dispatch(action);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let route = self.router.current();
        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(
                    crate::constants::APP_TITLE,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" › ", Style::default().fg(Color::DarkGray)),
                Span::styled(page_title(route), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(Span::styled(
                self.ctx.api.endpoints.base_url().to_string(),
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        f.render_widget(header, area);
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.logger.log("Global key: Ctrl+C - quitting application".to_string());
            return Action::Quit;
        }

        if self.dialog.is_visible() {
            return self.dialog.handle_key_events(key);
        }

        let action = self.page.handle_key_events(key);
        if action.is_none() && !self.page.is_editing() {
            self.handle_global_key(key)
        } else {
            action
        }
    }

    fn update(&mut self, action: Action) -> Action {
        self.dispatch(action);
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let [header, body, status] = LayoutManager::main_layout(rect);

        self.render_header(f, header);
        self.page.render(f, body);
        StatusBar::render(
            f,
            status,
            self.router.current(),
            self.task_manager.task_count(),
            page_hint(self.router.current()),
        );

        // Render dialog on top if visible (includes help dialog)
        if self.dialog.is_visible() {
            self.dialog.render(f, rect);
        }
        self.toasts.render(f, rect);
    }
}
