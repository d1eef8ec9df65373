use crate::backend::{CourseApi, ReqwestTransport};
use crate::config::Config;
use crate::logger::Logger;
use crate::ui::app_component::AppComponent;
use crate::ui::core::{AppContext, Component, EventHandler, EventType};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::Arc;

/// Async event loop: input, background results and rendering
pub async fn run_app(config: Config, logger: Logger) -> anyhow::Result<()> {
    let transport = ReqwestTransport::new(config.api.timeout())?;
    let api = CourseApi::new(Arc::new(transport), &config.api.base_url);
    let mouse_enabled = config.ui.mouse_enabled;

    // Setup terminal
    enable_raw_mode()?;
    let mut terminal = setup_or_restore(|| setup_terminal(mouse_enabled), restore_terminal)?;

    let mut app = AppComponent::new(AppContext::new(api, config, logger.clone()));
    let mut event_handler = EventHandler::new();

    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("event loop stopped: {e:#}");
    }
    result
}

fn setup_terminal(mouse_enabled: bool) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    if mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Best-effort undo of raw mode and the alternate screen.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        log::warn!("failed to leave raw mode: {}", e);
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
        log::warn!("failed to leave alternate screen: {}", e);
    }
}

/// Run the remaining setup once raw mode is on; restore the terminal if it fails.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> anyhow::Result<T>,
    restore: impl FnOnce(),
) -> anyhow::Result<T> {
    match setup() {
        Ok(value) => Ok(value),
        Err(e) => {
            restore();
            Err(e.context("Failed to set up the terminal"))
        }
    }
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
) -> anyhow::Result<()> {
    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| app.render(f, f.area()))?;
            needs_render = false;
        }

        let event = event_handler.next_event().await?;

        match event {
            EventType::Tick => {
                // Results from finished requests land here
                let received = app.process_background_actions();
                let had_toasts = app.tick(std::time::Instant::now());
                needs_render = received > 0 || had_toasts || app.active_task_count() > 0;
            }
            EventType::Other => {}
            event => {
                app.handle_event(event);
                needs_render = true;
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
