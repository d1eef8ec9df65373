use super::actions::Action;
use super::task_manager::Job;
use crossterm::event::{Event, KeyEvent};
use ratatui::{layout::Rect, Frame};

pub trait Component {
    fn handle_events(&mut self, event: Option<Event>) -> Action {
        if let Some(Event::Key(key)) = event {
            self.handle_key_events(key)
        } else {
            Action::None
        }
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Action;

    fn update(&mut self, action: Action) -> Action {
        // Default implementation passes action through
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect);

    /// Background work queued since the last call, handed to the task manager.
    fn take_jobs(&mut self) -> Vec<Job> {
        Vec::new()
    }

    /// Whether the component is capturing text input, so global shortcuts
    /// must not fire.
    fn is_editing(&self) -> bool {
        false
    }
}
