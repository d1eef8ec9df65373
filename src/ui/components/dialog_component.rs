//! Modal overlay for the help and logs dialogs.

use crate::logger::Logger;
use crate::ui::components::dialogs::{help_dialog, logs_dialog};
use crate::ui::core::{
    actions::{Action, DialogType},
    Component,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};

/// Shows at most one informational dialog on top of the current page.
pub struct DialogComponent {
    pub dialog_type: Option<DialogType>,
    pub scroll_offset: usize,
    logger: Logger,
}

impl DialogComponent {
    pub fn new(logger: Logger) -> Self {
        Self {
            dialog_type: None,
            scroll_offset: 0,
            logger,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.dialog_type.is_some()
    }

    fn max_scroll(&self) -> usize {
        match self.dialog_type {
            Some(DialogType::Help) => help_dialog::line_count(),
            Some(DialogType::Logs) => self.logger.get_logs().len(),
            None => 0,
        }
        .saturating_sub(1)
    }
}

impl Component for DialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        let Some(dialog_type) = self.dialog_type.clone() else {
            return Action::None;
        };

        match (&dialog_type, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q')) => Action::HideDialog,
            (DialogType::Help, KeyCode::Char('?')) => Action::HideDialog,
            (DialogType::Logs, KeyCode::Char('G')) => Action::HideDialog,
            (_, KeyCode::Down | KeyCode::Char('j')) => {
                self.scroll_offset = (self.scroll_offset + 1).min(self.max_scroll());
                Action::None
            }
            (_, KeyCode::Up | KeyCode::Char('k')) => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                Action::None
            }
            (_, KeyCode::Home) => {
                self.scroll_offset = 0;
                Action::None
            }
            (_, KeyCode::End) => {
                self.scroll_offset = self.max_scroll();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ShowDialog(dialog_type) => {
                self.dialog_type = Some(dialog_type);
                self.scroll_offset = 0;
                Action::None
            }
            Action::HideDialog => {
                self.dialog_type = None;
                self.scroll_offset = 0;
                Action::None
            }
            other => other,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        match self.dialog_type {
            Some(DialogType::Help) => help_dialog::render(f, rect, self.scroll_offset),
            Some(DialogType::Logs) => logs_dialog::render(f, rect, &self.logger, self.scroll_offset),
            None => {}
        }
    }
}
