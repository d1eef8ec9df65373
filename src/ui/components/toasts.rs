//! Transient notifications stacked in the top-right corner.

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::constants::{DEFAULT_TOAST_DURATION, MAX_VISIBLE_TOASTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Success,
    Error,
    Loading,
}

impl Severity {
    fn color(self) -> Color {
        match self {
            Severity::Info => Color::Cyan,
            Severity::Warning => Color::Yellow,
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
            Severity::Loading => Color::Blue,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
            Severity::Success => "✔",
            Severity::Error => "✖",
            Severity::Loading => "⟳",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: Option<String>,
    pub severity: Severity,
    pub created_at: Instant,
}

impl Toast {
    pub fn new(severity: Severity, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            severity,
            created_at: Instant::now(),
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(Severity::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Severity::Error, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(Severity::Info, title)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Queue of live toasts; expired ones are dropped on every tick.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    duration: Duration,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            duration,
        }
    }

    pub fn push(&mut self, toast: Toast) {
        log::info!("toast: {} {:?}", toast.title, toast.description);
        self.toasts.push(toast);
    }

    /// Drop every toast older than the configured duration at `now`.
    pub fn expire(&mut self, now: Instant) {
        let duration = self.duration;
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.created_at) < duration);
    }

    pub fn dismiss_all(&mut self) {
        self.toasts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Newest first, capped to what fits on screen.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().rev().take(MAX_VISIBLE_TOASTS)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let width = area.width.min(48);
        let mut y = area.y + 1;

        for toast in self.visible() {
            let height = if toast.description.is_some() { 4 } else { 3 };
            if y + height > area.y + area.height {
                break;
            }
            let toast_area = Rect::new(area.x + area.width.saturating_sub(width + 1), y, width, height);
            y += height;

            let color = toast.severity.color();
            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{} ", toast.severity.icon()), Style::default().fg(color)),
                Span::styled(toast.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ])];
            if let Some(description) = &toast.description {
                lines.push(Line::from(Span::styled(
                    description.clone(),
                    Style::default().fg(Color::Gray),
                )));
            }

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color));

            f.render_widget(Clear, toast_area);
            f.render_widget(
                Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
                toast_area,
            );
        }
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}
