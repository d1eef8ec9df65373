use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::entities::{Category, Status};

/// Presentation of a category: (variant, label, background colour)
const CATEGORY_BADGES: [(Category, &str, Color); 3] = [
    (Category::Frontend, "FRONTEND", Color::Blue),
    (Category::Backend, "BACKEND", Color::Magenta),
    (Category::Fullstack, "FULLSTACK", Color::Cyan),
];

/// Presentation of a status: (variant, label, background colour)
const STATUS_BADGES: [(Status, &str, Color); 2] = [
    (Status::Active, "ACTIVE", Color::Green),
    (Status::Inactive, "INACTIVE", Color::Red),
];

fn lookup<T: PartialEq + Copy>(table: &[(T, &'static str, Color)], value: T) -> (&'static str, Color) {
    table
        .iter()
        .find(|(variant, _, _)| *variant == value)
        .map(|(_, label, color)| (*label, *color))
        .unwrap_or(("?", Color::DarkGray))
}

#[must_use]
pub fn category_style(category: Category) -> (&'static str, Color) {
    lookup(&CATEGORY_BADGES, category)
}

#[must_use]
pub fn status_style(status: Status) -> (&'static str, Color) {
    lookup(&STATUS_BADGES, status)
}

fn badge(label: &str, bg: Color) -> Span<'static> {
    Span::styled(
        format!(" {label} "),
        Style::default().fg(Color::Black).bg(bg).add_modifier(Modifier::BOLD),
    )
}

#[must_use]
pub fn create_category_badge(category: Category) -> Span<'static> {
    let (label, color) = category_style(category);
    badge(label, color)
}

#[must_use]
pub fn create_status_badge(status: Status) -> Span<'static> {
    let (label, color) = status_style(status);
    badge(label, color)
}

/// Lesson count, e.g. `(3 lessons)`
#[must_use]
pub fn create_count_badge(count: usize) -> Span<'static> {
    let noun = if count == 1 { "lesson" } else { "lessons" };
    Span::styled(format!("({count} {noun})"), Style::default().fg(Color::LightYellow))
}
