//! Help dialog listing the key bindings

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::layout::LayoutManager;

const HELP_CONTENT: &str = r"
COURSE LIST
-----------
j/k ↑/↓     Select course
Enter, v    View course
e           Edit course
d           Delete course (with confirmation)
a           Create course
r           Refresh list

PAGINATION
----------
n/p ←/→     Next / previous page
Home/End    First / last page
:           Jump to page
s           Change page size

COURSE FORM
-----------
Tab/↑/↓     Move between fields
←/→         Change category or status
Ctrl+L      Add lesson
Ctrl+D      Remove focused lesson
Ctrl+S      Save
Esc         Cancel

COURSE AND LESSON VIEWS
-----------------------
j/k         Select lesson
Enter       Play lesson
e           Edit course
Esc, b      Back

GENERAL
-------
x           Dismiss notifications
G           Show logs
?           Toggle this help
q, Ctrl+C   Quit
";

/// Number of lines in the help text
pub fn line_count() -> usize {
    HELP_CONTENT.lines().count()
}

/// Render the help dialog starting at `scroll_offset`
pub fn render(f: &mut Frame, area: Rect, scroll_offset: usize) {
    let (help_width, help_height) = LayoutManager::help_panel_dimensions(area.width, area.height);
    let help_area = LayoutManager::centered_rect(help_width, help_height, area);
    f.render_widget(Clear, help_area);

    let lines: Vec<&str> = HELP_CONTENT.lines().collect();
    let visible_height = help_area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    let scroll_offset = scroll_offset.min(max_scroll);

    let help_text = lines
        .iter()
        .skip(scroll_offset)
        .take(visible_height)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ❓ Help - Esc or ? to close ")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .style(Style::default().fg(Color::Cyan))
        .wrap(Wrap { trim: false });
    f.render_widget(help_paragraph, help_area);
}
