//! Logs dialog showing the in-memory log buffer

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::constants::DIALOG_TITLE_LOGS;
use crate::logger::Logger;
use crate::ui::layout::LayoutManager;

fn message_style(message: &str, fallback: Style) -> Style {
    if message.starts_with("ERROR") || message.contains("failed") {
        Style::default().fg(Color::Red)
    } else if message.starts_with("WARN") {
        Style::default().fg(Color::Yellow)
    } else if message.contains("succeeded") {
        Style::default().fg(Color::Green)
    } else if message.contains("auto-firing") || message.starts_with("INFO GET") {
        Style::default().fg(Color::Cyan)
    } else {
        fallback
    }
}

/// Render the logs dialog, newest entries first, starting at `scroll_offset`
pub fn render(frame: &mut Frame, area: Rect, logger: &Logger, scroll_offset: usize) {
    let modal_area = LayoutManager::centered_rect(80, 80, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(DIALOG_TITLE_LOGS)
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black))
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, modal_area);

    let inner_area = modal_area.inner(Margin {
        vertical: 1,
        horizontal: 1,
    });
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner_area);

    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let header = Paragraph::new(Line::from(vec![
        Span::styled("↑/↓", key),
        Span::styled(" or ", Style::default().fg(Color::Gray)),
        Span::styled("j/k", key),
        Span::styled(" to scroll", Style::default().fg(Color::Gray)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let logs = logger.get_logs();
    if logs.is_empty() {
        let no_logs = Paragraph::new("No logs yet")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(no_logs, chunks[1]);
        return;
    }

    let visible_height = chunks[1].height as usize;
    let start_index = scroll_offset.min(logs.len().saturating_sub(1));
    let end_index = (start_index + visible_height).min(logs.len());

    let items: Vec<ListItem> = logs[start_index..end_index]
        .iter()
        .enumerate()
        .map(|(i, log)| {
            let style = if i % 2 == 0 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };

            // Entries look like "[12:00:00.000] message"
            match log.split_once("] ") {
                Some((timestamp, message)) => ListItem::new(Line::from(vec![
                    Span::styled(format!("{timestamp}] "), Style::default().fg(Color::DarkGray)),
                    Span::styled(message.to_string(), message_style(message, style)),
                ])),
                None => ListItem::new(Line::from(Span::styled(log.clone(), style))),
            }
        })
        .collect();
    frame.render_widget(List::new(items), chunks[1]);

    if logs.len() > visible_height {
        let scroll_info = format!("Showing {}-{} of {} logs", start_index + 1, end_index, logs.len());
        let scroll_area = Rect {
            x: chunks[1].x + chunks[1].width.saturating_sub(scroll_info.len() as u16 + 2),
            y: chunks[1].y + chunks[1].height.saturating_sub(1),
            width: scroll_info.len() as u16 + 2,
            height: 1,
        };
        let scroll_indicator = Paragraph::new(scroll_info)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right);
        frame.render_widget(scroll_indicator, scroll_area);
    }
}
