//! Create/edit form for a course and its lessons.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::TOAST_VALIDATION_FAILED;
use crate::form::CourseDraft;
use crate::ui::components::badge::{create_category_badge, create_status_badge};
use crate::ui::components::dialogs::common::{
    create_input_paragraph, create_instructions_paragraph, create_selection_paragraph, shortcuts,
};
use crate::ui::components::toasts::Toast;
use crate::ui::core::{Action, Component};

/// Focusable parts of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Category,
    Status,
    LessonName(usize),
    LessonUrl(usize),
    Submit,
}

impl FormField {
    fn lesson_index(self) -> Option<usize> {
        match self {
            FormField::LessonName(index) | FormField::LessonUrl(index) => Some(index),
            _ => None,
        }
    }
}

const LESSON_ROW_HEIGHT: u16 = 3;

pub struct CourseForm {
    pub draft: CourseDraft,
    pub focus: FormField,
    pub saving: bool,
    pub error: Option<String>,
}

impl CourseForm {
    pub fn new() -> Self {
        Self::with_draft(CourseDraft::new())
    }

    pub fn with_draft(draft: CourseDraft) -> Self {
        Self {
            draft,
            focus: FormField::Name,
            saving: false,
            error: None,
        }
    }

    /// Replace the whole draft, e.g. once the edited course has loaded.
    pub fn seed(&mut self, draft: CourseDraft) {
        self.draft = draft;
        self.focus = FormField::Name;
        self.error = None;
    }

    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    pub fn submit_label(&self) -> &'static str {
        if self.saving {
            "Saving..."
        } else if self.draft.is_new() {
            "Create Course"
        } else {
            "Update Course"
        }
    }

    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Name,
            FormField::Description,
            FormField::Category,
            FormField::Status,
        ];
        for index in 0..self.draft.lessons.len() {
            fields.push(FormField::LessonName(index));
            fields.push(FormField::LessonUrl(index));
        }
        fields.push(FormField::Submit);
        fields
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_previous(&mut self) {
        let len = self.fields().len();
        self.move_focus(len - 1);
    }

    fn move_focus(&mut self, step: usize) {
        let fields = self.fields();
        let position = fields.iter().position(|field| *field == self.focus).unwrap_or(0);
        self.focus = fields[(position + step) % fields.len()];
    }

    /// Validate and hand the payload to the owning page.
    pub fn submit(&mut self) -> Action {
        if self.saving {
            return Action::None;
        }
        match self.draft.to_payload() {
            Ok(course) => {
                self.error = None;
                Action::SubmitCourse(course)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Action::Notify(Toast::error(TOAST_VALIDATION_FAILED).with_description(e.to_string()))
            }
        }
    }

    pub fn add_lesson(&mut self) {
        self.draft = self.draft.add_lesson();
        self.focus = FormField::LessonName(self.draft.lessons.len() - 1);
    }

    pub fn remove_focused_lesson(&mut self) {
        let Some(index) = self.focus.lesson_index() else {
            return;
        };
        match self.draft.remove_lesson(index) {
            Ok(next) => {
                self.draft = next;
                let last = self.draft.lessons.len() - 1;
                self.focus = FormField::LessonName(index.min(last));
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn edit_text<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut String),
    {
        let draft = &self.draft;
        let updated = match self.focus {
            FormField::Name => {
                let mut value = draft.name.clone();
                edit(&mut value);
                Some(draft.with_name(value))
            }
            FormField::Description => {
                let mut value = draft.description.clone();
                edit(&mut value);
                Some(draft.with_description(value))
            }
            FormField::LessonName(index) => draft.lessons.get(index).and_then(|lesson| {
                let mut value = lesson.name.clone();
                edit(&mut value);
                draft.with_lesson_name(index, value).ok()
            }),
            FormField::LessonUrl(index) => draft.lessons.get(index).and_then(|lesson| {
                let mut value = lesson.youtube_url.clone();
                edit(&mut value);
                draft.with_lesson_url(index, value).ok()
            }),
            FormField::Category | FormField::Status | FormField::Submit => None,
        };

        if let Some(updated) = updated {
            self.draft = updated;
        }
    }

    fn cycle_choice(&mut self, forward: bool) {
        self.draft = match self.focus {
            FormField::Category => {
                let category = if forward {
                    self.draft.category.next()
                } else {
                    self.draft.category.previous()
                };
                self.draft.with_category(category)
            }
            FormField::Status => {
                let status = if forward {
                    self.draft.status.next()
                } else {
                    self.draft.status.previous()
                };
                self.draft.with_status(status)
            }
            _ => return,
        };
    }

    fn render_lessons(&self, f: &mut Frame, area: Rect) {
        let capacity = (area.height / LESSON_ROW_HEIGHT).max(1) as usize;
        let focused_lesson = self.focus.lesson_index().unwrap_or(0);
        let offset = focused_lesson.saturating_sub(capacity - 1);

        for (row, (index, lesson)) in self
            .draft
            .lessons
            .iter()
            .enumerate()
            .skip(offset)
            .take(capacity)
            .enumerate()
        {
            let row_area = Rect::new(
                area.x,
                area.y + row as u16 * LESSON_ROW_HEIGHT,
                area.width,
                LESSON_ROW_HEIGHT,
            );
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(row_area);

            f.render_widget(
                create_input_paragraph(
                    &lesson.name,
                    &format!("Lesson {} name", index + 1),
                    self.focus == FormField::LessonName(index),
                ),
                columns[0],
            );
            f.render_widget(
                create_input_paragraph(
                    &lesson.youtube_url,
                    &format!("Lesson {} video URL", index + 1),
                    self.focus == FormField::LessonUrl(index),
                ),
                columns[1],
            );
        }
    }
}

impl Default for CourseForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CourseForm {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.saving {
            return Action::None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Action::CancelForm,
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('l') if ctrl => {
                self.add_lesson();
                Action::None
            }
            KeyCode::Char('d') if ctrl => {
                self.remove_focused_lesson();
                Action::None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_previous();
                Action::None
            }
            KeyCode::Enter if self.focus == FormField::Submit => self.submit(),
            KeyCode::Enter => {
                self.focus_next();
                Action::None
            }
            KeyCode::Left => {
                self.cycle_choice(false);
                Action::None
            }
            KeyCode::Right => {
                self.cycle_choice(true);
                Action::None
            }
            KeyCode::Backspace => {
                self.edit_text(|value| {
                    value.pop();
                });
                Action::None
            }
            KeyCode::Char(c) if !ctrl => {
                self.edit_text(|value| value.push(c));
                Action::None
            }
            _ => Action::None,
        }
    }

    fn is_editing(&self) -> bool {
        true
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(LESSON_ROW_HEIGHT),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(rect);

        f.render_widget(
            create_input_paragraph(&self.draft.name, "Name", self.focus == FormField::Name),
            chunks[0],
        );
        f.render_widget(
            create_input_paragraph(
                &self.draft.description,
                "Description",
                self.focus == FormField::Description,
            ),
            chunks[1],
        );

        let choices = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);
        f.render_widget(
            create_selection_paragraph(
                create_category_badge(self.draft.category),
                "Category",
                self.focus == FormField::Category,
            ),
            choices[0],
        );
        f.render_widget(
            create_selection_paragraph(
                create_status_badge(self.draft.status),
                "Status",
                self.focus == FormField::Status,
            ),
            choices[1],
        );

        let lessons_title = Paragraph::new(Line::from(vec![
            Span::styled("Lessons ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("({})", self.draft.lessons.len()),
                Style::default().fg(Color::Gray),
            ),
        ]));
        f.render_widget(lessons_title, chunks[3]);
        self.render_lessons(f, chunks[4]);

        let submit_style = if self.saving {
            Style::default().fg(Color::DarkGray)
        } else if self.focus == FormField::Submit {
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        };
        let mut footer = vec![Span::styled(format!("[ {} ]", self.submit_label()), submit_style)];
        if let Some(error) = &self.error {
            footer.push(Span::styled(format!("  {error}"), Style::default().fg(Color::Red)));
        }
        f.render_widget(Paragraph::new(Line::from(footer)), chunks[5]);

        let mut instructions = vec![
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            shortcuts::ARROWS_CHOOSE,
            shortcuts::SEPARATOR,
            shortcuts::CTRL_L_ADD,
        ];
        if self.draft.lessons.len() > 1 {
            instructions.push(shortcuts::SEPARATOR);
            instructions.push(shortcuts::CTRL_D_REMOVE);
        }
        instructions.extend([shortcuts::SEPARATOR, shortcuts::CTRL_S_SAVE, shortcuts::SEPARATOR, shortcuts::ESC_CANCEL]);
        f.render_widget(create_instructions_paragraph(&instructions), chunks[6]);
    }
}
