//! Reusable UI components

pub mod badge;
pub mod course_form;
pub mod course_table;
pub mod dialog_component;
pub mod dialogs;
pub mod pagination;
pub mod status_bar;
pub mod toasts;

// Component exports
pub use course_form::{CourseForm, FormField};
pub use course_table::{CourseTable, TableView};
pub use dialog_component::DialogComponent;
pub use dialogs::DeleteConfirmation;
pub use pagination::PaginationControl;
pub use status_bar::StatusBar;
pub use toasts::{Severity, Toast, ToastQueue};
