//! Dialog components module

pub mod common;
pub mod delete_confirmation;
pub mod help_dialog;
pub mod logs_dialog;

pub use delete_confirmation::DeleteConfirmation;
