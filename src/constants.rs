//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

use std::time::Duration;

// Request errors
/// Shown when neither the server nor the transport produced a message
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

// Pagination
/// Page sizes offered by the page-size selector
pub const PAGE_SIZE_OPTIONS: [u32; 6] = [5, 10, 20, 30, 40, 50];
/// Page size used when the configuration does not say otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// Notifications
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(6);
pub const MAX_VISIBLE_TOASTS: usize = 4;

// Toast titles and descriptions
pub const TOAST_COURSE_CREATED: &str = "Course created";
pub const TOAST_COURSE_CREATED_DESC: &str = "The course has been successfully created.";
pub const TOAST_COURSE_UPDATED: &str = "Course updated";
pub const TOAST_COURSE_UPDATED_DESC: &str = "The course has been successfully updated.";
pub const TOAST_COURSE_DELETED: &str = "Course deleted";
pub const TOAST_COURSE_DELETED_DESC: &str = "The course has been successfully deleted.";
pub const TOAST_CREATE_FAILED: &str = "Error creating course";
pub const TOAST_CREATE_FAILED_DESC: &str = "An error occurred while creating the course. Please try again later.";
pub const TOAST_UPDATE_FAILED: &str = "Error updating course";
pub const TOAST_UPDATE_FAILED_DESC: &str = "An error occurred while updating the course. Please try again later.";
pub const TOAST_DELETE_FAILED: &str = "Error deleting course";
pub const TOAST_LIST_FAILED: &str = "Error loading courses";
pub const TOAST_LOAD_FAILED: &str = "Error loading course";
pub const TOAST_VALIDATION_FAILED: &str = "Missing required field";

// Delete confirmation
pub const DELETE_COURSE_TITLE: &str = "Delete Course";
pub const DELETE_COURSE_MESSAGE: &str = "Are you sure you want to delete this course? This action cannot be undone.";

// Empty and missing states
pub const EMPTY_COURSES: &str = "No courses found";
pub const COURSE_NOT_FOUND: &str = "Course not found";
pub const LESSON_NOT_FOUND: &str = "Lesson not found";
pub const NO_LESSONS: &str = "No lessons available";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const APP_TITLE: &str = "Course Admin";
pub const DIALOG_TITLE_LOGS: &str = "🔍 Logs - Press 'Esc', 'G' or 'q' to close";

// Environment
/// Overrides `api.base_url` from the configuration file
pub const API_URL_ENV: &str = "COURSEDECK_API_URL";

// Config validation bounds
pub const MAX_TIMEOUT_SECONDS: u64 = 300;
pub const MAX_TOAST_SECONDS: u64 = 60;
