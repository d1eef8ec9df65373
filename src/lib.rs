//! coursedeck - a terminal admin client for a Course/Lesson REST API
//!
//! Courses are listed, created, edited, viewed and deleted against a
//! configurable backend. Every remote call goes through a request lifecycle
//! that tracks loading, error and data state for the page that owns it.
//!
//! # Modules
//!
//! * [`backend`] - HTTP transport, endpoints and the request lifecycle
//! * [`config`] - Application configuration management
//! * [`entities`] - Course, lesson and page payloads
//! * [`form`] - Course draft editing and validation
//! * [`router`] - Route table and navigation history
//! * [`ui`] - Terminal user interface components and rendering
//! * [`utils`] - Date formatting and YouTube helpers

/// HTTP transport and request lifecycle
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Wire models exchanged with the course API
pub mod entities;

/// Course form drafts and validation
pub mod form;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Route table and history
pub mod router;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling and other helpers
pub mod utils;

pub use entities::{Category, Course, Lesson, Status};
