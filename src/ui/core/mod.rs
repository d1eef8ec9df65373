//! Core UI functionality for coursedeck.
//!
//! This module contains the fundamental building blocks for the user interface,
//! including event handling, component abstractions, and background task
//! management. It provides the foundation that all pages and components build upon.
//!
//! # Module Components
//!
//! - [`actions`] - Action definitions and UI state transitions
//! - [`component`] - Base component trait and rendering abstractions
//! - [`context`] - Shared services handed to pages
//! - [`event_handler`] - Keyboard/mouse input polling
//! - [`task_manager`] - Background request execution
//!
//! # Architecture
//!
//! 1. **Components** implement the [`Component`] trait for consistent rendering
//! 2. **Actions** define state transitions and user interactions
//! 3. **Jobs** queued by components run on the [`TaskManager`] and report back
//!    as actions on the next tick

pub mod actions;
pub mod component;
pub mod context;
pub mod event_handler;
pub mod task_manager;

// Re-export core types for easier access from other modules
pub use actions::{Action, DialogType, MountId, RequestOutcome};
pub use component::Component;
pub use context::{AppContext, MountCounter};
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{Job, TaskId, TaskManager};
