//! Value types shared by every component: courses, lessons and the
//! pagination envelope returned by the backend.

pub mod course;
pub mod page;

pub use course::{Category, Course, Lesson, Status, UnknownVariant};
pub use page::{Listing, Page};
