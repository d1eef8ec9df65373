//! Pages composed for each route.
//!
//! Every page owns the request lifecycles it needs and fires them when it is
//! built, so navigating to a route is the same as mounting its page.

pub mod course_form_page;
pub mod course_list;
pub mod course_view;
pub mod lesson_view;

pub use course_form_page::CourseFormPage;
pub use course_list::CourseListPage;
pub use course_view::CourseViewPage;
pub use lesson_view::{LessonViewPage, Playback};

use crate::router::Route;
use crate::ui::core::{AppContext, Component, MountId};

/// Build and mount the page for `route`.
pub fn mount_page(route: Route, ctx: &AppContext, mount: MountId) -> Box<dyn Component> {
    match route {
        Route::CourseList => Box::new(CourseListPage::new(ctx, mount)),
        Route::CourseCreate => Box::new(CourseFormPage::create(ctx, mount)),
        Route::CourseEdit(id) => Box::new(CourseFormPage::edit(ctx, mount, id)),
        Route::CourseView(id) => Box::new(CourseViewPage::new(ctx, mount, id)),
        Route::LessonView { course_id, lesson_id } => Box::new(LessonViewPage::new(ctx, mount, course_id, lesson_id)),
    }
}

/// Heading shown above the page.
pub fn page_title(route: Route) -> &'static str {
    match route {
        Route::CourseList => "Courses",
        Route::CourseCreate => "Create Course",
        Route::CourseEdit(_) => "Edit Course",
        Route::CourseView(_) => "Course Details",
        Route::LessonView { .. } => "Lesson",
    }
}

/// Shortcut hint shown in the status bar.
pub fn page_hint(route: Route) -> &'static str {
    match route {
        Route::CourseList => "a: new • v: view • e: edit • d: delete • n/p: page • r: refresh • ?: help • q: quit",
        Route::CourseCreate | Route::CourseEdit(_) => "Tab: next field • Ctrl+S: save • Esc: cancel",
        Route::CourseView(_) => "Enter: play lesson • e: edit • r: refresh • Esc: back",
        Route::LessonView { .. } => "j/k: choose lesson • Enter: switch • Esc: back",
    }
}
