use crate::backend::RequestError;
use crate::entities::Course;
use crate::router::Route;
use crate::ui::components::toasts::Toast;

/// Identifies one mount of a page. Results carrying a stale id are dropped.
pub type MountId = u64;

/// Outcome of a background request, reported back to the page that fired it.
pub type RequestOutcome = Result<(), RequestError>;

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    Navigate(Route),
    Back,

    // Table intents
    NextRow,
    PreviousRow,
    ViewCourse(i64),
    EditCourse(i64),
    RequestDelete(i64),
    OpenLesson { course_id: i64, lesson_id: i64 },

    // Pagination
    GoToPage(u32),
    SetPageSize(u32),

    // Delete confirmation
    ConfirmDelete(i64),
    CancelDelete,

    // Form
    SubmitCourse(Course),
    CancelForm,

    // Request results
    CoursesLoaded { mount: MountId, outcome: RequestOutcome },
    CourseLoaded { mount: MountId, outcome: RequestOutcome },
    CourseSaved { mount: MountId, outcome: RequestOutcome },
    CourseDeleted { mount: MountId, outcome: RequestOutcome },
    Refresh,

    // Notifications
    Notify(Toast),
    DismissToasts,

    // UI operations
    ShowDialog(DialogType),
    HideDialog,

    // Several follow-ups from one update
    Batch(Vec<Action>),

    // App control
    Quit,
    None,
}

impl Action {
    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }

    /// Flatten into a batch, skipping `None`.
    pub fn batch(actions: impl IntoIterator<Item = Action>) -> Action {
        let mut actions: Vec<Action> = actions.into_iter().filter(|action| !action.is_none()).collect();
        match actions.len() {
            0 => Action::None,
            1 => actions.remove(0),
            _ => Action::Batch(actions),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogType {
    Help,
    Logs,
}
