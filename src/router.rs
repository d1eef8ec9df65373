//! Path based navigation between pages.
//!
//! Paths mirror the REST resources (`/courses/{id}/edit`, ...). Anything that
//! does not match a known route, or that carries a non-numeric id, resolves to
//! the course list.

use matchit::Router as PathTable;
use std::fmt;

/// A resolved page location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    CourseList,
    CourseCreate,
    CourseEdit(i64),
    CourseView(i64),
    LessonView { course_id: i64, lesson_id: i64 },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::CourseList => "/courses".to_string(),
            Route::CourseCreate => "/courses/create".to_string(),
            Route::CourseEdit(id) => format!("/courses/{id}/edit"),
            Route::CourseView(id) => format!("/courses/{id}"),
            Route::LessonView { course_id, lesson_id } => format!("/courses/{course_id}/lessons/{lesson_id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy)]
enum RouteKind {
    List,
    Create,
    Edit,
    View,
    Lesson,
}

/// Entries kept for `back()`.
const MAX_HISTORY: usize = 32;

/// Route table plus navigation history.
pub struct Router {
    table: PathTable<RouteKind>,
    current: Route,
    history: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        let mut table = PathTable::new();
        // Static segments win over parameters, so `/courses/create` never
        // reaches the `{id}` route.
        for (path, kind) in [
            ("/courses", RouteKind::List),
            ("/courses/create", RouteKind::Create),
            ("/courses/{id}/edit", RouteKind::Edit),
            ("/courses/{id}", RouteKind::View),
            ("/courses/{id}/lessons/{lesson_id}", RouteKind::Lesson),
        ] {
            if let Err(e) = table.insert(path, kind) {
                log::error!("route {} rejected: {}", path, e);
            }
        }

        Self {
            table,
            current: Route::CourseList,
            history: Vec::new(),
        }
    }

    /// Resolve a path, redirecting unknown locations to the course list.
    pub fn resolve(&self, path: &str) -> Route {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        let Ok(matched) = self.table.at(path) else {
            log::debug!("no route for {}, redirecting to /courses", path);
            return Route::CourseList;
        };

        let id = |name: &str| matched.params.get(name).and_then(|raw| raw.parse::<i64>().ok());
        let route = match matched.value {
            RouteKind::List => Some(Route::CourseList),
            RouteKind::Create => Some(Route::CourseCreate),
            RouteKind::Edit => id("id").map(Route::CourseEdit),
            RouteKind::View => id("id").map(Route::CourseView),
            RouteKind::Lesson => id("id")
                .zip(id("lesson_id"))
                .map(|(course_id, lesson_id)| Route::LessonView { course_id, lesson_id }),
        };

        route.unwrap_or_else(|| {
            log::debug!("non-numeric id in {}, redirecting to /courses", path);
            Route::CourseList
        })
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Move to `route`, remembering the current location.
    ///
    /// The course list is the root: reaching it clears the history. Switching
    /// between lessons of one course replaces the current entry, so going
    /// back leaves the player.
    pub fn push(&mut self, route: Route) -> Route {
        if route == self.current {
            return self.current;
        }

        match (self.current, route) {
            (_, Route::CourseList) => self.history.clear(),
            (Route::LessonView { course_id: from, .. }, Route::LessonView { course_id: to, .. }) if from == to => {}
            (current, _) => {
                if self.history.len() == MAX_HISTORY {
                    self.history.remove(0);
                }
                self.history.push(current);
            }
        }
        self.current = route;
        self.current
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Resolve `path` and move there.
    pub fn navigate(&mut self, path: &str) -> Route {
        let route = self.resolve(path);
        self.push(route)
    }

    /// Return to the previous location, or stay on the list when there is none.
    pub fn back(&mut self) -> Route {
        self.current = self.history.pop().unwrap_or(Route::CourseList);
        self.current
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
