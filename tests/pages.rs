mod common;

use common::{context, context_with, course_json, flatten, page_json, page_params, settle, url, Reply, ScriptedTransport};
use coursedeck::backend::RequestError;
use coursedeck::config::Config;
use coursedeck::constants::{
    TOAST_COURSE_CREATED, TOAST_COURSE_DELETED, TOAST_COURSE_UPDATED, TOAST_CREATE_FAILED, TOAST_CREATE_FAILED_DESC,
    TOAST_DELETE_FAILED, TOAST_LIST_FAILED, TOAST_LOAD_FAILED,
};
use coursedeck::form::CourseDraft;
use coursedeck::router::Route;
use coursedeck::ui::components::Severity;
use coursedeck::ui::core::{Action, Component};
use coursedeck::ui::pages::{CourseFormPage, CourseListPage, CourseViewPage, LessonViewPage};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use reqwest::Method;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Serves a catalogue of `total` courses, paginated or not, and accepts writes.
fn catalogue(total: u32) -> Arc<ScriptedTransport> {
    ScriptedTransport::new(move |request| {
        if let Some((page, per_page)) = page_params(&request.url) {
            return Ok(Reply::json(200, page_json(page, per_page, total)));
        }
        let reply = if request.method == Method::POST {
            Reply::json(201, json!({ "id": 99 }))
        } else if request.method == Method::PUT {
            Reply::json(200, json!({}))
        } else if request.method == Method::DELETE {
            Reply::empty(204)
        } else if request.url == url("/courses") {
            let all: Vec<_> = (1..=total)
                .map(|i| course_json(i64::from(i), &format!("Course {i}"), 2))
                .collect();
            Reply::json(200, json!(all))
        } else {
            match request.url.rsplit('/').next().and_then(|id| id.parse::<i64>().ok()) {
                Some(id) => Reply::json(200, course_json(id, &format!("Course {id}"), 3)),
                None => Reply::empty(404),
            }
        };
        Ok(reply)
    })
}

fn render_text(page: &mut dyn Component, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| page.render(f, f.area())).unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn toast_titles(actions: Vec<Action>) -> Vec<(String, Severity)> {
    flatten(actions)
        .into_iter()
        .filter_map(|action| match action {
            Action::Notify(toast) => Some((toast.title, toast.severity)),
            _ => None,
        })
        .collect()
}

// Course list

#[tokio::test]
async fn test_list_fetches_first_page_on_mount() {
    let transport = catalogue(25);
    let mut page = CourseListPage::new(&context(transport.clone()), 1);
    assert!(page.table().loading);

    let surfaced = settle(&mut page).await;
    assert!(surfaced.is_empty());

    assert_eq!(transport.urls(), vec![url("/courses/paginated?page=1&per_page=10")]);
    assert_eq!(page.table().courses.len(), 10);
    assert!(!page.table().loading);
    assert_eq!(page.pagination().label(), "Page 1 of 3");
}

#[tokio::test]
async fn test_list_page_navigation_refetches() {
    let transport = catalogue(12);
    let mut config = Config::default();
    config.ui.default_page_size = 5;
    let mut page = CourseListPage::new(&context_with(transport.clone(), config), 1);
    settle(&mut page).await;

    page.update(Action::GoToPage(2));
    assert!(page.pagination().disabled);
    settle(&mut page).await;

    let current = page.current_page().unwrap();
    assert_eq!(current.page_index, 2);
    assert_eq!(current.data.len(), 5);
    assert_eq!(current.data[0].name, "Course 6");
    assert_eq!(page.pagination().label(), "Page 2 of 3");
    assert_eq!(
        transport.urls().last().unwrap(),
        &url("/courses/paginated?page=2&per_page=5")
    );

    let text = render_text(&mut page, 100, 20);
    assert!(text.contains("Course 6"));
    assert!(text.contains("Course 10"));
    assert!(text.contains("Page 2 of 3"));
}

#[tokio::test]
async fn test_unchanged_dependencies_do_not_refetch() {
    let transport = catalogue(25);
    let mut page = CourseListPage::new(&context(transport.clone()), 1);
    settle(&mut page).await;

    page.update(Action::GoToPage(1));
    assert!(page.take_jobs().is_empty());
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_failed_page_fetch_can_be_retried() {
    let page_two_down = Arc::new(AtomicBool::new(true));
    let outage = page_two_down.clone();
    let transport = ScriptedTransport::new(move |request| match page_params(&request.url) {
        Some((2, _)) if outage.load(Ordering::SeqCst) => Ok(Reply::json(500, json!({ "message": "busy" }))),
        Some((page, per_page)) => Ok(Reply::json(200, page_json(page, per_page, 30))),
        None => Ok(Reply::empty(404)),
    });
    let mut page = CourseListPage::new(&context(transport.clone()), 1);
    settle(&mut page).await;

    page.update(Action::GoToPage(2));
    let surfaced = settle(&mut page).await;
    assert_eq!(toast_titles(surfaced), vec![(TOAST_LIST_FAILED.to_string(), Severity::Error)]);

    // Still showing page 1, and the page agrees
    assert_eq!(page.page(), 1);
    assert_eq!(page.pagination().label(), "Page 1 of 3");

    page_two_down.store(false, Ordering::SeqCst);
    let next = page.handle_key_events(key(KeyCode::Char('n')));
    assert!(matches!(next, Action::GoToPage(2)));
    page.update(next);
    settle(&mut page).await;

    assert_eq!(transport.requests().len(), 3);
    assert_eq!(page.page(), 2);
    assert_eq!(page.pagination().label(), "Page 2 of 3");
    assert!(page.error().is_none());
}

#[tokio::test]
async fn test_refresh_after_failed_page_fetch_reloads_the_shown_page() {
    let transport = ScriptedTransport::new(|request| match page_params(&request.url) {
        Some((2, _)) => Ok(Reply::empty(503)),
        Some((page, per_page)) => Ok(Reply::json(200, page_json(page, per_page, 30))),
        None => Ok(Reply::empty(404)),
    });
    let mut page = CourseListPage::new(&context(transport.clone()), 1);
    settle(&mut page).await;
    page.update(Action::GoToPage(2));
    settle(&mut page).await;

    page.update(Action::Refresh);
    settle(&mut page).await;

    assert_eq!(
        transport.urls().last().unwrap(),
        &url("/courses/paginated?page=1&per_page=10")
    );
}

#[tokio::test]
async fn test_out_of_range_page_requests_are_ignored() {
    let transport = catalogue(30);
    let mut page = CourseListPage::new(&context(transport.clone()), 1);
    settle(&mut page).await;

    page.update(Action::GoToPage(4));
    page.update(Action::GoToPage(0));

    assert!(page.take_jobs().is_empty());
    assert_eq!(page.page(), 1);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_page_size_change_resets_to_first_page() {
    let transport = catalogue(60);
    let mut page = CourseListPage::new(&context(transport.clone()), 1);
    settle(&mut page).await;
    page.update(Action::GoToPage(3));
    settle(&mut page).await;

    page.update(Action::SetPageSize(20));
    settle(&mut page).await;

    assert_eq!(page.page(), 1);
    assert_eq!(page.per_page(), 20);
    assert_eq!(
        transport.urls().last().unwrap(),
        &url("/courses/paginated?page=1&per_page=20")
    );
    assert_eq!(page.pagination().label(), "Page 1 of 3");
}

#[tokio::test]
async fn test_unpaginated_listing() {
    let transport = catalogue(3);
    let mut config = Config::default();
    config.ui.paginate = false;
    let mut page = CourseListPage::new(&context_with(transport.clone(), config), 1);
    settle(&mut page).await;

    assert_eq!(transport.urls(), vec![url("/courses")]);
    assert_eq!(page.table().courses.len(), 3);
    assert_eq!(page.pagination().label(), "Page 1 of 1");
}

#[tokio::test]
async fn test_list_failure_surfaces_toast_and_error() {
    let transport = ScriptedTransport::new(|_| Ok(Reply::json(500, json!({ "message": "database unavailable" }))));
    let mut page = CourseListPage::new(&context(transport), 1);

    let surfaced = settle(&mut page).await;

    assert_eq!(toast_titles(surfaced), vec![(TOAST_LIST_FAILED.to_string(), Severity::Error)]);
    assert_eq!(page.error().as_deref(), Some("database unavailable"));
    assert!(page.table().courses.is_empty());

    let text = render_text(&mut page, 80, 12);
    assert!(text.contains("database unavailable"));
}

#[tokio::test]
async fn test_delete_flow_refreshes_and_notifies() {
    let transport = catalogue(4);
    let mut page = CourseListPage::new(&context(transport.clone()), 1);
    settle(&mut page).await;

    let intent = page.handle_key_events(key(KeyCode::Char('d')));
    assert!(matches!(intent, Action::RequestDelete(1)));
    page.update(intent);
    assert!(page.confirmation().is_open());

    let confirm = page.handle_key_events(key(KeyCode::Char('y')));
    assert!(matches!(confirm, Action::ConfirmDelete(1)));
    page.update(confirm);
    assert!(page.confirmation().is_pending());
    assert_eq!(page.confirmation().confirm_label(), "Deleting...");

    let surfaced = settle(&mut page).await;

    assert_eq!(toast_titles(surfaced), vec![(TOAST_COURSE_DELETED.to_string(), Severity::Success)]);
    assert!(!page.confirmation().is_open());
    let requests = transport.requests();
    assert_eq!(requests[1].method, Method::DELETE);
    assert_eq!(requests[1].url, url("/courses/1"));
    // List re-fetched after the delete
    assert_eq!(requests[2].url, url("/courses/paginated?page=1&per_page=10"));
}

#[tokio::test]
async fn test_delete_failure_keeps_rows_and_reports_server_message() {
    let transport = ScriptedTransport::new(|request| {
        if request.method == Method::DELETE {
            return Ok(Reply::json(409, json!({ "message": "Course has enrolled students" })));
        }
        Ok(Reply::json(200, page_json(1, 10, 2)))
    });
    let mut page = CourseListPage::new(&context(transport.clone()), 1);
    settle(&mut page).await;

    page.update(Action::RequestDelete(2));
    page.update(Action::ConfirmDelete(2));
    let surfaced = flatten(settle(&mut page).await);

    let Some(Action::Notify(toast)) = surfaced.first() else {
        panic!("expected an error toast, got {surfaced:?}");
    };
    assert_eq!(toast.title, TOAST_DELETE_FAILED);
    assert_eq!(toast.description.as_deref(), Some("Course has enrolled students"));
    assert!(!page.confirmation().is_open());
    assert_eq!(page.table().courses.len(), 2);
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn test_cancel_delete_sends_nothing() {
    let transport = catalogue(2);
    let mut page = CourseListPage::new(&context(transport.clone()), 1);
    settle(&mut page).await;

    page.update(Action::RequestDelete(1));
    let cancel = page.handle_key_events(key(KeyCode::Esc));
    page.update(cancel);

    assert!(!page.confirmation().is_open());
    assert!(page.take_jobs().is_empty());
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_results_for_other_mounts_are_dropped() {
    let transport = catalogue(2);
    let mut page = CourseListPage::new(&context(transport), 7);
    settle(&mut page).await;

    let stale = page.update(Action::CoursesLoaded {
        mount: 6,
        outcome: Err(RequestError::Transport {
            message: "late".into(),
        }),
    });
    assert!(stale.is_none());
}

#[tokio::test]
async fn test_list_row_intents_become_navigation() {
    let transport = catalogue(2);
    let mut page = CourseListPage::new(&context(transport), 1);
    settle(&mut page).await;

    assert!(matches!(page.update(Action::ViewCourse(2)), Action::Navigate(Route::CourseView(2))));
    assert!(matches!(page.update(Action::EditCourse(2)), Action::Navigate(Route::CourseEdit(2))));
    assert!(matches!(
        page.handle_key_events(key(KeyCode::Char('a'))),
        Action::Navigate(Route::CourseCreate)
    ));
}

// Course form

fn valid_payload() -> coursedeck::entities::Course {
    CourseDraft::new()
        .with_name("Rust")
        .with_lesson_name(0, "Intro")
        .unwrap()
        .with_lesson_url(0, "https://youtu.be/abcdefghijk")
        .unwrap()
        .to_payload()
        .unwrap()
}

#[tokio::test]
async fn test_create_posts_and_navigates_to_list() {
    let transport = catalogue(0);
    let mut page = CourseFormPage::create(&context(transport.clone()), 1);
    assert!(!page.is_edit());
    assert!(page.take_jobs().is_empty());

    assert!(page.update(Action::SubmitCourse(valid_payload())).is_none());
    assert_eq!(page.form().submit_label(), "Saving...");
    let surfaced = flatten(settle(&mut page).await);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].url, url("/courses"));
    assert_eq!(requests[0].body.as_ref().unwrap()["name"], "Rust");

    assert!(matches!(&surfaced[0], Action::Notify(toast) if toast.title == TOAST_COURSE_CREATED));
    assert!(matches!(surfaced[1], Action::Navigate(Route::CourseList)));
}

#[tokio::test]
async fn test_create_failure_keeps_form_and_notifies() {
    let transport = ScriptedTransport::new(|_| Ok(Reply::json(400, json!({ "error": "bad payload" }))));
    let mut page = CourseFormPage::create(&context(transport), 1);

    page.update(Action::SubmitCourse(valid_payload()));
    let surfaced = flatten(settle(&mut page).await);

    let [Action::Notify(toast)] = surfaced.as_slice() else {
        panic!("expected a single toast, got {surfaced:?}");
    };
    assert_eq!(toast.title, TOAST_CREATE_FAILED);
    assert_eq!(toast.description.as_deref(), Some(TOAST_CREATE_FAILED_DESC));
    assert_eq!(page.form().submit_label(), "Create Course");
}

#[tokio::test]
async fn test_edit_seeds_form_and_puts() {
    let transport = catalogue(5);
    let mut page = CourseFormPage::edit(&context(transport.clone()), 1, 5);
    assert!(page.is_edit());
    assert!(!page.is_editing());

    settle(&mut page).await;
    assert!(page.is_editing());
    assert_eq!(page.form().draft.name, "Course 5");
    assert_eq!(page.form().draft.lessons.len(), 3);
    assert_eq!(page.form().submit_label(), "Update Course");

    let payload = page.form().draft.with_name("Course 5 (updated)").to_payload().unwrap();
    page.update(Action::SubmitCourse(payload));
    let surfaced = flatten(settle(&mut page).await);

    let put = transport.requests().pop().unwrap();
    assert_eq!(put.method, Method::PUT);
    assert_eq!(put.url, url("/courses/5"));
    assert_eq!(put.body.unwrap()["name"], "Course 5 (updated)");
    assert!(matches!(&surfaced[0], Action::Notify(toast) if toast.title == TOAST_COURSE_UPDATED));
}

#[tokio::test]
async fn test_edit_load_failure_only_allows_leaving() {
    let transport = ScriptedTransport::new(|_| Ok(Reply::empty(404)));
    let mut page = CourseFormPage::edit(&context(transport), 1, 42);

    let surfaced = settle(&mut page).await;
    assert_eq!(toast_titles(surfaced), vec![(TOAST_LOAD_FAILED.to_string(), Severity::Error)]);
    assert!(!page.is_editing());
    assert!(page.handle_key_events(key(KeyCode::Char('x'))).is_none());
    assert!(matches!(page.handle_key_events(key(KeyCode::Esc)), Action::Back));
}

#[tokio::test]
async fn test_cancel_form_goes_back() {
    let mut page = CourseFormPage::create(&context(catalogue(0)), 1);
    let cancel = page.handle_key_events(key(KeyCode::Esc));
    assert!(matches!(page.update(cancel), Action::Back));
}

// Course and lesson views

#[tokio::test]
async fn test_course_view_loads_and_opens_lessons() {
    let transport = catalogue(3);
    let mut page = CourseViewPage::new(&context(transport.clone()), 1, 3);
    settle(&mut page).await;

    assert_eq!(transport.urls(), vec![url("/courses/3")]);
    assert_eq!(page.course().map(|course| course.lesson_count()), Some(3));

    page.handle_key_events(key(KeyCode::Char('j')));
    let open = page.handle_key_events(key(KeyCode::Enter));
    assert!(matches!(open, Action::OpenLesson { course_id: 3, lesson_id: 302 }));
    assert!(matches!(
        page.update(open),
        Action::Navigate(Route::LessonView { course_id: 3, lesson_id: 302 })
    ));
    assert!(matches!(
        page.handle_key_events(key(KeyCode::Char('e'))),
        Action::Navigate(Route::CourseEdit(3))
    ));

    let text = render_text(&mut page, 100, 30);
    assert!(text.contains("Course 3"));
    assert!(text.contains("Lesson 1"));
    assert!(text.contains("(3 lessons)"));
}

#[tokio::test]
async fn test_course_view_not_found() {
    let transport = ScriptedTransport::new(|_| Ok(Reply::empty(404)));
    let mut page = CourseViewPage::new(&context(transport), 1, 3);
    settle(&mut page).await;

    assert!(page.course().is_none());
    let text = render_text(&mut page, 80, 10);
    assert!(text.contains("Request failed with status code 404"));
}

#[tokio::test]
async fn test_lesson_view_derives_playback() {
    let transport = catalogue(2);
    let mut page = LessonViewPage::new(&context(transport), 1, 2, 201);
    settle(&mut page).await;

    let lesson = page.lesson().unwrap();
    assert_eq!(lesson.name, "Lesson 1");
    let playback = page.playback().unwrap();
    assert_eq!(playback.video_id.as_deref(), Some("abcdefghij1"));
    assert_eq!(
        playback.embed_url.as_deref(),
        Some("https://www.youtube.com/embed/abcdefghij1?autoplay=1")
    );

    // Switching lessons navigates; re-opening the current one does not
    assert!(page.handle_key_events(key(KeyCode::Enter)).is_none());
    page.handle_key_events(key(KeyCode::Down));
    assert!(matches!(
        page.handle_key_events(key(KeyCode::Enter)),
        Action::OpenLesson { course_id: 2, lesson_id: 202 }
    ));

    let text = render_text(&mut page, 100, 20);
    assert!(text.contains("abcdefghij1"));
}

#[tokio::test]
async fn test_unknown_lesson_shows_not_found() {
    let transport = catalogue(2);
    let mut page = LessonViewPage::new(&context(transport), 1, 2, 999);
    settle(&mut page).await;

    assert!(page.lesson().is_none());
    let text = render_text(&mut page, 80, 10);
    assert!(text.contains("Lesson not found"));
}
