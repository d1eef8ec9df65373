mod common;

use common::{course_json, page_json, Reply, ScriptedTransport};
use coursedeck::backend::{
    CourseApi, EmptyPayload, RequestError, RequestLifecycle, RequestOptions, RequestOverride, RequestStatus,
    ReqwestTransport,
};
use coursedeck::constants::DEFAULT_ERROR_MESSAGE;
use coursedeck::entities::{Course, Listing, Page};
use httpmock::prelude::*;
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn api_for(server: &MockServer) -> CourseApi {
    CourseApi::new(Arc::new(ReqwestTransport::default()), &server.url("/api"))
}

#[tokio::test]
async fn test_get_success_populates_data() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/courses/7");
            then.status(200).json_body(course_json(7, "Rust", 3));
        })
        .await;

    let api = api_for(&server);
    let lifecycle: RequestLifecycle<Course> = api.lifecycle(RequestOptions::get(api.endpoints.course(7)).manual());
    assert_eq!(lifecycle.status(), RequestStatus::Idle);

    let course = lifecycle.trigger(None).await.unwrap();

    assert_eq!(course.name, "Rust");
    assert_eq!(course.lesson_count(), 3);
    let state = lifecycle.snapshot();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.data, Some(course));
    assert_eq!(lifecycle.status(), RequestStatus::Success);
}

#[tokio::test]
async fn test_paginated_list_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/courses/paginated")
                .query_param("page", "2")
                .query_param("per_page", "5");
            then.status(200).json_body(page_json(2, 5, 12));
        })
        .await;

    let api = api_for(&server);
    let lifecycle: RequestLifecycle<Listing<Course>> =
        api.lifecycle(RequestOptions::get(api.endpoints.paginated(2, 5)).manual());

    let page: Page<Course> = lifecycle.trigger(None).await.unwrap().into_page();

    mock.assert_async().await;
    assert_eq!(page.page_index, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_count, 12);
    assert!(page.can_previous_page);
    assert!(page.can_next_page);
    assert_eq!(page.data.len(), 5);
    assert_eq!(page.data[0].name, "Course 6");
}

#[tokio::test]
async fn test_unpaginated_list_is_a_single_page() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/courses");
            then.status(200)
                .json_body(json!([course_json(1, "Go", 1), course_json(2, "Rust", 2)]));
        })
        .await;

    let api = api_for(&server);
    let lifecycle: RequestLifecycle<Listing<Course>> = api.lifecycle(RequestOptions::get(api.endpoints.courses()));

    let page = lifecycle.trigger(None).await.unwrap().into_page();
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.data.len(), 2);
    assert!(!page.can_next_page);
}

#[tokio::test]
async fn test_delete_with_no_content_succeeds() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/courses/3");
            then.status(204);
        })
        .await;

    let api = api_for(&server);
    let lifecycle: RequestLifecycle<EmptyPayload> =
        api.lifecycle(RequestOptions::new(Method::DELETE, api.endpoints.courses()).manual());

    let payload = lifecycle
        .trigger(Some(RequestOverride::url(api.endpoints.course(3))))
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(payload.is_null());
    assert_eq!(lifecycle.status(), RequestStatus::Success);
}

#[tokio::test]
async fn test_override_body_is_sent() {
    let server = MockServer::start_async().await;
    let body = json!({ "name": "Rust", "category": "BACKEND", "status": "ACTIVE", "lessons": [] });
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/courses").json_body(body.clone());
            then.status(201).json_body(json!({ "id": 11 }));
        })
        .await;

    let api = api_for(&server);
    let lifecycle: RequestLifecycle<EmptyPayload> =
        api.lifecycle(RequestOptions::new(Method::POST, api.endpoints.courses()).manual());

    let payload = lifecycle.trigger(Some(RequestOverride::body(body))).await.unwrap();

    mock.assert_async().await;
    assert_eq!(payload["id"], 11);
}

#[tokio::test]
async fn test_server_message_takes_precedence() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/courses/4");
            then.status(422).json_body(json!({ "message": "Name already taken" }));
        })
        .await;

    let api = api_for(&server);
    let lifecycle: RequestLifecycle<EmptyPayload> =
        api.lifecycle(RequestOptions::new(Method::PUT, api.endpoints.course(4)).manual());

    let err = lifecycle.trigger(Some(RequestOverride::body(json!({})))).await.unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(lifecycle.error().as_deref(), Some("Name already taken"));
    assert!(!lifecycle.loading());
    assert_eq!(lifecycle.status(), RequestStatus::Error);
}

#[tokio::test]
async fn test_status_message_without_server_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/courses/99");
            then.status(404).body("Not Found");
        })
        .await;

    let api = api_for(&server);
    let lifecycle: RequestLifecycle<Course> = api.lifecycle(RequestOptions::get(api.endpoints.course(99)));

    assert!(lifecycle.trigger(None).await.is_err());
    assert_eq!(lifecycle.error().as_deref(), Some("Request failed with status code 404"));
    assert!(lifecycle.data().is_none());
}

#[tokio::test]
async fn test_transport_failure_sets_error() {
    let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
    let api = CourseApi::new(Arc::new(transport), "http://127.0.0.1:1/api");
    let lifecycle: RequestLifecycle<Course> = api.lifecycle(RequestOptions::get(api.endpoints.course(1)));

    let err = lifecycle.trigger(None).await.unwrap_err();

    assert!(matches!(err, RequestError::Transport { .. }));
    let message = lifecycle.error().unwrap();
    assert!(!message.trim().is_empty());
    assert_ne!(message, DEFAULT_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_undecodable_body_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/courses/5");
            then.status(200).body("<html>oops</html>");
        })
        .await;

    let api = api_for(&server);
    let lifecycle: RequestLifecycle<Course> = api.lifecycle(RequestOptions::get(api.endpoints.course(5)));

    let err = lifecycle.trigger(None).await.unwrap_err();
    assert!(matches!(err, RequestError::Decode(_)));
    assert!(lifecycle.error().unwrap().starts_with("Invalid response body"));
}

#[tokio::test]
async fn test_prior_data_survives_a_failed_call() {
    let transport = ScriptedTransport::new(|request| {
        if request.url.ends_with("/courses/1") {
            Ok(Reply::json(200, course_json(1, "Rust", 2)))
        } else {
            Ok(Reply::json(500, json!({ "error": "database unavailable" })))
        }
    });
    let api = CourseApi::new(transport, common::BASE_URL);
    let lifecycle: RequestLifecycle<Course> = api.lifecycle(RequestOptions::get(api.endpoints.course(1)));

    lifecycle.trigger(None).await.unwrap();
    lifecycle
        .trigger(Some(RequestOverride::url(api.endpoints.course(2))))
        .await
        .unwrap_err();

    let state = lifecycle.snapshot();
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("database unavailable"));
    assert_eq!(state.data.map(|course| course.name), Some("Rust".to_string()));
    assert_eq!(lifecycle.status(), RequestStatus::Error);
}

#[tokio::test]
async fn test_trigger_sets_loading_before_the_call_resolves() {
    let transport = ScriptedTransport::new(|_| Ok(Reply::json(200, course_json(1, "Rust", 1))));
    let api = CourseApi::new(transport.clone(), common::BASE_URL);
    let lifecycle: RequestLifecycle<Course> = api.lifecycle(RequestOptions::get(api.endpoints.course(1)));

    let future = lifecycle.trigger(None);
    assert!(lifecycle.loading());
    assert!(lifecycle.error().is_none());
    assert_eq!(lifecycle.status(), RequestStatus::Loading);
    // Nothing is sent until the future runs
    assert!(transport.requests().is_empty());

    future.await.unwrap();
    assert!(!lifecycle.loading());
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_error_is_cleared_on_next_trigger() {
    let transport = ScriptedTransport::new(|request| {
        if request.url.ends_with("/courses/2") {
            Ok(Reply::empty(500))
        } else {
            Ok(Reply::json(200, course_json(1, "Rust", 1)))
        }
    });
    let api = CourseApi::new(transport, common::BASE_URL);
    let lifecycle: RequestLifecycle<Course> = api.lifecycle(RequestOptions::get(api.endpoints.course(2)));

    lifecycle.trigger(None).await.unwrap_err();
    assert!(lifecycle.error().is_some());

    let future = lifecycle.trigger(Some(RequestOverride::url(api.endpoints.course(1))));
    assert!(lifecycle.error().is_none());
    future.await.unwrap();
    assert_eq!(lifecycle.status(), RequestStatus::Success);
}

#[tokio::test]
async fn test_effect_fires_only_when_dependencies_change() {
    let transport = ScriptedTransport::new(|_| Ok(Reply::json(200, json!([]))));
    let api = CourseApi::new(transport.clone(), common::BASE_URL);
    let mut lifecycle: RequestLifecycle<Listing<Course>> =
        api.lifecycle(RequestOptions::get(api.endpoints.courses()).depends_on(vec!["1".into(), "10".into()]));

    lifecycle.mount().unwrap().await.unwrap();
    assert!(lifecycle.run_effect(vec!["1".into(), "10".into()]).is_none());

    lifecycle.set_url(api.endpoints.paginated(2, 10));
    lifecycle.run_effect(vec!["2".into(), "10".into()]).unwrap().await.unwrap();
    assert!(lifecycle.run_effect(vec!["2".into(), "10".into()]).is_none());

    assert_eq!(
        transport.urls(),
        vec![common::url("/courses"), common::url("/courses/paginated?page=2&per_page=10")]
    );
}

#[tokio::test]
async fn test_reset_effect_makes_repeated_dependencies_fire_again() {
    let transport = ScriptedTransport::new(|_| Ok(Reply::json(200, json!([]))));
    let api = CourseApi::new(transport.clone(), common::BASE_URL);
    let mut lifecycle: RequestLifecycle<Listing<Course>> =
        api.lifecycle(RequestOptions::get(api.endpoints.courses()).depends_on(vec!["1".into()]));

    lifecycle.mount().unwrap().await.unwrap();
    lifecycle.run_effect(vec!["2".into()]).unwrap().await.unwrap();

    // Back to showing page 1: asking for page 2 again must fire
    lifecycle.reset_effect(Some(vec!["1".into()]));
    assert!(lifecycle.run_effect(vec!["1".into()]).is_none());
    lifecycle.run_effect(vec!["2".into()]).unwrap().await.unwrap();

    lifecycle.reset_effect(None);
    lifecycle.run_effect(vec!["2".into()]).unwrap().await.unwrap();
    assert_eq!(transport.requests().len(), 4);
}

#[tokio::test]
async fn test_manual_lifecycle_never_fires_on_its_own() {
    let transport = ScriptedTransport::new(|_| Ok(Reply::empty(204)));
    let api = CourseApi::new(transport.clone(), common::BASE_URL);
    let mut lifecycle: RequestLifecycle<EmptyPayload> =
        api.lifecycle(RequestOptions::new(Method::DELETE, api.endpoints.course(1)).manual());

    assert!(lifecycle.mount().is_none());
    assert!(lifecycle.run_effect(vec!["anything".into()]).is_none());
    assert_eq!(lifecycle.status(), RequestStatus::Idle);
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_lifecycles_do_not_share_state() {
    let transport = ScriptedTransport::new(|_| Ok(Reply::json(200, course_json(1, "Rust", 1))));
    let api = CourseApi::new(transport, common::BASE_URL);
    let first: RequestLifecycle<Course> = api.lifecycle(RequestOptions::get(api.endpoints.course(1)));
    let second: RequestLifecycle<Course> = api.lifecycle(RequestOptions::get(api.endpoints.course(1)));

    first.trigger(None).await.unwrap();

    assert!(first.data().is_some());
    assert!(second.data().is_none());
    assert_eq!(second.status(), RequestStatus::Idle);
}

#[tokio::test]
async fn test_clone_shares_state_with_original() {
    let transport = ScriptedTransport::new(|_| Ok(Reply::json(200, course_json(1, "Rust", 1))));
    let api = CourseApi::new(transport, common::BASE_URL);
    let lifecycle: RequestLifecycle<Course> = api.lifecycle(RequestOptions::get(api.endpoints.course(1)));
    let handle = lifecycle.clone();

    tokio::spawn(async move { handle.trigger(None).await })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(lifecycle.data().map(|course| course.name), Some("Rust".to_string()));
    assert_eq!(lifecycle.status(), RequestStatus::Success);
}

#[tokio::test]
async fn test_overlapping_triggers_last_resolved_wins() {
    let transport = ScriptedTransport::new(|request| {
        if request.url.ends_with("/courses/1") {
            Ok(Reply::json(200, course_json(1, "Slow", 1)).after(Duration::from_millis(150)))
        } else {
            Ok(Reply::json(200, course_json(2, "Fast", 1)))
        }
    });
    let api = CourseApi::new(transport.clone(), common::BASE_URL);
    let lifecycle: RequestLifecycle<Course> = api.lifecycle(RequestOptions::get(api.endpoints.course(1)));

    let slow = tokio::spawn(lifecycle.trigger(None));
    tokio::time::sleep(Duration::from_millis(20)).await;
    let fast = lifecycle.trigger(Some(RequestOverride::url(api.endpoints.course(2))));

    fast.await.unwrap();
    assert_eq!(lifecycle.data().map(|course| course.name), Some("Fast".to_string()));

    slow.await.unwrap().unwrap();
    assert_eq!(lifecycle.data().map(|course| course.name), Some("Slow".to_string()));
    assert_eq!(transport.requests().len(), 2);
    assert!(!lifecycle.loading());
}
