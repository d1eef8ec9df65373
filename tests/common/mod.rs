#![allow(dead_code)]

use async_trait::async_trait;
use coursedeck::backend::{CourseApi, HttpRequest, HttpResponse, HttpTransport, RequestError};
use coursedeck::config::Config;
use coursedeck::logger::Logger;
use coursedeck::ui::core::{Action, AppContext, Component};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE_URL: &str = "http://courses.test/api";

/// Canned answer for one request.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
    pub delay: Duration,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
            delay: Duration::ZERO,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Responder = dyn Fn(&HttpRequest) -> Result<Reply, RequestError> + Send + Sync;

/// In-process transport answering from a closure and recording every call.
pub struct ScriptedTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&HttpRequest) -> Result<Reply, RequestError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|request| request.url).collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = (self.responder)(&request)?;
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        Ok(HttpResponse {
            status: reply.status,
            body: reply.body,
        })
    }
}

pub fn context(transport: Arc<ScriptedTransport>) -> AppContext {
    context_with(transport, Config::default())
}

pub fn context_with(transport: Arc<ScriptedTransport>, config: Config) -> AppContext {
    AppContext::new(CourseApi::new(transport, BASE_URL), config, Logger::new())
}

pub fn url(path: &str) -> String {
    format!("{BASE_URL}{path}")
}

pub fn course_json(id: i64, name: &str, lessons: usize) -> Value {
    let lessons: Vec<Value> = (1..=lessons as i64)
        .map(|n| {
            json!({
                "id": id * 100 + n,
                "name": format!("Lesson {n}"),
                "youtube_url": format!("https://www.youtube.com/watch?v=abcdefghij{n}"),
                "course_id": id,
            })
        })
        .collect();
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "category": "BACKEND",
        "status": "ACTIVE",
        "lessons": lessons,
        "created_at": "2025-01-15T14:30:00Z",
        "updated_at": "2025-01-16T09:00:00Z",
    })
}

/// Paginated envelope over `total` generated courses.
pub fn page_json(page: u32, per_page: u32, total: u32) -> Value {
    let total_pages = total.div_ceil(per_page);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total);
    let data: Vec<Value> = (start..end)
        .map(|i| course_json(i64::from(i) + 1, &format!("Course {}", i + 1), 2))
        .collect();
    json!({
        "pageIndex": page,
        "pageSize": per_page,
        "totalCount": total,
        "totalPages": total_pages,
        "canPreviousPage": page > 1,
        "canNextPage": page < total_pages,
        "data": data,
    })
}

/// Parse `page` and `per_page` from a paginated list URL.
pub fn page_params(url: &str) -> Option<(u32, u32)> {
    let parsed = url::Url::parse(url).ok()?;
    let mut page = None;
    let mut per_page = None;
    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            "page" => page = value.parse().ok(),
            "per_page" => per_page = value.parse().ok(),
            _ => {}
        }
    }
    page.zip(per_page)
}

/// Run every queued job of `component` to completion, feeding results back,
/// and return whatever the component handed upwards.
pub async fn settle(component: &mut dyn Component) -> Vec<Action> {
    let mut surfaced = Vec::new();
    loop {
        let jobs = component.take_jobs();
        if jobs.is_empty() {
            return surfaced;
        }
        for job in jobs {
            let result = job.future.await;
            let follow_up = component.update(result);
            if !follow_up.is_none() {
                surfaced.push(follow_up);
            }
        }
    }
}

pub fn flatten(actions: Vec<Action>) -> Vec<Action> {
    actions
        .into_iter()
        .flat_map(|action| match action {
            Action::Batch(inner) => flatten(inner),
            other => vec![other],
        })
        .collect()
}
