//! HTTP plumbing for talking to the course backend.
//!
//! This module defines the transport seam ([`HttpTransport`]), the error type
//! every failed call is reduced to ([`RequestError`]), the endpoint builders
//! for the REST API, and the [`RequestLifecycle`] state machine that pages use
//! to drive one logical request each.

use serde_json::Value;
use std::sync::Arc;

pub mod endpoints;
pub mod lifecycle;
pub mod transport;

pub use endpoints::CourseEndpoints;
pub use lifecycle::{
    RequestFuture, RequestLifecycle, RequestOptions, RequestOverride, RequestState, RequestStatus,
};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

use crate::constants::DEFAULT_ERROR_MESSAGE;

/// Payload type for calls whose response body carries nothing of interest
/// (e.g. `DELETE` answered with 204). An empty body decodes to `Value::Null`.
pub type EmptyPayload = Value;

/// Failure of a single request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// No response was received.
    #[error("{message}")]
    Transport { message: String },

    /// The server answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Server { status: u16, message: Option<String> },

    /// A 2xx response whose body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl RequestError {
    /// Build a server error from a non-2xx response, picking up the
    /// message the server put in the body, if any.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        Self::Server {
            status,
            message: server_message(body),
        }
    }

    /// Human readable description.
    ///
    /// Prefers the server-provided message, then the transport level
    /// message, then a generic default. Never empty.
    pub fn user_message(&self) -> String {
        if let Self::Server { message: Some(message), .. } = self {
            if !message.trim().is_empty() {
                return message.clone();
            }
        }

        let transport_message = self.to_string();
        if transport_message.trim().is_empty() {
            DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            transport_message
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extract `message` (or, failing that, `error`) from a JSON error body.
fn server_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}

/// Everything a page needs to build its request lifecycles.
#[derive(Clone)]
pub struct CourseApi {
    pub transport: Arc<dyn HttpTransport>,
    pub endpoints: CourseEndpoints,
}

impl CourseApi {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: &str) -> Self {
        Self {
            transport,
            endpoints: CourseEndpoints::new(base_url),
        }
    }

    /// Create a fresh lifecycle with its own independent state.
    pub fn lifecycle<T>(&self, options: RequestOptions) -> RequestLifecycle<T>
    where
        T: serde::de::DeserializeOwned + Clone + Send + 'static,
    {
        RequestLifecycle::new(self.transport.clone(), options)
    }
}
