//! Shared test support: an in-memory transport that records requests and
//! replays scripted responses.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use atlas_client::clients::{HttpError, HttpRequest, HttpResponseError, ResponseBody, Transport};
use atlas_client::Atlas;
use serde_json::{Map, Value};

pub const BASE_URL: &str = "http://localhost:21000";
pub const API_ROOT: &str = "http://localhost:21000/api/atlas/v2";
pub const GUID: &str = "8bbea92b-d98c-4613-ae6e-1a9d0b4f344b";

/// Replays queued responses in order; an empty queue answers `{}`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<ResponseBody, HttpError>>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a JSON response.
    pub fn respond(&self, body: Value) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ResponseBody::Json(body)));
        self
    }

    /// Queues an Atlas error response.
    pub fn fail(&self, code: u16, error_code: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(HttpError::Response(HttpResponseError {
                code,
                message: format!(r#"{{"errorCode":"{error_code}"}}"#),
                error_code: Some(error_code.to_string()),
            })));
        self
    }

    /// Returns every request sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the number of requests sent so far.
    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Returns the most recent request.
    pub fn last(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(&self, request: HttpRequest) -> Result<ResponseBody, HttpError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ResponseBody::empty()))
    }
}

/// Creates an `Atlas` facade over a fresh scripted transport.
pub fn scripted_atlas() -> (Atlas, Arc<ScriptedTransport>) {
    let transport = ScriptedTransport::new();
    let atlas = Atlas::with_transport(transport.clone(), BASE_URL);
    (atlas, transport)
}

/// Converts a JSON object literal into a field map.
pub fn fields(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}
