// MockApi - scripted BaseApi for tests
//
// Responses are queued per (method, path) and served FIFO. Every call is
// recorded so tests can assert on what went over the wire.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::traits::BaseApi;
use crate::types::{HttpMethod, UploadFile};

/// Arguments captured from a request or upload call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
    /// `(field, file)` for multipart uploads
    pub upload: Option<(String, UploadFile)>,
}

struct Scripted {
    result: Result<Value>,
    delay: Option<Duration>,
}

#[derive(Clone, Default)]
pub struct MockApi {
    responses: Arc<Mutex<HashMap<(HttpMethod, String), VecDeque<Scripted>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, method: HttpMethod, path: &str, body: Value) -> Self {
        self.push(method, path, Ok(body), None);
        self
    }

    pub fn with_delayed_response(
        self,
        method: HttpMethod,
        path: &str,
        body: Value,
        delay: Duration,
    ) -> Self {
        self.push(method, path, Ok(body), Some(delay));
        self
    }

    pub fn with_error(self, method: HttpMethod, path: &str, error: ApiError) -> Self {
        self.push(method, path, Err(error), None);
        self
    }

    /// Queue a response after the mock has been shared.
    pub fn push_response(&self, method: HttpMethod, path: &str, body: Value) {
        self.push(method, path, Ok(body), None);
    }

    pub fn push_error(&self, method: HttpMethod, path: &str, error: ApiError) {
        self.push(method, path, Err(error), None);
    }

    fn push(&self, method: HttpMethod, path: &str, result: Result<Value>, delay: Option<Duration>) {
        self.responses
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Scripted { result, delay });
    }

    /// All calls in the order they were made
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that hit one method and path
    pub fn calls_to(&self, method: HttpMethod, path: &str) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .cloned()
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn serve(&self, call: RecordedCall) -> Result<Value> {
        let key = (call.method, call.path.clone());
        self.calls.lock().unwrap().push(call);

        let next = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);

        match next {
            Some(scripted) => {
                if let Some(delay) = scripted.delay {
                    tokio::time::sleep(delay).await;
                }
                scripted.result
            }
            None => Err(ApiError::Api {
                status: 404,
                message: format!("No mock response for {} {}", key.0, key.1),
            }),
        }
    }
}

#[async_trait]
impl BaseApi for MockApi {
    async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> Result<Value> {
        self.serve(RecordedCall {
            method,
            path: path.to_string(),
            body,
            upload: None,
        })
        .await
    }

    async fn upload(&self, path: &str, field: &str, file: UploadFile) -> Result<Value> {
        self.serve(RecordedCall {
            method: HttpMethod::Post,
            path: path.to_string(),
            body: None,
            upload: Some((field.to_string(), file)),
        })
        .await
    }
}
