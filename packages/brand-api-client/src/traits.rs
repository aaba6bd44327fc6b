// Infrastructure trait for the content API.
//
// Stores and controllers depend on this, never on reqwest directly, so they
// can run against `testing::MockApi`.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{HttpMethod, UploadFile};

#[async_trait]
pub trait BaseApi: Send + Sync {
    /// Send a JSON request and return the parsed response body.
    ///
    /// An empty 2xx body comes back as `Value::Null`.
    async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> Result<Value>;

    /// Send one file as a multipart form part named `field`.
    async fn upload(&self, path: &str, field: &str, file: UploadFile) -> Result<Value>;
}
