//! REST client for the brandsite content API.
//!
//! One configured request sender shared by every resource store. It attaches
//! `Authorization: Bearer <token>` when its [`TokenProvider`] has a token and
//! turns non-2xx responses into [`ApiError::Api`] carrying the server's
//! message. There is no retry and no timeout policy: every failure goes
//! straight back to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use brand_api_client::{ApiClient, BaseApi, HttpMethod, StaticToken};
//!
//! let client = ApiClient::new("https://api.example.com")
//!     .with_token_provider(StaticToken::new("secret"));
//!
//! let projects = client.request(HttpMethod::Get, "/projects", None).await?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
#[cfg(feature = "testing")]
pub mod testing;
pub mod traits;
pub mod types;

pub use auth::{CookieToken, NoToken, SharedCookies, SharedToken, StaticToken, TokenProvider};
pub use config::ApiConfig;
pub use error::{ApiError, Result, GENERIC_FAILURE};
pub use traits::BaseApi;
pub use types::{decode_data, Envelope, HttpMethod, UploadFile, UploadedImage};

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, multipart, Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};

/// reqwest-backed content API client.
#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Create an anonymous client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens: Arc::new(NoToken),
        }
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &ApiConfig) -> Self {
        let mut client = Self::new(config.api_url.clone());
        client.tokens = config.token_provider();
        client
    }

    pub fn with_token_provider(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.tokens = Arc::new(provider);
        self
    }

    pub fn with_shared_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.tokens = provider;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.token() {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn read_body(method: &str, path: &str, response: Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(method, path, status = status.as_u16(), "Content API request failed");
            let message = types::server_message(&text).unwrap_or_else(|| {
                format!("Request failed with status {}", status.as_u16())
            });
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Parse(format!("Invalid JSON from {} {}: {}", method, path, e)))
    }
}

#[async_trait]
impl BaseApi for ApiClient {
    async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> Result<Value> {
        debug!(method = %method, path, "Sending content API request");

        let mut builder = self
            .http_client
            .request(method.into(), self.url(path))
            .header(header::ACCEPT, "application/json");
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = self.authorize(builder).send().await?;
        Self::read_body(method.as_str(), path, response).await
    }

    async fn upload(&self, path: &str, field: &str, file: UploadFile) -> Result<Value> {
        debug!(
            path,
            field,
            file_name = %file.file_name,
            size = file.len(),
            "Uploading file"
        );

        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| ApiError::Config(format!("Invalid content type: {}", e)))?;
        let form = multipart::Form::new().part(field.to_string(), part);

        let builder = self.http_client.post(self.url(path)).multipart(form);
        let response = self.authorize(builder).send().await?;
        Self::read_body("POST", path, response).await
    }
}
