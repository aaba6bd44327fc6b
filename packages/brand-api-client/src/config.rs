use std::env;
use std::sync::Arc;

use crate::auth::{CookieToken, NoToken, SharedCookies, StaticToken, TokenProvider};
use crate::error::{ApiError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TOKEN_COOKIE_NAME: &str = "token";

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub token_cookie: Option<String>,
    pub token_cookie_name: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            token_cookie: None,
            token_cookie_name: DEFAULT_TOKEN_COOKIE_NAME.to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let config = Self {
            api_url: env::var("BRAND_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            token: env::var("BRAND_API_TOKEN").ok().filter(|t| !t.is_empty()),
            token_cookie: env::var("BRAND_TOKEN_COOKIE").ok(),
            token_cookie_name: env::var("BRAND_TOKEN_COOKIE_NAME")
                .unwrap_or_else(|_| DEFAULT_TOKEN_COOKIE_NAME.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.api_url)
            .map_err(|e| ApiError::Config(format!("BRAND_API_URL is not a valid URL: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "BRAND_API_URL must be http or https, got {}",
                parsed.scheme()
            )));
        }
        Ok(())
    }

    /// Build the token provider this configuration describes.
    ///
    /// An explicit token wins over the cookie string.
    pub fn token_provider(&self) -> Arc<dyn TokenProvider> {
        if let Some(token) = &self.token {
            return Arc::new(StaticToken::new(token.clone()));
        }
        match &self.token_cookie {
            Some(cookies) => Arc::new(CookieToken::new(
                self.token_cookie_name.clone(),
                SharedCookies::new(cookies.clone()),
            )),
            None => Arc::new(NoToken),
        }
    }
}
