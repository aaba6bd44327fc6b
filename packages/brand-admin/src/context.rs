//! Shared state and terminal helpers for all commands

use std::sync::Arc;

use anyhow::Result;
use brand_api_client::{ApiClient, ApiConfig, BaseApi};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

pub struct AppContext {
    pub api: Arc<dyn BaseApi>,
    pub base_url: String,
    pub assume_yes: bool,
}

impl AppContext {
    pub fn new(config: &ApiConfig, assume_yes: bool) -> Self {
        let client = ApiClient::from_config(config);
        Self {
            base_url: client.base_url().to_string(),
            api: Arc::new(client),
            assume_yes,
        }
    }

    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    pub fn print_header(&self, msg: &str) {
        println!();
        println!("{}", style(msg).bold());
    }

    pub fn print_success(&self, msg: &str) {
        println!("{}", style(msg).green());
    }

    pub fn print_warning(&self, msg: &str) {
        println!("{}", style(msg).yellow());
    }

    pub fn print_info(&self, msg: &str) {
        println!("{}", style(msg).cyan());
    }
}
