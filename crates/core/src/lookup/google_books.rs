//! Google Books volumes search, the default fetch collaborator.

use std::time::Duration;

use crate::config::LookupConfig;
use crate::lookup::{BookFetcher, Query};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";

pub struct GoogleBooksFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
    max_results: u32,
    print_type: String,
}

impl GoogleBooksFetcher {
    pub fn new() -> Self {
        Self::from_config(&LookupConfig::default())
    }

    pub fn from_config(cfg: &LookupConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default HTTP client");
                reqwest::blocking::Client::new()
            });
        Self {
            client,
            base_url: cfg.base_url.clone(),
            max_results: cfg.max_results,
            print_type: cfg.print_type.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, query: &Query) -> reqwest::Result<String> {
        let max_results = self.max_results.to_string();
        self.client
            .get(&self.base_url)
            .query(&[
                ("q", query.as_str()),
                ("maxResults", max_results.as_str()),
                ("printType", self.print_type.as_str()),
            ])
            .send()?
            .error_for_status()?
            .text()
    }
}

impl Default for GoogleBooksFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl BookFetcher for GoogleBooksFetcher {
    fn fetch(&self, query: &Query) -> Option<String> {
        tracing::debug!(query = %query, url = %self.base_url, "requesting volumes");
        match self.request(query) {
            Ok(body) => {
                tracing::debug!(bytes = body.len(), "volumes response received");
                Some(body)
            }
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "volumes request failed");
                None
            }
        }
    }
}
