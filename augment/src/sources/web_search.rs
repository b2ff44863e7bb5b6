//! Serper web search backend
//!
//! The universal fallback: any query the dedicated sources could not
//! answer ends up here. See: https://serper.dev

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ensure_success, SourceAdapter};
use crate::config::WebSearchConfig;
use crate::error::SourceError;
use crate::types::SearchResult;

const NAME: &str = "web_search";
const TOP_RESULTS: usize = 2;

pub struct WebSearchSource {
    client: Client,
    config: WebSearchConfig,
}

impl WebSearchSource {
    pub fn new(client: Client, config: WebSearchConfig) -> Self {
        Self { client, config }
    }
}

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    gl: &'a str,
    hl: &'a str,
}

// Serper API response types
#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: String,
    #[serde(default)]
    snippet: String,
    link: String,
}

#[async_trait]
impl SourceAdapter for WebSearchSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_available(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    async fn fetch(&self, query: &str) -> Result<Option<SearchResult>, SourceError> {
        let response = self
            .client
            .post(&self.config.url)
            .header("X-API-KEY", &self.config.api_key)
            .json(&SerperRequest {
                q: query,
                gl: &self.config.gl,
                hl: &self.config.hl,
            })
            .send()
            .await?;

        let serper: SerperResponse = ensure_success(NAME, response)?.json().await?;
        if serper.organic.is_empty() {
            return Ok(None);
        }

        let content = serper
            .organic
            .iter()
            .take(TOP_RESULTS)
            .map(|r| format!("{}\n{}\n{}", r.title, r.snippet, r.link))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(Some(SearchResult::new(NAME, content, 0.7)))
    }
}
