//! NewsAPI backend
//!
//! See: https://newsapi.org/docs/endpoints/everything

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ensure_success, SourceAdapter};
use crate::config::NewsConfig;
use crate::error::SourceError;
use crate::types::SearchResult;

const NAME: &str = "news";
const TOP_ARTICLES: usize = 2;

pub struct NewsSource {
    client: Client,
    config: NewsConfig,
}

impl NewsSource {
    pub fn new(client: Client, config: NewsConfig) -> Self {
        Self { client, config }
    }
}

// NewsAPI response types
#[derive(Debug, Deserialize)]
struct NewsResponse {
    status: String,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

#[async_trait]
impl SourceAdapter for NewsSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_available(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    async fn fetch(&self, query: &str) -> Result<Option<SearchResult>, SourceError> {
        let url = format!("{}/everything", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.config.api_key)
            .query(&[
                ("q", query),
                ("language", self.config.language.as_str()),
                ("sortBy", "publishedAt"),
                ("pageSize", "5"),
            ])
            .send()
            .await?;

        let news: NewsResponse = ensure_success(NAME, response)?.json().await?;
        if news.status != "ok" {
            return Err(SourceError::shape(NAME, format!("status {}", news.status)));
        }
        if news.articles.is_empty() {
            return Ok(None);
        }

        let content = news
            .articles
            .iter()
            .take(TOP_ARTICLES)
            .map(|a| {
                format!(
                    "{}\n{}\n{}",
                    a.title.as_deref().unwrap_or_default(),
                    a.description.as_deref().unwrap_or_default(),
                    a.url.as_deref().unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(Some(SearchResult::new(NAME, content, 0.8)))
    }
}
