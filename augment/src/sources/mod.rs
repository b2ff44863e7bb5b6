//! Source adapter implementations
//!
//! One adapter per external information source. Each takes the raw query
//! and yields at most one normalized [`SearchResult`].

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::error::SourceError;
use crate::types::{SearchResult, SearchServiceType};

pub mod github;
pub mod news;
pub mod url_content;
pub mod weather;
pub mod web_search;
pub mod wikipedia;

pub use github::{GithubReadmeSource, GithubTrendingSource};
pub use news::NewsSource;
pub use url_content::UrlContentSource;
pub use weather::WeatherSource;
pub use web_search::WebSearchSource;
pub use wikipedia::WikipediaSource;

/// Trait for information sources
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Tag written into [`SearchResult::source`]
    fn name(&self) -> &'static str;

    /// Check if this source has the credentials it needs
    fn is_available(&self) -> bool {
        true
    }

    /// Look the query up; `Ok(None)` means the source had nothing usable
    async fn fetch(&self, query: &str) -> Result<Option<SearchResult>, SourceError>;
}

/// Run an adapter, logging and swallowing every failure
///
/// Unavailable adapters, errors and blank content all become `None`.
pub async fn fetch_or_none(adapter: &dyn SourceAdapter, query: &str) -> Option<SearchResult> {
    if !adapter.is_available() {
        tracing::warn!(source = adapter.name(), "Source not configured, skipping");
        return None;
    }

    match adapter.fetch(query).await {
        Ok(Some(result)) if !result.content.trim().is_empty() => {
            tracing::info!(
                source = adapter.name(),
                chars = result.content.chars().count(),
                "Source returned a result"
            );
            Some(result)
        }
        Ok(_) => {
            tracing::info!(source = adapter.name(), "Source returned no result");
            None
        }
        Err(e) => {
            tracing::warn!(source = adapter.name(), error = %e, "Source failed");
            None
        }
    }
}

/// The full set of adapters the orchestrator dispatches to
#[derive(Clone)]
pub struct Sources {
    pub weather: Arc<dyn SourceAdapter>,
    pub wikipedia: Arc<dyn SourceAdapter>,
    pub news: Arc<dyn SourceAdapter>,
    pub github_trending: Arc<dyn SourceAdapter>,
    pub github_readme: Arc<dyn SourceAdapter>,
    pub url_content: Arc<dyn SourceAdapter>,
    pub web_search: Arc<dyn SourceAdapter>,
}

impl Sources {
    /// Build every adapter over one shared HTTP client
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let client = crate::http::source_client(&config.http)?;

        Ok(Self {
            weather: Arc::new(WeatherSource::new(client.clone(), config.weather.clone())),
            wikipedia: Arc::new(WikipediaSource::new(client.clone(), config.wikipedia.clone())),
            news: Arc::new(NewsSource::new(client.clone(), config.news.clone())),
            github_trending: Arc::new(GithubTrendingSource::new(
                client.clone(),
                config.github.clone(),
            )),
            github_readme: Arc::new(GithubReadmeSource::new(client.clone(), config.github.clone())),
            url_content: Arc::new(UrlContentSource::new(client.clone())),
            web_search: Arc::new(WebSearchSource::new(client, config.web_search.clone())),
        })
    }

    /// The adapter dedicated to a service type
    ///
    /// This is the only place that maps a service to a backend. `Search` and
    /// `None` have no dedicated adapter: search goes straight to the
    /// web-search fallback.
    pub fn for_service(&self, service: SearchServiceType) -> Option<&Arc<dyn SourceAdapter>> {
        match service {
            SearchServiceType::Weather => Some(&self.weather),
            SearchServiceType::Wikipedia => Some(&self.wikipedia),
            SearchServiceType::News => Some(&self.news),
            SearchServiceType::GithubTrending => Some(&self.github_trending),
            SearchServiceType::GithubRepo => Some(&self.github_readme),
            SearchServiceType::UrlContent => Some(&self.url_content),
            SearchServiceType::Search | SearchServiceType::None => None,
        }
    }

    /// Adapter looked up by service name, for the CLI
    pub fn by_name(&self, name: &str) -> Option<&Arc<dyn SourceAdapter>> {
        let service: SearchServiceType = name.parse().ok()?;
        match service {
            SearchServiceType::Search => Some(&self.web_search),
            other => self.for_service(other),
        }
    }
}

/// Map a non-2xx response to [`SourceError::Status`]
pub(crate) fn ensure_success(
    source_name: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, SourceError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(SourceError::Status {
            source_name,
            status: response.status().as_u16(),
        })
    }
}
