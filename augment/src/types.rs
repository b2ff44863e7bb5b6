//! Common types shared by the classifier, the sources and the orchestrator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The backend category selected for a query
///
/// Exactly one adapter is chosen per invocation; `None` means no lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchServiceType {
    Weather,
    Wikipedia,
    News,
    Search,
    GithubTrending,
    GithubRepo,
    UrlContent,
    None,
}

impl SearchServiceType {
    pub const ALL: [SearchServiceType; 8] = [
        SearchServiceType::Weather,
        SearchServiceType::Wikipedia,
        SearchServiceType::News,
        SearchServiceType::Search,
        SearchServiceType::GithubTrending,
        SearchServiceType::GithubRepo,
        SearchServiceType::UrlContent,
        SearchServiceType::None,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchServiceType::Weather => "weather",
            SearchServiceType::Wikipedia => "wikipedia",
            SearchServiceType::News => "news",
            SearchServiceType::Search => "search",
            SearchServiceType::GithubTrending => "github_trending",
            SearchServiceType::GithubRepo => "github_repo",
            SearchServiceType::UrlContent => "url_content",
            SearchServiceType::None => "none",
        }
    }
}

impl fmt::Display for SearchServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| format!("unknown service type: {}", s))
    }
}

/// A normalized result produced by one source adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Tag of the adapter that produced this result
    pub source: String,
    /// Human-readable text, already bounded in length
    pub content: String,
    /// Informational score in `[0, 1]`; not used for ranking
    pub confidence: f32,
}

impl SearchResult {
    pub fn new(source: impl Into<String>, content: impl Into<String>, confidence: f32) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}
