//! MediaWiki backend
//!
//! Two calls: full-text search for the best title, then the intro extract
//! of that page. See: https://www.mediawiki.org/wiki/API:Search

use async_trait::async_trait;
use augment_common::{strip_tags, truncate_with_ellipsis};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;

use super::{ensure_success, SourceAdapter};
use crate::classifier::WIKIPEDIA_KEYWORDS;
use crate::config::WikipediaConfig;
use crate::error::SourceError;
use crate::types::SearchResult;

const NAME: &str = "wikipedia";
const MIN_EXTRACT_CHARS: usize = 50;
const MAX_CONTENT_CHARS: usize = 500;

pub struct WikipediaSource {
    client: Client,
    config: WikipediaConfig,
}

impl WikipediaSource {
    pub fn new(client: Client, config: WikipediaConfig) -> Self {
        Self { client, config }
    }

    async fn top_hit(&self, term: &str) -> Result<Option<SearchHit>, SourceError> {
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", term),
                ("srlimit", "1"),
                ("format", "json"),
                ("utf8", "1"),
            ])
            .send()
            .await?;

        let parsed: SearchResponse = ensure_success(NAME, response)?.json().await?;
        Ok(parsed.query.and_then(|q| q.search.into_iter().next()))
    }

    async fn extract(&self, title: &str) -> Result<Option<String>, SourceError> {
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
                ("format", "json"),
            ])
            .send()
            .await?;

        let parsed: ExtractResponse = ensure_success(NAME, response)?.json().await?;
        Ok(parsed
            .query
            .and_then(|q| q.pages.into_values().find_map(|p| p.extract)))
    }
}

// MediaWiki API response types
#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    query: Option<ExtractQuery>,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: BTreeMap<String, ExtractPage>,
}

#[derive(Debug, Deserialize)]
struct ExtractPage {
    extract: Option<String>,
}

/// Drop the "what is" phrasing so the search engine sees only the subject
pub fn search_term(query: &str) -> String {
    let mut term = query.to_lowercase();
    for keyword in WIKIPEDIA_KEYWORDS {
        term = term.replace(keyword, " ");
    }
    let term = term
        .trim_matches(|c: char| c.is_whitespace() || "?？。.!！,，:：".contains(c))
        .to_string();

    if term.is_empty() {
        query.trim().to_string()
    } else {
        term
    }
}

#[async_trait]
impl SourceAdapter for WikipediaSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, query: &str) -> Result<Option<SearchResult>, SourceError> {
        let term = search_term(query);

        let Some(hit) = self.top_hit(&term).await? else {
            tracing::debug!(%term, "No wikipedia search hit");
            return Ok(None);
        };
        tracing::debug!(title = %hit.title, snippet = %strip_tags(&hit.snippet), "Wikipedia hit");

        let extract = match self.extract(&hit.title).await? {
            Some(text) => strip_tags(&text),
            None => return Ok(None),
        };

        if extract.chars().count() <= MIN_EXTRACT_CHARS {
            tracing::debug!(title = %hit.title, "Extract too short");
            return Ok(None);
        }

        let content = truncate_with_ellipsis(&format!("{}：{}", hit.title, extract), MAX_CONTENT_CHARS);
        Ok(Some(SearchResult::new(NAME, content, 0.85)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_term_strips_question_words() {
        assert_eq!(search_term("什么是量子计算？"), "量子计算");
        assert_eq!(search_term("Rust 是什么"), "rust");
        assert_eq!(search_term("wiki"), "wiki");
    }
}
