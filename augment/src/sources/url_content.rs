//! Raw URL fetch
//!
//! Retrieves a literal URL and keeps the body only when the declared
//! content type is textual.

use async_trait::async_trait;
use augment_common::truncate_with_ellipsis;
use reqwest::Client;

use super::{ensure_success, SourceAdapter};
use crate::classifier::parse_url;
use crate::error::SourceError;
use crate::types::SearchResult;

const NAME: &str = "url_content";
const MAX_CONTENT_CHARS: usize = 1500;

/// Content-type fragments accepted as text
const TEXTUAL_TYPES: &[&str] = &["text/", "json", "javascript", "ecmascript", "xml", "x-sh", "x-python"];

pub struct UrlContentSource {
    client: Client,
}

impl UrlContentSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Is this declared content type something worth forwarding as text?
pub fn is_textual(content_type: &str) -> bool {
    let lower = content_type.to_lowercase();
    TEXTUAL_TYPES.iter().any(|t| lower.contains(t))
}

#[async_trait]
impl SourceAdapter for UrlContentSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, query: &str) -> Result<Option<SearchResult>, SourceError> {
        let Some(url) = parse_url(query) else {
            tracing::debug!("Query is not a URL");
            return Ok(None);
        };

        let response = ensure_success(NAME, self.client.get(url.as_str()).send().await?)?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !is_textual(&content_type) {
            tracing::debug!(%url, %content_type, "Skipping non-text content");
            return Ok(None);
        }

        let text = response.text().await?;
        let content = truncate_with_ellipsis(text.trim(), MAX_CONTENT_CHARS);

        Ok(Some(SearchResult::new(NAME, content, 0.9)))
    }
}
