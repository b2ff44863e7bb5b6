//! GitHub backends: trending repositories and repository READMEs

use async_trait::async_trait;
use augment_common::truncate_with_ellipsis;
use chrono::{Duration, NaiveDate, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use super::{ensure_success, SourceAdapter};
use crate::classifier::parse_github_repo;
use crate::config::GithubConfig;
use crate::error::SourceError;
use crate::types::SearchResult;

const TRENDING_NAME: &str = "github_trending";
const README_NAME: &str = "github_repo";
const TRENDING_COUNT: usize = 3;
const MAX_README_CHARS: usize = 1000;

/// Conventional README names, tried in order
pub const README_CANDIDATES: &[&str] = &[
    "README.md",
    "readme.md",
    "README.MD",
    "README.rst",
    "README.txt",
    "README",
];

fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token.filter(|t| !t.is_empty()) {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

// ============================================================================
// Trending
// ============================================================================

/// Repositories created in the last day, most starred first
pub struct GithubTrendingSource {
    client: Client,
    config: GithubConfig,
}

impl GithubTrendingSource {
    pub fn new(client: Client, config: GithubConfig) -> Self {
        Self { client, config }
    }
}

#[derive(Debug, Deserialize)]
struct RepoSearchResponse {
    #[serde(default)]
    items: Vec<RepoItem>,
}

#[derive(Debug, Deserialize)]
struct RepoItem {
    full_name: String,
    html_url: String,
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    language: Option<String>,
}

/// The `created:>` qualifier for a window ending at `today`
fn created_since(today: NaiveDate) -> String {
    format!("created:>{}", (today - Duration::days(1)).format("%Y-%m-%d"))
}

fn format_repo(rank: usize, repo: &RepoItem) -> String {
    let language = repo
        .language
        .as_deref()
        .map(|l| format!(" [{}]", l))
        .unwrap_or_default();
    format!(
        "{}. {}{} ⭐{}\n{}\n{}",
        rank,
        repo.full_name,
        language,
        repo.stargazers_count,
        repo.description.as_deref().unwrap_or("暂无描述"),
        repo.html_url
    )
}

#[async_trait]
impl SourceAdapter for GithubTrendingSource {
    fn name(&self) -> &'static str {
        TRENDING_NAME
    }

    async fn fetch(&self, _query: &str) -> Result<Option<SearchResult>, SourceError> {
        let url = format!(
            "{}/search/repositories",
            self.config.api_url.trim_end_matches('/')
        );
        let per_page = TRENDING_COUNT.to_string();
        let request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .query(&[
                ("q", created_since(Utc::now().date_naive()).as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
            ]);

        let response = with_token(request, self.config.token.as_deref()).send().await?;
        let search: RepoSearchResponse = ensure_success(TRENDING_NAME, response)?.json().await?;

        if search.items.is_empty() {
            return Ok(None);
        }

        let content = search
            .items
            .iter()
            .take(TRENDING_COUNT)
            .enumerate()
            .map(|(i, repo)| format_repo(i + 1, repo))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(Some(SearchResult::new(TRENDING_NAME, content, 0.9)))
    }
}

// ============================================================================
// README
// ============================================================================

/// README of `https://github.com/{owner}/{repo}` from the raw-content host
pub struct GithubReadmeSource {
    client: Client,
    config: GithubConfig,
}

impl GithubReadmeSource {
    pub fn new(client: Client, config: GithubConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl SourceAdapter for GithubReadmeSource {
    fn name(&self) -> &'static str {
        README_NAME
    }

    async fn fetch(&self, query: &str) -> Result<Option<SearchResult>, SourceError> {
        let Some((owner, repo)) = parse_github_repo(query) else {
            tracing::debug!("Query is not a repository URL");
            return Ok(None);
        };

        let base = self.config.raw_url.trim_end_matches('/');
        for file in README_CANDIDATES {
            let url = format!("{}/{}/{}/HEAD/{}", base, owner, repo, file);
            let response = match self.client.get(&url).send().await {
                Ok(r) => r,
                Err(e) => {
                    tracing::debug!(%url, error = %e, "README candidate failed");
                    continue;
                }
            };

            if !response.status().is_success() {
                tracing::debug!(%url, status = response.status().as_u16(), "README candidate missing");
                continue;
            }

            let text = response.text().await?;
            if text.trim().is_empty() {
                continue;
            }

            let content = format!(
                "{}/{} {}:\n{}",
                owner,
                repo,
                file,
                truncate_with_ellipsis(text.trim(), MAX_README_CHARS)
            );
            return Ok(Some(SearchResult::new(README_NAME, content, 0.95)));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_since_is_previous_day() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(created_since(today), "created:>2026-02-28");
    }

    #[test]
    fn test_format_repo() {
        let repo = RepoItem {
            full_name: "octo/cat".to_string(),
            html_url: "https://github.com/octo/cat".to_string(),
            description: None,
            stargazers_count: 42,
            language: Some("Rust".to_string()),
        };
        assert_eq!(
            format_repo(1, &repo),
            "1. octo/cat [Rust] ⭐42\n暂无描述\nhttps://github.com/octo/cat"
        );
    }
}
