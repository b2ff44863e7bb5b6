//! Intent oracle
//!
//! Remote-model fallbacks for the keyword classifier. Neither call ever
//! surfaces an error: a failed need-check means "no search", a failed
//! service choice means "search".

use std::sync::Arc;

use crate::classifier;
use crate::llm::{CompletionRequest, Llm};
use crate::types::SearchServiceType;

const NEED_SEARCH_PROMPT: &str = "你是一个查询分类器。判断用户的问题是否需要查询实时信息或外部资料\
（例如天气、新闻、百科知识、最新事件、网页内容、GitHub 项目）才能准确回答。\
只回答 yes 或 no，不要输出任何其他内容。";

const SERVICE_PROMPT: &str = "你是一个查询路由器。根据用户的问题选择最合适的信息来源，只输出下列类别名之一：\n\
weather - 天气、气温、降雨等\n\
wikipedia - 概念、人物、事物的百科知识\n\
news - 新闻、时事、近期事件\n\
github_trending - GitHub 热门或新出现的开源项目\n\
search - 其他需要联网搜索的问题\n\
只输出类别名，不要解释。";

/// Services the model is allowed to pick
///
/// `github_repo` and `url_content` are decided from URL shape alone, so a
/// model answer naming them for a non-URL query is treated as `search`.
const ACCEPTED_MODEL_SERVICES: &[SearchServiceType] = &[
    SearchServiceType::Weather,
    SearchServiceType::Wikipedia,
    SearchServiceType::News,
    SearchServiceType::Search,
    SearchServiceType::GithubTrending,
];

#[derive(Clone)]
pub struct IntentOracle {
    llm: Arc<dyn Llm>,
}

impl IntentOracle {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    /// Ask the model whether the query needs outside information
    pub async fn needs_search_ai(&self, query: &str) -> bool {
        let request = CompletionRequest::new(NEED_SEARCH_PROMPT, query)
            .temperature(0.1)
            .max_tokens(5);

        match self.llm.complete(request).await {
            Ok(answer) => {
                let verdict = is_affirmative(&answer);
                tracing::debug!(%answer, verdict, "Need-search verdict");
                verdict
            }
            Err(e) => {
                tracing::warn!(error = %e, "Need-search check failed, assuming no search");
                false
            }
        }
    }

    /// Pick the backend for a query
    ///
    /// Local rules first (URL shape, then keyword tables); the model is
    /// consulted only when none of them match.
    pub async fn determine_service(&self, query: &str) -> SearchServiceType {
        if let Some(service) = classifier::local_service(query) {
            tracing::debug!(%service, "Service resolved locally");
            return service;
        }

        let request = CompletionRequest::new(SERVICE_PROMPT, query)
            .temperature(0.1)
            .max_tokens(10);

        match self.llm.complete(request).await {
            Ok(answer) => {
                let service = parse_service(&answer);
                tracing::debug!(%answer, %service, "Service chosen by model");
                service
            }
            Err(e) => {
                tracing::warn!(error = %e, "Service selection failed, using search");
                SearchServiceType::Search
            }
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    answer.to_lowercase().contains("yes")
}

/// Validate a model answer against the accepted services
pub fn parse_service(answer: &str) -> SearchServiceType {
    let token = answer
        .trim()
        .trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .to_lowercase();

    token
        .parse::<SearchServiceType>()
        .ok()
        .filter(|s| ACCEPTED_MODEL_SERVICES.contains(s))
        .unwrap_or(SearchServiceType::Search)
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedLlm;
    use super::*;

    #[tokio::test]
    async fn test_needs_search_ai_yes() {
        let llm = ScriptedLlm::new(&[Some("Yes.")]);
        let oracle = IntentOracle::new(llm.clone());
        assert!(oracle.needs_search_ai("马斯克最近在干嘛").await);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_needs_search_ai_no() {
        let oracle = IntentOracle::new(ScriptedLlm::new(&[Some("no")]));
        assert!(!oracle.needs_search_ai("你好").await);
    }

    #[tokio::test]
    async fn test_needs_search_ai_fails_closed() {
        let oracle = IntentOracle::new(ScriptedLlm::new(&[None]));
        assert!(!oracle.needs_search_ai("随便问问").await);
    }

    #[tokio::test]
    async fn test_weather_resolved_without_model() {
        let llm = ScriptedLlm::new(&[]);
        let oracle = IntentOracle::new(llm.clone());
        for q in ["北京今天天气怎么样", "广州明天会下雨吗", "tokyo weather"] {
            assert_eq!(oracle.determine_service(q).await, SearchServiceType::Weather);
        }
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_urls_resolved_without_model() {
        let llm = ScriptedLlm::new(&[]);
        let oracle = IntentOracle::new(llm.clone());
        assert_eq!(
            oracle.determine_service("https://github.com/rust-lang/cargo").await,
            SearchServiceType::GithubRepo
        );
        assert_eq!(
            oracle
                .determine_service("https://raw.githubusercontent.com/rust-lang/cargo/master/README.md")
                .await,
            SearchServiceType::UrlContent
        );
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_model_choice_is_used_when_no_keyword_matches() {
        let llm = ScriptedLlm::new(&[Some("news")]);
        let oracle = IntentOracle::new(llm.clone());
        assert_eq!(oracle.determine_service("马斯克").await, SearchServiceType::News);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_model_failure_defaults_to_search() {
        let oracle = IntentOracle::new(ScriptedLlm::new(&[None]));
        assert_eq!(oracle.determine_service("马斯克").await, SearchServiceType::Search);
    }

    #[test]
    fn test_parse_service() {
        assert_eq!(parse_service("weather"), SearchServiceType::Weather);
        assert_eq!(parse_service(" `Wikipedia`\n"), SearchServiceType::Wikipedia);
        assert_eq!(parse_service("github_trending"), SearchServiceType::GithubTrending);
        // URL-shaped categories are not accepted from the model
        assert_eq!(parse_service("github_repo"), SearchServiceType::Search);
        assert_eq!(parse_service("url_content"), SearchServiceType::Search);
        assert_eq!(parse_service("none"), SearchServiceType::Search);
        assert_eq!(parse_service("I think weather"), SearchServiceType::Search);
        assert_eq!(parse_service(""), SearchServiceType::Search);
    }
}
