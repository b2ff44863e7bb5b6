//! Search orchestrator
//!
//! Runs one query through the pipeline:
//!
//! ```text
//! Classifying -> ServiceSelecting -> Fetching -> FallbackFetching -> Summarizing -> Done
//! ```
//!
//! Every stage may short-circuit to an empty string, which callers treat as
//! "answer without augmentation". Each adapter is tried at most once and
//! nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::classifier;
use crate::config::Config;
use crate::llm::{Llm, OpenAiCompatClient};
use crate::oracle::IntentOracle;
use crate::sources::{fetch_or_none, Sources};
use crate::summarizer::Summarizer;
use crate::types::{SearchResult, SearchServiceType};

#[derive(Clone)]
pub struct SearchOrchestrator {
    oracle: IntentOracle,
    summarizer: Summarizer,
    sources: Sources,
    deadline: Duration,
}

impl SearchOrchestrator {
    pub fn new(llm: Arc<dyn Llm>, sources: Sources) -> Self {
        Self {
            oracle: IntentOracle::new(llm.clone()),
            summarizer: Summarizer::new(llm),
            sources,
            deadline: Duration::from_secs(crate::config::PipelineConfig::default().deadline_seconds),
        }
    }

    /// Build the LLM client and every source from configuration
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let llm: Arc<dyn Llm> = Arc::new(OpenAiCompatClient::new(&config.llm, &config.http)?);
        let sources = Sources::from_config(config)?;

        Ok(Self::new(llm, sources)
            .with_deadline(Duration::from_secs(config.pipeline.deadline_seconds)))
    }

    /// Bound the whole pipeline; on expiry the query yields `""`
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn oracle(&self) -> &IntentOracle {
        &self.oracle
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    /// Augment a query with outside information
    ///
    /// Returns a short summary, the raw source text if summarization failed,
    /// or an empty string when no lookup was needed or nothing was found.
    /// Dropping the returned future aborts any in-flight request.
    pub async fn intelligent_search(&self, query: &str) -> String {
        let span = tracing::info_span!("intelligent_search", query = %query);

        match tokio::time::timeout(self.deadline, self.run(query))
            .instrument(span)
            .await
        {
            Ok(answer) => answer,
            Err(_) => {
                tracing::warn!(
                    deadline_secs = self.deadline.as_secs_f32(),
                    "Pipeline deadline exceeded"
                );
                String::new()
            }
        }
    }

    async fn run(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return String::new();
        }

        // Classifying
        let needed = classifier::needs_search(query) || self.oracle.needs_search_ai(query).await;
        if !needed {
            tracing::debug!("No search needed");
            return String::new();
        }

        // ServiceSelecting
        let service = self.oracle.determine_service(query).await;
        tracing::info!(%service, "Service selected");
        if service == SearchServiceType::None {
            return String::new();
        }

        // Fetching + FallbackFetching
        let Some(result) = self.fetch(service, query).await else {
            tracing::info!("No source produced a result");
            return String::new();
        };

        // Summarizing
        let summary = self.summarizer.summarize(&result.content, query).await;
        if summary.trim().is_empty() {
            result.content
        } else {
            summary
        }
    }

    /// Dedicated adapter for `service`, then web search if that gave nothing
    pub async fn fetch(&self, service: SearchServiceType, query: &str) -> Option<SearchResult> {
        if let Some(adapter) = self.sources.for_service(service) {
            if let Some(result) = fetch_or_none(adapter.as_ref(), query).await {
                return Some(result);
            }
            tracing::info!(%service, "Falling back to web search");
        }

        fetch_or_none(self.sources.web_search.as_ref(), query).await
    }
}
