//! Result summarizer
//!
//! Compresses raw source text into a short, query-focused answer for the
//! downstream chat prompt.

use std::sync::Arc;

use crate::llm::{CompletionRequest, Llm};

const SUMMARY_PROMPT: &str = "你是一个信息整理助手。请根据用户的问题，从提供的资料中提取最相关的信息，\
用不超过200字的中文简洁总结。保留关键数字、日期和链接，不要编造资料中没有的内容。";

#[derive(Clone)]
pub struct Summarizer {
    llm: Arc<dyn Llm>,
}

impl Summarizer {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    /// Summarize `raw` with respect to `query`
    ///
    /// Empty input returns empty output without a remote call. Any failure
    /// returns `raw` unchanged.
    pub async fn summarize(&self, raw: &str, query: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        let request = CompletionRequest::new(
            SUMMARY_PROMPT,
            format!("问题：{}\n\n资料：\n{}", query, raw),
        )
        .temperature(0.3)
        .max_tokens(300);

        match self.llm.complete(request).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "Summarization failed, forwarding raw content");
                raw.to_string()
            }
        }
    }
}
