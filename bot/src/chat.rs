//! `/chat` responder
//!
//! Augments the question through the search pipeline, then asks the chat
//! model for the final answer in persona.

use std::sync::Arc;

use search_augment::{CompletionRequest, Llm, SearchOrchestrator};

use crate::persona::{china_now, system_prompt};

pub const NO_REPLY: &str = "未能获取到 AI 回复。";
pub const UNAVAILABLE: &str = "聊天服务暂时不可用～";

pub struct ChatResponder {
    llm: Arc<dyn Llm>,
    orchestrator: SearchOrchestrator,
}

impl ChatResponder {
    pub fn new(llm: Arc<dyn Llm>, orchestrator: SearchOrchestrator) -> Self {
        Self { llm, orchestrator }
    }

    /// Produce the reply text for one question; never fails
    pub async fn answer(&self, question: &str) -> String {
        tracing::info!(%question, "Chat question");

        let augmentation = self.orchestrator.intelligent_search(question).await;
        if !augmentation.is_empty() {
            tracing::debug!(chars = augmentation.chars().count(), "Prompt augmented");
        }

        let request = CompletionRequest::new(system_prompt(china_now(), &augmentation), question);

        match self.llm.complete(request).await {
            Ok(answer) => answer,
            Err(search_augment::LlmError::Empty) => NO_REPLY.to_string(),
            Err(e) => {
                tracing::error!(error = %e, "Chat completion failed");
                UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fakes for the responder and command tests

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use search_augment::{
        CompletionRequest, Llm, LlmError, SearchOrchestrator, SearchResult, SourceAdapter,
        SourceError, Sources,
    };

    use super::ChatResponder;

    /// Replies from a queue; `None` entries fail with `LlmError::Empty`
    pub struct QueueLlm {
        replies: Mutex<VecDeque<Option<String>>>,
        pub prompts: Mutex<Vec<CompletionRequest>>,
    }

    impl QueueLlm {
        pub fn new(replies: &[Option<&str>]) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.iter().map(|r| r.map(str::to_string)).collect()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub fn last_system_prompt(&self) -> String {
            let prompts = self.prompts.lock().unwrap();
            prompts
                .last()
                .map(|r| r.messages[0].content.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl Llm for QueueLlm {
        async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(request);
            match self.replies.lock().unwrap().pop_front() {
                Some(Some(reply)) => Ok(reply),
                Some(None) => Err(LlmError::Empty),
                None => Err(LlmError::NotConfigured),
            }
        }

        fn model(&self) -> &str {
            "queue"
        }
    }

    pub struct StaticSource(pub &'static str, pub Option<&'static str>);

    #[async_trait]
    impl SourceAdapter for StaticSource {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn fetch(&self, _query: &str) -> Result<Option<SearchResult>, SourceError> {
            Ok(self.1.map(|c| SearchResult::new(self.0, c, 0.9)))
        }
    }

    pub fn sources(weather: Option<&'static str>) -> Sources {
        Sources {
            weather: Arc::new(StaticSource("weather", weather)),
            wikipedia: Arc::new(StaticSource("wikipedia", None)),
            news: Arc::new(StaticSource("news", None)),
            github_trending: Arc::new(StaticSource("github_trending", None)),
            github_readme: Arc::new(StaticSource("github_repo", None)),
            url_content: Arc::new(StaticSource("url_content", None)),
            web_search: Arc::new(StaticSource("web_search", None)),
        }
    }

    pub fn responder(llm: Arc<QueueLlm>, weather: Option<&'static str>) -> ChatResponder {
        let orchestrator = SearchOrchestrator::new(llm.clone(), sources(weather));
        ChatResponder::new(llm, orchestrator)
    }
}
