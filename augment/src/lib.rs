//! Search Augment Library
//!
//! Decides whether a chat query needs outside information, picks the source
//! that best answers it, fetches with a web-search fallback and condenses the
//! result for the downstream chat prompt.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use search_augment::{Config, SearchOrchestrator};
//!
//! let config = Config::load()?;
//! let orchestrator = SearchOrchestrator::from_config(&config)?;
//! let context = orchestrator.intelligent_search("北京今天天气怎么样").await;
//! ```
//!
//! # Configuration
//! Set API keys via env vars (`SILICONFLOW_API_KEY`, `SERPER_API_KEY`, ...)
//! or configure in `<config dir>/augment/augment.toml`

pub mod classifier;
pub mod config;
pub mod error;
pub mod http;
pub mod llm;
pub mod oracle;
pub mod orchestrator;
pub mod sources;
pub mod summarizer;
pub mod types;

pub use config::Config;
pub use error::{LlmError, SourceError};
pub use llm::{CompletionRequest, Llm, Message, OpenAiCompatClient, Role};
pub use oracle::IntentOracle;
pub use orchestrator::SearchOrchestrator;
pub use sources::{SourceAdapter, Sources};
pub use summarizer::Summarizer;
pub use types::{SearchResult, SearchServiceType};
