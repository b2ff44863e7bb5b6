//! Configuration loading for search-augment
//!
//! Configuration is loaded from:
//! 1. Environment variables (credentials, endpoints, proxy)
//! 2. Environment variable AUGMENT_CONFIG_PATH
//! 3. <config dir>/augment/augment.toml
//! 4. Default values

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub web_search: WebSearchConfig,
}

/// OpenAI-compatible chat completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
}

/// Shared HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout for source adapters
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Optional proxy URL applied to every outbound call
    #[serde(default)]
    pub proxy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Upper bound for one whole query, classification to summary
    #[serde(default = "default_deadline")]
    pub deadline_seconds: u64,
}

/// QWeather settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default = "default_geo_url")]
    pub geo_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_city")]
    pub default_city: String,
}

/// MediaWiki settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikipediaConfig {
    #[serde(default = "default_wikipedia_url")]
    pub api_url: String,
}

/// NewsAPI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_news_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_news_language")]
    pub language: String,
}

/// GitHub search and raw-content settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_github_api_url")]
    pub api_url: String,
    #[serde(default = "default_github_raw_url")]
    pub raw_url: String,
    /// Optional; unauthenticated requests work with a lower rate limit
    #[serde(default)]
    pub token: Option<String>,
}

/// Serper web search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    #[serde(default = "default_serper_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    /// Country hint
    #[serde(default = "default_gl")]
    pub gl: String,
    /// Interface language hint
    #[serde(default = "default_hl")]
    pub hl: String,
}

// Default value functions
fn default_llm_base_url() -> String {
    "https://api.siliconflow.cn/v1".to_string()
}

fn default_llm_model() -> String {
    "moonshotai/Kimi-K2-Instruct-0905".to_string()
}

fn default_llm_timeout() -> u64 {
    30
}

fn default_http_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "search-augment/0.1".to_string()
}

fn default_deadline() -> u64 {
    45
}

fn default_weather_url() -> String {
    "https://devapi.qweather.com/v7".to_string()
}

fn default_geo_url() -> String {
    "https://geoapi.qweather.com/v2".to_string()
}

fn default_city() -> String {
    "北京".to_string()
}

fn default_wikipedia_url() -> String {
    "https://zh.wikipedia.org/w/api.php".to_string()
}

fn default_news_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_news_language() -> String {
    "zh".to_string()
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_github_raw_url() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_serper_url() -> String {
    "https://google.serper.dev/search".to_string()
}

fn default_gl() -> String {
    "cn".to_string()
}

fn default_hl() -> String {
    "zh-cn".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: String::new(),
            model: default_llm_model(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            user_agent: default_user_agent(),
            proxy: None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            deadline_seconds: default_deadline(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            geo_url: default_geo_url(),
            api_key: String::new(),
            default_city: default_city(),
        }
    }
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_url: default_wikipedia_url(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_news_url(),
            api_key: String::new(),
            language: default_news_language(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
            raw_url: default_github_raw_url(),
            token: None,
        }
    }
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            url: default_serper_url(),
            api_key: String::new(),
            gl: default_gl(),
            hl: default_hl(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults, then apply env overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path)?,
            Some(_) => {
                tracing::info!("Config file not found, using defaults");
                Self::default()
            }
            None => {
                tracing::info!("No config path specified, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from a specific TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Overlay credentials and endpoints from the environment
    ///
    /// Takes a lookup function so tests do not have to mutate process env.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("SILICONFLOW_API_KEY") {
            self.llm.api_key = key;
        }
        if let Some(url) = non_empty("LLM_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Some(model) = non_empty("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(key) = non_empty("QWEATHER_API_KEY") {
            self.weather.api_key = key;
        }
        if let Some(key) = non_empty("NEWS_API_KEY") {
            self.news.api_key = key;
        }
        if let Some(token) = non_empty("GITHUB_TOKEN") {
            self.github.token = Some(token);
        }
        if let Some(key) = non_empty("SERPER_API_KEY") {
            self.web_search.api_key = key;
        }
        if let Some(proxy) = non_empty("HTTPS_PROXY").or_else(|| non_empty("HTTP_PROXY")) {
            self.http.proxy = Some(proxy);
        }
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("AUGMENT_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        dirs::config_dir().map(|dir| dir.join("augment").join("augment.toml"))
    }
}
