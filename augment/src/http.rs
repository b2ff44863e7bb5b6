//! Shared HTTP client construction
//!
//! Every adapter and the LLM client go through a client built here so that
//! timeouts, user agent and proxy are applied uniformly.

use reqwest::{Client, Proxy};
use std::time::Duration;

use crate::config::HttpConfig;

/// Build a client with the configured timeout, user agent and proxy
///
/// An unparsable proxy URL is logged and skipped; the client is still built.
pub fn build_client(config: &HttpConfig, timeout: Duration) -> reqwest::Result<Client> {
    let mut builder = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(5)))
        .user_agent(&config.user_agent);

    // Proxy comes from configuration only (Config::apply_env already reads
    // HTTP(S)_PROXY), so reqwest's own env detection is switched off.
    builder = builder.no_proxy();

    if let Some(proxy_url) = config.proxy.as_deref().filter(|p| !p.is_empty()) {
        match Proxy::all(proxy_url) {
            Ok(proxy) => {
                tracing::info!(proxy = proxy_url, "Routing outbound requests through proxy");
                builder = builder.proxy(proxy);
            }
            Err(e) => tracing::warn!(proxy = proxy_url, error = %e, "Ignoring invalid proxy URL"),
        }
    }

    builder.build()
}

/// Client for the source adapters, using `http.timeout_seconds`
pub fn source_client(config: &HttpConfig) -> reqwest::Result<Client> {
    build_client(config, Duration::from_secs(config.timeout_seconds))
}
