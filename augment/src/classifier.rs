//! Keyword classification
//!
//! Pure, synchronous checks used before any remote model call:
//! whether a query needs outside information at all, and which backend
//! a query obviously belongs to.

use augment_common::contains_any;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::types::SearchServiceType;

/// Terms that mark a query as needing real-world or current information
pub const NEEDS_SEARCH_KEYWORDS: &[&str] = &[
    "天气", "weather", "气温", "新闻", "news", "头条", "wiki", "维基", "百科", "什么是", "是什么",
    "谁是", "what is", "who is", "今天", "最新", "现在", "最近", "today", "latest", "搜索",
    "search", "查一下", "查询", "github", "热门", "trending", "http://", "https://",
];

pub const TRENDING_KEYWORDS: &[&str] = &[
    "github trending",
    "github 热门",
    "github热门",
    "热门项目",
    "开源趋势",
    "trending",
];

pub const WEATHER_KEYWORDS: &[&str] =
    &["天气", "weather", "气温", "温度", "下雨", "下雪", "forecast"];

pub const WIKIPEDIA_KEYWORDS: &[&str] =
    &["wiki", "维基", "百科", "什么是", "是什么", "谁是", "what is", "who is"];

pub const NEWS_KEYWORDS: &[&str] = &["新闻", "news", "头条", "热点", "快讯", "headline"];

pub const SEARCH_KEYWORDS: &[&str] =
    &["搜索", "search", "查一下", "查询", "最新", "最近", "google", "latest"];

/// Hosts that serve raw file content rather than HTML pages
pub const RAW_CONTENT_HOSTS: &[&str] = &["raw.githubusercontent.com", "gist.githubusercontent.com"];

/// Hosts that serve `github.com/{owner}/{repo}` pages
const GITHUB_HOSTS: &[&str] = &["github.com", "www.github.com"];

static CITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\p{Han}+?|[a-z][a-z' -]*?)\s*(?:今天|明天|后天|今日|现在|当前)?\s*的?\s*(?:天气|weather)",
    )
    .expect("Invalid regex")
});

/// Leading request and time words that end up in front of a Chinese city name
static CITY_FILLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:请问|帮我(?:查一下|看一下|查查|看看|查|看)|查一下|看一下|查查|看看|查询|今天|明天|后天|今日|现在|当前)+",
    )
    .expect("Invalid regex")
});

/// Latin words that are never part of a place name
const CITY_STOPWORDS: &[&str] = &[
    "what", "what's", "whats", "how", "how's", "hows", "is", "the", "s", "today", "now",
    "current", "tomorrow", "check", "tell", "me", "about",
];

/// Does the query contain any trigger term?
pub fn needs_search(query: &str) -> bool {
    contains_any(query, NEEDS_SEARCH_KEYWORDS)
}

/// Resolve the service from local evidence only
///
/// Returns `None` when nothing matched and the remote model has to decide.
/// Order matters: URL shape, trending, weather, encyclopedia, news, search.
pub fn local_service(query: &str) -> Option<SearchServiceType> {
    let query = query.trim();

    if let Some(url) = parse_url(query) {
        return Some(service_for_url(&url));
    }

    let rules: [(&[&str], SearchServiceType); 5] = [
        (TRENDING_KEYWORDS, SearchServiceType::GithubTrending),
        (WEATHER_KEYWORDS, SearchServiceType::Weather),
        (WIKIPEDIA_KEYWORDS, SearchServiceType::Wikipedia),
        (NEWS_KEYWORDS, SearchServiceType::News),
        (SEARCH_KEYWORDS, SearchServiceType::Search),
    ];

    rules
        .iter()
        .find(|(keywords, _)| contains_any(query, keywords))
        .map(|(_, service)| *service)
}

fn service_for_url(url: &Url) -> SearchServiceType {
    let is_raw_host = url
        .host_str()
        .map(|host| RAW_CONTENT_HOSTS.contains(&host))
        .unwrap_or(false);

    if is_raw_host {
        SearchServiceType::UrlContent
    } else if github_repo(url).is_some() {
        SearchServiceType::GithubRepo
    } else {
        SearchServiceType::UrlContent
    }
}

/// Parse the query as a single http(s) URL
pub fn parse_url(query: &str) -> Option<Url> {
    let query = query.trim();
    if query.is_empty() || query.chars().any(char::is_whitespace) {
        return None;
    }

    Url::parse(query)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
}

/// Extract `(owner, repo)` from `https://github.com/{owner}/{repo}`
///
/// Only the bare repository URL matches; deeper paths do not. Query strings
/// and fragments are ignored.
pub fn parse_github_repo(query: &str) -> Option<(String, String)> {
    parse_url(query).and_then(|url| github_repo(&url))
}

fn github_repo(url: &Url) -> Option<(String, String)> {
    if !GITHUB_HOSTS.contains(&url.host_str()?) {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let [owner, repo] = segments.as_slice() else {
        return None;
    };
    let repo = repo.strip_suffix(".git").unwrap_or(*repo);

    let valid = |name: &str| {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    };
    if valid(*owner) && valid(repo) {
        Some((owner.to_string(), repo.to_string()))
    } else {
        None
    }
}

/// Pull a city name out of a weather question
///
/// Takes the text immediately before 天气/weather, minus leading request
/// and time words. Falls back to `default_city` when nothing usable
/// precedes the keyword.
pub fn extract_city(query: &str, default_city: &str) -> String {
    let Some(caps) = CITY_RE.captures(query) else {
        return default_city.to_string();
    };

    let raw = caps[1].trim();
    let city = if raw.starts_with(|c: char| c.is_ascii_alphabetic()) {
        raw.split_whitespace()
            .filter(|w| !CITY_STOPWORDS.contains(&w.to_lowercase().as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        CITY_FILLER_RE.replace(raw, "").trim().to_string()
    };

    if city.is_empty() {
        default_city.to_string()
    } else {
        city
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_search_triggers() {
        assert!(needs_search("北京今天天气怎么样"));
        assert!(needs_search("What is Rust?"));
        assert!(needs_search("最新的新闻"));
        assert!(needs_search("https://example.com/a.txt"));
        assert!(needs_search("Any NEWS about the launch"));
    }

    #[test]
    fn test_needs_search_plain_chat() {
        assert!(!needs_search("你好"));
        assert!(!needs_search("哈哈哈笑死"));
        assert!(!needs_search("帮我写一首诗"));
    }

    #[test]
    fn test_weather_keywords_select_weather() {
        for q in ["北京今天天气怎么样", "上海的气温", "明天会下雨吗", "London weather"] {
            assert_eq!(local_service(q), Some(SearchServiceType::Weather), "{}", q);
        }
    }

    #[test]
    fn test_github_repo_url() {
        assert_eq!(
            local_service("https://github.com/rust-lang/rust"),
            Some(SearchServiceType::GithubRepo)
        );
        assert_eq!(
            local_service("https://github.com/tokio-rs/tokio/"),
            Some(SearchServiceType::GithubRepo)
        );
        assert_eq!(
            local_service("https://github.com/tokio-rs/tokio.git"),
            Some(SearchServiceType::GithubRepo)
        );
    }

    #[test]
    fn test_deeper_github_path_is_url_content() {
        assert_eq!(
            local_service("https://github.com/rust-lang/rust/issues/1"),
            Some(SearchServiceType::UrlContent)
        );
    }

    #[test]
    fn test_raw_host_is_url_content() {
        assert_eq!(
            local_service("https://raw.githubusercontent.com/rust-lang/rust/master/README.md"),
            Some(SearchServiceType::UrlContent)
        );
        assert_eq!(
            local_service("https://gist.githubusercontent.com/u/abc/raw/file.json"),
            Some(SearchServiceType::UrlContent)
        );
    }

    #[test]
    fn test_keyword_priority() {
        assert_eq!(
            local_service("github trending 今天"),
            Some(SearchServiceType::GithubTrending)
        );
        assert_eq!(local_service("维基 量子计算"), Some(SearchServiceType::Wikipedia));
        assert_eq!(local_service("今天有什么新闻"), Some(SearchServiceType::News));
        assert_eq!(local_service("搜索 rust 教程"), Some(SearchServiceType::Search));
        assert_eq!(local_service("讲个笑话"), None);
    }

    #[test]
    fn test_parse_url_rejects_sentences() {
        assert!(parse_url("看看 https://example.com").is_none());
        assert!(parse_url("ftp://example.com/file").is_none());
        assert!(parse_url("https://example.com/page").is_some());
    }

    #[test]
    fn test_parse_github_repo() {
        assert_eq!(
            parse_github_repo("https://github.com/serde-rs/json"),
            Some(("serde-rs".to_string(), "json".to_string()))
        );
        assert_eq!(parse_github_repo("https://github.com/serde-rs"), None);
        assert_eq!(parse_github_repo("https://gitlab.com/a/b"), None);
    }

    #[test]
    fn test_github_repo_url_is_case_and_query_tolerant() {
        assert_eq!(
            local_service("HTTPS://GITHUB.COM/octo/cat"),
            Some(SearchServiceType::GithubRepo)
        );
        assert_eq!(
            parse_github_repo("https://www.github.com/octo/cat?tab=readme"),
            Some(("octo".to_string(), "cat".to_string()))
        );
        assert_eq!(
            parse_github_repo("https://github.com/octo/cat#readme"),
            Some(("octo".to_string(), "cat".to_string()))
        );
    }

    #[test]
    fn test_extract_city() {
        assert_eq!(extract_city("北京今天天气怎么样", "北京"), "北京");
        assert_eq!(extract_city("上海的天气", "北京"), "上海");
        assert_eq!(extract_city("今天深圳天气", "北京"), "深圳");
        assert_eq!(extract_city("查一下广州明天天气", "北京"), "广州");
        assert_eq!(extract_city("London weather", "北京"), "London");
    }

    #[test]
    fn test_extract_city_compound_fillers() {
        assert_eq!(extract_city("帮我查一下北京天气", "上海"), "北京");
        assert_eq!(extract_city("帮我看一下深圳的天气", "北京"), "深圳");
        assert_eq!(extract_city("查查北京天气", "上海"), "北京");
        assert_eq!(extract_city("请问今天杭州的天气", "北京"), "杭州");
    }

    #[test]
    fn test_extract_city_multi_word_latin() {
        assert_eq!(extract_city("New York weather", "北京"), "New York");
        assert_eq!(extract_city("how's the San Francisco weather today", "北京"), "San Francisco");
    }

    #[test]
    fn test_extract_city_defaults() {
        assert_eq!(extract_city("天气怎么样", "北京"), "北京");
        assert_eq!(extract_city("what is the weather", "杭州"), "杭州");
        assert_eq!(extract_city("会下雨吗", "北京"), "北京");
    }
}
