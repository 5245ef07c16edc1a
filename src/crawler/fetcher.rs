//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building HTTP clients that present themselves as a regular browser
//! - GET requests for the index and detail pages
//! - Error classification

use crate::config::BrowserConfig;
use crate::ScribeError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use scraper::Html;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A page returned with a success status
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Page body content
    pub body: String,
}

impl FetchedPage {
    /// Parses the body into an HTML document
    pub fn parse(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Why a page could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP {status_code} from {url}")]
    Status { url: String, status_code: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Request failed for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Domain of {url} is not in the allowed list")]
    DomainNotAllowed { url: String },
}

impl FetchError {
    /// The URL the failed request was for
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Network { url, .. }
            | Self::DomainNotAllowed { url } => url,
        }
    }
}

/// Fetch collaborator used for both the index and the detail pages
///
/// Implementations return `Ok` only for success statuses.
pub trait PageFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, FetchError>>;
}

/// Fetcher backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with browser-like headers and the given timeout
    pub fn new(browser: &BrowserConfig, timeout: Duration) -> Result<Self, ScribeError> {
        Ok(Self {
            client: build_http_client(browser, timeout)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client sends the configured User-Agent, Accept and Accept-Language
/// headers, negotiates gzip and brotli, follows redirects, and keeps no
/// cookie store.
///
/// # Example
///
/// ```no_run
/// use quest_scribe::config::BrowserConfig;
/// use quest_scribe::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&BrowserConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(browser: &BrowserConfig, timeout: Duration) -> Result<Client, ScribeError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_str(&browser.accept)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&browser.accept_language)?,
    );

    let client = Client::builder()
        .user_agent(browser.user_agent.as_str())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a URL and classifies any failure
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Ok(FetchedPage)` |
/// | Other status | `FetchError::Status` |
/// | Timeout | `FetchError::Timeout` |
/// | Connection refused / DNS / TLS | `FetchError::Connect` |
/// | Anything else, body read errors | `FetchError::Network` |
pub async fn fetch_url(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| classify_error(url, e))?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        body,
    })
}

fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    let url = url.to_string();
    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_connect() {
        FetchError::Connect {
            url,
            message: error.to_string(),
        }
    } else {
        FetchError::Network {
            url,
            message: error.to_string(),
        }
    }
}
