//! RidePATH feed HTTP client with fallback sources.

use std::future::Future;

use chrono::Utc;
use reqwest::Url;
use tracing::{debug, warn};

use crate::domain::ArrivalsFeed;

use super::convert::convert_feed;
use super::error::ArrivalsError;
use super::types::RidePathResponse;

/// Port Authority realtime feed.
pub const DEFAULT_FEED_URL: &str = "https://www.panynj.gov/bin/portauthority/ridepath.json";

/// Pass-through proxy used when the feed can't be reached directly.
const DEFAULT_PROXY_BASE: &str = "https://api.allorigins.win/raw";

/// Anything that can produce an arrivals snapshot.
pub trait ArrivalsSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<ArrivalsFeed, ArrivalsError>> + Send;
}

/// Configuration for the arrivals client.
#[derive(Debug, Clone)]
pub struct ArrivalsConfig {
    /// Source URLs, tried in order until one succeeds.
    pub urls: Vec<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ArrivalsConfig {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            timeout_secs: 10,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ArrivalsConfig {
    fn default() -> Self {
        let mut urls = vec![DEFAULT_FEED_URL.to_string()];
        if let Some(proxied) = proxied_url(DEFAULT_PROXY_BASE, DEFAULT_FEED_URL) {
            urls.push(proxied);
        }
        Self::new(urls)
    }
}

/// Build `{proxy}?url={target}` with the target URL-encoded.
pub fn proxied_url(proxy_base: &str, target: &str) -> Option<String> {
    Url::parse_with_params(proxy_base, &[("url", target)])
        .ok()
        .map(|u| u.to_string())
}

/// HTTP client for the RidePATH feed.
#[derive(Debug, Clone)]
pub struct ArrivalsClient {
    http: reqwest::Client,
    urls: Vec<String>,
}

impl ArrivalsClient {
    pub fn new(config: ArrivalsConfig) -> Result<Self, ArrivalsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ArrivalsError::Http {
                url: String::new(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            urls: config.urls,
        })
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Fetch and parse the feed from one URL.
    async fn fetch_from(&self, url: &str) -> Result<RidePathResponse, ArrivalsError> {
        let http_error = |e: reqwest::Error| ArrivalsError::Http {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.http.get(url).send().await.map_err(http_error)?;
        let status = response.status();

        if !status.is_success() {
            return Err(ArrivalsError::Api {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(http_error)?;

        serde_json::from_str(&body).map_err(|e| ArrivalsError::Json {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Fetch the feed, trying each configured URL in order.
    pub async fn fetch_feed(&self) -> Result<ArrivalsFeed, ArrivalsError> {
        if self.urls.is_empty() {
            return Err(ArrivalsError::NotConfigured);
        }

        let mut failures = Vec::new();
        for url in &self.urls {
            match self.fetch_from(url).await {
                Ok(response) => {
                    let feed = convert_feed(&response, url, Utc::now());
                    debug!(%url, boards = feed.boards.len(), "fetched arrivals");
                    return Ok(feed);
                }
                Err(e) => {
                    warn!(%url, error = %e, "arrivals source failed");
                    failures.push(e.to_string());
                }
            }
        }

        Err(ArrivalsError::AllSourcesFailed(failures))
    }
}

impl ArrivalsSource for ArrivalsClient {
    fn fetch(&self) -> impl Future<Output = Result<ArrivalsFeed, ArrivalsError>> + Send {
        self.fetch_feed()
    }
}
