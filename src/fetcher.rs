// Remote feed fetching. Any failure degrades to the fallback data plus an
// error string. Successful bodies are cached per URL; raw fetches are not.

use crate::error::FeedError;
use crate::fallback::FallbackPolicy;
use crate::feed::{self, FeedKind};
use crate::models::{FetchResult, MenuItem, RawDocument};
use anyhow::Context;
use reqwest::Client;
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

const USER_AGENT: &str = concat!("carta_feed/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub struct FeedSource {
    pub kind: FeedKind,
    pub url: Option<String>,
    // Named in the "not configured" error
    pub env_var: String,
}

impl FeedSource {
    pub fn new(kind: FeedKind, url: Option<String>, env_var: &str) -> Self {
        Self {
            kind,
            url: url.filter(|u| !u.trim().is_empty()),
            env_var: env_var.to_string(),
        }
    }

    fn require_url(&self) -> Result<&str, FeedError> {
        self.url.as_deref().ok_or_else(|| FeedError::NotConfigured {
            var: self.env_var.clone(),
        })
    }
}

// A successful response body and when it was fetched
#[derive(Clone)]
struct CachedBody {
    body: String,
    fetched_at: Instant,
}

pub struct FeedFetcher {
    client: Client,
    max_age: Duration,
    cache: RwLock<HashMap<String, CachedBody>>,
}

impl FeedFetcher {
    pub fn new(max_age: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build reqwest client")?;
        Ok(Self::with_client(client, max_age))
    }

    pub fn with_client(client: Client, max_age: Duration) -> Self {
        Self {
            client,
            max_age,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn fetch_items(
        &self,
        source: &FeedSource,
        policy: &FallbackPolicy,
    ) -> FetchResult<Vec<MenuItem>> {
        let feed = source.kind.as_str();
        match self.load_items(source).await {
            Ok(items) => {
                tracing::info!(feed, count = items.len(), "Loaded items from CSV");
                FetchResult::ok(items)
            }
            Err(e) => {
                if policy.is_strict() {
                    tracing::error!(feed, error = %e, "Failed to load CSV feed");
                } else {
                    tracing::warn!(feed, error = %e, "Failed to load CSV feed, using local fixtures");
                }
                FetchResult::failed(policy.data_for(source.kind), e.to_string())
            }
        }
    }

    async fn load_items(&self, source: &FeedSource) -> Result<Vec<MenuItem>, FeedError> {
        let url = source.require_url()?;
        let body = self.fetch_cached(url).await?;
        let items = feed::try_parse(&body, source.kind.mapping())?;
        if items.is_empty() {
            return Err(FeedError::NoValidItems);
        }
        Ok(items)
    }

    // Bypasses the cache. Error statuses still carry their body.
    pub async fn fetch_raw(&self, source: &FeedSource) -> FetchResult<RawDocument> {
        match self.load_raw(source).await {
            Ok(raw) => match raw.status {
                Some(status) if !(200..300).contains(&status) => {
                    let reason = reqwest::StatusCode::from_u16(status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or("Unknown")
                        .to_string();
                    let error = FeedError::HttpStatus { status, reason };
                    tracing::warn!(feed = source.kind.as_str(), error = %error, "Raw CSV fetch returned error status");
                    FetchResult::failed(raw, error.to_string())
                }
                _ => FetchResult::ok(raw),
            },
            Err(e) => {
                tracing::warn!(feed = source.kind.as_str(), error = %e, "Raw CSV fetch failed");
                FetchResult::failed(RawDocument::default(), e.to_string())
            }
        }
    }

    async fn load_raw(&self, source: &FeedSource) -> Result<RawDocument, FeedError> {
        let url = source.require_url()?;
        tracing::debug!(url, "Fetching raw CSV");
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        Ok(RawDocument {
            status: Some(status),
            content_type,
            body,
        })
    }

    async fn fetch_cached(&self, url: &str) -> Result<String, FeedError> {
        {
            let read_guard = self.cache.read().await;
            if let Some(cached) = read_guard.get(url) {
                if cached.fetched_at.elapsed() < self.max_age {
                    tracing::debug!(url, "Using cached CSV body");
                    return Ok(cached.body.clone());
                }
            }
        } // Release read lock before fetching

        tracing::debug!(url, "Fetching CSV");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }
        let body = response.text().await?;

        let mut write_guard = self.cache.write().await;
        write_guard.insert(
            url.to_string(),
            CachedBody {
                body: body.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(body)
    }
}
