// Menu and wine list ingestion for the restaurant site

use axum::extract::FromRef;
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod fallback;
pub mod feed;
pub mod fetcher;
pub mod menu;
pub mod models;
pub mod routes;

use crate::config::Settings;
use crate::fallback::FallbackPolicy;
use crate::fetcher::FeedFetcher;

// Shared application state handed to every handler
#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub fetcher: Arc<FeedFetcher>,
    pub fallback: Arc<FallbackPolicy>,
}

impl AppState {
    pub fn new(settings: Settings, fetcher: FeedFetcher, fallback: FallbackPolicy) -> Self {
        Self {
            settings: Arc::new(settings),
            fetcher: Arc::new(fetcher),
            fallback: Arc::new(fallback),
        }
    }
}
