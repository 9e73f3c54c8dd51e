// Feed diagnostics endpoints, gated by `debug_csv`

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    AppState,
    error::{AppError, AppResult},
    feed::{self, FeedKind},
    models::DiagnosticsReport,
};

const URL_NOT_CONFIGURED: &str = "(csv url not configured)";
const FETCH_FAILED: &str = "(csv fetch failed)";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedHealth {
    #[serde(flatten)]
    report: DiagnosticsReport,
    http_status: Option<u16>,
    content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    generated_at: DateTime<Utc>,
}

async fn feed_health(app_state: &AppState, kind: FeedKind) -> FeedHealth {
    let source = app_state.settings.feed_source(kind);

    if source.url.is_none() {
        return FeedHealth {
            report: DiagnosticsReport::unavailable(URL_NOT_CONFIGURED),
            http_status: None,
            content_type: None,
            error: None,
            generated_at: Utc::now(),
        };
    }

    let raw = app_state.fetcher.fetch_raw(&source).await;
    let report = if raw.is_ok() {
        feed::diagnose(&raw.data.body, kind.mapping())
    } else {
        DiagnosticsReport::unavailable(FETCH_FAILED)
    };

    FeedHealth {
        report,
        http_status: raw.data.status,
        content_type: raw.data.content_type,
        error: raw.error,
        generated_at: Utc::now(),
    }
}

async fn respond(app_state: AppState, kind: FeedKind) -> AppResult<impl IntoResponse> {
    if !app_state.settings.debug_csv {
        return Err(AppError::NotFound);
    }
    tracing::info!("[HANDLER] /api/debug/{} - Request received.", kind.as_str());
    let health = feed_health(&app_state, kind).await;
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(health)))
}

pub async fn debug_carta(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    respond(app_state, FeedKind::Carta).await
}

pub async fn debug_vinos(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    respond(app_state, FeedKind::Vinos).await
}
