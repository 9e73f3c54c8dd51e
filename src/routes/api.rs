// Handlers for the menu data endpoints

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Json},
};
use serde::Serialize;

use crate::{
    AppState,
    error::{AppError, AppResult},
    feed::{self, FeedKind},
    menu,
    models::{FetchResult, MenuItem, MenuSection},
};

#[derive(Serialize)]
pub struct MenuResponse {
    carta: FetchResult<Vec<MenuItem>>,
    vinos: FetchResult<Vec<MenuItem>>,
}

async fn fetch_feed(app_state: &AppState, kind: FeedKind) -> FetchResult<Vec<MenuItem>> {
    let source = app_state.settings.feed_source(kind);
    app_state.fetcher.fetch_items(&source, &app_state.fallback).await
}

async fn fetch_sections(app_state: &AppState, kind: FeedKind) -> FetchResult<Vec<MenuSection>> {
    let section_order = &app_state.settings.section_order;
    fetch_feed(app_state, kind)
        .await
        .map(|items| menu::group_by_section(&items, section_order))
}

pub async fn get_carta(State(app_state): State<AppState>) -> Json<FetchResult<Vec<MenuItem>>> {
    tracing::info!("[HANDLER] /api/carta - Request received.");
    Json(fetch_feed(&app_state, FeedKind::Carta).await)
}

pub async fn get_vinos(State(app_state): State<AppState>) -> Json<FetchResult<Vec<MenuItem>>> {
    tracing::info!("[HANDLER] /api/vinos - Request received.");
    Json(fetch_feed(&app_state, FeedKind::Vinos).await)
}

pub async fn get_carta_sections(
    State(app_state): State<AppState>,
) -> Json<FetchResult<Vec<MenuSection>>> {
    Json(fetch_sections(&app_state, FeedKind::Carta).await)
}

pub async fn get_vinos_sections(
    State(app_state): State<AppState>,
) -> Json<FetchResult<Vec<MenuSection>>> {
    Json(fetch_sections(&app_state, FeedKind::Vinos).await)
}

// Both feeds, fetched concurrently
pub async fn get_menu(State(app_state): State<AppState>) -> Json<MenuResponse> {
    let (carta, vinos) = futures::join!(
        fetch_feed(&app_state, FeedKind::Carta),
        fetch_feed(&app_state, FeedKind::Vinos)
    );
    Json(MenuResponse { carta, vinos })
}

// Canonical CSV of the current items, for seeding a clean spreadsheet
pub async fn export_feed(
    State(app_state): State<AppState>,
    Path(feed_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let kind = FeedKind::from_name(&feed_name).ok_or(AppError::NotFound)?;
    tracing::info!("[HANDLER] /api/export/{} - Request received.", kind.as_str());

    let result = fetch_feed(&app_state, kind).await;
    if let Some(error) = &result.error {
        tracing::warn!(feed = kind.as_str(), error = %error, "Exporting fallback data");
    }
    let csv_text = feed::export_csv(&result.data, kind.mapping())?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let disposition = format!("attachment; filename=\"{}_{}.csv\"", kind.as_str(), timestamp);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv_text,
    ))
}
