// Route definitions

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::AppState;

mod api;
mod debug;

pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        .route("/menu", get(api::get_menu))
        .route("/carta", get(api::get_carta))
        .route("/carta/sections", get(api::get_carta_sections))
        .route("/vinos", get(api::get_vinos))
        .route("/vinos/sections", get(api::get_vinos_sections))
        .route("/export/:feed", get(api::export_feed))
        // Diagnostics answer 404 unless debug_csv is set
        .route("/debug/carta", get(debug::debug_carta))
        .route("/debug/vinos", get(debug::debug_vinos));

    Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
