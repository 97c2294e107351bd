//! Application router.
//!
//! JSON API under `/api/`; every other path falls through to the static
//! front-end directory, which owns form presentation and report display.

use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::endpoints;
use crate::state::AppContext;

/// Build the router for the given shared state and static asset directory.
pub fn build_router(ctx: AppContext, static_dir: &Path) -> Router {
    let api = Router::new()
        .route("/organs", get(endpoints::organs::list))
        .route("/organs/{organ}", get(endpoints::organs::detail))
        .route("/organs/{organ}/report", post(endpoints::report::generate))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
}
