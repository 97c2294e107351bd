//! Organ listing and form schema endpoints.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use synoptic_model::OrganConfig;

use crate::error::ApiError;
use crate::state::AppContext;

/// One row of the organ index.
#[derive(Debug, Serialize)]
pub struct OrganSummary {
    pub code: String,
    pub label: String,
    pub version: String,
}

/// `GET /api/organs`: registered organs for the index page.
pub async fn list(State(ctx): State<AppContext>) -> Json<Vec<OrganSummary>> {
    let organs = ctx
        .registry
        .iter()
        .map(|config| OrganSummary {
            code: config.organ.clone(),
            label: config.display_name.clone(),
            version: config.version.clone(),
        })
        .collect();
    Json(organs)
}

/// `GET /api/organs/{organ}`: full form schema for one organ, consumed by
/// the front-end to render the section/field layout.
pub async fn detail(
    State(ctx): State<AppContext>,
    Path(organ): Path<String>,
) -> Result<Json<OrganConfig>, ApiError> {
    let config = ctx
        .registry
        .get(&organ)
        .ok_or_else(|| ApiError::UnknownOrgan(organ.clone()))?;
    Ok(Json(config.clone()))
}
