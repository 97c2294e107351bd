//! Report generation endpoint.

use axum::extract::{Path, State};
use axum::{Form, Json};
use serde::Serialize;
use tracing::info;

use synoptic_core::{ReportContext, assemble};
use synoptic_model::FormValues;
use synoptic_report::render_report;

use crate::error::ApiError;
use crate::state::AppContext;

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub organ: String,
    pub report_text: String,
    pub context: ReportContext,
}

/// `POST /api/organs/{organ}/report`: assemble and render the synoptic
/// report from a urlencoded form submission.
///
/// The pair list keeps repeated keys (checkbox groups, duplicated station
/// fields) before normalization into [`FormValues`].
pub async fn generate(
    State(ctx): State<AppContext>,
    Path(organ): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<ReportResponse>, ApiError> {
    let config = ctx
        .registry
        .get(&organ)
        .ok_or_else(|| ApiError::UnknownOrgan(organ.clone()))?;

    let form = FormValues::from_pairs(pairs);
    let context = assemble(&form, config);
    let report_text = render_report(config, &context);
    info!(
        organ = %config.organ,
        stage = context.stage.as_deref().unwrap_or("-"),
        "report generated"
    );

    Ok(Json(ReportResponse {
        organ: config.organ.clone(),
        report_text,
        context,
    }))
}
