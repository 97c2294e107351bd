//! Report context assembly.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use synoptic_model::{FieldValue, FormValues, OrganConfig};

use crate::extract::extract;
use crate::histology::summarize_histology;
use crate::nodal::summarize_nodal;
use crate::stage::resolve_stage;

/// Assembled data handed to the presentation layer.
///
/// Serializes flat: extracted field values merge with the derived keys
/// (`histologic_summary`, `nodal_summary`, `stage`, `version`), matching the
/// mapping shape the report template consumes.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub organ: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
    pub histologic_summary: String,
    pub nodal_summary: String,
    /// Present only when all three of pT/pN/pM were submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

/// Run the full request-scoped computation: extraction, both summaries, and
/// stage derivation. Pure; safe to call concurrently against the shared
/// read-only config.
pub fn assemble(form: &FormValues, config: &OrganConfig) -> ReportContext {
    let fields = extract(form, config);
    let histologic_summary = summarize_histology(form, config);
    let nodal_summary = if config.has_nodal_stations() {
        summarize_nodal(form)
    } else {
        String::new()
    };

    let stage = match (
        text_component(&fields, "pT"),
        text_component(&fields, "pN"),
        text_component(&fields, "pM"),
    ) {
        (Some(pt), Some(pn), Some(pm)) => {
            Some(resolve_stage(config, Some(pt), Some(pn), Some(pm)))
        }
        _ => None,
    };

    debug!(
        organ = %config.organ,
        field_count = fields.len(),
        stage = stage.as_deref().unwrap_or("-"),
        "assembled report context"
    );

    ReportContext {
        organ: config.organ.clone(),
        display_name: config.display_name.clone(),
        version: (!config.version.is_empty()).then(|| config.version.clone()),
        fields,
        histologic_summary,
        nodal_summary,
        stage,
    }
}

/// Extracted text value for a TNM component, when present and non-empty.
fn text_component<'a>(fields: &'a BTreeMap<String, FieldValue>, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .and_then(FieldValue::as_text)
        .filter(|value| !value.is_empty())
}
