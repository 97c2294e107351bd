//! Synoptic diagnostic paragraph rendering.
//!
//! Turns an assembled [`ReportContext`] back into the final report text,
//! section by section in config order. Fields without a submitted value are
//! omitted so partial forms still produce a readable report.

#![deny(unsafe_code)]

use synoptic_core::ReportContext;
use synoptic_model::{FieldDef, FieldKind, FieldValue, OrganConfig, Section};

const REPORT_HEADER: &str = "【病理診断報告書 / Pathological Diagnosis Report】";

/// Render the synoptic paragraph for one assembled context.
pub fn render_report(config: &OrganConfig, context: &ReportContext) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(REPORT_HEADER.to_string());
    lines.push(String::new());

    let mut title = context.display_name.clone();
    if let Some(version) = &context.version {
        title.push_str(&format!(" ({version})"));
    }
    lines.push(format!("■ 臓器 / Organ: {title}"));
    lines.push(String::new());

    for section in config.sections.iter() {
        let rendered = render_section(section, context);
        if rendered.is_empty() {
            continue;
        }
        lines.push(format!("■ {}:", section.display_label()));
        lines.extend(rendered);
        lines.push(String::new());
    }

    if let Some(stage) = &context.stage {
        lines.push(format!("■ 病期 / pStage: {stage}"));
        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.push("本報告書は癌取扱い規約に準拠して作成されています。".to_string());
    lines.push(
        "This report follows the General Rules for Clinical and Pathological Study of Cancer."
            .to_string(),
    );
    lines.join("\n")
}

fn render_section(section: &Section, context: &ReportContext) -> Vec<String> {
    let mut lines = Vec::new();
    for field in section.fields.iter() {
        let Some(value) = render_field(field, context) else {
            continue;
        };
        lines.push(format!("  {}: {}", field.display_label(), value));
    }
    lines
}

/// The display value for one field, or `None` when it should be omitted.
/// Summary-backed fields render the derived summary instead of raw input.
fn render_field(field: &FieldDef, context: &ReportContext) -> Option<String> {
    match &field.kind {
        FieldKind::HistologicMix { .. } => non_empty(context.histologic_summary.as_str()),
        FieldKind::NodalStations { .. } => non_empty(context.nodal_summary.as_str()),
        FieldKind::Text
        | FieldKind::Number
        | FieldKind::Radio { .. }
        | FieldKind::BooleanCheckbox
        | FieldKind::MultiCheckbox { .. } => {
            context.fields.get(&field.name).and_then(format_value)
        }
    }
}

fn format_value(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Missing | FieldValue::Flag(false) => None,
        FieldValue::Text(text) => non_empty(text.trim()),
        FieldValue::Number(number) => Some(format!("{number}")),
        FieldValue::Flag(true) => Some("yes".to_string()),
        FieldValue::Selection(values) if values.is_empty() => None,
        FieldValue::Selection(values) => Some(values.join(", ")),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
