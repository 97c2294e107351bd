//! Histology mix summarization.
//!
//! A tumor showing several histological patterns is submitted as up to
//! `rows` indexed triples (`histologic_type_i`, `histologic_subtype_i`,
//! `histologic_percent_i`). The summary leads with the dominant component
//! and appends the remaining components in submission order.

use synoptic_model::{FieldKind, FormValues, HistologyType, OrganConfig};

/// One collected histology row. Transient: parsed per request, not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct HistologyRow {
    pub type_code: String,
    pub subtype_code: String,
    pub pct: f64,
}

/// Build the histology summary sentence for the submitted form.
///
/// Empty when the organ declares no histologic mix field or no row carries
/// any input.
pub fn summarize_histology(form: &FormValues, config: &OrganConfig) -> String {
    let Some(field) = config.histologic_mix_field() else {
        return String::new();
    };
    let FieldKind::HistologicMix { rows: max_rows, types } = &field.kind else {
        return String::new();
    };

    let rows = collect_rows(form, *max_rows);
    if rows.is_empty() {
        return String::new();
    }

    let primary_index = pick_primary(rows.as_slice());
    let primary = &rows[primary_index];
    let primary_type_label = type_label(types, &primary.type_code);
    let primary_subtype_label = subtype_label(types, &primary.type_code, &primary.subtype_code);

    let mut parts = format_primary(&primary_type_label, &primary_subtype_label, primary.pct);
    for (index, row) in rows.iter().enumerate() {
        if index == primary_index {
            continue;
        }
        if let Some(fragment) = format_secondary(row, &primary.type_code, types) {
            parts.push(fragment);
        }
    }
    parts.join(", ")
}

/// Collect rows 1..=max_rows, skipping rows with no input at all.
fn collect_rows(form: &FormValues, max_rows: u32) -> Vec<HistologyRow> {
    let mut rows = Vec::new();
    for index in 1..=max_rows {
        let type_code = form
            .first(&format!("histologic_type_{index}"))
            .unwrap_or("")
            .trim();
        let subtype_code = form
            .first(&format!("histologic_subtype_{index}"))
            .unwrap_or("")
            .trim();
        let pct_raw = form
            .first(&format!("histologic_percent_{index}"))
            .unwrap_or("")
            .trim();

        if type_code.is_empty() && subtype_code.is_empty() && pct_raw.is_empty() {
            continue;
        }

        rows.push(HistologyRow {
            type_code: type_code.to_string(),
            subtype_code: subtype_code.to_string(),
            pct: parse_pct(pct_raw),
        });
    }
    rows
}

/// Lenient percentage parse: blank or malformed input counts as 0.
pub fn parse_pct(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(0.0)
}

/// Index of the dominant row: highest percentage, ties broken in favor of a
/// row with a subtype. Remaining ties keep the earliest collected row.
fn pick_primary(rows: &[HistologyRow]) -> usize {
    let mut best = 0;
    for (index, row) in rows.iter().enumerate().skip(1) {
        let ordering = row
            .pct
            .total_cmp(&rows[best].pct)
            .then(row.subtype_code.is_empty().cmp(&rows[best].subtype_code.is_empty()).reverse());
        if ordering == std::cmp::Ordering::Greater {
            best = index;
        }
    }
    best
}

fn type_label(types: &[HistologyType], code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }
    types
        .iter()
        .find(|entry| entry.code == code)
        .map(|entry| entry.label.clone())
        .unwrap_or_else(|| code.to_string())
}

fn subtype_label(types: &[HistologyType], type_code: &str, code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }
    types
        .iter()
        .find(|entry| entry.code == type_code)
        .and_then(|entry| entry.subtypes.iter().find(|subtype| subtype.code == code))
        .map(|subtype| subtype.label.clone())
        .unwrap_or_else(|| code.to_string())
}

/// Lead segments for the primary row.
///
/// A subtype label that starts with the type label would read as a
/// duplication, so only the subtype label is emitted in that case. The
/// percentage suffix appears only for positive percentages.
fn format_primary(type_label: &str, subtype_label: &str, pct: f64) -> Vec<String> {
    let mut parts = Vec::new();

    if !type_label.is_empty() && !subtype_label.is_empty() && subtype_label.starts_with(type_label)
    {
        parts.push(with_primary_pct(subtype_label, pct));
        return parts;
    }

    if !type_label.is_empty() {
        parts.push(type_label.to_string());
    }
    if !subtype_label.is_empty() {
        parts.push(with_primary_pct(subtype_label, pct));
    } else if pct > 0.0 {
        parts.push(format!("(主 {pct:.0}%)"));
    }
    parts
}

fn with_primary_pct(label: &str, pct: f64) -> String {
    if pct > 0.0 {
        format!("{label} (主 {pct:.0}%)")
    } else {
        label.to_string()
    }
}

/// Fragment for one non-primary row, or `None` when the row contributes
/// nothing (no positive percentage, or no label at all). Rows sharing the
/// primary type omit the repeated type label.
fn format_secondary(
    row: &HistologyRow,
    primary_type_code: &str,
    types: &[HistologyType],
) -> Option<String> {
    if row.pct <= 0.0 {
        return None;
    }

    let t_label = type_label(types, &row.type_code);
    let s_label = subtype_label(types, &row.type_code, &row.subtype_code);
    let pct_text = format!("{:.0}%", row.pct);

    if row.type_code == primary_type_code {
        return Some(if s_label.is_empty() {
            pct_text
        } else {
            format!("{s_label} {pct_text}")
        });
    }

    match (t_label.is_empty(), s_label.is_empty()) {
        (false, false) => Some(format!("{t_label} {s_label} {pct_text}")),
        (false, true) => Some(format!("{t_label} {pct_text}")),
        (true, false) => Some(format!("{s_label} {pct_text}")),
        (true, true) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{HistologyRow, parse_pct, pick_primary};

    fn row(type_code: &str, subtype_code: &str, pct: f64) -> HistologyRow {
        HistologyRow {
            type_code: type_code.to_string(),
            subtype_code: subtype_code.to_string(),
            pct,
        }
    }

    #[test]
    fn pct_parsing_is_lenient() {
        assert_eq!(parse_pct("60"), 60.0);
        assert_eq!(parse_pct("33.3"), 33.3);
        assert_eq!(parse_pct(""), 0.0);
        assert_eq!(parse_pct("   "), 0.0);
        assert_eq!(parse_pct("abc"), 0.0);
    }

    #[test]
    fn primary_is_highest_percentage() {
        let rows = vec![row("A", "s1", 30.0), row("A", "s2", 70.0)];
        assert_eq!(pick_primary(rows.as_slice()), 1);
    }

    #[test]
    fn percentage_tie_prefers_row_with_subtype() {
        let rows = vec![row("A", "", 50.0), row("A", "s1", 50.0)];
        assert_eq!(pick_primary(rows.as_slice()), 1);
    }

    #[test]
    fn full_tie_keeps_first_row() {
        let rows = vec![row("A", "s1", 50.0), row("B", "s2", 50.0)];
        assert_eq!(pick_primary(rows.as_slice()), 0);
    }

    #[test]
    fn single_row_is_primary() {
        let rows = vec![row("X", "y", 100.0)];
        assert_eq!(pick_primary(rows.as_slice()), 0);
    }
}
