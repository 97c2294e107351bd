//! Typed field extraction from submitted form values.

use std::collections::BTreeMap;

use synoptic_model::{FieldKind, FieldValue, FormValues, OrganConfig};

/// Submissions treated as true for a single boolean checkbox.
const TRUE_VALUES: [&str; 4] = ["true", "on", "1", "yes"];

/// Extract a typed value for every field the organ declares.
///
/// Total over malformed input: a value that fails its conversion degrades to
/// [`FieldValue::Missing`] (numbers), `false` (boolean checkboxes), or an
/// empty selection; it never fails. Pure: same form and config always produce
/// the same mapping.
pub fn extract(form: &FormValues, config: &OrganConfig) -> BTreeMap<String, FieldValue> {
    let mut data = BTreeMap::new();
    for field in config.fields() {
        let value = match &field.kind {
            FieldKind::MultiCheckbox { .. } => FieldValue::Selection(form.list(&field.name)),
            FieldKind::BooleanCheckbox => FieldValue::Flag(parse_bool(form.first(&field.name))),
            FieldKind::Number => match parse_number(form.first(&field.name)) {
                Some(number) => FieldValue::Number(number),
                None => FieldValue::Missing,
            },
            FieldKind::Text
            | FieldKind::Radio { .. }
            | FieldKind::HistologicMix { .. }
            | FieldKind::NodalStations { .. } => match form.first(&field.name) {
                Some(value) => FieldValue::Text(value.to_string()),
                None => FieldValue::Missing,
            },
        };
        data.insert(field.name.clone(), value);
    }
    data
}

/// True iff the submitted value, trimmed and lowercased, is a truthy spelling.
pub fn parse_bool(value: Option<&str>) -> bool {
    value.is_some_and(|value| TRUE_VALUES.contains(&value.trim().to_lowercase().as_str()))
}

/// Lenient numeric parse: absent, blank, or malformed input is simply absent.
pub fn parse_number(value: Option<&str>) -> Option<f64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_bool, parse_number};

    #[test]
    fn truthy_checkbox_spellings() {
        for value in ["on", "true", "1", "yes", "True", "ON", "YES", " on "] {
            assert!(parse_bool(Some(value)), "{value:?} should be true");
        }
    }

    #[test]
    fn falsy_checkbox_spellings() {
        for value in ["", "off", "false", "0", "no", "random"] {
            assert!(!parse_bool(Some(value)), "{value:?} should be false");
        }
        assert!(!parse_bool(None));
    }

    #[test]
    fn number_parsing_degrades_to_absent() {
        assert_eq!(parse_number(Some("42")), Some(42.0));
        assert_eq!(parse_number(Some("3.5")), Some(3.5));
        assert_eq!(parse_number(Some(" 7 ")), Some(7.0));
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("abc")), None);
        assert_eq!(parse_number(None), None);
    }
}
