use serde::Serialize;

/// A typed value extracted from one submitted form field.
///
/// Extraction is total: malformed input degrades to `Missing` (serialized as
/// null) rather than failing, so a report can always be generated from
/// partial data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Absent or unparseable; serializes as null.
    Missing,
    Text(String),
    Number(f64),
    Flag(bool),
    Selection(Vec<String>),
}

impl FieldValue {
    /// Borrow the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Truthiness in the template-data sense: present and non-empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Missing => false,
            FieldValue::Text(value) => !value.is_empty(),
            FieldValue::Number(_) => true,
            FieldValue::Flag(flag) => *flag,
            FieldValue::Selection(values) => !values.is_empty(),
        }
    }
}
