//! Raw config document shapes as they appear on disk.
//!
//! Config authors write a `type` string per field plus type-specific
//! metadata; [`crate::loader`] converts these raw shapes into the closed
//! [`synoptic_model::FieldKind`] enumeration and reports structural problems
//! as [`crate::ConfigError`]s.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RawOrgan {
    pub organ: Option<String>,
    pub display_name: Option<String>,
    pub version: Option<String>,
    pub sections: Option<Vec<RawSection>>,
    pub template: Option<String>,
    pub tnm_stage_table: Option<RawStageTable>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSection {
    pub id: String,
    pub label: Option<String>,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: Option<String>,
    pub options: Option<Vec<RawOption>>,
    pub rows: Option<u32>,
    #[serde(default)]
    pub types: Vec<RawHistologyType>,
    #[serde(default)]
    pub stations: Vec<RawOption>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOption {
    pub code: String,
    pub label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawHistologyType {
    pub code: String,
    pub label: Option<String>,
    #[serde(default)]
    pub subtypes: Vec<RawOption>,
}

/// `tnm_stage_table` is either an inline ordered mapping or a relative path
/// to a JSON/YAML file next to the organ configs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawStageTable {
    External(String),
    Inline(serde_yaml::Mapping),
}
