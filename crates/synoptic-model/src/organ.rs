use serde::{Deserialize, Serialize};

/// A selectable option within a multi-choice or station field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub code: String,
    /// Display label; defaults to the code when the config omits it.
    pub label: String,
}

/// One subtype entry in a histology taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistologySubtype {
    pub code: String,
    pub label: String,
}

/// One histologic type with its allowed subtypes.
///
/// Codes are unique within their scope: type codes across the taxonomy,
/// subtype codes within a type. `synoptic-config` enforces this at load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistologyType {
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub subtypes: Vec<HistologySubtype>,
}

/// Closed set of field kinds a form can declare.
///
/// The config source writes a `type` string plus type-specific metadata; the
/// loader resolves that into one of these variants so every consumer gets
/// compile-time exhaustiveness instead of string comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text, passed through unchanged.
    Text,
    /// Numeric input; unparseable submissions degrade to absent.
    Number,
    /// Single choice from a fixed option list.
    Radio { options: Vec<ChoiceOption> },
    /// Single on/off checkbox.
    BooleanCheckbox,
    /// Checkbox group; zero or more of the declared options.
    MultiCheckbox { options: Vec<ChoiceOption> },
    /// Repeated (type, subtype, percentage) rows describing tumor composition.
    HistologicMix {
        rows: u32,
        types: Vec<HistologyType>,
    },
    /// Paired positive/total node counts per lymph-node station.
    NodalStations { stations: Vec<ChoiceOption> },
}

/// One form field declared by an organ configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Unique within the organ.
    pub name: String,
    pub label: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDef {
    /// Display label, falling back to the field name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// A group of fields rendered together on the form and in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub label: Option<String>,
    pub fields: Vec<FieldDef>,
}

impl Section {
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// One rule in a stage lookup table.
///
/// The pattern is a comma-joined TNM triple such as `T1a,N0,M0`; a `*` inside
/// a component matches any run of characters (`T*,N*,M1c*`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRule {
    pub pattern: String,
    pub stage: String,
}

/// Ordered TNM-to-stage lookup table.
///
/// Entries keep config insertion order: exact keys win over wildcards, and
/// among wildcards the first matching pattern decides, so authors must order
/// overlapping patterns unambiguously.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTable {
    entries: Vec<StageRule>,
}

impl StageTable {
    pub fn from_entries(entries: Vec<(String, String)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(pattern, stage)| StageRule { pattern, stage })
                .collect(),
        }
    }

    /// Stage for an exact key match, if any.
    pub fn exact(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|rule| rule.pattern == key)
            .map(|rule| rule.stage.as_str())
    }

    /// Rules in their defined order.
    pub fn iter(&self) -> impl Iterator<Item = &StageRule> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable definition of one organ/cancer type.
///
/// Loaded once at startup and shared read-only for the process lifetime, so
/// concurrent requests can use it without locking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganConfig {
    /// Unique organ code, e.g. `lung`.
    pub organ: String,
    pub display_name: String,
    /// Staging-rules version string, e.g. an edition label. Empty when unset.
    #[serde(default)]
    pub version: String,
    pub sections: Vec<Section>,
    /// Report template reference, resolved by the presentation layer.
    pub template: String,
    #[serde(default)]
    pub stage_table: StageTable,
}

impl OrganConfig {
    /// All fields across all sections, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// First field declared as a histologic mix, if the organ has one.
    pub fn histologic_mix_field(&self) -> Option<&FieldDef> {
        self.fields()
            .find(|field| matches!(field.kind, FieldKind::HistologicMix { .. }))
    }

    /// Whether any field tracks nodal stations.
    pub fn has_nodal_stations(&self) -> bool {
        self.fields()
            .any(|field| matches!(field.kind, FieldKind::NodalStations { .. }))
    }
}
