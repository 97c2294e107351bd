use std::collections::BTreeSet;
use std::path::Path;

use synoptic_model::{
    ChoiceOption, FieldDef, FieldKind, HistologySubtype, HistologyType, OrganConfig, Section,
    StageTable,
};

use crate::error::ConfigError;
use crate::raw::{RawField, RawHistologyType, RawOption, RawOrgan, RawSection, RawStageTable};

/// Row count for a histologic mix field when the config omits `rows`.
const DEFAULT_MIX_ROWS: u32 = 4;

/// Load and validate one organ configuration from a YAML file.
///
/// An external `tnm_stage_table` reference is resolved relative to the file's
/// directory. Missing `organ`, `sections`, or `template` keys fail here, at
/// load time, so a broken organ never reaches the registry.
pub fn load_organ_config(path: &Path) -> Result<OrganConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let raw: RawOrgan = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config_dir = path.parent().unwrap_or_else(|| Path::new("."));
    convert_organ(raw, path, config_dir)
}

fn convert_organ(
    raw: RawOrgan,
    path: &Path,
    config_dir: &Path,
) -> Result<OrganConfig, ConfigError> {
    let organ = raw
        .organ
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingKey {
            path: path.to_path_buf(),
            key: "organ",
        })?;
    let raw_sections = raw.sections.ok_or_else(|| ConfigError::MissingKey {
        path: path.to_path_buf(),
        key: "sections",
    })?;
    let template = raw.template.ok_or_else(|| ConfigError::MissingKey {
        path: path.to_path_buf(),
        key: "template",
    })?;

    let mut sections = Vec::with_capacity(raw_sections.len());
    for raw_section in raw_sections {
        sections.push(convert_section(raw_section, &organ, path)?);
    }
    ensure_unique_field_names(sections.as_slice(), &organ)?;

    let stage_table = match raw.tnm_stage_table {
        None => StageTable::default(),
        Some(RawStageTable::Inline(mapping)) => stage_table_from_yaml(&mapping, path)?,
        Some(RawStageTable::External(relative)) => {
            load_stage_table_file(&config_dir.join(relative))?
        }
    };

    Ok(OrganConfig {
        display_name: raw.display_name.unwrap_or_else(|| organ.clone()),
        version: raw.version.unwrap_or_default(),
        organ,
        sections,
        template,
        stage_table,
    })
}

fn convert_section(raw: RawSection, organ: &str, path: &Path) -> Result<Section, ConfigError> {
    let mut fields = Vec::with_capacity(raw.fields.len());
    for field in raw.fields {
        fields.push(convert_field(field, organ, path)?);
    }
    Ok(Section {
        id: raw.id,
        label: raw.label,
        fields,
    })
}

fn convert_field(raw: RawField, organ: &str, path: &Path) -> Result<FieldDef, ConfigError> {
    let kind = match raw.field_type.as_str() {
        "text" => FieldKind::Text,
        "number" => FieldKind::Number,
        "radio" => FieldKind::Radio {
            options: convert_options(raw.options.unwrap_or_default()),
        },
        // A checkbox with declared options is a multi-select group; without
        // any it is a single boolean checkbox.
        "checkbox" => match raw.options.filter(|options| !options.is_empty()) {
            Some(options) => FieldKind::MultiCheckbox {
                options: convert_options(options),
            },
            None => FieldKind::BooleanCheckbox,
        },
        "histologic_mix" => FieldKind::HistologicMix {
            rows: raw.rows.unwrap_or(DEFAULT_MIX_ROWS),
            types: convert_taxonomy(raw.types, organ)?,
        },
        "nodal_stations" => FieldKind::NodalStations {
            stations: convert_options(raw.stations),
        },
        other => {
            return Err(ConfigError::invalid(
                path,
                format!("unknown field type '{other}' for field '{}'", raw.name),
            ));
        }
    };
    Ok(FieldDef {
        name: raw.name,
        label: raw.label,
        kind,
    })
}

fn convert_options(raw: Vec<RawOption>) -> Vec<ChoiceOption> {
    raw.into_iter()
        .map(|option| ChoiceOption {
            label: option.label.unwrap_or_else(|| option.code.clone()),
            code: option.code,
        })
        .collect()
}

fn convert_taxonomy(
    raw: Vec<RawHistologyType>,
    organ: &str,
) -> Result<Vec<HistologyType>, ConfigError> {
    let mut type_codes = BTreeSet::new();
    let mut types = Vec::with_capacity(raw.len());
    for raw_type in raw {
        if !type_codes.insert(raw_type.code.clone()) {
            return Err(ConfigError::DuplicateCode {
                organ: organ.to_string(),
                scope: "histologic type",
                code: raw_type.code,
            });
        }
        let mut subtype_codes = BTreeSet::new();
        let mut subtypes = Vec::with_capacity(raw_type.subtypes.len());
        for raw_subtype in raw_type.subtypes {
            if !subtype_codes.insert(raw_subtype.code.clone()) {
                return Err(ConfigError::DuplicateCode {
                    organ: organ.to_string(),
                    scope: "histologic subtype",
                    code: raw_subtype.code,
                });
            }
            subtypes.push(HistologySubtype {
                label: raw_subtype.label.unwrap_or_else(|| raw_subtype.code.clone()),
                code: raw_subtype.code,
            });
        }
        types.push(HistologyType {
            label: raw_type.label.unwrap_or_else(|| raw_type.code.clone()),
            code: raw_type.code,
            subtypes,
        });
    }
    Ok(types)
}

fn ensure_unique_field_names(sections: &[Section], organ: &str) -> Result<(), ConfigError> {
    let mut names = BTreeSet::new();
    for section in sections {
        for field in section.fields.iter() {
            if !names.insert(field.name.as_str()) {
                return Err(ConfigError::DuplicateCode {
                    organ: organ.to_string(),
                    scope: "field",
                    code: field.name.clone(),
                });
            }
        }
    }
    Ok(())
}

fn stage_table_from_yaml(
    mapping: &serde_yaml::Mapping,
    path: &Path,
) -> Result<StageTable, ConfigError> {
    let mut entries = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let (Some(pattern), Some(stage)) = (key.as_str(), value.as_str()) else {
            return Err(ConfigError::invalid(
                path,
                "stage table keys and values must be strings",
            ));
        };
        entries.push((pattern.to_string(), stage.to_string()));
    }
    Ok(StageTable::from_entries(entries))
}

/// Load a stage table from an external `.json`/`.yaml`/`.yml` file.
///
/// JSON object order is preserved (serde_json's `preserve_order` feature), so
/// wildcard tie-break stays author-defined in both formats.
pub fn load_stage_table_file(path: &Path) -> Result<StageTable, ConfigError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    match extension {
        "json" => {
            let contents =
                std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
            let table: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            let mut entries = Vec::with_capacity(table.len());
            for (pattern, value) in table {
                let Some(stage) = value.as_str() else {
                    return Err(ConfigError::invalid(
                        path,
                        "stage table values must be strings",
                    ));
                };
                entries.push((pattern, stage.to_string()));
            }
            Ok(StageTable::from_entries(entries))
        }
        "yaml" | "yml" => {
            let contents =
                std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
            let mapping: serde_yaml::Mapping =
                serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            stage_table_from_yaml(&mapping, path)
        }
        _ => Err(ConfigError::UnsupportedStageTable {
            path: path.to_path_buf(),
        }),
    }
}
