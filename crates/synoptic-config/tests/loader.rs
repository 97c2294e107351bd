use std::fs;
use std::path::{Path, PathBuf};

use synoptic_config::{ConfigError, OrganRegistry, load_organ_config};
use synoptic_model::FieldKind;

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "synoptic-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

const LUNG_YAML: &str = r#"
organ: lung
display_name: Lung
version: "8th edition"
template: lung_report.txt
sections:
  - id: tnm
    label: TNM
    fields:
      - name: pT
        type: radio
        options:
          - code: T1a
          - code: T2a
      - name: pN
        type: radio
      - name: pM
        type: radio
  - id: histology
    label: Histology
    fields:
      - name: histologic_mix
        type: histologic_mix
        rows: 3
        types:
          - code: AD
            label: Adenocarcinoma
            subtypes:
              - code: AD_lepidic
                label: lepidic
tnm_stage_table:
  "T1a,N0,M0": "Stage IA1"
  "T*,N*,M1c*": "Stage IVB"
"#;

#[test]
fn loads_organ_config_with_inline_stage_table() {
    let dir = unique_temp_dir("inline");
    write(&dir.join("lung.yaml"), LUNG_YAML);

    let registry = OrganRegistry::load(&dir).expect("load registry");
    assert_eq!(registry.len(), 1);

    let lung = registry.get("lung").expect("lung registered");
    assert_eq!(lung.display_name, "Lung");
    assert_eq!(lung.version, "8th edition");
    assert_eq!(lung.template, "lung_report.txt");
    assert_eq!(lung.stage_table.len(), 2);
    assert_eq!(lung.stage_table.exact("T1a,N0,M0"), Some("Stage IA1"));

    let mix = lung.histologic_mix_field().expect("mix field");
    let FieldKind::HistologicMix { rows, types } = &mix.kind else {
        panic!("expected histologic mix kind");
    };
    assert_eq!(*rows, 3);
    assert_eq!(types[0].label, "Adenocarcinoma");
    assert_eq!(types[0].subtypes[0].label, "lepidic");

    assert!(registry.get("stomach").is_none());
}

#[test]
fn resolves_external_json_stage_table_in_author_order() {
    let dir = unique_temp_dir("external");
    write(
        &dir.join("stomach.yaml"),
        r#"
organ: stomach
template: stomach_report.txt
sections:
  - id: tnm
    fields:
      - name: pT
        type: radio
tnm_stage_table: stomach_stage_table.json
"#,
    );
    write(
        &dir.join("stomach_stage_table.json"),
        r#"{"T*,N*,M1": "Stage IV", "T1a,N0,M0": "Stage IA"}"#,
    );

    let registry = OrganRegistry::load(&dir).expect("load registry");
    let stomach = registry.get("stomach").expect("stomach registered");
    // display_name falls back to the organ code
    assert_eq!(stomach.display_name, "stomach");
    let patterns: Vec<&str> = stomach
        .stage_table
        .iter()
        .map(|rule| rule.pattern.as_str())
        .collect();
    assert_eq!(patterns, vec!["T*,N*,M1", "T1a,N0,M0"]);
}

#[test]
fn missing_template_is_a_config_error() {
    let dir = unique_temp_dir("missing-template");
    write(
        &dir.join("broken.yaml"),
        "organ: broken\nsections: []\n",
    );

    let error = OrganRegistry::load(&dir).expect_err("must fail");
    assert!(matches!(
        error,
        ConfigError::MissingKey { key: "template", .. }
    ));
}

#[test]
fn missing_sections_is_a_config_error() {
    let dir = unique_temp_dir("missing-sections");
    write(
        &dir.join("broken.yaml"),
        "organ: broken\ntemplate: t.txt\n",
    );

    let error = OrganRegistry::load(&dir).expect_err("must fail");
    assert!(matches!(
        error,
        ConfigError::MissingKey { key: "sections", .. }
    ));
}

#[test]
fn unknown_field_type_is_rejected() {
    let dir = unique_temp_dir("bad-type");
    write(
        &dir.join("broken.yaml"),
        r#"
organ: broken
template: t.txt
sections:
  - id: s
    fields:
      - name: x
        type: dropdown
"#,
    );

    let error = load_organ_config(&dir.join("broken.yaml")).expect_err("must fail");
    assert!(matches!(error, ConfigError::InvalidConfig { .. }));
}

#[test]
fn duplicate_histologic_type_code_is_rejected() {
    let dir = unique_temp_dir("dup-code");
    write(
        &dir.join("broken.yaml"),
        r#"
organ: broken
template: t.txt
sections:
  - id: s
    fields:
      - name: histologic_mix
        type: histologic_mix
        types:
          - code: AD
          - code: AD
"#,
    );

    let error = load_organ_config(&dir.join("broken.yaml")).expect_err("must fail");
    assert!(matches!(
        error,
        ConfigError::DuplicateCode {
            scope: "histologic type",
            ..
        }
    ));
}

#[test]
fn unsupported_stage_table_extension_is_rejected() {
    let dir = unique_temp_dir("bad-ext");
    write(
        &dir.join("broken.yaml"),
        r#"
organ: broken
template: t.txt
sections: []
tnm_stage_table: table.csv
"#,
    );
    write(&dir.join("table.csv"), "a,b\n");

    let error = load_organ_config(&dir.join("broken.yaml")).expect_err("must fail");
    assert!(matches!(error, ConfigError::UnsupportedStageTable { .. }));
}

#[test]
fn duplicate_organ_codes_are_rejected() {
    let dir = unique_temp_dir("dup-organ");
    let doc = "organ: lung\ntemplate: t.txt\nsections: []\n";
    write(&dir.join("a.yaml"), doc);
    write(&dir.join("b.yaml"), doc);

    let error = OrganRegistry::load(&dir).expect_err("must fail");
    assert!(matches!(error, ConfigError::DuplicateOrgan { .. }));
}

#[test]
fn checkbox_with_options_becomes_multi_select() {
    let dir = unique_temp_dir("checkbox");
    write(
        &dir.join("organ.yaml"),
        r#"
organ: test
template: t.txt
sections:
  - id: s
    fields:
      - name: margins
        type: checkbox
        options:
          - code: R0
          - code: R1
      - name: pleural_invasion
        type: checkbox
"#,
    );

    let config = load_organ_config(&dir.join("organ.yaml")).expect("load");
    let kinds: Vec<&FieldKind> = config.fields().map(|field| &field.kind).collect();
    assert!(matches!(kinds[0], FieldKind::MultiCheckbox { options } if options.len() == 2));
    assert!(matches!(kinds[1], FieldKind::BooleanCheckbox));
}
