use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use tracing::info;

use synoptic_config::{OrganRegistry, config_root};
use synoptic_core::assemble;
use synoptic_model::FormValues;
use synoptic_report::render_report;
use synoptic_server::AppContext;

use crate::cli::{OrgansArgs, ReportArgs, ServeArgs};

/// Environment variable for overriding the static asset directory.
const STATIC_ENV_VAR: &str = "SYNOPTIC_STATIC_DIR";

pub fn run_serve(args: &ServeArgs) -> Result<()> {
    let registry = load_registry(args.config_dir.as_deref())?;
    let ctx = AppContext::new(registry);
    let static_dir = resolve_static_dir(args.static_dir.clone());
    let addr = SocketAddr::new(args.host, args.port);
    let runtime = tokio::runtime::Runtime::new().context("start async runtime")?;
    runtime.block_on(synoptic_server::serve(addr, ctx, &static_dir))
}

pub fn run_organs(args: &OrgansArgs) -> Result<()> {
    let registry = load_registry(args.config_dir.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec![
        "Organ",
        "Display name",
        "Version",
        "Sections",
        "Fields",
        "Stage rules",
    ]);
    apply_table_style(&mut table);
    for config in registry.iter() {
        table.add_row(vec![
            config.organ.clone(),
            config.display_name.clone(),
            config.version.clone(),
            config.sections.len().to_string(),
            config.fields().count().to_string(),
            config.stage_table.len().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_report(args: &ReportArgs) -> Result<()> {
    let registry = load_registry(args.config_dir.as_deref())?;
    let config = registry
        .get(&args.organ)
        .with_context(|| format!("unknown organ '{}'", args.organ))?;

    let contents = std::fs::read_to_string(&args.form_file)
        .with_context(|| format!("read form file {}", args.form_file.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse form file {}", args.form_file.display()))?;
    let form = form_from_json(&value)?;

    let context = assemble(&form, config);
    if args.json {
        let rendered = serde_json::to_string_pretty(&context).context("serialize context")?;
        println!("{rendered}");
    } else {
        println!("{}", render_report(config, &context));
    }
    Ok(())
}

fn load_registry(config_dir: Option<&Path>) -> Result<OrganRegistry> {
    let dir = config_dir.map(Path::to_path_buf).unwrap_or_else(config_root);
    let registry = OrganRegistry::load(&dir)
        .with_context(|| format!("load organ configs from {}", dir.display()))?;
    info!(organ_count = registry.len(), "organ configs loaded");
    Ok(registry)
}

/// Convert a saved form submission (JSON object of field name to string,
/// number, boolean, or list thereof) into the canonical form mapping.
fn form_from_json(value: &serde_json::Value) -> Result<FormValues> {
    let object = value
        .as_object()
        .context("form file must be a JSON object")?;
    let mut form = FormValues::new();
    for (key, entry) in object {
        match entry {
            serde_json::Value::Null => {}
            serde_json::Value::Array(items) => {
                for item in items {
                    form.append(key.clone(), scalar_to_string(item)?);
                }
            }
            scalar => form.append(key.clone(), scalar_to_string(scalar)?),
        }
    }
    Ok(form)
}

fn scalar_to_string(value: &serde_json::Value) -> Result<String> {
    match value {
        serde_json::Value::String(text) => Ok(text.clone()),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Bool(flag) => Ok(flag.to_string()),
        other => anyhow::bail!("unsupported form value: {other}"),
    }
}

fn resolve_static_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Ok(dir) = std::env::var(STATIC_ENV_VAR) {
        return PathBuf::from(dir);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../static")
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
