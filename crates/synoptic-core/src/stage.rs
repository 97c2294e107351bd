//! TNM component normalization and stage lookup.

use regex::Regex;

use synoptic_model::OrganConfig;

/// Returned when no table entry covers the submitted TNM triple.
pub const UNKNOWN_STAGE: &str = "Stage ?";

/// Normalize one TNM component: trim whitespace and strip a single leading
/// `p` (the pathological-staging prefix, so `pT1a` becomes `T1a`). Absent
/// input normalizes to the empty string.
pub fn normalize_component(value: Option<&str>) -> &str {
    let trimmed = value.unwrap_or("").trim();
    trimmed.strip_prefix('p').unwrap_or(trimmed)
}

/// Look up the stage label for a TNM triple in the organ's stage table.
///
/// Exact keys win; otherwise wildcard patterns are tried in their defined
/// order and the first full match decides. Falls back to [`UNKNOWN_STAGE`].
/// Never fails: malformed table entries are simply non-matches.
pub fn resolve_stage(
    config: &OrganConfig,
    pt: Option<&str>,
    pn: Option<&str>,
    pm: Option<&str>,
) -> String {
    let key = format!(
        "{},{},{}",
        normalize_component(pt),
        normalize_component(pn),
        normalize_component(pm)
    );

    if let Some(stage) = config.stage_table.exact(&key) {
        return stage.to_string();
    }

    for rule in config.stage_table.iter() {
        if !rule.pattern.contains('*') {
            continue;
        }
        if wildcard_matches(&rule.pattern, &key) {
            return rule.stage.clone();
        }
    }

    UNKNOWN_STAGE.to_string()
}

/// Anchored wildcard match: every regex metacharacter in the pattern is
/// escaped except `*`, which matches any run of characters.
fn wildcard_matches(pattern: &str, key: &str) -> bool {
    let escaped = regex::escape(pattern).replace("\\*", ".*");
    Regex::new(&format!("^{escaped}$"))
        .map(|re| re.is_match(key))
        .unwrap_or(false)
}
