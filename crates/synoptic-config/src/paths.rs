//! Config directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the organ config directory.
pub const CONFIG_ENV_VAR: &str = "SYNOPTIC_CONFIG_DIR";

/// Get the organ config root directory.
///
/// Resolution order:
/// 1. `SYNOPTIC_CONFIG_DIR` environment variable
/// 2. `config/` directory relative to the workspace root
pub fn config_root() -> PathBuf {
    if let Ok(root) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config")
}
