use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use synoptic_model::OrganConfig;

use crate::error::ConfigError;
use crate::loader::load_organ_config;

/// Immutable collection of all registered organ configurations.
///
/// Built once at startup from the config directory and then shared read-only
/// (typically behind an `Arc`) with request handlers; no interior mutability,
/// so no locking discipline is needed.
#[derive(Debug, Clone, Default)]
pub struct OrganRegistry {
    organs: BTreeMap<String, OrganConfig>,
}

impl OrganRegistry {
    /// Load every `*.yaml` document in `config_dir`, in sorted filename
    /// order. Any broken document aborts the whole load.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let mut paths = Vec::new();
        let entries =
            std::fs::read_dir(config_dir).map_err(|e| ConfigError::io(config_dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::io(config_dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut configs = Vec::with_capacity(paths.len());
        for path in paths {
            let config = load_organ_config(&path)?;
            debug!(organ = %config.organ, path = %path.display(), "loaded organ config");
            configs.push(config);
        }
        let registry = Self::from_configs(configs)?;
        info!(
            organ_count = registry.len(),
            config_dir = %config_dir.display(),
            "organ registry loaded"
        );
        Ok(registry)
    }

    /// Build a registry from already-constructed configs. Used by the loader
    /// and by tests that assemble synthetic organs without touching disk.
    pub fn from_configs(
        configs: impl IntoIterator<Item = OrganConfig>,
    ) -> Result<Self, ConfigError> {
        let mut organs = BTreeMap::new();
        for config in configs {
            let code = config.organ.clone();
            if organs.insert(code.clone(), config).is_some() {
                return Err(ConfigError::DuplicateOrgan { organ: code });
            }
        }
        Ok(Self { organs })
    }

    /// Configuration for an organ code; `None` signals the caller to produce
    /// its unknown-organ response before any core operation runs.
    pub fn get(&self, organ: &str) -> Option<&OrganConfig> {
        self.organs.get(organ)
    }

    /// All configs in sorted organ-code order.
    pub fn iter(&self) -> impl Iterator<Item = &OrganConfig> {
        self.organs.values()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.organs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.organs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organs.is_empty()
    }
}
