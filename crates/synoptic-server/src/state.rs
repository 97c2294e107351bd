use std::sync::Arc;

use synoptic_config::OrganRegistry;

/// Shared state for request handlers.
///
/// The registry is immutable after startup, so handlers share it without any
/// locking.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub registry: Arc<OrganRegistry>,
}

impl AppContext {
    pub fn new(registry: OrganRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}
