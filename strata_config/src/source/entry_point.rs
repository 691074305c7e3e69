//! Configuration contributed by registered plugin entry points.

use crate::error::ConfigResult;
use crate::store::{ConfigMap, ConfigStore};

use super::ConfigSource;

/// Entry-point group under which packages register configuration modules.
pub const MODULE_ENTRY_POINT_GROUP: &str = "strata_config.module";

/// A named configuration provider registered by an installed package.
#[derive(Debug, Clone)]
pub struct EntryPoint {
    name: String,
    config: ConfigMap,
}

impl EntryPoint {
    /// Creates an entry point with its registered `name` and contributed
    /// configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, config: ConfigMap) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Registered name, unique within its group.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Discovers configuration entry points registered under a group.
///
/// The host application supplies an implementation; this crate never scans
/// installed packages itself.
pub trait EntryPointRegistry {
    /// Loads every entry point registered under `group`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::EntryPoint`] when a registered entry
    /// fails to load. Plugin configuration is assumed broken-by-construction
    /// if unavailable, so the whole load aborts.
    fn load(&self, group: &str) -> ConfigResult<Vec<EntryPoint>>;
}

/// A registry backed by a fixed list of entry points.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    entries: Vec<EntryPoint>,
}

impl StaticRegistry {
    /// Creates a registry over `entries`; group membership is implicit.
    #[must_use]
    pub fn new(entries: Vec<EntryPoint>) -> Self {
        Self { entries }
    }
}

impl EntryPointRegistry for StaticRegistry {
    fn load(&self, _group: &str) -> ConfigResult<Vec<EntryPoint>> {
        Ok(self.entries.clone())
    }
}

/// First stage: applies registered entry points in name order.
pub struct EntryPointSource<'a> {
    registry: &'a dyn EntryPointRegistry,
}

impl<'a> EntryPointSource<'a> {
    /// Creates the stage over `registry` for
    /// [`MODULE_ENTRY_POINT_GROUP`].
    #[must_use]
    pub const fn new(registry: &'a dyn EntryPointRegistry) -> Self {
        Self { registry }
    }
}

impl ConfigSource for EntryPointSource<'_> {
    fn name(&self) -> &'static str {
        "entry_points"
    }

    fn apply(&self, store: &mut ConfigStore) -> ConfigResult<()> {
        let mut entries = self.registry.load(MODULE_ENTRY_POINT_GROUP)?;
        // Names are unique within a group, so the order is total.
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        for entry in entries {
            tracing::debug!(entry_point = %entry.name, "applying entry point configuration");
            store.update(entry.config);
        }
        Ok(())
    }
}
