//! Programmatic keyword overrides supplied at load time.

use crate::error::ConfigResult;
use crate::store::{ConfigMap, ConfigStore};

use super::ConfigSource;

/// Fourth stage: shallow-merges caller-supplied overrides into the store.
///
/// Keys are taken as given, with no case transformation. This stage has no
/// failure modes.
pub struct KeywordArgsSource {
    values: ConfigMap,
}

impl KeywordArgsSource {
    /// Creates the stage over the given overrides.
    #[must_use]
    pub fn new(values: ConfigMap) -> Self {
        Self { values }
    }
}

impl ConfigSource for KeywordArgsSource {
    fn name(&self) -> &'static str {
        "kwargs"
    }

    fn apply(&self, store: &mut ConfigStore) -> ConfigResult<()> {
        store.update(self.values.clone());
        Ok(())
    }
}
