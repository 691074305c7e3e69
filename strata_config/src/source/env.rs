//! Configuration read from prefixed environment variables.

use crate::environment::Environment;
use crate::error::ConfigResult;
use crate::literal;
use crate::store::ConfigStore;

use super::ConfigSource;

/// Default prefix for configuration environment variables.
pub const DEFAULT_ENV_PREFIX: &str = "INVENIO_";

/// Fifth stage: loads every variable sharing a prefix into the store.
///
/// The prefix is stripped to obtain the key, and the value is interpreted
/// with the literal grammar; text that is not a literal stays a plain
/// string. An empty value means "unset": whatever the store already holds
/// for that key survives, and nothing is written otherwise.
pub struct EnvironmentSource<'a> {
    env: &'a dyn Environment,
    prefix: String,
}

impl<'a> EnvironmentSource<'a> {
    /// Creates the stage with the default `INVENIO_` prefix.
    #[must_use]
    pub fn new(env: &'a dyn Environment) -> Self {
        Self::prefixed(env, DEFAULT_ENV_PREFIX)
    }

    /// Creates the stage with a caller-supplied prefix.
    #[must_use]
    pub fn prefixed(env: &'a dyn Environment, prefix: impl Into<String>) -> Self {
        Self {
            env,
            prefix: prefix.into(),
        }
    }
}

impl ConfigSource for EnvironmentSource<'_> {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn apply(&self, store: &mut ConfigStore) -> ConfigResult<()> {
        for (name, value) in self.env.vars() {
            let Some(key) = name.strip_prefix(&self.prefix) else {
                continue;
            };
            if value.is_empty() {
                // Empty means unset; the prior store value, if any, stands.
                continue;
            }
            store.set(key, literal::coerce(&value));
        }
        Ok(())
    }
}
