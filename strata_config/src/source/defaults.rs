//! Final check for required defaults after all sources have applied.

use serde_json::Value;

use crate::error::ConfigResult;
use crate::store::ConfigStore;

use super::ConfigSource;

/// Configuration key holding the application's secret key.
pub const SECRET_KEY: &str = "SECRET_KEY";

/// Placeholder written when no secret key has been configured.
pub const SECRET_KEY_PLACEHOLDER: &str = "CHANGE_ME";

/// Final stage: warns when no usable secret key survived the merge and
/// fills in an insecure placeholder so the application can still boot.
pub struct DefaultsCheck;

impl DefaultsCheck {
    fn has_secret_key(store: &ConfigStore) -> bool {
        match store.get(SECRET_KEY) {
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        }
    }
}

impl ConfigSource for DefaultsCheck {
    fn name(&self) -> &'static str {
        "defaults"
    }

    fn apply(&self, store: &mut ConfigStore) -> ConfigResult<()> {
        if !Self::has_secret_key(store) {
            tracing::warn!(
                "{SECRET_KEY} is not set; using an insecure placeholder value"
            );
            store.set(SECRET_KEY, SECRET_KEY_PLACEHOLDER);
        }
        Ok(())
    }
}
