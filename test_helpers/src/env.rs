//! Safe mutation of process environment variables in tests.
//!
//! The process environment is global, so concurrent tests that touch it
//! race each other. Every mutation here goes through one global mutex and
//! hands back an RAII guard that restores the variable's previous state on
//! drop. Combine with `#[serial]` when the code under test reads the
//! environment directly.
//!
//! # Examples
//!
//! ```
//! use strata_config_test_helpers::env;
//!
//! let _guard = env::set_var("KEY", "VALUE");
//! assert_eq!(std::env::var("KEY").as_deref(), Ok("VALUE"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::{LazyLock, Mutex, PoisonError};

static ENV_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// RAII guard restoring an environment variable to its prior state on drop.
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

/// Sets `key` to `value` and returns a guard restoring the prior state.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let key = key.into();
    let original = with_lock(|| {
        let original = env::var_os(&key);
        unsafe { env::set_var(&key, value) };
        original
    });
    EnvVarGuard { key, original }
}

/// Removes `key` and returns a guard restoring the prior state.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    let key = key.into();
    let original = with_lock(|| {
        let original = env::var_os(&key);
        unsafe { env::remove_var(&key) };
        original
    });
    EnvVarGuard { key, original }
}

/// Removes every named variable, returning one guard per variable.
pub fn remove_vars<K>(keys: impl IntoIterator<Item = K>) -> Vec<EnvVarGuard>
where
    K: Into<String>,
{
    keys.into_iter().map(remove_var).collect()
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let key = std::mem::take(&mut self.key);
        match self.original.take() {
            Some(value) => with_lock(|| unsafe { env::set_var(&key, value) }),
            None => with_lock(|| unsafe { env::remove_var(&key) }),
        }
    }
}

fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner);
    f()
}
