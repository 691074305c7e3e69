//! Read-only access to environment variables.
//!
//! The merge pipeline and the URI builders never touch `std::env` directly.
//! They read through the [`Environment`] trait so tests can supply a
//! synthetic environment without mutating real process state.

use std::collections::HashMap;

/// A read-only provider of environment variables.
pub trait Environment {
    /// Returns the value of `name`, or `None` when the variable is absent
    /// or not valid Unicode.
    fn get(&self, name: &str) -> Option<String>;

    /// Returns a snapshot of every variable as `(name, value)` pairs.
    ///
    /// Order is unspecified; names are unique within one snapshot.
    fn vars(&self) -> Vec<(String, String)>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn vars(&self) -> Vec<(String, String)> {
        // The OS permits non-Unicode entries; skip them rather than panic.
        std::env::vars_os()
            .filter_map(|(name, value)| {
                let name = name.into_string().ok()?;
                let value = value.into_string().ok()?;
                Some((name, value))
            })
            .collect()
    }
}

/// A fixed in-memory environment, convenient for tests.
impl Environment for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        Self::get(self, name).cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
