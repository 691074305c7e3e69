//! Error types for configuration loading flows.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Convenience alias for results produced while loading configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
///
/// Only broken deployments surface here: a registered plugin whose
/// configuration cannot be loaded, an import path that does not resolve, or
/// an instance file that exists but cannot be read or parsed. Missing
/// optional sources are not errors and never reach this type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A registered configuration entry point failed to load.
    #[error("failed to load configuration entry point '{name}': {source}")]
    EntryPoint {
        /// Registered name of the entry point that failed.
        name: String,
        /// Underlying error reported by the registry.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An explicit configuration module could not be imported.
    #[error("failed to import configuration module '{path}': {source}")]
    ModuleImport {
        /// Import path that failed to resolve.
        path: String,
        /// Underlying error reported by the module loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The instance configuration file exists but could not be read.
    #[error("failed to read instance configuration '{path}': {source}")]
    InstanceFile {
        /// Path of the offending file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line in the instance configuration file is not a valid assignment.
    #[error("invalid assignment at {path}:{line}: {message}")]
    InstanceParse {
        /// Path of the offending file.
        path: Utf8PathBuf,
        /// One-based line number of the offending assignment.
        line: usize,
        /// Human-readable description of the problem.
        message: String,
    },
}

impl ConfigError {
    /// Builds a [`ConfigError::EntryPoint`] from any error type.
    pub fn entry_point<E>(name: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::EntryPoint {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Builds a [`ConfigError::ModuleImport`] from any error type.
    pub fn module_import<E>(path: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ModuleImport {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
