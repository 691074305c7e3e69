//! Layered configuration resolution for web application services.
//!
//! Configuration is composed from five ordered sources — registered plugin
//! entry points, an optional user module, the deployment's instance
//! folder, programmatic keyword overrides, and prefixed environment
//! variables — into one mutable [`ConfigStore`]. Later sources always win
//! for overlapping keys. Independently, [`build_db_uri`],
//! [`build_broker_url`] and [`build_redis_url`] derive service connection
//! URIs from environment variables with documented fallback defaults.
//!
//! # Examples
//!
//! ```
//! use strata_config::{Application, ConfigMap, create_config_loader};
//!
//! # fn main() -> strata_config::ConfigResult<()> {
//! let mut app = Application::new("myapp", "/etc/myapp");
//! let loader = create_config_loader(None, "APP");
//!
//! let mut overrides = ConfigMap::new();
//! overrides.insert("DEBUG".into(), serde_json::Value::Bool(true));
//! loader.load(&mut app, overrides)?;
//!
//! assert_eq!(app.config.get("DEBUG"), Some(&serde_json::Value::Bool(true)));
//! # Ok(())
//! # }
//! ```

mod environment;
mod error;
mod literal;
mod loader;
pub mod source;
mod store;
mod uri;

pub use environment::{Environment, ProcessEnv};
pub use error::{ConfigError, ConfigResult};
pub use literal::{coerce, parse_literal};
pub use loader::{Application, ConfigLoader, create_config_loader};
pub use source::{ConfigSource, EntryPoint, EntryPointRegistry, ModuleLoader, ModuleRef};
pub use store::{ConfigMap, ConfigStore};
pub use uri::{
    DEFAULT_BROKER_URL, DEFAULT_DB_URI, broker_url_from, build_broker_url, build_db_uri,
    build_redis_url, db_uri_from, invalidate_redis_url_cache, redis_url_from,
};
