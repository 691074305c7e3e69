//! The ordered configuration sources composed by the loader.
//!
//! Each source contributes a partial mapping by mutating the shared
//! [`ConfigStore`]. The loader applies sources in a fixed order, so a later
//! source always overrides an earlier one for overlapping keys. A source
//! that has nothing to contribute applies cleanly as a no-op.

mod defaults;
mod entry_point;
mod env;
mod instance;
mod module;
mod overrides;

pub use defaults::{DefaultsCheck, SECRET_KEY, SECRET_KEY_PLACEHOLDER};
pub use entry_point::{
    EntryPoint, EntryPointRegistry, EntryPointSource, MODULE_ENTRY_POINT_GROUP, StaticRegistry,
};
pub use env::{DEFAULT_ENV_PREFIX, EnvironmentSource};
pub use instance::InstanceFolderSource;
pub use module::{ExplicitModuleSource, ModuleLoader, ModuleRef};
pub use overrides::KeywordArgsSource;

use crate::error::ConfigResult;
use crate::store::ConfigStore;


/// A named unit of configuration applied onto the store.
pub trait ConfigSource {
    /// Stage name used in log output.
    fn name(&self) -> &'static str;

    /// Applies this source's contribution, overwriting overlapping keys.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ConfigError`] only for broken deployments: a
    /// failing entry point, an unresolvable module import, or an instance
    /// file that exists but cannot be parsed. Absent optional input is
    /// never an error.
    fn apply(&self, store: &mut ConfigStore) -> ConfigResult<()>;
}
