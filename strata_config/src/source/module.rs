//! Configuration contributed by an explicitly provided module.

use crate::error::{ConfigError, ConfigResult};
use crate::store::{ConfigMap, ConfigStore};

use super::ConfigSource;

/// Names starting with this prefix are private and never copied.
const RESERVED_PREFIX: char = '_';

/// A configuration module, either resolvable by path or already loaded.
#[derive(Debug, Clone)]
pub enum ModuleRef {
    /// An import path to be resolved through a [`ModuleLoader`].
    Path(String),
    /// A mapping that has already been loaded by the caller.
    Loaded(ConfigMap),
}

/// Resolves an import path to a module's configuration mapping.
pub trait ModuleLoader {
    /// Imports the module at `path` and returns its attributes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::ModuleImport`] when the path does not
    /// resolve. Import failure indicates a broken deployment and aborts the
    /// whole load.
    fn import(&self, path: &str) -> ConfigResult<ConfigMap>;
}

/// Second stage: copies a module's public attributes into the store.
///
/// Attribute names are uppercased on the way in; names beginning with an
/// underscore are skipped. Without a module this stage is a no-op.
pub struct ExplicitModuleSource<'a> {
    module: Option<&'a ModuleRef>,
    loader: Option<&'a dyn ModuleLoader>,
}

impl<'a> ExplicitModuleSource<'a> {
    /// Creates the stage for `module`, resolving paths through `loader`.
    #[must_use]
    pub fn new(module: Option<&'a ModuleRef>, loader: Option<&'a dyn ModuleLoader>) -> Self {
        Self { module, loader }
    }

    fn resolve(&self, path: &str) -> ConfigResult<ConfigMap> {
        match self.loader {
            Some(loader) => loader.import(path),
            None => Err(ConfigError::module_import(
                path,
                std::io::Error::other("no module loader configured"),
            )),
        }
    }
}

impl ConfigSource for ExplicitModuleSource<'_> {
    fn name(&self) -> &'static str {
        "module"
    }

    fn apply(&self, store: &mut ConfigStore) -> ConfigResult<()> {
        let Some(module) = self.module else {
            return Ok(());
        };
        let attrs = match module {
            ModuleRef::Path(path) => self.resolve(path)?,
            ModuleRef::Loaded(map) => map.clone(),
        };
        for (name, value) in attrs {
            if name.starts_with(RESERVED_PREFIX) {
                continue;
            }
            store.set(name.to_uppercase(), value);
        }
        Ok(())
    }
}
