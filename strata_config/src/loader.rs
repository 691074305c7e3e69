//! The canonical configuration loader.
//!
//! [`create_config_loader`] builds a [`ConfigLoader`] that composes the
//! five configuration sources in their fixed order and finishes with the
//! defaults check. The order is the whole contract: a later source always
//! wins for overlapping keys.

use camino::Utf8PathBuf;

use crate::environment::{Environment, ProcessEnv};
use crate::error::ConfigResult;
use crate::source::{
    ConfigSource, DefaultsCheck, EntryPointRegistry, EntryPointSource, EnvironmentSource,
    ExplicitModuleSource, InstanceFolderSource, KeywordArgsSource, ModuleLoader, ModuleRef,
};
use crate::store::{ConfigMap, ConfigStore};

/// The host application whose configuration is being resolved.
///
/// Mirrors what a web framework hands its config loader: a name, the
/// deployment's instance folder, and the mutable configuration store.
#[derive(Debug, Clone, Default)]
pub struct Application {
    /// Application name; also names the instance-folder config file.
    pub name: String,
    /// Deployment-specific directory holding local override files.
    pub instance_path: Utf8PathBuf,
    /// The configuration store the loader writes into.
    pub config: ConfigStore,
}

impl Application {
    /// Creates an application with an empty configuration store.
    #[must_use]
    pub fn new(name: impl Into<String>, instance_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: name.into(),
            instance_path: instance_path.into(),
            config: ConfigStore::new(),
        }
    }

    /// Path of this application's instance config file.
    #[must_use]
    pub fn instance_config_path(&self) -> Utf8PathBuf {
        InstanceFolderSource::config_path(&self.instance_path, &self.name)
    }
}

/// A configured loader produced by [`create_config_loader`].
///
/// Collaborators that Rust cannot discover at runtime — the entry-point
/// registry and the module loader — are attached with the builder-style
/// `with_*` methods. Without a registry the entry-point stage contributes
/// nothing; without a module loader a [`ModuleRef::Path`] fails to import.
pub struct ConfigLoader {
    config: Option<ModuleRef>,
    env_prefix: String,
    registry: Option<Box<dyn EntryPointRegistry>>,
    module_loader: Option<Box<dyn ModuleLoader>>,
}

/// Creates the default configuration loader.
///
/// The loader updates an application's configuration in this order:
///
/// 1. Entry points registered under
///    [`crate::source::MODULE_ENTRY_POINT_GROUP`], ascending by registered
///    name.
/// 2. The `config` module, if one is given.
/// 3. The instance folder file `<instance_path>/<app_name>.cfg`.
/// 4. Keyword overrides passed to [`ConfigLoader::load`].
/// 5. Environment variables prefixed with `<env_prefix>_`.
///
/// If no secret key has been set afterwards, a warning is issued and a
/// placeholder is filled in.
#[must_use]
pub fn create_config_loader(config: Option<ModuleRef>, env_prefix: &str) -> ConfigLoader {
    ConfigLoader {
        config,
        env_prefix: env_prefix.to_owned(),
        registry: None,
        module_loader: None,
    }
}

impl ConfigLoader {
    /// Attaches the entry-point registry used by the first stage.
    #[must_use]
    pub fn with_registry(mut self, registry: impl EntryPointRegistry + 'static) -> Self {
        self.registry = Some(Box::new(registry));
        self
    }

    /// Attaches the module loader used to resolve [`ModuleRef::Path`].
    #[must_use]
    pub fn with_module_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.module_loader = Some(Box::new(loader));
        self
    }

    /// Runs the full merge sequence against the process environment.
    ///
    /// # Errors
    ///
    /// Propagates fatal stage failures; see [`ConfigSource::apply`].
    pub fn load(&self, app: &mut Application, kwargs: ConfigMap) -> ConfigResult<()> {
        self.load_from(app, kwargs, &ProcessEnv)
    }

    /// Runs the full merge sequence against an injected environment.
    ///
    /// # Errors
    ///
    /// Propagates fatal stage failures; see [`ConfigSource::apply`].
    pub fn load_from(
        &self,
        app: &mut Application,
        kwargs: ConfigMap,
        env: &dyn Environment,
    ) -> ConfigResult<()> {
        let instance_file = app.instance_config_path();
        let store = &mut app.config;

        if let Some(registry) = self.registry.as_deref() {
            apply(&EntryPointSource::new(registry), store)?;
        }
        apply(
            &ExplicitModuleSource::new(self.config.as_ref(), self.module_loader.as_deref()),
            store,
        )?;
        apply(&InstanceFolderSource::new(instance_file), store)?;
        apply(&KeywordArgsSource::new(kwargs), store)?;
        apply(
            &EnvironmentSource::prefixed(env, format!("{}_", self.env_prefix)),
            store,
        )?;
        apply(&DefaultsCheck, store)?;
        Ok(())
    }
}

fn apply(source: &dyn ConfigSource, store: &mut ConfigStore) -> ConfigResult<()> {
    tracing::debug!(stage = source.name(), "applying configuration source");
    source.apply(store)
}
