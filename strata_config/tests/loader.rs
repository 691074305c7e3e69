//! End-to-end tests for the canonical configuration loader.

use std::collections::HashMap;

use anyhow::{Context, Result, ensure};
use camino::Utf8PathBuf;
use serde_json::{Value, json};
use strata_config::source::{EntryPoint, SECRET_KEY, SECRET_KEY_PLACEHOLDER, StaticRegistry};
use strata_config::{
    Application, ConfigError, ConfigMap, ConfigResult, ModuleLoader, ModuleRef,
    create_config_loader,
};

fn map(pairs: &[(&str, Value)]) -> ConfigMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect()
}

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|&(k, v)| (k.to_owned(), v.to_owned()))
        .collect()
}

fn instance_dir(app_name: &str, contents: &str) -> Result<(tempfile::TempDir, Utf8PathBuf)> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join(format!("{app_name}.cfg")), contents)?;
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .ok()
        .context("non-utf8 tempdir")?;
    Ok((dir, path))
}

struct MapLoader(ConfigMap);

impl ModuleLoader for MapLoader {
    fn import(&self, _path: &str) -> ConfigResult<ConfigMap> {
        Ok(self.0.clone())
    }
}

#[test]
fn every_stage_overrides_the_previous_one() -> Result<()> {
    let (_dir, instance_path) = instance_dir(
        "myapp",
        "ORIGIN = 'instance'\nFROM_INSTANCE = 'instance'\n",
    )?;
    let mut app = Application::new("myapp", instance_path);

    let registry = StaticRegistry::new(vec![EntryPoint::new(
        "00_core",
        map(&[
            ("ORIGIN", json!("entry_point")),
            ("FROM_ENTRY_POINT", json!("entry_point")),
        ]),
    )]);
    let module = ModuleRef::Loaded(map(&[
        ("origin", json!("module")),
        ("from_module", json!("module")),
    ]));
    let kwargs = map(&[
        ("ORIGIN", json!("kwargs")),
        ("FROM_KWARGS", json!("kwargs")),
    ]);
    let environment = env(&[("APP_ORIGIN", "'environment'")]);

    let loader = create_config_loader(Some(module), "APP").with_registry(registry);
    loader.load_from(&mut app, kwargs, &environment)?;

    // The last stage defining a key wins; untouched keys survive from
    // whichever stage set them.
    ensure!(app.config.get("ORIGIN") == Some(&json!("environment")));
    ensure!(app.config.get("FROM_ENTRY_POINT") == Some(&json!("entry_point")));
    ensure!(app.config.get("FROM_MODULE") == Some(&json!("module")));
    ensure!(app.config.get("FROM_INSTANCE") == Some(&json!("instance")));
    ensure!(app.config.get("FROM_KWARGS") == Some(&json!("kwargs")));
    Ok(())
}

#[test]
fn later_entry_points_override_earlier_ones_alphabetically() -> Result<()> {
    let mut app = Application::new("myapp", "/nonexistent/instance");
    let registry = StaticRegistry::new(vec![
        EntryPoint::new("10_app", map(&[("SHARED", json!("from_10"))])),
        EntryPoint::new("00_app", map(&[("SHARED", json!("from_00"))])),
    ]);
    let loader = create_config_loader(None, "APP").with_registry(registry);
    loader.load_from(&mut app, ConfigMap::new(), &env(&[]))?;
    ensure!(app.config.get("SHARED") == Some(&json!("from_10")));
    Ok(())
}

#[test]
fn environment_values_round_trip_as_typed_literals() -> Result<()> {
    let mut app = Application::new("myapp", "/nonexistent/instance");
    let environment = env(&[
        ("APP_ANSWER", "42"),
        ("APP_GREETING", "hello"),
        ("APP_EMPTY", ""),
    ]);
    let loader = create_config_loader(None, "APP");
    loader.load_from(&mut app, ConfigMap::new(), &environment)?;

    ensure!(app.config.get("ANSWER") == Some(&json!(42)));
    ensure!(app.config.get("GREETING") == Some(&json!("hello")));
    ensure!(!app.config.contains_key("EMPTY"));
    Ok(())
}

#[test]
fn empty_environment_value_preserves_a_kwargs_value() -> Result<()> {
    let mut app = Application::new("myapp", "/nonexistent/instance");
    let environment = env(&[("APP_KEPT", "")]);
    let loader = create_config_loader(None, "APP");
    loader.load_from(&mut app, map(&[("KEPT", json!(7))]), &environment)?;
    ensure!(app.config.get("KEPT") == Some(&json!(7)));
    Ok(())
}

#[test]
fn missing_secret_key_is_replaced_by_the_placeholder() -> Result<()> {
    let mut app = Application::new("myapp", "/nonexistent/instance");
    let loader = create_config_loader(None, "APP");
    loader.load_from(&mut app, ConfigMap::new(), &env(&[]))?;
    ensure!(app.config.get(SECRET_KEY) == Some(&json!(SECRET_KEY_PLACEHOLDER)));
    Ok(())
}

#[test]
fn configured_secret_key_is_left_alone() -> Result<()> {
    let mut app = Application::new("myapp", "/nonexistent/instance");
    let loader = create_config_loader(None, "APP");
    loader.load_from(&mut app, map(&[(SECRET_KEY, json!("s3cret"))]), &env(&[]))?;
    ensure!(app.config.get(SECRET_KEY) == Some(&json!("s3cret")));
    Ok(())
}

#[test]
fn module_path_without_a_loader_aborts() {
    let mut app = Application::new("myapp", "/nonexistent/instance");
    let loader = create_config_loader(Some(ModuleRef::Path("myapp.config".into())), "APP");
    let result = loader.load_from(&mut app, ConfigMap::new(), &env(&[]));
    assert!(matches!(result, Err(ConfigError::ModuleImport { .. })));
}

#[test]
fn module_path_resolves_through_an_attached_loader() -> Result<()> {
    let mut app = Application::new("myapp", "/nonexistent/instance");
    let loader = create_config_loader(Some(ModuleRef::Path("myapp.config".into())), "APP")
        .with_module_loader(MapLoader(map(&[("host", json!("example.org"))])));
    loader.load_from(&mut app, ConfigMap::new(), &env(&[]))?;
    ensure!(app.config.get("HOST") == Some(&json!("example.org")));
    Ok(())
}

#[cfg(unix)]
#[test]
#[serial_test::serial]
fn load_tolerates_non_unicode_process_environment() -> Result<()> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    use test_helpers::env as env_guard;

    let _bytes = env_guard::set_var("APP_BYTES", OsStr::from_bytes(b"fo\x80o"));
    let _origin = env_guard::set_var("APP_ORIGIN", "'environment'");

    let mut app = Application::new("myapp", "/nonexistent/instance");
    let loader = create_config_loader(None, "APP");
    loader.load(&mut app, ConfigMap::new())?;

    // The unreadable entry is skipped; readable ones still apply.
    ensure!(!app.config.contains_key("BYTES"));
    ensure!(app.config.get("ORIGIN") == Some(&json!("environment")));
    Ok(())
}

#[test]
fn instance_config_path_joins_folder_and_app_name() {
    let app = Application::new("myapp", "/etc/myapp");
    assert_eq!(app.instance_config_path(), "/etc/myapp/myapp.cfg");
}
