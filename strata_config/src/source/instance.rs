//! Configuration read from the deployment's instance folder.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::literal;
use crate::store::ConfigStore;

use super::ConfigSource;

/// Third stage: reads `<instance_path>/<app_name>.cfg` if it exists.
///
/// The file holds one `KEY = <literal>` assignment per line; blank lines
/// and `#` comments are ignored. An absent file is a silent no-op, but a
/// file that exists and cannot be read or parsed aborts the load.
pub struct InstanceFolderSource {
    path: Utf8PathBuf,
}

impl InstanceFolderSource {
    /// Creates the stage for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Computes the conventional config path for an application.
    #[must_use]
    pub fn config_path(instance_path: &Utf8Path, app_name: &str) -> Utf8PathBuf {
        instance_path.join(format!("{app_name}.cfg"))
    }

    fn parse_line(&self, number: usize, line: &str) -> ConfigResult<Option<(String, serde_json::Value)>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        let Some((key, raw)) = trimmed.split_once('=') else {
            return Err(self.parse_error(number, "expected `KEY = <literal>`"));
        };
        let key = key.trim();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(self.parse_error(number, "key must be alphanumeric or underscore"));
        }
        let Some(value) = literal::parse_literal(raw) else {
            return Err(self.parse_error(number, "value is not a valid literal"));
        };
        Ok(Some((key.to_owned(), value)))
    }

    fn parse_error(&self, line: usize, message: &str) -> ConfigError {
        ConfigError::InstanceParse {
            path: self.path.clone(),
            line,
            message: message.to_owned(),
        }
    }
}

impl ConfigSource for InstanceFolderSource {
    fn name(&self) -> &'static str {
        "instance_folder"
    }

    fn apply(&self, store: &mut ConfigStore) -> ConfigResult<()> {
        let contents = match std::fs::read_to_string(self.path.as_std_path()) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => {
                return Err(ConfigError::InstanceFile {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };
        for (idx, line) in contents.lines().enumerate() {
            if let Some((key, value)) = self.parse_line(idx + 1, line)? {
                store.set(key, value);
            }
        }
        Ok(())
    }
}
