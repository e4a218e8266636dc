//! Settings file in the platform config directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use digirain_core::Config;
use directories::ProjectDirs;
use tracing::debug;

use crate::error::ConfigError;

const FILE_NAME: &str = "config.toml";

/// Location of the persisted settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    /// The default location, e.g. `~/.config/digirain/config.toml` on Linux.
    pub fn locate() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("dev", "digirain", "digirain").ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::at(dirs.config_dir().join(FILE_NAME)))
    }

    /// Use an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings, or defaults when the file does not exist yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        Ok(toml::from_str(&text)?)
    }

    /// Write the settings, replacing the file atomically.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let text = toml::to_string_pretty(config)?;
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, text).map_err(|source| ConfigError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = SettingsFile::at(dir.path().join("absent.toml"));
        assert_eq!(file.load().unwrap(), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = SettingsFile::at(dir.path().join("nested/config.toml"));
        let config = Config {
            theme: "amber".into(),
            density: 70.0,
            ..Default::default()
        };
        file.save(&config).unwrap();
        assert_eq!(file.load().unwrap(), config);
        assert!(!dir.path().join("nested/config.toml.tmp").exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = \"mono\"\nfontSize = 18\n").unwrap();
        let config = SettingsFile::at(&path).load().unwrap();
        assert_eq!(config.theme, "mono");
        assert_eq!(config.font_size, 18);
        assert_eq!(config.speed, 20.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = [").unwrap();
        assert!(matches!(
            SettingsFile::at(&path).load(),
            Err(ConfigError::TomlDe(_))
        ));
    }
}
