use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve a configuration directory")]
    NoConfigDir,

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("could not encode settings: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("malformed config text: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config format version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
