//! Exported config text.
//!
//! The export is a flat JSON object with the config fields and a `version`
//! tag. Import accepts any subset of the fields, so hand-trimmed files still
//! apply.

use digirain_core::{Config, ConfigPatch};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Version written by [`export_config`]; imports newer than this are rejected.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct ExportDoc<'a> {
    version: u32,
    #[serde(flatten)]
    config: &'a Config,
}

#[derive(Deserialize)]
struct ImportDoc {
    #[serde(default)]
    version: Option<u32>,
    #[serde(flatten)]
    patch: ConfigPatch,
}

/// Serialize `config` as pretty-printed JSON.
pub fn export_config(config: &Config) -> Result<String, ConfigError> {
    let doc = ExportDoc {
        version: FORMAT_VERSION,
        config,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse previously exported text into a patch.
///
/// A missing `version` is read as the current version.
pub fn parse_config(text: &str) -> Result<ConfigPatch, ConfigError> {
    let doc: ImportDoc = serde_json::from_str(text)?;
    let found = doc.version.unwrap_or(FORMAT_VERSION);
    if found > FORMAT_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found,
            supported: FORMAT_VERSION,
        });
    }
    Ok(doc.patch)
}
