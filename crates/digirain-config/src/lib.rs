//! Configuration persistence for digirain.
//!
//! Two artifacts live here: the exported config text (versioned, pretty JSON)
//! and the settings file loaded at startup (TOML in the platform config dir).

mod codec;
mod error;
mod file;

pub use codec::{FORMAT_VERSION, export_config, parse_config};
pub use error::ConfigError;
pub use file::SettingsFile;
