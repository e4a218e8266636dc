//! Startup configuration layering.
//!
//! Defaults, then the saved settings file, then an imported config, then
//! command line flags.

use std::fs;

use color_eyre::eyre::WrapErr;
use digirain_config::{SettingsFile, parse_config};
use digirain_core::ConfigPatch;
use tracing::warn;

use crate::cli::Args;

/// Options for the renderer plus where to save settings back to.
#[derive(Debug)]
pub struct Startup {
    pub options: ConfigPatch,
    pub settings_file: Option<SettingsFile>,
    /// Problem worth showing once the UI is up.
    pub notice: Option<String>,
}

/// Resolve startup options from `args`, reading the default settings location.
pub fn resolve(args: &Args) -> color_eyre::Result<Startup> {
    let file = if args.no_config {
        None
    } else {
        SettingsFile::locate()
            .inspect_err(|err| warn!(%err, "settings file unavailable"))
            .ok()
    };
    resolve_with(args, file)
}

/// Resolve startup options using an explicit settings file.
pub fn resolve_with(args: &Args, settings_file: Option<SettingsFile>) -> color_eyre::Result<Startup> {
    let mut notice = None;

    let saved = match &settings_file {
        Some(file) => match file.load() {
            Ok(config) => ConfigPatch::from(config),
            Err(err) => {
                warn!(%err, path = %file.path().display(), "ignoring unreadable settings file");
                notice = Some(format!("settings ignored: {err}"));
                ConfigPatch::default()
            }
        },
        None => ConfigPatch::default(),
    };

    let imported = match &args.import {
        Some(path) => {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("could not read {}", path.display()))?;
            parse_config(&text).wrap_err_with(|| format!("could not import {}", path.display()))?
        }
        None => ConfigPatch::default(),
    };

    Ok(Startup {
        options: saved.overlay(imported).overlay(args.config_patch()),
        settings_file,
        notice,
    })
}
