//! Log file setup.
//!
//! The terminal belongs to the rain, so logs only go to a file, and only
//! when one is requested.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{WrapErr, eyre};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const FILTER_ENV: &str = "DIGIRAIN_LOG";

/// Install a file subscriber when `path` is given.
pub fn init(path: Option<&Path>) -> color_eyre::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .wrap_err_with(|| format!("could not create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!(err))
}
