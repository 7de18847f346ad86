//! Maps parsed CLI arguments to the action the binary runs.

use crate::cli::actions::{session::Args, Action};
use crate::cli::commands::directory;
use anyhow::{bail, Result};

/// Map CLI matches to a console session action.
///
/// # Errors
/// Returns an error if the seed file does not exist.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let options = directory::Options::parse(matches);

    if let Some(path) = &options.seed {
        if !path.is_file() {
            bail!("seed file not found: {}", path.display());
        }
    }

    Ok(Action::Session(Args {
        min_password_length: options.min_password_length,
        latency_ms: options.latency_ms,
        seed: options.seed,
        default_seed: options.default_seed,
    }))
}
