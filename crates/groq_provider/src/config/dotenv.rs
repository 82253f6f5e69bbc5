//! `.env` file loading
//!
//! Meant to run once at process entry, before any provider is built.
//! Variables already present in the environment are never overwritten.

use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Load `.env` from the current directory or its parents
///
/// Returns `Ok(false)` when no file was found.
pub fn load_dotenv() -> Result<bool> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "Loaded env file");
            Ok(true)
        }
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Load a specific env file
pub fn load_dotenv_from(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Loaded env file");
            Ok(true)
        }
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e.into()),
    }
}
