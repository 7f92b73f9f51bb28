//! Location of the data files
//!
//! Tabulated flux models are read from a data directory, which by default is
//! `.crflux` in the home directory of the user. This can be changed by setting the
//! CRFLUX_DATA_DIR environment variable.

use directories::UserDirs;
use std::{env, path::PathBuf};

use crate::errors::{CrfluxResult, Error};

/// Name of the environment variable overriding the data directory.
pub const DATA_DIR_VAR: &str = "CRFLUX_DATA_DIR";

/// Get the data directory.
///
/// If CRFLUX_DATA_DIR is set, the directory must already exist. Otherwise a
/// directory in the home directory of the user is used, which is created if missing.
pub fn data_dir() -> CrfluxResult<PathBuf> {
    env::var(DATA_DIR_VAR)
        .map(|env_path| {
            let path = PathBuf::from(env_path);
            if !path.exists() {
                return Err(Error::IOError(format!(
                    "{} does not exist: {:?}",
                    DATA_DIR_VAR, path
                )));
            }
            Ok(path)
        })
        .unwrap_or_else(|_| {
            let user_dirs =
                UserDirs::new().ok_or(Error::IOError("Failed to find home directory.".into()))?;
            let path = user_dirs.home_dir().join(".crflux");
            if !path.exists() {
                std::fs::create_dir_all(&path)?;
            }
            Ok(path)
        })
}
