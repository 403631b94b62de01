//! Engine library location and derived directories

use std::path::{Path, PathBuf};

use elsterctl_core::config::{env_non_empty, ENV_ERIC_LIB, ENV_ERIC_LOG_DIR};
use elsterctl_core::errors::Result;

use crate::errors;

/// Plugin directory names searched beside the library, in order
pub const PLUGIN_DIR_CANDIDATES: &[&str] = &["plugins2", "plugins"];

/// Where the engine library lives and where it should log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EricConfig {
    library_path: Option<PathBuf>,
    log_dir: Option<PathBuf>,
}

impl EricConfig {
    pub fn new(library_path: impl Into<PathBuf>, log_dir: Option<PathBuf>) -> Self {
        Self {
            library_path: Some(library_path.into()),
            log_dir,
        }
    }

    /// Read `ELSTER_ERIC_LIB` and `ELSTER_ERIC_LOG_DIR`
    ///
    /// A missing library path is not an error here; it is reported when the
    /// library is actually needed.
    pub fn from_env() -> Self {
        Self {
            library_path: env_non_empty(ENV_ERIC_LIB).map(PathBuf::from),
            log_dir: env_non_empty(ENV_ERIC_LOG_DIR).map(PathBuf::from),
        }
    }

    /// # Errors
    ///
    /// Returns `ElsterError::LibraryLoad` when no library path is configured.
    pub fn library_path(&self) -> Result<&Path> {
        self.library_path
            .as_deref()
            .ok_or_else(|| errors::library_env_missing(ENV_ERIC_LIB))
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// Plugin directory beside the library: `plugins2`, else `plugins`
    ///
    /// # Errors
    ///
    /// Returns `ElsterError::LibraryLoad` when the library path is unset or
    /// missing, or when neither plugin directory exists.
    pub fn plugin_dir(&self) -> Result<PathBuf> {
        let library = self.library_path()?;
        if !library.is_file() {
            return Err(errors::library_not_found(library));
        }

        let resolved = library
            .canonicalize()
            .map_err(|e| errors::library_open_failed(library, &e.to_string()))?;
        let library_dir = resolved.parent().unwrap_or_else(|| Path::new("/"));

        PLUGIN_DIR_CANDIDATES
            .iter()
            .map(|name| library_dir.join(name))
            .find(|candidate| candidate.is_dir())
            .ok_or_else(|| errors::plugin_dir_missing(library_dir, PLUGIN_DIR_CANDIDATES))
    }
}
