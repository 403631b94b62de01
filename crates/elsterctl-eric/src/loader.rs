//! Dynamic loading of the engine library
//!
//! The library is opened with global symbol visibility so the engine's own
//! plugins can bind against it. On macOS its sibling `liberic*` libraries
//! are loaded first.

use std::ffi::c_void;
use std::path::Path;

use elsterctl_core::errors::Result;
use libloading::Library;

use crate::bindings::SymbolTable;
use crate::errors;

/// The opened engine library plus any dependencies loaded ahead of it
pub struct EricLibrary {
    library: Library,
    _preloaded: Vec<Library>,
}

impl EricLibrary {
    /// Open the library at `path`
    ///
    /// # Errors
    ///
    /// Returns `ElsterError::LibraryLoad` if the file is missing or the
    /// dynamic loader rejects it.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(errors::library_not_found(path));
        }

        let preloaded = preload_dependencies(path);
        // SAFETY: loading runs the library's initialisers; the engine is a
        // vendor library whose initialisers have no preconditions.
        let library = unsafe { open_global(path) }
            .map_err(|e| errors::library_open_failed(path, &e.to_string()))?;

        tracing::debug!(
            component = module_path!(),
            op = "load_library",
            path = %path.display(),
            preloaded = preloaded.len(),
        );

        Ok(Self {
            library,
            _preloaded: preloaded,
        })
    }
}

impl SymbolTable for EricLibrary {
    fn address(&self, name: &str) -> Option<*mut c_void> {
        self.library.address(name)
    }
}

#[cfg(unix)]
unsafe fn open_global(path: &Path) -> std::result::Result<Library, libloading::Error> {
    use libloading::os::unix::{Library as UnixLibrary, RTLD_GLOBAL, RTLD_NOW};

    UnixLibrary::open(Some(path), RTLD_NOW | RTLD_GLOBAL).map(Library::from)
}

#[cfg(not(unix))]
unsafe fn open_global(path: &Path) -> std::result::Result<Library, libloading::Error> {
    Library::new(path)
}

#[cfg(target_os = "macos")]
fn preload_dependencies(main_library: &Path) -> Vec<Library> {
    let Some(lib_dir) = main_library.parent() else {
        return Vec::new();
    };

    let mut candidates: Vec<_> = match std::fs::read_dir(lib_dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_eric_dylib(p) && p.as_path() != main_library)
            .collect(),
        Err(_) => return Vec::new(),
    };
    candidates.sort();

    candidates
        .iter()
        // SAFETY: see `EricLibrary::open`.
        .filter_map(|dependency| match unsafe { open_global(dependency) } {
            Ok(lib) => Some(lib),
            Err(e) => {
                tracing::debug!(
                    component = module_path!(),
                    op = "load_library",
                    path = %dependency.display(),
                    error = %e,
                    "skipping dependency",
                );
                None
            }
        })
        .collect()
}

#[cfg(not(target_os = "macos"))]
fn preload_dependencies(_main_library: &Path) -> Vec<Library> {
    Vec::new()
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn is_eric_dylib(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("liberic") && name.ends_with(".dylib"))
}
