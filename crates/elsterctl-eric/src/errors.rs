//! Error constructors for the engine adapter
//!
//! Wraps `ElsterError` with gateway-specific helpers so call sites read as
//! one line each.

use std::path::Path;

use elsterctl_core::errors::ElsterError;

use crate::api::EricApi;

/// Library path variable missing or empty
pub fn library_env_missing(var_name: &str) -> ElsterError {
    ElsterError::LibraryLoad {
        message: format!("Environment variable {} is not set.", var_name),
    }
}

/// Library path does not exist
pub fn library_not_found(path: &Path) -> ElsterError {
    ElsterError::LibraryLoad {
        message: format!("ERiC library not found at: {}", path.display()),
    }
}

/// Library exists but the dynamic loader rejected it
pub fn library_open_failed(path: &Path, reason: &str) -> ElsterError {
    ElsterError::LibraryLoad {
        message: format!("Failed to load ERiC library: {} ({})", path.display(), reason),
    }
}

/// Neither plugin directory exists beside the library
pub fn plugin_dir_missing(library_dir: &Path, candidates: &[&str]) -> ElsterError {
    ElsterError::LibraryLoad {
        message: format!(
            "ERiC plugin directory not found in {}. Expected one of: {}",
            library_dir.display(),
            candidates.join(", ")
        ),
    }
}

/// A path or string cannot be handed to the engine as a C string
pub fn interior_nul(what: &str) -> ElsterError {
    ElsterError::Validation {
        message: format!("{} contains a NUL byte and cannot be passed to ERiC", what),
    }
}

/// Engine error for a nonzero result code, enriched with the engine's own
/// error text when it provides one
///
/// Lookup failures are ignored; the plain `context` message is used instead.
pub fn engine_error<A: EricApi + ?Sized>(api: &A, context: &str, result_code: i32) -> ElsterError {
    let message = match api.error_text(result_code) {
        Some(text) if !text.trim().is_empty() => format!("{}: {}", context, text.trim()),
        _ => context.to_string(),
    };
    ElsterError::Engine {
        message,
        result_code,
    }
}

/// Engine misbehaved without reporting a result code
pub fn engine_fault(message: impl Into<String>) -> ElsterError {
    ElsterError::EngineFault {
        message: message.into(),
    }
}
