//! Sensitive data marker for automatic redaction
//!
//! Certificate PINs travel from the environment through the orchestrator
//! into the engine call. `Sensitive<T>` keeps them out of `Debug` and
//! `Display` output along the way, including tracing fields recorded with `?`.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use elsterctl_core_types::Sensitive;
///
/// let pin = Sensitive::new("123456".to_string());
/// assert_eq!(format!("{:?}", pin), "***REDACTED***");
/// assert_eq!(pin.expose(), "123456");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    ///
    /// Only the engine adapter should need this, at the point where the
    /// PIN is copied into the native call descriptor.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl Sensitive<String> {
    /// True when the wrapped secret is the empty string
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
