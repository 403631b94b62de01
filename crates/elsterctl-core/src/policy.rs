//! Forced-test policy sources
//!
//! The forced-test policy is a process-wide switch that pins every
//! submission to the test path. It is passed to the mode resolver as a
//! `ForcePolicySource` rather than read as ambient state, so tests can
//! supply a fixed value.

use crate::config::ENV_FORCE_TEST_TRANSFER_MODE;

/// Source of the forced-test policy
pub trait ForcePolicySource: Send + Sync {
    /// Whether the forced-test policy is active right now
    ///
    /// Implementations must not cache: policy changes take effect on the
    /// next call.
    fn force_test_enabled(&self) -> bool;

    /// Human-readable name of the source, used in policy error messages
    fn describe(&self) -> &str;
}

/// Policy read from an environment variable on every call
///
/// # Example
/// ```
/// use elsterctl_core::policy::{EnvForcePolicy, ForcePolicySource};
///
/// let policy = EnvForcePolicy::with_var("ELSTERCTL_DOCTEST_UNSET_FORCE");
/// assert!(!policy.force_test_enabled());
/// ```
#[derive(Debug, Clone)]
pub struct EnvForcePolicy {
    var_name: String,
}

impl EnvForcePolicy {
    /// Policy backed by `ELSTER_FORCE_TEST_TRANSFER_MODE`
    pub fn new() -> Self {
        Self::with_var(ENV_FORCE_TEST_TRANSFER_MODE)
    }

    /// Policy backed by a custom variable name
    pub fn with_var(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

impl Default for EnvForcePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ForcePolicySource for EnvForcePolicy {
    fn force_test_enabled(&self) -> bool {
        std::env::var(&self.var_name)
            .map(|value| is_truthy(&value))
            .unwrap_or(false)
    }

    fn describe(&self) -> &str {
        &self.var_name
    }
}

/// Policy with a fixed value (for tests and embedding callers)
#[derive(Debug, Clone, Copy)]
pub struct FixedForcePolicy(pub bool);

impl ForcePolicySource for FixedForcePolicy {
    fn force_test_enabled(&self) -> bool {
        self.0
    }

    fn describe(&self) -> &str {
        "forced-test policy"
    }
}

/// Recognized truthy tokens: `1`, `true`, `yes`, `on` (case-insensitive)
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
