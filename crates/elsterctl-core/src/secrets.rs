//! Certificate PIN sources
//!
//! A submission request names where its PIN comes from (by default the
//! `ELSTER_CERT_PIN` environment variable). The orchestrator resolves the
//! name through a `SecretSource` at send time.

use std::collections::HashMap;

use elsterctl_core_types::Sensitive;

/// Lookup of named secrets
pub trait SecretSource: Send + Sync {
    /// Resolve `name`, returning `None` when it is not set
    fn lookup(&self, name: &str) -> Option<Sensitive<String>>;
}

/// Secrets read from process environment variables
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretSource;

impl SecretSource for EnvSecretSource {
    fn lookup(&self, name: &str) -> Option<Sensitive<String>> {
        std::env::var(name).ok().map(Sensitive::new)
    }
}

/// Secrets held in memory
///
/// # Example
/// ```
/// use elsterctl_core::secrets::{SecretSource, StaticSecretSource};
///
/// let secrets = StaticSecretSource::new().with("ELSTER_CERT_PIN", "1234");
/// assert_eq!(secrets.lookup("ELSTER_CERT_PIN").unwrap().expose(), "1234");
/// assert!(secrets.lookup("OTHER").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticSecretSource {
    values: HashMap<String, Sensitive<String>>,
}

impl StaticSecretSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named secret
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .insert(name.into(), Sensitive::new(value.into()));
        self
    }
}

impl SecretSource for StaticSecretSource {
    fn lookup(&self, name: &str) -> Option<Sensitive<String>> {
        self.values.get(name).cloned()
    }
}
