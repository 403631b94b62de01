//! Gateway factory over the native engine library

use elsterctl_core::errors::Result;
use elsterctl_core::gateway::{GatewayFactory, SubmissionGateway};

use crate::config::EricConfig;
use crate::gateway::EricGateway;
use crate::native::NativeEric;

/// Loads and binds the engine library on `connect`
#[derive(Debug, Clone, Default)]
pub struct NativeGatewayFactory {
    config: EricConfig,
}

impl NativeGatewayFactory {
    pub fn new(config: EricConfig) -> Self {
        Self { config }
    }

    /// Factory configured from `ELSTER_ERIC_LIB` and `ELSTER_ERIC_LOG_DIR`
    pub fn from_env() -> Self {
        Self::new(EricConfig::from_env())
    }

    pub fn config(&self) -> &EricConfig {
        &self.config
    }
}

impl GatewayFactory for NativeGatewayFactory {
    fn connect(&self) -> Result<Box<dyn SubmissionGateway>> {
        // The plugin directory is checked before the library is opened.
        let plugin_dir = self.config.plugin_dir()?;
        let api = NativeEric::load(&self.config)?;
        let gateway = EricGateway::new(api, &plugin_dir, self.config.log_dir())?;
        Ok(Box::new(gateway))
    }
}
