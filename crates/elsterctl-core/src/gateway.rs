//! Capability contract between the orchestrator and the submission engine

use crate::errors::Result;
use crate::model::{EngineSubmission, SubmissionResult};

/// Submits one validated payload through the engine
pub trait SubmissionGateway {
    /// Run one complete engine lifecycle for `submission`
    ///
    /// # Errors
    ///
    /// Returns `ElsterError::Engine` for nonzero engine result codes and
    /// `ElsterError::EngineFault` when a response cannot be read back.
    fn submit_with_certificate(&self, submission: &EngineSubmission) -> Result<SubmissionResult>;
}

/// Produces a gateway on demand
///
/// Loading the engine is deferred to `connect` so requests that fail
/// validation never load or bind the library.
pub trait GatewayFactory {
    /// # Errors
    ///
    /// Returns `ElsterError::LibraryLoad` or `ElsterError::SymbolResolution`
    /// when the engine cannot be bound.
    fn connect(&self) -> Result<Box<dyn SubmissionGateway>>;
}
