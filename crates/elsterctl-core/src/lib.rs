//! elsterctl Core - domain layer for ELSTER submissions
//!
//! This crate provides:
//! - Transfer mode resolution with the forced-test policy
//! - The submission request/result model and the gateway contract the
//!   engine adapter implements
//! - PIN sources, environment configuration keys and template rendering
//! - The error and logging facilities shared by every other crate

pub mod config;
pub mod errors;
pub mod gateway;
pub mod logging_facility;
pub mod model;
pub mod policy;
pub mod secrets;
pub mod template;
pub mod transfer_mode;

pub use elsterctl_core_types as types;

// Re-export commonly used types
pub use errors::{ElsterError, ExError, ExErrorKind, Result};
pub use gateway::{GatewayFactory, SubmissionGateway};
pub use model::{EngineSubmission, SubmissionRequest, SubmissionResult};
pub use policy::{EnvForcePolicy, FixedForcePolicy, ForcePolicySource};
pub use secrets::{EnvSecretSource, SecretSource, StaticSecretSource};
pub use transfer_mode::{resolve_transfer_mode, resolve_with_policy, TransferMode};
