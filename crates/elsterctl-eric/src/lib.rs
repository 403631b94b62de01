//! elsterctl ERiC - adapter for the native ELSTER submission engine
//!
//! Layers, bottom-up:
//! - `ffi`: raw C prototypes
//! - `loader` and `bindings`: open the shared library and resolve each
//!   entry point under its native or English name, once
//! - `api`: the safe `EricApi` contract, implemented by `native::NativeEric`
//! - `gateway`: the submission lifecycle with guaranteed cleanup
//! - `factory`: `GatewayFactory` that wires it all together on demand

pub mod api;
pub mod bindings;
pub mod config;
pub mod errors;
pub mod factory;
pub mod ffi;
pub mod gateway;
pub mod loader;
pub mod native;

pub use api::{BufferHandle, CertificateHandle, EricApi, ProcessCall, ProcessFlags};
pub use config::EricConfig;
pub use factory::NativeGatewayFactory;
pub use gateway::EricGateway;
pub use native::NativeEric;
