//! Core types shared across elsterctl facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Correlation**: `RequestId` stamped on every submission attempt
//! - **Sensitive data**: `Sensitive<T>` marker for certificate PINs
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::RequestId;
pub use sensitive::Sensitive;
