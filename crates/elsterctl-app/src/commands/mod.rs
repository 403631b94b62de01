//! Command handlers with boundary logging
//!
//! ## Logging Ownership
//!
//! The app layer owns lifecycle logging for user-facing operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The engine adapter below logs its own lifecycle transitions at debug.

pub mod message_send;
