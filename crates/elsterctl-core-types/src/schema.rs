//! Canonical schema constants for structured logging and events
//!
//! These constants keep log fields consistent between the orchestrator,
//! the engine gateway and the CLI.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Engine lifecycle
pub const FIELD_LIFECYCLE_STATE: &str = "state";
pub const FIELD_RESULT_CODE: &str = "result_code";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_TRANSITION: &str = "transition";
