//! Canonical logging macros

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use elsterctl_core::log_op_start;
/// log_op_start!("message_send");
/// log_op_start!("message_send", transfer_mode = "test");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use elsterctl_core::log_op_end;
/// log_op_end!("message_send", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `$err` is borrowed, so the error can still be returned afterwards.
///
/// # Example
///
/// ```
/// # use elsterctl_core::{log_op_error, errors::ElsterError};
/// let err = ElsterError::MissingTestMarker;
/// log_op_error!("message_send", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = (&$err).into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            result_code = ex_err.result_code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = (&$err).into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            result_code = ex_err.result_code(),
            $($field)*
        );
    }};
}

/// Log an engine lifecycle state transition
///
/// # Example
///
/// ```
/// # use elsterctl_core::log_transition;
/// log_transition!("submit_with_certificate", "initialised");
/// ```
#[macro_export]
macro_rules! log_transition {
    ($op:expr, $state:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_TRANSITION,
            state = $state,
        );
    };
    ($op:expr, $state:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_TRANSITION,
            state = $state,
            $($field)*
        );
    };
}
