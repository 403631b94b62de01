use std::path::PathBuf;

use thiserror::Error;

use crate::transfer_mode::TransferMode;

/// Result type alias using ElsterError
pub type Result<T> = std::result::Result<T, ElsterError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every `ElsterError` maps onto exactly one kind. The kind carries a stable
/// code that log events and the CLI use to classify failures without
/// matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A precondition of the submission is not met (missing file, PIN, marker)
    Validation,
    /// The forced-test policy rejected the resolved transfer mode
    PolicyDenied,
    /// A required engine entry point is not exported by the library
    SymbolResolution,
    /// The engine returned a nonzero result code or misbehaved during a call
    Engine,
    /// The engine library could not be located or opened
    LibraryLoad,
    /// Invalid configuration value (unknown transfer mode, bad path)
    Config,
    /// Local filesystem failure
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Validation => "ERR_VALIDATION",
            ExErrorKind::PolicyDenied => "ERR_POLICY_DENIED",
            ExErrorKind::SymbolResolution => "ERR_SYMBOL_RESOLUTION",
            ExErrorKind::Engine => "ERR_ENGINE",
            ExErrorKind::LibraryLoad => "ERR_LIBRARY_LOAD",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Flattened view of an `ElsterError` used by the logging macros: a kind,
/// the operation it happened in, a message and the engine result code when
/// there is one.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    message: String,
    result_code: Option<i32>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            message: String::new(),
            result_code: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the engine result code
    pub fn with_result_code(mut self, code: i32) -> Self {
        self.result_code = Some(code);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the engine result code, if any
    pub fn result_code(&self) -> Option<i32> {
        self.result_code
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(code) = self.result_code {
            write!(f, " (result_code: {})", code)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for elsterctl operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElsterError {
    // ===== Validation Errors =====
    /// Payload file does not exist
    #[error("XML file not found: {}", .path.display())]
    XmlNotFound { path: PathBuf },

    /// Certificate file does not exist
    #[error("Certificate file not found: {}", .path.display())]
    CertificateNotFound { path: PathBuf },

    /// The named PIN source is unset or empty
    #[error("Certificate PIN not set. Export environment variable: {pin_source}")]
    PinNotSet { pin_source: String },

    /// Test mode payload lacks the test marker element
    #[error("Test transfer mode requires a <Testmerker> in the XML transfer header.")]
    MissingTestMarker,

    /// Any other caller-correctable input problem
    #[error("{message}")]
    Validation { message: String },

    // ===== Policy Errors =====
    /// Forced-test policy is active but the resolved mode is not `test`
    #[error(
        "Transfer mode '{requested}' is not allowed while {policy_source} is active. \
         Use --transfer-mode test or --test-transfer-mode."
    )]
    ForcedTestMode {
        requested: TransferMode,
        policy_source: String,
    },

    // ===== Engine Binding Errors =====
    /// Engine library missing or not loadable
    #[error("{message}")]
    LibraryLoad { message: String },

    /// No candidate name of a required entry point is exported
    #[error("Could not resolve ERiC symbol for '{logical_name}'. Tried: {}", .tried.join(", "))]
    SymbolResolution {
        logical_name: String,
        tried: Vec<String>,
    },

    // ===== Engine Call Errors =====
    /// Nonzero result code from a mandatory engine call
    #[error("{message} (result_code={result_code})")]
    Engine { message: String, result_code: i32 },

    /// Engine call misbehaved without a result code (null buffer, unreadable response)
    #[error("{message}")]
    EngineFault { message: String },

    // ===== Generic Errors =====
    /// Unknown transfer mode token
    #[error("Invalid transfer mode '{value}': expected 'prod' or 'test'")]
    InvalidTransferMode { value: String },

    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Local filesystem failure
    #[error("I/O error during {op}: {message}")]
    Io { op: String, message: String },
}

impl ElsterError {
    /// Build an I/O error for the named operation
    pub fn io(op: impl Into<String>, err: std::io::Error) -> Self {
        ElsterError::Io {
            op: op.into(),
            message: err.to_string(),
        }
    }

    /// Canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        ExError::from(self).kind()
    }

    /// Engine result code, for engine errors
    pub fn result_code(&self) -> Option<i32> {
        match self {
            ElsterError::Engine { result_code, .. } => Some(*result_code),
            _ => None,
        }
    }
}

/// Conversion from ElsterError to ExError
impl From<&ElsterError> for ExError {
    fn from(err: &ElsterError) -> Self {
        let message = err.to_string();
        match err {
            ElsterError::XmlNotFound { .. }
            | ElsterError::CertificateNotFound { .. }
            | ElsterError::PinNotSet { .. } => ExError::new(ExErrorKind::Validation)
                .with_op("validate_request")
                .with_message(message),
            ElsterError::MissingTestMarker => ExError::new(ExErrorKind::Validation)
                .with_op("validate_test_marker")
                .with_message(message),
            ElsterError::Validation { .. } => {
                ExError::new(ExErrorKind::Validation).with_message(message)
            }
            ElsterError::ForcedTestMode { .. } => ExError::new(ExErrorKind::PolicyDenied)
                .with_op("resolve_transfer_mode")
                .with_message(message),
            ElsterError::LibraryLoad { .. } => ExError::new(ExErrorKind::LibraryLoad)
                .with_op("load_library")
                .with_message(message),
            ElsterError::SymbolResolution { .. } => ExError::new(ExErrorKind::SymbolResolution)
                .with_op("bind_symbols")
                .with_message(message),
            ElsterError::Engine {
                message,
                result_code,
            } => ExError::new(ExErrorKind::Engine)
                .with_message(message.clone())
                .with_result_code(*result_code),
            ElsterError::EngineFault { .. } => {
                ExError::new(ExErrorKind::Engine).with_message(message)
            }
            ElsterError::InvalidTransferMode { .. } | ElsterError::Config { .. } => {
                ExError::new(ExErrorKind::Config).with_message(message)
            }
            ElsterError::Io { op, .. } => ExError::new(ExErrorKind::Io)
                .with_op(op.clone())
                .with_message(message),
        }
    }
}

impl From<ElsterError> for ExError {
    fn from(err: ElsterError) -> Self {
        ExError::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display_includes_result_code() {
        let err = ElsterError::Engine {
            message: "ERiC processing failed: Detailed text".to_string(),
            result_code: 610001226,
        };

        assert_eq!(
            err.to_string(),
            "ERiC processing failed: Detailed text (result_code=610001226)"
        );
        assert_eq!(err.result_code(), Some(610001226));
    }

    #[test]
    fn test_symbol_resolution_lists_candidates() {
        let err = ElsterError::SymbolResolution {
            logical_name: "initialize".to_string(),
            tried: vec![
                "EricInitialisiere".to_string(),
                "ericapi_initialize".to_string(),
            ],
        };

        assert_eq!(
            err.to_string(),
            "Could not resolve ERiC symbol for 'initialize'. Tried: EricInitialisiere, ericapi_initialize"
        );
    }

    #[test]
    fn test_forced_test_mode_names_remediation() {
        let err = ElsterError::ForcedTestMode {
            requested: TransferMode::Production,
            policy_source: "ELSTER_FORCE_TEST_TRANSFER_MODE".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("'prod'"));
        assert!(message.contains("--transfer-mode test"));
        assert_eq!(err.kind(), ExErrorKind::PolicyDenied);
    }

    #[test]
    fn test_validation_variants_share_kind() {
        let errors = [
            ElsterError::XmlNotFound {
                path: PathBuf::from("a.xml"),
            },
            ElsterError::CertificateNotFound {
                path: PathBuf::from("c.pfx"),
            },
            ElsterError::PinNotSet {
                pin_source: "ELSTER_CERT_PIN".to_string(),
            },
            ElsterError::MissingTestMarker,
        ];

        for err in &errors {
            assert_eq!(err.kind(), ExErrorKind::Validation);
            assert_eq!(err.result_code(), None);
        }
    }

    #[test]
    fn test_ex_error_carries_result_code() {
        let err = ElsterError::Engine {
            message: "ERiC shutdown failed".to_string(),
            result_code: 610001002,
        };
        let ex: ExError = err.into();

        assert_eq!(ex.code(), "ERR_ENGINE");
        assert_eq!(ex.result_code(), Some(610001002));
        assert_eq!(
            ex.to_string(),
            "[ERR_ENGINE]: ERiC shutdown failed (result_code: 610001002)"
        );
    }

    #[test]
    fn test_io_helper() {
        let err = ElsterError::io(
            "read_xml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let ex = ExError::from(&err);
        assert_eq!(ex.kind(), ExErrorKind::Io);
        assert_eq!(ex.op(), Some("read_xml"));
    }
}
