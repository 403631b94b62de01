use std::path::{Path, PathBuf};

use elsterctl_core_types::Sensitive;
use serde::Serialize;

use crate::transfer_mode::TransferMode;

/// Input for one `message send` invocation
///
/// Built once per invocation and consumed by the orchestrator. Fields are
/// private so a request cannot change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    xml_path: PathBuf,
    certificate_path: PathBuf,
    pin_source: String,
    data_type_version: String,
    transfer_mode: TransferMode,
    validate_before_send: bool,
}

impl SubmissionRequest {
    pub fn new(
        xml_path: impl Into<PathBuf>,
        certificate_path: impl Into<PathBuf>,
        pin_source: impl Into<String>,
        data_type_version: impl Into<String>,
        transfer_mode: TransferMode,
        validate_before_send: bool,
    ) -> Self {
        Self {
            xml_path: xml_path.into(),
            certificate_path: certificate_path.into(),
            pin_source: pin_source.into(),
            data_type_version: data_type_version.into(),
            transfer_mode,
            validate_before_send,
        }
    }

    pub fn xml_path(&self) -> &Path {
        &self.xml_path
    }

    pub fn certificate_path(&self) -> &Path {
        &self.certificate_path
    }

    /// Name of the secret holding the certificate PIN
    pub fn pin_source(&self) -> &str {
        &self.pin_source
    }

    pub fn data_type_version(&self) -> &str {
        &self.data_type_version
    }

    pub fn transfer_mode(&self) -> TransferMode {
        self.transfer_mode
    }

    pub fn validate_before_send(&self) -> bool {
        self.validate_before_send
    }
}

/// Everything the engine gateway needs for one submission
///
/// Produced by the orchestrator only after every precondition held.
#[derive(Debug, Clone)]
pub struct EngineSubmission {
    pub payload: String,
    pub data_type_version: String,
    pub certificate_path: PathBuf,
    pub pin: Sensitive<String>,
    pub validate_before_send: bool,
}

/// Outcome of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionResult {
    /// Engine result code; 0 is success
    pub result_code: i32,
    /// Backend correlation id, when the engine reported one
    pub transfer_ticket: Option<String>,
    /// Engine-side response XML
    pub eric_response_xml: String,
    /// Server-side response XML
    pub server_response_xml: String,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        self.result_code == 0
    }
}
