//! `message send`: validate a request and submit it through the engine
//!
//! Preconditions are checked in a fixed order and the first failure is
//! returned:
//!
//! 1. the XML payload file exists
//! 2. the certificate file exists
//! 3. the named PIN source is set and non-empty
//! 4. the payload is readable
//! 5. in test mode, the payload carries the `<Testmerker>` element
//!
//! The gateway factory is only connected once all of them hold, so a
//! rejected request never loads the engine.

use std::fs;
use std::time::Instant;

use elsterctl_core::errors::{ElsterError, Result};
use elsterctl_core::gateway::GatewayFactory;
use elsterctl_core::model::{EngineSubmission, SubmissionRequest, SubmissionResult};
use elsterctl_core::secrets::SecretSource;
use elsterctl_core::transfer_mode::TEST_MARKER_ELEMENT;
use elsterctl_core::{log_op_end, log_op_error, log_op_start};
use elsterctl_core_types::RequestId;

const OP: &str = "message_send";

/// Send orchestrator
pub struct MessageSendService<'a> {
    gateway_factory: &'a dyn GatewayFactory,
    secrets: &'a dyn SecretSource,
}

impl<'a> MessageSendService<'a> {
    pub fn new(gateway_factory: &'a dyn GatewayFactory, secrets: &'a dyn SecretSource) -> Self {
        Self {
            gateway_factory,
            secrets,
        }
    }

    /// Validate `request` and submit it
    ///
    /// Validation failures and engine failures share the `ElsterError` type.
    ///
    /// # Errors
    ///
    /// - `XmlNotFound`, `CertificateNotFound`, `PinNotSet`, `MissingTestMarker`:
    ///   a precondition does not hold; the engine was not touched
    /// - `Io`: the payload exists but cannot be read
    /// - `LibraryLoad`, `SymbolResolution`: the engine could not be bound
    /// - `Engine`, `EngineFault`: the engine rejected or mishandled the submission
    pub fn send(&self, request: &SubmissionRequest) -> Result<SubmissionResult> {
        let request_id = RequestId::new();
        let span = tracing::info_span!("message_send", request_id = %request_id);
        let _guard = span.enter();

        log_op_start!(
            OP,
            transfer_mode = request.transfer_mode().as_str(),
            xml_path = %request.xml_path().display(),
        );
        let start = Instant::now();

        let result = self.send_impl(request);
        let duration_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(outcome) => {
                log_op_end!(OP, duration_ms = duration_ms, result_code = outcome.result_code);
            }
            Err(e) => {
                log_op_error!(OP, *e, duration_ms = duration_ms);
            }
        }

        result
    }

    fn send_impl(&self, request: &SubmissionRequest) -> Result<SubmissionResult> {
        let submission = self.prepare(request)?;

        let gateway = self.gateway_factory.connect()?;
        gateway.submit_with_certificate(&submission)
    }

    /// Check every precondition and build the engine submission
    fn prepare(&self, request: &SubmissionRequest) -> Result<EngineSubmission> {
        if !request.xml_path().exists() {
            return Err(ElsterError::XmlNotFound {
                path: request.xml_path().to_path_buf(),
            });
        }
        if !request.certificate_path().exists() {
            return Err(ElsterError::CertificateNotFound {
                path: request.certificate_path().to_path_buf(),
            });
        }

        let pin = self
            .secrets
            .lookup(request.pin_source())
            .filter(|pin| !pin.is_empty())
            .ok_or_else(|| ElsterError::PinNotSet {
                pin_source: request.pin_source().to_string(),
            })?;

        let payload = fs::read_to_string(request.xml_path())
            .map_err(|e| ElsterError::io("read_xml", e))?;

        if request.transfer_mode().requires_test_marker() && !payload.contains(TEST_MARKER_ELEMENT)
        {
            return Err(ElsterError::MissingTestMarker);
        }

        Ok(EngineSubmission {
            payload,
            data_type_version: request.data_type_version().to_string(),
            certificate_path: request.certificate_path().to_path_buf(),
            pin,
            validate_before_send: request.validate_before_send(),
        })
    }
}
