//! Submission lifecycle against the engine
//!
//! One call to `submit_with_certificate` walks the engine through
//!
//! ```text
//! initialised -> certificate_opened -> buffers_allocated -> processed -> cleaned_up
//! ```
//!
//! Every acquired resource is held by a guard, so release happens on every
//! exit path, including early returns and unwinding. Guards drop in reverse
//! order of acquisition: response buffers first, then the certificate
//! handle. Engine shutdown runs last and its result code is inspected.
//!
//! Error priority: the first real failure of the session is reported. A
//! failing shutdown is reported only when the session itself succeeded.

use std::ffi::{CStr, CString};
use std::path::Path;
use std::time::Instant;

use elsterctl_core::errors::Result;
use elsterctl_core::gateway::SubmissionGateway;
use elsterctl_core::model::{EngineSubmission, SubmissionResult};
use elsterctl_core::types::Sensitive;
use elsterctl_core::{log_op_end, log_op_error, log_op_start, log_transition};

use crate::api::{BufferHandle, CertificateHandle, EricApi, ProcessCall, ProcessFlags};
use crate::errors;

const OP: &str = "submit_with_certificate";

/// Submission gateway driving an `EricApi` implementation
pub struct EricGateway<A: EricApi> {
    api: A,
    plugin_dir: CString,
    log_dir: Option<CString>,
}

impl<A: EricApi> EricGateway<A> {
    /// # Errors
    ///
    /// Returns `ElsterError::Validation` if a directory path contains a NUL byte.
    pub fn new(api: A, plugin_dir: &Path, log_dir: Option<&Path>) -> Result<Self> {
        Ok(Self {
            api,
            plugin_dir: path_to_c(plugin_dir, "plugin directory")?,
            log_dir: log_dir
                .map(|dir| path_to_c(dir, "log directory"))
                .transpose()?,
        })
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn run(&self, submission: &EngineSubmission) -> Result<SubmissionResult> {
        let payload = str_to_c(&submission.payload, "XML payload")?;
        let version = str_to_c(&submission.data_type_version, "data type version")?;
        let certificate_path = path_to_c(&submission.certificate_path, "certificate path")?;
        let pin = Sensitive::new(str_to_c(submission.pin.expose(), "certificate PIN")?);
        let flags = ProcessFlags::for_submission(submission.validate_before_send);

        let engine = InitialisedEngine::start(&self.api, &self.plugin_dir, self.log_dir.as_deref())?;

        let session = run_session(&self.api, &certificate_path, |certificate| ProcessCall {
            payload: &payload,
            data_type_version: &version,
            flags,
            certificate,
            pin: &pin,
        });

        let shutdown_code = engine.shutdown();
        log_transition!(OP, "cleaned_up", shutdown_code = shutdown_code);

        match session {
            Ok(_) if shutdown_code != 0 => Err(errors::engine_error(
                &self.api,
                "ERiC shutdown failed",
                shutdown_code,
            )),
            outcome => outcome,
        }
    }
}

impl<A: EricApi> SubmissionGateway for EricGateway<A> {
    fn submit_with_certificate(&self, submission: &EngineSubmission) -> Result<SubmissionResult> {
        let start = Instant::now();
        log_op_start!(
            OP,
            data_type_version = %submission.data_type_version,
            validate = submission.validate_before_send,
        );

        let outcome = self.run(submission);
        let duration_ms = start.elapsed().as_millis() as u64;
        match &outcome {
            Ok(result) => {
                log_op_end!(OP, duration_ms = duration_ms, result_code = result.result_code);
            }
            Err(err) => {
                log_op_error!(OP, *err, duration_ms = duration_ms);
            }
        }
        outcome
    }
}

/// Certificate open through process; the caller handles shutdown
fn run_session<'a, A, F>(api: &A, certificate_path: &CStr, call: F) -> Result<SubmissionResult>
where
    A: EricApi + ?Sized,
    F: FnOnce(CertificateHandle) -> ProcessCall<'a>,
{
    let certificate = CertificateGuard::open(api, certificate_path)?;
    log_transition!(OP, "certificate_opened");

    let eric_response = ResponseBuffer::allocate(api)?;
    let server_response = ResponseBuffer::allocate(api)?;
    log_transition!(OP, "buffers_allocated");

    let call = call(certificate.handle);
    let result_code = api.process(&call, eric_response.handle, server_response.handle);
    log_transition!(OP, "processed", result_code = result_code);

    if result_code != 0 {
        tracing::debug!(
            component = module_path!(),
            op = OP,
            result_code = result_code,
            eric_response = ?eric_response.read().ok(),
            server_response = ?server_response.read().ok(),
        );
        return Err(errors::engine_error(api, "ERiC processing failed", result_code));
    }

    Ok(SubmissionResult {
        result_code,
        transfer_ticket: None,
        eric_response_xml: eric_response.read()?,
        server_response_xml: server_response.read()?,
    })
}

/// Initialised engine; shut down explicitly or on drop, exactly once
struct InitialisedEngine<'a, A: EricApi + ?Sized> {
    api: &'a A,
    shut_down: bool,
}

impl<'a, A: EricApi + ?Sized> InitialisedEngine<'a, A> {
    fn start(api: &'a A, plugin_dir: &CStr, log_dir: Option<&CStr>) -> Result<Self> {
        let code = api.initialise(plugin_dir, log_dir);
        if code != 0 {
            return Err(errors::engine_error(api, "ERiC initialisation failed", code));
        }
        log_transition!(OP, "initialised");
        Ok(Self {
            api,
            shut_down: false,
        })
    }

    fn shutdown(mut self) -> i32 {
        self.shut_down = true;
        self.api.shutdown()
    }
}

impl<A: EricApi + ?Sized> Drop for InitialisedEngine<'_, A> {
    fn drop(&mut self) {
        if !self.shut_down {
            self.shut_down = true;
            let code = self.api.shutdown();
            tracing::warn!(
                component = module_path!(),
                op = OP,
                shutdown_code = code,
                "engine shut down during unwind",
            );
        }
    }
}

struct CertificateGuard<'a, A: EricApi + ?Sized> {
    api: &'a A,
    handle: CertificateHandle,
}

impl<'a, A: EricApi + ?Sized> CertificateGuard<'a, A> {
    fn open(api: &'a A, path: &CStr) -> Result<Self> {
        let handle = api
            .open_certificate(path)
            .map_err(|code| errors::engine_error(api, "Opening the certificate failed", code))?;
        Ok(Self { api, handle })
    }
}

impl<A: EricApi + ?Sized> Drop for CertificateGuard<'_, A> {
    fn drop(&mut self) {
        match self.api.close_certificate(self.handle) {
            Some(0) | None => {}
            Some(code) => tracing::warn!(
                component = module_path!(),
                op = OP,
                result_code = code,
                "closing the certificate handle failed",
            ),
        }
    }
}

struct ResponseBuffer<'a, A: EricApi + ?Sized> {
    api: &'a A,
    handle: BufferHandle,
}

impl<'a, A: EricApi + ?Sized> ResponseBuffer<'a, A> {
    fn allocate(api: &'a A) -> Result<Self> {
        let handle = api
            .create_buffer()
            .ok_or_else(|| errors::engine_fault("ERiC did not allocate a response buffer"))?;
        Ok(Self { api, handle })
    }

    fn read(&self) -> Result<String> {
        self.api
            .buffer_content(self.handle)
            .ok_or_else(|| errors::engine_fault("Could not read ERiC response buffer"))
    }
}

impl<A: EricApi + ?Sized> Drop for ResponseBuffer<'_, A> {
    fn drop(&mut self) {
        release_buffer(self.api, self.handle, OP);
    }
}

/// Free `buffer`; a nonzero code is logged, a missing free symbol ignored
pub(crate) fn release_buffer<A: EricApi + ?Sized>(api: &A, buffer: BufferHandle, op: &str) {
    match api.free_buffer(buffer) {
        Some(0) | None => {}
        Some(code) => tracing::warn!(
            component = module_path!(),
            op = op,
            result_code = code,
            "freeing a response buffer failed",
        ),
    }
}

fn str_to_c(value: &str, what: &str) -> Result<CString> {
    CString::new(value).map_err(|_| errors::interior_nul(what))
}

fn path_to_c(path: &Path, what: &str) -> Result<CString> {
    str_to_c(&path.to_string_lossy(), what)
}
