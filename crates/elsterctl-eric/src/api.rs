//! Safe capability contract of the submission engine
//!
//! `EricApi` is the seam between the lifecycle state machine in `gateway`
//! and the native library. `NativeEric` implements it over resolved
//! symbols; tests implement it with an in-process fake.

use std::ffi::{c_void, CStr, CString};

use elsterctl_core::types::Sensitive;

/// Certificate handle issued by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertificateHandle(pub u32);

/// Engine-managed response buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferHandle(*mut c_void);

impl BufferHandle {
    /// Wrap a raw engine buffer pointer
    pub fn from_raw(raw: *mut c_void) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> *mut c_void {
        self.0
    }
}

/// Processing flag bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessFlags(u32);

impl ProcessFlags {
    /// Validate the payload before sending
    pub const VALIDATE: u32 = 1 << 1;
    /// Send the payload to the backend
    pub const SEND: u32 = 1 << 2;

    /// Flags for a submission: `SEND` always, `VALIDATE` only when requested
    pub fn for_submission(validate_first: bool) -> Self {
        let mut bits = Self::SEND;
        if validate_first {
            bits |= Self::VALIDATE;
        }
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn validates(self) -> bool {
        self.0 & Self::VALIDATE != 0
    }

    pub fn sends(self) -> bool {
        self.0 & Self::SEND != 0
    }
}

/// Arguments of one process call, already converted to C strings
pub struct ProcessCall<'a> {
    pub payload: &'a CStr,
    pub data_type_version: &'a CStr,
    pub flags: ProcessFlags,
    pub certificate: CertificateHandle,
    pub pin: &'a Sensitive<CString>,
}

/// Engine operations used by the submission lifecycle
///
/// Mandatory operations return the engine's integer result code (0 is
/// success). Optional operations return `None` when the library does not
/// export them.
pub trait EricApi {
    /// Initialise the engine with its plugin directory and optional log directory
    fn initialise(&self, plugin_dir: &CStr, log_dir: Option<&CStr>) -> i32;

    /// Open a certificate handle for the keystore at `path`
    fn open_certificate(&self, path: &CStr) -> Result<CertificateHandle, i32>;

    /// Close a certificate handle
    fn close_certificate(&self, handle: CertificateHandle) -> Option<i32>;

    /// Allocate a response buffer; `None` if the engine returned no buffer
    fn create_buffer(&self) -> Option<BufferHandle>;

    /// Read a buffer back as UTF-8, replacing invalid bytes; `None` if unreadable
    fn buffer_content(&self, buffer: BufferHandle) -> Option<String>;

    /// Release a response buffer
    fn free_buffer(&self, buffer: BufferHandle) -> Option<i32>;

    /// Validate and/or send a payload, writing responses into the two buffers
    fn process(
        &self,
        call: &ProcessCall<'_>,
        eric_response: BufferHandle,
        server_response: BufferHandle,
    ) -> i32;

    /// Shut the engine down
    fn shutdown(&self) -> i32;

    /// Human-readable text for a result code; `None` if unavailable
    fn error_text(&self, result_code: i32) -> Option<String>;
}
