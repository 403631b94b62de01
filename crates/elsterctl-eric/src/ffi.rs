//! Raw C declarations of the ERiC entry points used by the adapter
//!
//! Only the prototypes are declared here; nothing is linked at build time.
//! Addresses are resolved at runtime by `bindings`.

use std::ffi::{c_char, c_int, c_void};

/// Opaque response buffer handle
pub type RawBuffer = *mut c_void;
/// Certificate handle as issued by the engine
pub type RawCertificateHandle = u32;

/// Version of `EncryptionParameters` understood by current engine releases
pub const ENCRYPTION_PARAMETERS_VERSION: u32 = 3;

/// Certificate and PIN descriptor passed to the process call
#[repr(C)]
pub struct EncryptionParameters {
    pub version: u32,
    pub certificate_handle: RawCertificateHandle,
    pub pin: *const c_char,
}

pub type InitialiseFn =
    unsafe extern "C" fn(plugin_path: *const c_char, log_path: *const c_char) -> c_int;

pub type ProcessFn = unsafe extern "C" fn(
    payload: *const c_char,
    data_type_version: *const c_char,
    flags: u32,
    print_parameters: *const c_void,
    encryption_parameters: *const EncryptionParameters,
    transfer_handle: *mut c_void,
    eric_response: RawBuffer,
    server_response: RawBuffer,
) -> c_int;

pub type ShutdownFn = unsafe extern "C" fn() -> c_int;

pub type OpenCertificateFn = unsafe extern "C" fn(
    handle: *mut RawCertificateHandle,
    pin_support: *mut u32,
    path: *const c_char,
) -> c_int;

pub type CloseCertificateFn = unsafe extern "C" fn(handle: RawCertificateHandle) -> c_int;

pub type BufferCreateFn = unsafe extern "C" fn() -> RawBuffer;

pub type BufferContentFn = unsafe extern "C" fn(buffer: RawBuffer) -> *const c_char;

pub type BufferFreeFn = unsafe extern "C" fn(buffer: RawBuffer) -> c_int;

pub type ErrorTextFn = unsafe extern "C" fn(code: c_int, buffer: RawBuffer) -> c_int;
