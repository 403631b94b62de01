//! `EricApi` over the loaded engine library

use std::ffi::{CStr, c_void};
use std::ptr;

use elsterctl_core::errors::Result;

use crate::api::{BufferHandle, CertificateHandle, EricApi, ProcessCall};
use crate::bindings::EricBindings;
use crate::config::EricConfig;
use crate::ffi::{EncryptionParameters, ENCRYPTION_PARAMETERS_VERSION};
use crate::gateway::release_buffer;
use crate::loader::EricLibrary;

/// The engine library bound to its entry points
///
/// The bindings point into `_library`, which is kept alive for as long as
/// this value exists.
pub struct NativeEric {
    bindings: EricBindings,
    _library: EricLibrary,
}

impl NativeEric {
    /// Load the configured library and bind its symbols
    ///
    /// # Errors
    ///
    /// Returns `ElsterError::LibraryLoad` if the library cannot be opened and
    /// `ElsterError::SymbolResolution` if a mandatory entry point is missing.
    pub fn load(config: &EricConfig) -> Result<Self> {
        let library = EricLibrary::open(config.library_path()?)?;
        // SAFETY: the candidate names are the engine's exported C entry
        // points, declared with matching prototypes in `ffi`.
        let bindings = unsafe { EricBindings::resolve(&library) }?;
        Ok(Self {
            bindings,
            _library: library,
        })
    }
}

fn opt_ptr(value: Option<&CStr>) -> *const std::ffi::c_char {
    value.map_or(ptr::null(), CStr::as_ptr)
}

impl EricApi for NativeEric {
    fn initialise(&self, plugin_dir: &CStr, log_dir: Option<&CStr>) -> i32 {
        // SAFETY: both arguments are NUL-terminated and outlive the call.
        unsafe { (self.bindings.initialise)(plugin_dir.as_ptr(), opt_ptr(log_dir)) }
    }

    fn open_certificate(&self, path: &CStr) -> std::result::Result<CertificateHandle, i32> {
        let mut handle = 0;
        let mut pin_support = 0;
        // SAFETY: the out-pointers are valid locals and `path` is NUL-terminated.
        let code = unsafe {
            (self.bindings.open_certificate)(&mut handle, &mut pin_support, path.as_ptr())
        };
        if code == 0 {
            Ok(CertificateHandle(handle))
        } else {
            Err(code)
        }
    }

    fn close_certificate(&self, handle: CertificateHandle) -> Option<i32> {
        let close = self.bindings.close_certificate?;
        // SAFETY: `handle` was issued by `open_certificate` and is closed once.
        Some(unsafe { close(handle.0) })
    }

    fn create_buffer(&self) -> Option<BufferHandle> {
        // SAFETY: no arguments; a null return is handled below.
        let raw = unsafe { (self.bindings.buffer_create)() };
        (!raw.is_null()).then(|| BufferHandle::from_raw(raw))
    }

    fn buffer_content(&self, buffer: BufferHandle) -> Option<String> {
        // SAFETY: `buffer` is a live engine buffer.
        let content = unsafe { (self.bindings.buffer_content)(buffer.as_raw()) };
        if content.is_null() {
            return None;
        }
        // SAFETY: the engine returns a NUL-terminated string owned by the
        // buffer; it is copied before the buffer can be freed.
        let text = unsafe { CStr::from_ptr(content) };
        Some(text.to_string_lossy().into_owned())
    }

    fn free_buffer(&self, buffer: BufferHandle) -> Option<i32> {
        let free = self.bindings.buffer_free?;
        // SAFETY: `buffer` is a live engine buffer released exactly once.
        Some(unsafe { free(buffer.as_raw()) })
    }

    fn process(
        &self,
        call: &ProcessCall<'_>,
        eric_response: BufferHandle,
        server_response: BufferHandle,
    ) -> i32 {
        let encryption = EncryptionParameters {
            version: ENCRYPTION_PARAMETERS_VERSION,
            certificate_handle: call.certificate.0,
            pin: call.pin.expose().as_ptr(),
        };
        // SAFETY: every pointer refers to data borrowed for the duration of
        // the call; print parameters and transfer handle are optional and null.
        unsafe {
            (self.bindings.process)(
                call.payload.as_ptr(),
                call.data_type_version.as_ptr(),
                call.flags.bits(),
                ptr::null::<c_void>(),
                &encryption,
                ptr::null_mut(),
                eric_response.as_raw(),
                server_response.as_raw(),
            )
        }
    }

    fn shutdown(&self) -> i32 {
        // SAFETY: no arguments.
        unsafe { (self.bindings.shutdown)() }
    }

    fn error_text(&self, result_code: i32) -> Option<String> {
        let lookup = self.bindings.error_text?;
        let buffer = self.create_buffer()?;
        // SAFETY: `buffer` is a live engine buffer.
        let code = unsafe { lookup(result_code, buffer.as_raw()) };
        let text = if code == 0 {
            self.buffer_content(buffer)
        } else {
            None
        };
        release_buffer(self, buffer, "error_text");
        text
    }
}
