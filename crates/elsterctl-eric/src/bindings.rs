//! Symbol binding for the ERiC C API
//!
//! Engine releases export the same entry points under two naming schemes:
//! the native German names and an English-style alias. Each logical
//! operation has an ordered candidate list; the first exported candidate
//! wins. Resolution happens once, when `EricBindings` is built, and the
//! result is a fixed set of typed function pointers.

use std::ffi::c_void;
use std::mem;

use elsterctl_core::errors::{ElsterError, Result};

use crate::ffi::{
    BufferContentFn, BufferCreateFn, BufferFreeFn, CloseCertificateFn, ErrorTextFn,
    InitialiseFn, OpenCertificateFn, ProcessFn, ShutdownFn,
};

/// Anything that can report the address of an exported symbol
pub trait SymbolTable {
    /// Address of `name`, or `None` when it is not exported
    fn address(&self, name: &str) -> Option<*mut c_void>;
}

impl SymbolTable for libloading::Library {
    fn address(&self, name: &str) -> Option<*mut c_void> {
        // SAFETY: the symbol is read as a plain address; it is only called
        // after being cast to the prototype declared in `ffi`.
        let symbol = unsafe { self.get::<*mut c_void>(name.as_bytes()) }.ok()?;
        let address = *symbol;
        (!address.is_null()).then_some(address)
    }
}

/// Logical engine operation with its candidate symbol names, in priority order
#[derive(Debug, Clone, Copy)]
pub struct SymbolEntry {
    pub logical_name: &'static str,
    pub candidates: &'static [&'static str],
}

pub const INITIALISE: SymbolEntry = SymbolEntry {
    logical_name: "initialize",
    candidates: &["EricInitialisiere", "ericapi_initialize"],
};

pub const PROCESS: SymbolEntry = SymbolEntry {
    logical_name: "process",
    candidates: &["EricBearbeiteVorgang", "ericapi_process"],
};

pub const SHUTDOWN: SymbolEntry = SymbolEntry {
    logical_name: "shutdown",
    candidates: &["EricBeende", "ericapi_cleanup"],
};

pub const OPEN_CERTIFICATE: SymbolEntry = SymbolEntry {
    logical_name: "open_certificate",
    candidates: &["EricGetHandleToCertificate", "ericapi_get_certificate_handle"],
};

pub const CLOSE_CERTIFICATE: SymbolEntry = SymbolEntry {
    logical_name: "close_certificate",
    candidates: &["EricCloseHandleToCertificate", "ericapi_close_certificate_handle"],
};

pub const BUFFER_CREATE: SymbolEntry = SymbolEntry {
    logical_name: "buffer_create",
    candidates: &["EricRueckgabepufferErzeugen", "ericapi_buffer_create"],
};

pub const BUFFER_CONTENT: SymbolEntry = SymbolEntry {
    logical_name: "buffer_content",
    candidates: &["EricRueckgabepufferInhalt", "ericapi_buffer_content"],
};

pub const BUFFER_FREE: SymbolEntry = SymbolEntry {
    logical_name: "buffer_free",
    candidates: &["EricRueckgabepufferFreigeben", "ericapi_buffer_free"],
};

pub const ERROR_TEXT: SymbolEntry = SymbolEntry {
    logical_name: "error_text",
    candidates: &["EricHoleFehlerText", "ericapi_error_text"],
};

/// First exported candidate of `entry`, with the name that matched
fn lookup(table: &dyn SymbolTable, entry: &SymbolEntry) -> Option<(&'static str, *mut c_void)> {
    entry
        .candidates
        .iter()
        .find_map(|name| table.address(name).map(|address| (*name, address)))
}

fn resolve_required(table: &dyn SymbolTable, entry: &SymbolEntry) -> Result<*mut c_void> {
    match lookup(table, entry) {
        Some((name, address)) => {
            tracing::debug!(
                component = module_path!(),
                op = "bind_symbols",
                logical = entry.logical_name,
                symbol = name,
            );
            Ok(address)
        }
        None => Err(ElsterError::SymbolResolution {
            logical_name: entry.logical_name.to_string(),
            tried: entry.candidates.iter().map(|c| c.to_string()).collect(),
        }),
    }
}

fn resolve_optional(table: &dyn SymbolTable, entry: &SymbolEntry) -> Option<*mut c_void> {
    let found = lookup(table, entry);
    if found.is_none() {
        tracing::debug!(
            component = module_path!(),
            op = "bind_symbols",
            logical = entry.logical_name,
            "optional symbol not exported",
        );
    }
    found.map(|(_, address)| address)
}

/// Typed ERiC entry points
///
/// Mandatory: initialise, process, shutdown, certificate open, buffer
/// create and buffer content. Optional: certificate close, buffer free and
/// error text.
#[derive(Debug, Clone, Copy)]
pub struct EricBindings {
    pub(crate) initialise: InitialiseFn,
    pub(crate) process: ProcessFn,
    pub(crate) shutdown: ShutdownFn,
    pub(crate) open_certificate: OpenCertificateFn,
    pub(crate) buffer_create: BufferCreateFn,
    pub(crate) buffer_content: BufferContentFn,
    pub(crate) close_certificate: Option<CloseCertificateFn>,
    pub(crate) buffer_free: Option<BufferFreeFn>,
    pub(crate) error_text: Option<ErrorTextFn>,
}

impl EricBindings {
    /// Resolve every entry point from `table`
    ///
    /// # Safety
    ///
    /// Every address `table` returns for a candidate name must be a function
    /// with the matching prototype in `ffi`, and must stay valid for as long
    /// as the bindings are used.
    ///
    /// # Errors
    ///
    /// Returns `ElsterError::SymbolResolution` naming the first mandatory
    /// operation none of whose candidates is exported.
    pub unsafe fn resolve(table: &dyn SymbolTable) -> Result<Self> {
        let initialise = resolve_required(table, &INITIALISE)?;
        let process = resolve_required(table, &PROCESS)?;
        let shutdown = resolve_required(table, &SHUTDOWN)?;
        let open_certificate = resolve_required(table, &OPEN_CERTIFICATE)?;
        let buffer_create = resolve_required(table, &BUFFER_CREATE)?;
        let buffer_content = resolve_required(table, &BUFFER_CONTENT)?;
        let close_certificate = resolve_optional(table, &CLOSE_CERTIFICATE);
        let buffer_free = resolve_optional(table, &BUFFER_FREE);
        let error_text = resolve_optional(table, &ERROR_TEXT);

        // SAFETY: guaranteed by the caller; each address belongs to the
        // entry point whose prototype it is cast to.
        unsafe {
            Ok(Self {
                initialise: mem::transmute::<*mut c_void, InitialiseFn>(initialise),
                process: mem::transmute::<*mut c_void, ProcessFn>(process),
                shutdown: mem::transmute::<*mut c_void, ShutdownFn>(shutdown),
                open_certificate: mem::transmute::<*mut c_void, OpenCertificateFn>(
                    open_certificate,
                ),
                buffer_create: mem::transmute::<*mut c_void, BufferCreateFn>(buffer_create),
                buffer_content: mem::transmute::<*mut c_void, BufferContentFn>(buffer_content),
                close_certificate: close_certificate
                    .map(|a| mem::transmute::<*mut c_void, CloseCertificateFn>(a)),
                buffer_free: buffer_free.map(|a| mem::transmute::<*mut c_void, BufferFreeFn>(a)),
                error_text: error_text.map(|a| mem::transmute::<*mut c_void, ErrorTextFn>(a)),
            })
        }
    }
}
