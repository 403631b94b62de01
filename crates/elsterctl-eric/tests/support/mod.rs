//! Recording in-process stand-in for the engine

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::{c_void, CStr};
use std::path::PathBuf;

use elsterctl_core::model::EngineSubmission;
use elsterctl_core::types::Sensitive;
use elsterctl_eric::{BufferHandle, CertificateHandle, EricApi, EricGateway, ProcessCall};

pub const CERT_HANDLE: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Initialise {
        plugin_dir: String,
        log_dir: Option<String>,
    },
    OpenCertificate(String),
    CloseCertificate(u32),
    CreateBuffer(usize),
    FreeBuffer(usize),
    Process {
        payload: String,
        data_type_version: String,
        flags: u32,
        certificate: u32,
        pin: String,
    },
    Shutdown,
    ErrorText(i32),
}

pub struct FakeEric {
    pub initialise_code: i32,
    pub certificate_code: i32,
    pub process_code: i32,
    pub shutdown_code: i32,
    pub free_code: i32,
    pub buffers_readable: bool,
    /// Number of buffers handed out before allocation returns null
    pub buffer_limit: usize,
    pub panic_on_process: bool,
    pub supports_close: bool,
    pub supports_free: bool,
    pub error_texts: HashMap<i32, String>,
    pub eric_response: String,
    pub server_response: String,
    pub calls: RefCell<Vec<Call>>,
    pub next_buffer: Cell<usize>,
    pub contents: RefCell<HashMap<usize, String>>,
}

impl Default for FakeEric {
    fn default() -> Self {
        Self {
            initialise_code: 0,
            certificate_code: 0,
            process_code: 0,
            shutdown_code: 0,
            free_code: 0,
            buffers_readable: true,
            buffer_limit: usize::MAX,
            panic_on_process: false,
            supports_close: true,
            supports_free: true,
            error_texts: HashMap::new(),
            eric_response: "<EricResponse/>".to_string(),
            server_response: "<ServerResponse/>".to_string(),
            calls: RefCell::new(Vec::new()),
            next_buffer: Cell::new(1),
            contents: RefCell::new(HashMap::new()),
        }
    }
}

impl FakeEric {
    pub fn with_error_text(mut self, code: i32, text: &str) -> Self {
        self.error_texts.insert(code, text.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Calls excluding error text lookups
    pub fn lifecycle(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::ErrorText(_)))
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

fn id(buffer: BufferHandle) -> usize {
    buffer.as_raw() as usize
}

impl EricApi for FakeEric {
    fn initialise(&self, plugin_dir: &CStr, log_dir: Option<&CStr>) -> i32 {
        self.record(Call::Initialise {
            plugin_dir: plugin_dir.to_string_lossy().into_owned(),
            log_dir: log_dir.map(|d| d.to_string_lossy().into_owned()),
        });
        self.initialise_code
    }

    fn open_certificate(&self, path: &CStr) -> Result<CertificateHandle, i32> {
        self.record(Call::OpenCertificate(path.to_string_lossy().into_owned()));
        if self.certificate_code == 0 {
            Ok(CertificateHandle(CERT_HANDLE))
        } else {
            Err(self.certificate_code)
        }
    }

    fn close_certificate(&self, handle: CertificateHandle) -> Option<i32> {
        if !self.supports_close {
            return None;
        }
        self.record(Call::CloseCertificate(handle.0));
        Some(0)
    }

    fn create_buffer(&self) -> Option<BufferHandle> {
        let next = self.next_buffer.get();
        if next > self.buffer_limit {
            return None;
        }
        self.next_buffer.set(next + 1);
        self.record(Call::CreateBuffer(next));
        Some(BufferHandle::from_raw(next as *mut c_void))
    }

    fn buffer_content(&self, buffer: BufferHandle) -> Option<String> {
        if !self.buffers_readable {
            return None;
        }
        Some(self.contents.borrow().get(&id(buffer)).cloned().unwrap_or_default())
    }

    fn free_buffer(&self, buffer: BufferHandle) -> Option<i32> {
        if !self.supports_free {
            return None;
        }
        self.record(Call::FreeBuffer(id(buffer)));
        Some(self.free_code)
    }

    fn process(
        &self,
        call: &ProcessCall<'_>,
        eric_response: BufferHandle,
        server_response: BufferHandle,
    ) -> i32 {
        self.record(Call::Process {
            payload: call.payload.to_string_lossy().into_owned(),
            data_type_version: call.data_type_version.to_string_lossy().into_owned(),
            flags: call.flags.bits(),
            certificate: call.certificate.0,
            pin: call.pin.expose().to_string_lossy().into_owned(),
        });
        if self.panic_on_process {
            panic!("engine crashed while processing");
        }
        let mut contents = self.contents.borrow_mut();
        contents.insert(id(eric_response), self.eric_response.clone());
        contents.insert(id(server_response), self.server_response.clone());
        self.process_code
    }

    fn shutdown(&self) -> i32 {
        self.record(Call::Shutdown);
        self.shutdown_code
    }

    fn error_text(&self, result_code: i32) -> Option<String> {
        self.record(Call::ErrorText(result_code));
        self.error_texts.get(&result_code).cloned()
    }
}

pub fn gateway(fake: FakeEric) -> EricGateway<FakeEric> {
    EricGateway::new(fake, &PathBuf::from("/opt/eric/plugins2"), None).unwrap()
}

pub fn submission(validate_before_send: bool) -> EngineSubmission {
    EngineSubmission {
        payload: "<Elster><Testmerker>700000004</Testmerker></Elster>".to_string(),
        data_type_version: "TH11".to_string(),
        certificate_path: PathBuf::from("/certs/test.pfx"),
        pin: Sensitive::new("123456".to_string()),
        validate_before_send,
    }
}
