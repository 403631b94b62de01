//! elsterctl App - orchestration of submission commands
//!
//! Sits between the CLI and the engine adapter: validates every
//! precondition of a submission before any engine resource is touched, then
//! hands the prepared submission to a `SubmissionGateway`.

pub mod commands;

pub use commands::message_send::MessageSendService;
