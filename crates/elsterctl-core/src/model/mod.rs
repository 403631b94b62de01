//! Submission data model

pub mod submission;

pub use submission::{EngineSubmission, SubmissionRequest, SubmissionResult};
