#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Lifecycle transitions emitted by `EricGateway`
//!
//! Kept in its own binary so no other test emits events for the same op.

mod support;

use elsterctl_core::gateway::SubmissionGateway;
use elsterctl_core::logging_facility::init_test_capture;
use elsterctl_core::types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ERR_CODE, FIELD_RESULT_CODE,
};
use support::{gateway, submission, FakeEric};
use tracing::Level;

const OP: &str = "submit_with_certificate";

#[test]
fn test_transitions_error_event_and_cleanup_warnings() {
    let capture = init_test_capture();

    gateway(FakeEric::default())
        .submit_with_certificate(&submission(true))
        .unwrap();
    gateway(FakeEric {
        process_code: 610001226,
        ..FakeEric::default()
    })
    .submit_with_certificate(&submission(true))
    .unwrap_err();

    let expected: Vec<String> = [
        "initialised",
        "certificate_opened",
        "buffers_allocated",
        "processed",
        "cleaned_up",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let mut twice = expected.clone();
    twice.extend(expected);
    assert_eq!(capture.transitions(OP), twice);

    capture.assert_event_exists(OP, EVENT_START);
    capture.assert_event_exists(OP, EVENT_END);
    let errors = capture
        .events_for_op(OP)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect::<Vec<_>>();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].fields.get(FIELD_ERR_CODE).unwrap(), "ERR_ENGINE");
    assert_eq!(errors[0].fields.get(FIELD_RESULT_CODE).unwrap(), "610001226");

    // a failing free is logged per buffer and the submission still succeeds
    gateway(FakeEric {
        free_code: 610001003,
        ..FakeEric::default()
    })
    .submit_with_certificate(&submission(true))
    .unwrap();
    let warnings = capture.count_events(|e| {
        e.level == Level::WARN
            && e.op.as_deref() == Some(OP)
            && e.fields.get(FIELD_RESULT_CODE).map(String::as_str) == Some("610001003")
    });
    assert_eq!(warnings, 2);
}
