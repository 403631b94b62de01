#![allow(clippy::unwrap_used, clippy::expect_used)]

use elsterctl_core::errors::ElsterError;
use elsterctl_core::logging_facility::test_capture::init_test_capture;
use elsterctl_core::types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND, FIELD_RESULT_CODE,
};
use elsterctl_core::{log_op_end, log_op_error, log_op_start, log_transition};

#[test]
fn test_log_op_start_and_end() {
    let capture = init_test_capture();
    let op_name = "logging_it_start_end_1";

    log_op_start!(op_name, transfer_mode = "test");
    log_op_end!(op_name, duration_ms = 42, result_code = 0);

    capture.assert_event_exists(op_name, EVENT_START);
    let end = capture
        .events_for_op(op_name)
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .expect("end event");
    assert_eq!(end.fields.get(FIELD_DURATION_MS), Some(&"42".to_string()));
    assert_eq!(end.fields.get(FIELD_RESULT_CODE), Some(&"0".to_string()));
}

#[test]
fn test_log_op_error_carries_code_and_result_code() {
    let capture = init_test_capture();
    let op_name = "logging_it_error_2";

    let err = ElsterError::Engine {
        message: "ERiC processing failed".to_string(),
        result_code: 610301200,
    };
    log_op_error!(op_name, err, duration_ms = 7);

    // still usable after logging
    assert_eq!(err.result_code(), Some(610301200));

    let events = capture.events_for_op(op_name);
    let error_event = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event");
    assert_eq!(
        error_event.fields.get(FIELD_ERR_CODE),
        Some(&"ERR_ENGINE".to_string())
    );
    assert_eq!(
        error_event.fields.get(FIELD_RESULT_CODE),
        Some(&"610301200".to_string())
    );
    assert_eq!(
        error_event.fields.get(FIELD_ERR_KIND),
        Some(&"Engine".to_string())
    );
    assert!(error_event.fields.contains_key(FIELD_COMPONENT));
}

#[test]
fn test_validation_error_has_no_result_code_field() {
    let capture = init_test_capture();
    let op_name = "logging_it_error_3";

    let err = ElsterError::MissingTestMarker;
    log_op_error!(op_name, err, duration_ms = 1);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].fields.get(FIELD_ERR_CODE),
        Some(&"ERR_VALIDATION".to_string())
    );
    assert!(!events[0].fields.contains_key(FIELD_RESULT_CODE));
}

#[test]
fn test_transitions_are_recorded_in_order() {
    let capture = init_test_capture();
    let op_name = "logging_it_transitions_4";

    log_transition!(op_name, "initialised");
    log_transition!(op_name, "certificate_opened", certificate_handle = 7u32);
    log_transition!(op_name, "cleaned_up");

    assert_eq!(
        capture.transitions(op_name),
        vec!["initialised", "certificate_opened", "cleaned_up"]
    );
}
