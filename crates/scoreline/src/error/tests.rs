//! Unit tests for board error types.

use rstest::rstest;

use super::*;

#[rstest]
#[case::out_of_range(ValidationError::RowOutOfRange { row: 7, size: 3 }, "7")]
#[case::capacity(ValidationError::RowBeyondCapacity { row: 15, max: 14 }, "14")]
#[case::too_many(ValidationError::TooManyLines { count: 16, max: 15 }, "16")]
#[case::line_length(ValidationError::LineTooLong { index: 2, length: 31, max: 30 }, "31")]
#[case::title_length(ValidationError::TitleTooLong { length: 40, max: 32 }, "32")]
#[case::labels(ValidationError::LabelCountMismatch { lines: 3, labels: 2 }, "3 lines")]
fn validation_message_includes_numeric_context(
    #[case] error: ValidationError,
    #[case] expected: &str,
) {
    let message = error.to_string();
    assert!(
        message.contains(expected),
        "expected {expected} in message: {message}"
    );
}

#[test]
fn validation_errors_are_retryable() {
    let error = BoardError::from(ValidationError::TooManyLines { count: 20, max: 15 });
    assert!(error.is_retryable());
    assert!(!error.is_fatal());
}

#[test]
fn deleted_error_names_the_board() {
    let error = BoardError::Deleted {
        board: BoardId::new("sl-test"),
    };
    assert!(error.to_string().contains("sl-test"));
    assert!(error.is_fatal());
}

#[test]
fn transport_errors_are_fatal() {
    let error = BoardError::from(TransportError::delivery("connection reset"));
    assert!(error.is_fatal());
    assert!(error.to_string().contains("connection reset"));
}

#[test]
fn rejected_error_names_packet_kind() {
    let error = TransportError::Rejected {
        packet: "set_team",
        message: "queue full".into(),
    };
    let message = error.to_string();
    assert!(message.contains("set_team"), "message: {message}");
    assert!(message.contains("queue full"), "message: {message}");
}

#[test]
fn errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BoardError>();
}
