use axum::http::HeaderValue;

use spendbot::infrastructure::observability::{REQUEST_ID_HEADER, RequestId};

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[test]
fn given_caller_id_when_read_from_header_then_reused_trimmed() {
    let header = HeaderValue::from_static(" trace-42 ");

    assert_eq!(RequestId::from_header(Some(&header)).as_str(), "trace-42");
}

#[test]
fn given_no_header_when_read_then_generates_uuid() {
    let first = RequestId::from_header(None);
    let second = RequestId::from_header(None);

    assert_eq!(first.as_str().len(), 36);
    assert_ne!(first, second);
}

#[test]
fn given_oversized_header_when_read_then_replaced() {
    let long = "x".repeat(200);
    let header = HeaderValue::from_str(&long).unwrap();

    assert_ne!(RequestId::from_header(Some(&header)).as_str(), long);
}
