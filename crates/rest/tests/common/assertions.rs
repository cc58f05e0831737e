//! HTTP response assertions.

use axum_test::TestResponse;
use serde_json::Value;

/// Asserts that the response has the expected status code.
pub fn assert_status(response: &TestResponse, expected: u16) {
    let actual = response.status_code().as_u16();
    assert_eq!(
        actual,
        expected,
        "Expected status {}, got {} with body {:?}",
        expected,
        actual,
        response.text()
    );
}

/// Asserts an `errorMessages` body containing `expected`.
pub fn assert_error_message(response: &TestResponse, expected: &str) {
    let messages = error_messages(response);
    assert!(
        messages.iter().any(|message| message == expected),
        "Expected error message {:?}, got {:?}",
        expected,
        messages
    );
}

/// Returns the messages of an `errorMessages` body.
pub fn error_messages(response: &TestResponse) -> Vec<String> {
    let body: Value = response.json();
    body["errorMessages"]
        .as_array()
        .expect("Expected errorMessages array")
        .iter()
        .filter_map(|message| message.as_str().map(str::to_string))
        .collect()
}

/// Asserts that the response carries no body.
pub fn assert_empty_body(response: &TestResponse) {
    assert!(
        response.as_bytes().is_empty(),
        "Expected empty body, got {:?}",
        response.text()
    );
}

/// Asserts the `Allow` header of a 405 response.
pub fn assert_allow(response: &TestResponse, expected: &str) {
    let allow = response
        .headers()
        .get("allow")
        .expect("Expected Allow header")
        .to_str()
        .expect("Allow header is ASCII");
    assert_eq!(allow, expected);
}

/// Asserts that a JSON response has the expected field value.
pub fn assert_json_field(response: &TestResponse, field: &str, expected: &str) {
    let body: Value = response.json();
    assert_eq!(
        body[field].as_str(),
        Some(expected),
        "Field {} mismatch in {}",
        field,
        body
    );
}
