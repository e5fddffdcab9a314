use super::*;
use serde_json::json;

// =============================================================
// records_of
// =============================================================

#[test]
fn records_of_accepts_bare_array() {
    assert_eq!(records_of(json!([{ "id": 1 }, { "id": 2 }])).len(), 2);
}

#[test]
fn records_of_unwraps_page_content() {
    let body = json!({ "content": [{ "id": 7 }], "totalElements": 1 });
    assert_eq!(records_of(body), vec![json!({ "id": 7 })]);
}

#[test]
fn records_of_other_shapes_are_empty() {
    assert!(records_of(json!({ "total": 3 })).is_empty());
    assert!(records_of(json!("nope")).is_empty());
}

// =============================================================
// record_summary
// =============================================================

#[test]
fn record_summary_prefers_name_then_title() {
    assert_eq!(record_summary(&json!({ "id": 1, "title": "Fest", "name": "CSE" })), "CSE");
    assert_eq!(record_summary(&json!({ "id": 1, "title": "Annual Fest" })), "Annual Fest");
}

#[test]
fn record_summary_skips_blank_fields() {
    assert_eq!(record_summary(&json!({ "name": "  ", "email": "s@college.edu" })), "s@college.edu");
}

#[test]
fn record_summary_falls_back_to_id() {
    assert_eq!(record_summary(&json!({ "id": 42, "marks": 88 })), "#42");
    assert_eq!(record_summary(&json!({ "id": "abc" })), "#abc");
    assert_eq!(record_summary(&json!({ "marks": 88 })), "(untitled)");
}

// =============================================================
// failure_message
// =============================================================

#[test]
fn failure_message_for_expired_session() {
    let err = ApiError::from_response(401, "");
    assert_eq!(failure_message(Section::Results, &err), AuthError::Authorization.to_string());
}

#[test]
fn failure_message_for_forbidden() {
    let err = ApiError::from_response(403, "Access Denied");
    assert_eq!(failure_message(Section::Users, &err), "You do not have access to this list.");
}

#[test]
fn failure_message_uses_server_text_or_fallback() {
    let err = ApiError::from_response(500, r#"{"message":"Database unavailable"}"#);
    assert_eq!(failure_message(Section::Notes, &err), "Database unavailable");
    let err = ApiError::Network("offline".to_owned());
    assert_eq!(failure_message(Section::Notes, &err), "Could not load notes.");
}
