// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    snake = { "create_report", ActionKind::CreateReport },
    camel = { "updateReport", ActionKind::UpdateReport },
    kebab = { "delete-report", ActionKind::DeleteReport },
    upper = { "SEND_MESSAGE", ActionKind::SendMessage },
)]
fn kind_parses_spellings(input: &str, expected: ActionKind) {
    assert_eq!(input.parse::<ActionKind>().unwrap(), expected);
}

#[test]
fn kind_rejects_unknown() {
    let err = "archive_report".parse::<ActionKind>().unwrap_err();
    assert!(matches!(err, Error::InvalidActionKind(k) if k == "archive_report"));
}

#[test]
fn delete_payload_shape() {
    let action = Action::delete_report(42);
    assert_eq!(action.payload_json().unwrap(), r#"{"id":42}"#);
    assert_eq!(action.kind_str(), "delete_report");
    assert_eq!(action.report_id(), Some(42));
}

#[test]
fn decode_restores_each_kind() {
    let actions = vec![
        Action::create_report(NewReport::new("X").with_category("safety")),
        Action::update_report(ReportPatch {
            title: Some("Y".into()),
            ..ReportPatch::new(3)
        }),
        Action::delete_report(9),
        Action::send_message(5, "hello"),
    ];

    for action in actions {
        let payload = action.payload_json().unwrap();
        let decoded = Action::decode(action.kind_str(), &payload).unwrap();
        assert_eq!(decoded, action);
    }
}

#[test]
fn decode_unknown_kind_fails() {
    let err = Action::decode("archive_report", "{}").unwrap_err();
    assert!(matches!(err, Error::InvalidActionKind(_)));
}

#[test]
fn decode_bad_payload_fails() {
    let err = Action::decode("delete_report", r#"{"oops":true}"#).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn decode_lenient_keeps_unknown_rows() {
    let action = Action::decode_lenient("archive_report", r#"{"id":1}"#);
    assert_eq!(
        action,
        Action::Unrecognized {
            kind: "archive_report".into(),
            payload: r#"{"id":1}"#.into(),
        }
    );
    assert_eq!(action.kind(), None);
    assert_eq!(action.kind_str(), "archive_report");
    assert_eq!(action.payload_json().unwrap(), r#"{"id":1}"#);
}

#[test]
fn validate_rejects_empty_title() {
    let err = Action::create_report(NewReport::new("  ")).validate().unwrap_err();
    assert!(err.to_string().contains("title"));
}

#[test]
fn validate_rejects_empty_patch() {
    let err = Action::update_report(ReportPatch::new(1)).validate().unwrap_err();
    assert!(err.to_string().contains("changes nothing"));
}

#[test]
fn validate_rejects_unrecognized() {
    let action = Action::Unrecognized {
        kind: "x".into(),
        payload: "{}".into(),
    };
    assert!(matches!(action.validate(), Err(Error::InvalidActionKind(_))));
}

#[test]
fn validate_accepts_delete() {
    Action::delete_report(1).validate().unwrap();
}
