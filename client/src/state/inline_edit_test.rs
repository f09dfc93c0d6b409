use futures::executor::block_on;

use super::*;
use crate::net::mock::MockApi;
use crate::state::toast::ToastKind;

fn rows() -> Vec<Instrument> {
    vec![
        Instrument {
            id: 1,
            display_name: "SVB Phenocam".to_owned(),
            status: Some("Active".to_owned()),
            ..Instrument::default()
        },
        Instrument {
            id: 2,
            display_name: "SVB Sensor".to_owned(),
            ..Instrument::default()
        },
    ]
}

#[test]
fn begin_captures_current_value() {
    let editor = begin(&rows()[0], EditableField::Status);
    assert_eq!(editor.draft, "Active");
    let editor = begin(&rows()[1], EditableField::MeasurementStatus);
    assert_eq!(editor.draft, "");
}

#[test]
fn apply_writes_optimistically() {
    let mut rows = rows();
    let editor = CellEditor {
        row_id: 1,
        field: EditableField::DisplayName,
        draft: "  Tower cam ".to_owned(),
    };
    let pending = apply(&mut rows, &editor).unwrap();
    assert_eq!(rows[0].display_name, "Tower cam");
    assert_eq!(pending.previous.as_deref(), Some("SVB Phenocam"));
    assert_eq!(pending.payload(), serde_json::json!({"display_name": "Tower cam"}));
}

#[test]
fn unchanged_value_is_not_sent() {
    let mut rows = rows();
    let editor = begin(&rows[0], EditableField::Status);
    assert_eq!(apply(&mut rows, &editor), Err(EditRejected::Unchanged));
}

#[test]
fn blank_display_name_is_rejected() {
    let mut rows = rows();
    let editor = CellEditor {
        row_id: 2,
        field: EditableField::DisplayName,
        draft: "   ".to_owned(),
    };
    assert!(matches!(apply(&mut rows, &editor), Err(EditRejected::Invalid(_))));
    assert_eq!(rows[1].display_name, "SVB Sensor");
}

#[test]
fn clearing_a_status_sends_null() {
    let mut rows = rows();
    let editor = CellEditor {
        row_id: 1,
        field: EditableField::Status,
        draft: String::new(),
    };
    let pending = apply(&mut rows, &editor).unwrap();
    assert_eq!(rows[0].status, None);
    assert_eq!(pending.payload(), serde_json::json!({"status": null}));
}

#[test]
fn missing_row_is_rejected() {
    let mut rows = rows();
    let editor = CellEditor {
        row_id: 99,
        field: EditableField::Status,
        draft: "Inactive".to_owned(),
    };
    assert_eq!(apply(&mut rows, &editor), Err(EditRejected::MissingRow(99)));
}

#[test]
fn server_error_on_patch_reverts_cell_and_toasts() {
    let api = MockApi::new();
    api.fail("patch_instrument", ApiError::from_status(500, ""));
    let mut rows = rows();
    let mut toasts = ToastQueue::default();

    let editor = CellEditor {
        row_id: 1,
        field: EditableField::Status,
        draft: "Maintenance".to_owned(),
    };
    let pending = apply(&mut rows, &editor).unwrap();
    assert_eq!(rows[0].status.as_deref(), Some("Maintenance"));

    let result = block_on(send(&api, &pending));
    settle(&mut rows, &mut toasts, &pending, result);

    assert_eq!(rows[0].status.as_deref(), Some("Active"));
    let toast = toasts.latest().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert!(toast.message.contains("server error"));
    assert_eq!(api.ops(), vec!["patch_instrument"]);
    assert_eq!(api.calls()[0].id, Some(1));
}

#[test]
fn successful_patch_keeps_value() {
    let api = MockApi::new();
    let mut rows = rows();
    let mut toasts = ToastQueue::default();
    let editor = CellEditor {
        row_id: 2,
        field: EditableField::MeasurementStatus,
        draft: "Operational".to_owned(),
    };
    let pending = apply(&mut rows, &editor).unwrap();
    let result = block_on(send(&api, &pending));
    settle(&mut rows, &mut toasts, &pending, result);
    assert_eq!(rows[1].measurement_status.as_deref(), Some("Operational"));
    assert_eq!(toasts.latest().map(|t| t.kind), Some(ToastKind::Success));
}
