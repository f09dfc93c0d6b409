use super::*;

#[test]
fn close_clears_slot_and_returns_focus_target() {
    let mut slot = ModalSlot::default();
    slot.open("product", Some(FocusMark(7)));
    assert!(slot.is_open());
    assert_eq!(slot.current(), Some(&"product"));

    assert_eq!(slot.close(), Some(FocusMark(7)));
    assert!(!slot.is_open());
    assert_eq!(slot.close(), None);
}

#[test]
fn opening_replaces_but_keeps_first_focus_target() {
    let mut slot = ModalSlot::default();
    slot.open("view", Some(FocusMark(1)));
    slot.open("edit", Some(FocusMark(2)));
    assert_eq!(slot.current(), Some(&"edit"));
    assert_eq!(slot.close(), Some(FocusMark(1)));
}

#[test]
fn reopen_after_close_takes_new_target() {
    let mut slot = ModalSlot::default();
    slot.open(1, Some(FocusMark(1)));
    slot.close();
    slot.open(2, Some(FocusMark(3)));
    assert_eq!(slot.close(), Some(FocusMark(3)));
}

#[test]
fn current_mut_edits_open_modal() {
    let mut slot = ModalSlot::default();
    slot.open(String::from("a"), None);
    if let Some(m) = slot.current_mut() {
        m.push('b');
    }
    assert_eq!(slot.current().map(String::as_str), Some("ab"));
}
