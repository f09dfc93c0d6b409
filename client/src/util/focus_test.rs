use super::*;

#[test]
fn empty_dialog_has_no_target() {
    assert_eq!(trap_target(0, None, false), None);
}

#[test]
fn tab_from_last_wraps_to_first() {
    assert_eq!(trap_target(3, Some(2), false), Some(0));
}

#[test]
fn shift_tab_from_first_wraps_to_last() {
    assert_eq!(trap_target(3, Some(0), true), Some(2));
}

#[test]
fn middle_positions_use_browser_default() {
    assert_eq!(trap_target(3, Some(1), false), None);
    assert_eq!(trap_target(3, Some(1), true), None);
}

#[test]
fn focus_outside_enters_at_edges() {
    assert_eq!(trap_target(4, None, false), Some(0));
    assert_eq!(trap_target(4, None, true), Some(3));
}

#[test]
fn single_element_keeps_focus() {
    assert_eq!(trap_target(1, Some(0), false), Some(0));
    assert_eq!(trap_target(1, Some(0), true), Some(0));
}
