use std::cell::Cell;
use std::rc::Rc;

use super::*;

#[test]
fn only_latest_ticket_is_current() {
    let gate = DebounceGate::new();
    let first = gate.arm();
    let second = gate.arm();
    assert!(!gate.is_current(first));
    assert!(gate.is_current(second));
}

#[test]
fn clones_share_generation() {
    let gate = DebounceGate::new();
    let ticket = gate.arm();
    gate.clone().arm();
    assert!(!gate.is_current(ticket));
}

#[test]
fn native_debounce_runs_immediately() {
    let gate = DebounceGate::new();
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    debounce(&gate, 300, move || h.set(h.get() + 1));
    assert_eq!(hits.get(), 1);
}
