//! The single open-modal slot.
//!
//! At most one modal is open. Opening while another is up replaces it but
//! keeps the original focus mark, so closing always returns focus to whatever
//! was focused before the first dialog appeared.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

use crate::util::focus::FocusMark;

#[derive(Clone, Debug, PartialEq)]
pub struct ModalSlot<M> {
    current: Option<M>,
    return_focus: Option<FocusMark>,
}

impl<M> Default for ModalSlot<M> {
    fn default() -> Self {
        Self {
            current: None,
            return_focus: None,
        }
    }
}

impl<M> ModalSlot<M> {
    /// Show `modal`, remembering `focus` if nothing was remembered yet.
    pub fn open(&mut self, modal: M, focus: Option<FocusMark>) {
        if self.current.is_none() || self.return_focus.is_none() {
            self.return_focus = focus;
        }
        self.current = Some(modal);
    }

    /// Close the open modal, handing back the focus target to restore.
    pub fn close(&mut self) -> Option<FocusMark> {
        self.current = None;
        self.return_focus.take()
    }

    #[must_use]
    pub fn current(&self) -> Option<&M> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut M> {
        self.current.as_mut()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}
