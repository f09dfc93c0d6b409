//! Focus management for modal dialogs.
//!
//! The index math is pure; DOM queries are browser-only.

#[cfg(test)]
#[path = "focus_test.rs"]
mod focus_test;

/// Attribute tagging the element that opened a dialog.
pub const RETURN_FOCUS_ATTR: &str = "data-return-focus";

/// Handle to the element that should get focus back when a dialog closes.
///
/// The element itself stays in the DOM; the mark is a plain number so it can
/// live in reactive state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusMark(pub u64);

/// Elements a Tab press can land on inside a dialog.
pub const FOCUSABLE_SELECTOR: &str = "a[href], button:not([disabled]), input:not([disabled]), \
     select:not([disabled]), textarea:not([disabled]), [tabindex]:not([tabindex=\"-1\"])";

/// Where Tab (or Shift+Tab when `backwards`) should move within `count`
/// focusable elements, wrapping at both ends.
///
/// `None` means the browser default is fine (focus is inside and not at an
/// edge). With focus outside the dialog, the first or last element is chosen.
#[must_use]
pub fn trap_target(count: usize, current: Option<usize>, backwards: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    match (current, backwards) {
        (None, false) => Some(0),
        (None, true) => Some(last),
        (Some(0), true) => Some(last),
        (Some(i), false) if i >= last => Some(0),
        _ => None,
    }
}

/// The currently focused element, if it is an `HtmlElement`.
#[cfg(feature = "csr")]
pub fn active_element() -> Option<web_sys::HtmlElement> {
    use wasm_bindgen::JsCast;
    web_sys::window()?
        .document()?
        .active_element()?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

/// Focusable descendants of `container`, in document order.
#[cfg(feature = "csr")]
pub fn focusable_within(container: &web_sys::Element) -> Vec<web_sys::HtmlElement> {
    use wasm_bindgen::JsCast;
    let Ok(nodes) = container.query_selector_all(FOCUSABLE_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

/// Apply the trap for one Tab keydown. Returns whether focus was moved.
#[cfg(feature = "csr")]
pub fn cycle_focus(container: &web_sys::Element, backwards: bool) -> bool {
    let items = focusable_within(container);
    let active = active_element();
    let current = active
        .as_ref()
        .and_then(|a| items.iter().position(|item| item == a));
    match trap_target(items.len(), current, backwards) {
        Some(index) => {
            let _ = items[index].focus();
            true
        }
        None => false,
    }
}

/// Tag the focused element so [`restore`] can find it later.
pub fn mark_active_element() -> Option<FocusMark> {
    #[cfg(feature = "csr")]
    {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT_MARK: AtomicU64 = AtomicU64::new(1);

        let element = active_element()?;
        let mark = FocusMark(NEXT_MARK.fetch_add(1, Ordering::Relaxed));
        element.set_attribute(RETURN_FOCUS_ATTR, &mark.0.to_string()).ok()?;
        Some(mark)
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Focus the element tagged with `mark` and drop the tag.
pub fn restore(mark: FocusMark) {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;
        let selector = format!("[{RETURN_FOCUS_ATTR}=\"{}\"]", mark.0);
        let found = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(&selector).ok().flatten())
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(element) = found {
            let _ = element.remove_attribute(RETURN_FOCUS_ATTR);
            let _ = element.focus();
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = mark;
    }
}
