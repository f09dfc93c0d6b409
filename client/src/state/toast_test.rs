use super::*;

#[test]
fn push_and_dismiss() {
    let mut queue = ToastQueue::default();
    let a = queue.success("Saved");
    let b = queue.error("Failed");
    assert_ne!(a, b);
    assert_eq!(queue.toasts.len(), 2);

    queue.dismiss(a);
    assert_eq!(queue.toasts.len(), 1);
    assert_eq!(queue.latest().map(|t| t.kind), Some(ToastKind::Error));

    queue.dismiss(a);
    assert_eq!(queue.toasts.len(), 1);
}

#[test]
fn oldest_toasts_drop_past_cap() {
    let mut queue = ToastQueue::default();
    for i in 0..(MAX_TOASTS + 2) {
        queue.push(ToastKind::Info, format!("t{i}"));
    }
    assert_eq!(queue.toasts.len(), MAX_TOASTS);
    assert_eq!(queue.toasts[0].message, "t2");
}

#[test]
fn kinds_have_distinct_classes() {
    assert_eq!(ToastKind::Error.css_class(), "toast toast--error");
    assert_ne!(ToastKind::Success.icon(), ToastKind::Error.icon());
}
