use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.success("Saved", "ok");
    let b = state.error("Failed", "nope");
    assert!(b > a);
    assert_eq!(state.toasts.len(), 2);
    assert_eq!(state.toasts[1].variant, ToastVariant::Destructive);
    assert_eq!(state.toasts[1].description.as_deref(), Some("nope"));
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push("Logged out", None, ToastVariant::Default);
    let b = state.push("Other", None, ToastVariant::Default);
    state.dismiss(a);
    assert_eq!(state.toasts.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b]);
    state.dismiss(999);
    assert_eq!(state.toasts.len(), 1);
}

#[test]
fn ids_are_not_reused_after_dismiss() {
    let mut state = ToastState::default();
    let a = state.success("one", "1");
    state.dismiss(a);
    let b = state.success("two", "2");
    assert_ne!(a, b);
}

#[test]
fn variant_class_marks_destructive() {
    assert_eq!(ToastVariant::Default.class(), "toast");
    assert!(ToastVariant::Destructive.class().contains("toast--destructive"));
}
