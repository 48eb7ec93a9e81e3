use super::*;

fn decided(path: &str, decision: Decision) -> Option<(String, Decision)> {
    Some((path.to_owned(), decision))
}

#[test]
fn nothing_resolved_is_pending() {
    assert_eq!(gate_view("/", None), GateView::Pending);
}

#[test]
fn allow_for_current_path_renders_children() {
    assert_eq!(gate_view("/train", decided("/train", Decision::Allow).as_ref()), GateView::Children);
}

#[test]
fn earlier_allow_does_not_render_new_path() {
    // `/` was allowed, the location moved to `/train` and its check is still open.
    let outcome = decided("/", Decision::Allow);
    assert_eq!(gate_view("/train", outcome.as_ref()), GateView::Pending);
}

#[test]
fn redirect_for_current_path_redirects() {
    let outcome = decided("/train", Decision::Redirect("/login".into()));
    assert_eq!(gate_view("/train", outcome.as_ref()), GateView::Redirect("/login".into()));
}

#[test]
fn stale_redirect_is_ignored() {
    let outcome = decided("/train", Decision::Redirect("/login".into()));
    assert_eq!(gate_view("/", outcome.as_ref()), GateView::Pending);
}

#[test]
fn superseded_stays_pending() {
    assert_eq!(gate_view("/test", decided("/test", Decision::Superseded).as_ref()), GateView::Pending);
}
