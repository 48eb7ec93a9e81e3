//! Header badge showing who the backend says is logged in.

use leptos::prelude::*;

use crate::state::session::SessionState;

/// User name plus an admin marker, or a login link when logged out.
#[component]
pub fn SessionBadge() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let user_name = move || session.get().user_name;
    let logged_in = move || session.get().is_logged_in;
    let is_admin = move || session.get().is_admin;

    view! {
        <div class="session-badge">
            <span class="session-badge__name">{user_name}</span>
            <Show when=is_admin>
                <span class="session-badge__role">"admin"</span>
            </Show>
            <Show when=move || !logged_in()>
                <a href="/login" class="session-badge__login">"Log in"</a>
            </Show>
        </div>
    }
}
