//! Root application component with routing and context providers.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
    hooks::use_location,
};

use crate::components::{notice_bar::NoticeBar, session_badge::SessionBadge};
use crate::config::ClientConfig;
use crate::guard::{Decision, NavigationGuard};
use crate::net::api::ApiClient;
use crate::notify::BrowserNotifier;
use crate::pages::{RoutePage, page_registry};
use crate::routes::RouteName;
use crate::state::notices::NoticeState;
use crate::state::session::{SessionContext, SessionState};

/// The guard as wired into the browser app.
pub type AppGuard = NavigationGuard<ApiClient, BrowserNotifier>;

/// Root application component.
///
/// Provides the session, notice and view-registry contexts, builds the one
/// API client and guard, and sets up client-side routing behind the
/// [`NavigationGate`].
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_env().unwrap_or_else(|error| {
        tracing::warn!(%error, "invalid client config; using defaults");
        ClientConfig::default()
    });

    let api = match ApiClient::new(&config) {
        Ok(api) => api,
        Err(error) => {
            tracing::error!(%error, "cannot build API client");
            return view! { <p class="app-error">{format!("Backend unavailable: {error}")}</p> }.into_any();
        }
    };

    let session = RwSignal::new(SessionState::default());
    let notices = RwSignal::new(NoticeState::default());
    let table = config.route_table();

    provide_context(session);
    provide_context(notices);
    provide_context(page_registry(&table));

    let guard = Arc::new(NavigationGuard::new(
        api,
        BrowserNotifier::new(notices),
        SessionContext::new(),
        table,
        config.guard_policy,
    ));

    view! {
        <Title text="Trainer"/>

        <Router>
            <header class="app-header">
                <SessionBadge/>
            </header>
            <NoticeBar/>
            <NavigationGate guard=guard session=session>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=|| view! { <RoutePage name=RouteName::Home/> }/>
                    <Route path=StaticSegment("login") view=|| view! { <RoutePage name=RouteName::Login/> }/>
                    <Route path=StaticSegment("register") view=|| view! { <RoutePage name=RouteName::Register/> }/>
                    <Route path=StaticSegment("start") view=|| view! { <RoutePage name=RouteName::Start/> }/>
                    <Route
                        path=(StaticSegment("start"), StaticSegment("param"))
                        view=|| view! { <RoutePage name=RouteName::Param/> }
                    />
                    <Route path=StaticSegment("train") view=|| view! { <RoutePage name=RouteName::Train/> }/>
                    <Route
                        path=(StaticSegment("train"), StaticSegment("finish"))
                        view=|| view! { <RoutePage name=RouteName::TrainFinish/> }
                    />
                    <Route path=StaticSegment("test") view=|| view! { <RoutePage name=RouteName::Test/> }/>
                </Routes>
            </NavigationGate>
        </Router>
    }
    .into_any()
}

/// What the navigation gate shows for the current location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateView {
    /// No decision for the current path yet.
    Pending,
    /// The current path was allowed; mount the routed view.
    Children,
    Redirect(String),
}

/// Pick the gate's view from the latest resolved check.
///
/// `outcome` is the path a check ran for and its decision. A decision for
/// any other path is stale: the location has moved on and its own check is
/// still in flight, so nothing may render until that one resolves.
#[must_use]
pub fn gate_view(current_path: &str, outcome: Option<&(String, Decision)>) -> GateView {
    match outcome {
        Some((path, decision)) if path == current_path => match decision {
            Decision::Allow => GateView::Children,
            Decision::Redirect(to) => GateView::Redirect(to.clone()),
            Decision::Superseded => GateView::Pending,
        },
        _ => GateView::Pending,
    }
}

/// Runs the guard on every location change and renders `children` only once
/// the current navigation is allowed.
///
/// Refused navigations render a `<Redirect>`; while the check for the current
/// path is in flight (or was superseded by a newer one) a placeholder is
/// shown, even if an earlier path was allowed.
#[component]
pub fn NavigationGate(guard: Arc<AppGuard>, session: RwSignal<SessionState>, children: ChildrenFn) -> impl IntoView {
    let pathname = use_location().pathname;
    let previous = StoredValue::new(None::<String>);

    let outcome = LocalResource::new(move || {
        let guard = guard.clone();
        let to = pathname.get();
        async move {
            let from = previous.get_value();
            let decision = guard.guard_path(&to, from.as_deref()).await;
            if decision != Decision::Superseded {
                session.set(guard.session().snapshot());
            }
            if decision.is_allowed() {
                previous.set_value(Some(to.clone()));
            }
            (to, decision)
        }
    });

    let state = Memo::new(move |_| gate_view(&pathname.get(), outcome.get().as_ref()));
    provide_context(state);

    view! {
        {move || match state.get() {
            GateView::Children => children(),
            GateView::Redirect(to) => view! { <Redirect path=to/> }.into_any(),
            GateView::Pending => view! { <p class="nav-gate__pending">"Checking session..."</p> }.into_any(),
        }}
    }
}
