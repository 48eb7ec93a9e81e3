//! Route pages and the registry that produces them.
//!
//! Every route renders through [`RoutePage`], which looks its view up in the
//! [`ViewRegistry`] context. Factories only run when the router actually
//! mounts the route, i.e. after the navigation gate has allowed it.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod shell;

use leptos::prelude::*;

use crate::app::GateView;
use crate::routes::{RouteName, RouteTable, ViewRegistry};
use shell::PageShell;

/// Build the view registry for every route in `table`.
pub fn page_registry(table: &RouteTable) -> ViewRegistry<AnyView> {
    table.entries().iter().fold(ViewRegistry::new(), |registry, entry| {
        let name = entry.name;
        let title = entry.meta.title;
        registry.with(name, move || view! { <PageShell name=name title=title/> }.into_any())
    })
}

/// Resolve and render the registered view for `name`.
///
/// Inside a navigation gate nothing is resolved unless the gate currently
/// allows the location; the gate remounts this page once it does.
#[component]
pub fn RoutePage(name: RouteName) -> impl IntoView {
    if let Some(gate) = use_context::<Memo<GateView>>() {
        if gate.get_untracked() != GateView::Children {
            return view! { <p class="nav-gate__pending">"Checking session..."</p> }.into_any();
        }
    }

    let registry = expect_context::<ViewRegistry<AnyView>>();
    registry.resolve(name).unwrap_or_else(|| {
        tracing::warn!(route = %name, "no view registered");
        view! { <p class="page-missing">"Page not found."</p> }.into_any()
    })
}
