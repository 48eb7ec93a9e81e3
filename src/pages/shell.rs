//! Titled page frame shared by every route.

use leptos::prelude::*;
use leptos_meta::Title;

use crate::routes::RouteName;

/// Sets the document title and renders the page heading.
#[component]
pub fn PageShell(name: RouteName, title: &'static str) -> impl IntoView {
    view! {
        <Title text=title/>
        <section class=format!("page page--{name}")>
            <h1 class="page__title">{title}</h1>
        </section>
    }
}
