//! Stack of dismissible non-blocking notices.

use leptos::prelude::*;

use crate::state::notices::{NoticeLevel, NoticeState};

#[component]
pub fn NoticeBar() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="notice-bar">
            {move || {
                notices
                    .get()
                    .items
                    .into_iter()
                    .map(|notice| {
                        let id = notice.id;
                        let class = match notice.level {
                            NoticeLevel::Info => "notice notice--info",
                            NoticeLevel::Warning => "notice notice--warning",
                        };
                        view! {
                            <div class=class>
                                <span class="notice__message">{notice.message}</span>
                                <button class="notice__dismiss" on:click=move |_| notices.update(|n| n.dismiss(id))>
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
