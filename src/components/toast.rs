//! Toast Host Component
//!
//! Stack of transient notifications; each dismisses itself after a delay
//! (see `AppContext::notify`) or on click.

use leptos::prelude::*;

use crate::store::{store_dismiss_toast, use_todo_store, TodoStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_todo_store();

    view! {
        <div class="toast-host">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() on:click=move |_| store_dismiss_toast(&store, id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
