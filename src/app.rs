//! Todo Master App
//!
//! Main application component: todo list, form modal and prompt modals.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{
    ConfirmDeleteModal, RepeatDeleteModal, RepeatUpdateModal, TodoFormModal, TodoList, ToastHost,
};
use crate::context::AppContext;
use crate::models::FormMode;
use crate::store::{store_set_todos, TodoState, TodoStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(TodoState::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let ctx = AppContext::new(set_reload_trigger, store);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Load todos on mount and after every mutation
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        tracing::debug!("[APP] loading todos, trigger={}", trigger);
        store.loading().set(true);
        spawn_local(async move {
            match api::list_todos().await {
                Ok(todos) => {
                    tracing::info!("[APP] loaded {} todos", todos.len());
                    store_set_todos(&store, todos);
                }
                Err(e) => {
                    tracing::warn!("[APP] loading todos failed: {}", e);
                    store.load_error().set(Some(e.to_string()));
                }
            }
            store.loading().set(false);
        });
    });

    let progress = move || {
        store.todos().with(|todos| {
            let done = todos.iter().filter(|t| t.is_completed()).count();
            format!("{} / {} 완료", done, todos.len())
        })
    };

    view! {
        <div class="app-layout">
            <main class="main-content">
                <header class="app-header">
                    <h1>"Todo Master"</h1>
                    <button class="add-btn" on:click=move |_| ctx.open_form(FormMode::Create)>
                        "+ 할 일 추가"
                    </button>
                </header>

                <TodoList />

                <p class="item-count">{progress}</p>
            </main>

            {move || ctx.form.get().map(|mode| view! { <TodoFormModal mode=mode /> })}

            <RepeatUpdateModal />
            <RepeatDeleteModal />
            <ConfirmDeleteModal />
            <ToastHost />
        </div>
    }
}
