//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_recurrence::TodoResponse;

use crate::models::{Toast, ToastKind};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TodoState {
    /// Todos as last loaded from the backend
    pub todos: Vec<TodoResponse>,
    /// A list request is in flight
    pub loading: bool,
    /// Last load failure, shown above the list
    pub load_error: Option<String>,
    /// Visible notifications, oldest first
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
}

/// Type alias for the store
pub type TodoStore = Store<TodoState>;

/// Get the app store from context
pub fn use_todo_store() -> TodoStore {
    expect_context::<TodoStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_todos(store: &TodoStore, todos: Vec<TodoResponse>) {
    store.todos().set(todos);
    store.load_error().set(None);
}

/// Replace a todo in place after an update
pub fn store_update_todo(store: &TodoStore, updated: TodoResponse) {
    if let Some(todo) = store.todos().write().iter_mut().find(|t| t.todo_id == updated.todo_id) {
        *todo = updated;
    }
}

/// Push a toast and return its id
pub fn store_push_toast(store: &TodoStore, kind: ToastKind, message: String) -> u32 {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id.wrapping_add(1));
    store.toasts().write().push(Toast { id, kind, message });
    id
}

pub fn store_dismiss_toast(store: &TodoStore, id: u32) {
    store.toasts().write().retain(|toast| toast.id != id);
}
