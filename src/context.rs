//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;
use gloo_timers::future::TimeoutFuture;

use crate::config::TOAST_DURATION_MS;
use crate::models::{FormMode, ToastKind};
use crate::prompt_host::PromptHost;
use crate::store::{store_dismiss_toast, store_push_toast, TodoStore};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload todos from backend
    set_reload_trigger: WriteSignal<u32>,
    /// Open form, if any
    pub form: RwSignal<Option<FormMode>>,
    /// Pending scope / confirm prompts
    pub prompts: PromptHost,
    store: TodoStore,
}

impl AppContext {
    pub fn new(set_reload_trigger: WriteSignal<u32>, store: TodoStore) -> Self {
        Self {
            set_reload_trigger,
            form: RwSignal::new(None),
            prompts: PromptHost::new(),
            store,
        }
    }

    /// Trigger a reload of todos
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn open_form(&self, mode: FormMode) {
        self.form.set(Some(mode));
    }

    pub fn close_form(&self) {
        self.form.set(None);
    }

    /// Show a toast that dismisses itself
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let store = self.store;
        let id = store_push_toast(&store, kind, message.into());
        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            store_dismiss_toast(&store, id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(ToastKind::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(ToastKind::Info, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(ToastKind::Error, message);
    }
}
