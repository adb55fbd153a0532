//! Modal Helpers
//!
//! Shared behaviour of the prompt dialogs.

use leptos::ev;
use leptos::prelude::*;

fn is_cancel_key(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

/// Run `cancel` on Escape while the calling component is mounted
pub fn cancel_on_escape(cancel: impl Fn() + Send + Sync + 'static) {
    let handle = window_event_listener(ev::keydown, move |ev| {
        if is_cancel_key(&ev.key()) {
            cancel();
        }
    });
    on_cleanup(move || handle.remove());
}
