//! Confirm Delete Modal
//!
//! Plain delete confirmation for todos without recurrence.

use leptos::prelude::*;

use crate::components::modal::cancel_on_escape;
use crate::context::AppContext;

#[component]
pub fn ConfirmDeleteModal() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let slot = ctx.prompts.confirm_delete;

    view! {
        {move || slot.is_open().then(|| view! { <ConfirmDeleteDialog /> })}
    }
}

/// Shows "삭제하시겠습니까?" with confirm / cancel actions
#[component]
fn ConfirmDeleteDialog() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let slot = ctx.prompts.confirm_delete;
    cancel_on_escape(move || slot.cancel());

    view! {
        <div class="modal-overlay" on:click=move |_| slot.cancel()>
            <div class="modal confirm-modal" on:click=|ev| ev.stop_propagation()>
                <p class="delete-confirm-text">"삭제하시겠습니까?"</p>
                <div class="modal-actions">
                    <button
                        class="cancel-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            slot.cancel();
                        }
                    >
                        "✗ 취소"
                    </button>
                    <button
                        class="confirm-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            slot.resolve(());
                        }
                    >
                        "✓ 삭제"
                    </button>
                </div>
            </div>
        </div>
    }
}
