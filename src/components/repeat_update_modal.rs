//! Repeat Update Modal
//!
//! Asks how far an edit to a recurring todo reaches.

use leptos::prelude::*;
use todo_recurrence::{ChangeScope, ChangeScopeRequest};

use crate::components::modal::cancel_on_escape;
use crate::context::AppContext;

const CHOICES: [ChangeScope; 2] = [ChangeScope::All, ChangeScope::AfterThis];

/// Renders whenever an edit is waiting on a scope choice
#[component]
pub fn RepeatUpdateModal() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let slot = ctx.prompts.change_scope;

    view! {
        {move || slot.query().map(|request| view! { <RepeatUpdateDialog request=request /> })}
    }
}

#[component]
fn RepeatUpdateDialog(request: ChangeScopeRequest) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let slot = ctx.prompts.change_scope;
    let selected = RwSignal::new(ChangeScope::AfterThis);
    cancel_on_escape(move || slot.cancel());
    let summary = request.summary();

    view! {
        <div class="modal-overlay" on:click=move |_| slot.cancel()>
            <div class="modal scope-modal" on:click=|ev| ev.stop_propagation()>
                <h2>"반복 일정 수정"</h2>
                <p class="scope-summary">{summary}</p>

                <div class="scope-options">
                    {CHOICES.iter().map(|&scope| view! {
                        <label class=move || if selected.get() == scope { "scope-option active" } else { "scope-option" }>
                            <input
                                type="radio"
                                name="change-scope"
                                prop:checked=move || selected.get() == scope
                                on:change=move |_| selected.set(scope)
                            />
                            <span class="scope-label">{scope.label()}</span>
                            <span class="scope-description">{scope.description()}</span>
                        </label>
                    }).collect_view()}
                </div>

                {move || request.warning(selected.get()).map(|warning| view! {
                    <p class="modal-warning">{warning}</p>
                })}

                <div class="modal-actions">
                    <button class="cancel-btn" on:click=move |_| slot.cancel()>"취소"</button>
                    <button class="confirm-btn" on:click=move |_| slot.resolve(selected.get_untracked())>"확인"</button>
                </div>
            </div>
        </div>
    }
}
