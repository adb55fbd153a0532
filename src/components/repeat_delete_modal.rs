//! Repeat Delete Modal
//!
//! ONE_TODO / FUTURE choice for deleting a recurring todo.

use leptos::prelude::*;
use todo_recurrence::{DeleteScope, DeleteScopeSelector};

use crate::components::modal::cancel_on_escape;
use crate::context::AppContext;

const CHOICES: [DeleteScope; 2] = [DeleteScope::OneTodo, DeleteScope::Future];

#[component]
pub fn RepeatDeleteModal() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let slot = ctx.prompts.delete_scope;

    view! {
        {move || slot.is_open().then(|| view! { <RepeatDeleteDialog /> })}
    }
}

#[component]
fn RepeatDeleteDialog() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let slot = ctx.prompts.delete_scope;
    // fresh selector per prompt, so FUTURE is preselected every time
    let selector = RwSignal::new(DeleteScopeSelector::new());
    cancel_on_escape(move || slot.cancel());

    view! {
        <div class="modal-overlay" on:click=move |_| slot.cancel()>
            <div class="modal scope-modal" on:click=|ev| ev.stop_propagation()>
                <h2>"반복 일정 삭제"</h2>

                <div class="scope-options">
                    {CHOICES.iter().map(|&scope| view! {
                        <label class=move || if selector.get().selected() == scope { "scope-option active" } else { "scope-option" }>
                            <input
                                type="radio"
                                name="delete-scope"
                                prop:checked=move || selector.get().selected() == scope
                                on:change=move |_| selector.update(|s| s.select(scope))
                            />
                            <span class="scope-label">{scope.label()}</span>
                        </label>
                    }).collect_view()}
                </div>

                {move || selector.get().warning().map(|warning| view! {
                    <p class="modal-warning">{warning}</p>
                })}

                <div class="modal-actions">
                    <button class="cancel-btn" on:click=move |_| slot.cancel()>"취소"</button>
                    <button class="delete-btn" on:click=move |_| slot.resolve(selector.get_untracked().confirm())>"삭제"</button>
                </div>
            </div>
        </div>
    }
}
