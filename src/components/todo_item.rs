//! Todo Item Component
//!
//! Individual row in the todo list.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_recurrence::flow::{self, DeleteOutcome};
use todo_recurrence::{DeleteScope, TodoResponse};

use crate::api::{self, RestTodoGateway};
use crate::context::AppContext;
use crate::models::{today, FormMode};
use crate::store::{store_update_todo, use_todo_store};

/// Shown for a series whose end date has passed
pub const REPEAT_EXPIRED_NOTICE: &str = "이 일정은 반복 기간이 종료되어 더 이상 반복되지 않습니다.";

fn delete_message(outcome: DeleteOutcome) -> Option<&'static str> {
    match outcome {
        DeleteOutcome::Deleted(Some(DeleteScope::Future)) => Some("이후 반복 일정이 모두 삭제되었습니다."),
        DeleteOutcome::Deleted(_) => Some("할 일이 삭제되었습니다."),
        DeleteOutcome::Cancelled => None,
    }
}

/// A single todo row
#[component]
pub fn TodoItem(todo: TodoResponse) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_todo_store();

    let id = todo.todo_id;
    let completed = todo.is_completed();
    let rule = todo.repeat_rule();
    let repeat_label = rule.as_ref().map(|rule| rule.label());
    let repeat_expired = rule.is_some_and(|rule| rule.is_expired(today()));
    let title = todo.title.clone();
    let memo = todo.memo.clone().filter(|m| !m.trim().is_empty());
    let due_date = todo.due_date;
    let priority = todo.priority;
    let row_class = if completed { "todo-row completed" } else { "todo-row" };
    let priority_class = format!("priority-badge {}", priority.as_key());

    let toggle_target = todo.clone();
    let on_toggle = move |_| {
        let todo = toggle_target.clone();
        spawn_local(async move {
            match flow::toggle_completed(&RestTodoGateway, &todo).await {
                Ok(updated) => store_update_todo(&store, updated),
                Err(e) => {
                    tracing::warn!("[ITEM] toggle {} failed: {}", id, e);
                    ctx.error(e.to_string());
                }
            }
            ctx.reload();
        });
    };

    // Edit against the latest server copy
    let on_edit = move |_| {
        spawn_local(async move {
            match api::get_todo(id).await {
                Ok(fresh) => ctx.open_form(FormMode::Edit(fresh)),
                Err(e) => ctx.error(e.to_string()),
            }
        });
    };

    let delete_target = todo;
    let on_delete = move |_| {
        let todo = delete_target.clone();
        spawn_local(async move {
            match flow::delete_todo(&RestTodoGateway, &ctx.prompts, &todo).await {
                Ok(outcome) => {
                    if let Some(message) = delete_message(outcome) {
                        ctx.success(message);
                        ctx.reload();
                    }
                }
                Err(e) => {
                    tracing::warn!("[ITEM] delete {} failed: {}", id, e);
                    ctx.error(e.to_string());
                    ctx.reload();
                }
            }
        });
    };

    view! {
        <li class=row_class>
            <input type="checkbox" checked=completed on:change=on_toggle />

            <div class="todo-body">
                <span class="todo-title">{title}</span>
                {memo.map(|m| view! { <span class="todo-memo">{m}</span> })}
                <div class="todo-meta">
                    <span class=priority_class>{priority.label()}</span>
                    {due_date.map(|d| view! { <span class="todo-due">{d.format("%Y-%m-%d").to_string()}</span> })}
                    {repeat_label.map(|label| view! { <span class="repeat-badge">"🔁 " {label}</span> })}
                    {repeat_expired.then(|| view! {
                        <span class="expired-badge" title=REPEAT_EXPIRED_NOTICE>"반복 종료"</span>
                    })}
                </div>
            </div>

            <button class="edit-btn" on:click=on_edit>"수정"</button>
            <button class="delete-btn" on:click=on_delete>"×"</button>
        </li>
    }
}
