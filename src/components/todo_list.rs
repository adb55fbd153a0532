//! Todo List Component
//!
//! Open todos first, then by due date; todos without a due date last.

use leptos::prelude::*;
use todo_recurrence::TodoResponse;

use crate::components::TodoItem;
use crate::store::{use_todo_store, TodoStateStoreFields};

fn sorted_todos(mut todos: Vec<TodoResponse>) -> Vec<TodoResponse> {
    todos.sort_by_key(|todo| (todo.is_completed(), todo.due_date.is_none(), todo.due_date, todo.todo_id));
    todos
}

#[component]
pub fn TodoList() -> impl IntoView {
    let store = use_todo_store();
    let todos = move || sorted_todos(store.todos().get());
    let is_empty = move || !store.loading().get() && store.todos().with(|t| t.is_empty());

    view! {
        {move || store.load_error().get().map(|err| view! {
            <p class="load-error">{format!("목록을 불러오지 못했습니다: {}", err)}</p>
        })}
        <Show when=is_empty>
            <p class="empty-list">"등록된 할 일이 없습니다."</p>
        </Show>
        <ul class="todo-list">
            <For
                each=todos
                key=|todo| {
                    // every rendered field, so edits re-render the row
                    (
                        todo.todo_id,
                        todo.title.clone(),
                        todo.memo.clone(),
                        todo.priority,
                        todo.is_completed,
                        todo.due_date,
                        todo.repeat_vo.clone(),
                    )
                }
                children=move |todo| view! { <TodoItem todo=todo /> }
            />
        </ul>
    }
}
