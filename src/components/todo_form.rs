//! Todo Form Modal
//!
//! Create / edit form. Submitting runs the matching flow; editing a
//! recurring todo may pause on the scope prompt before anything is sent.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_recurrence::flow::{self, EditOutcome};
use todo_recurrence::{
    auto_correct_end_date, DraftError, Field, FlowError, Priority, RepeatDraft, TodoDraft,
    MAX_MEMO_CHARS, MAX_TITLE_CHARS,
};

use crate::api::RestTodoGateway;
use crate::components::RepeatFields;
use crate::context::AppContext;
use crate::components::REPEAT_EXPIRED_NOTICE;
use crate::models::{format_date_input, parse_date_input, today, FormMode, ToastKind};

#[component]
pub fn TodoFormModal(mode: FormMode) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let initial = match &mode {
        FormMode::Create => TodoDraft::default(),
        FormMode::Edit(todo) => TodoDraft::from_todo(todo),
    };
    let initial_repeat = initial.repeat().cloned();
    let expired_series = match &mode {
        FormMode::Edit(todo) => todo.repeat_rule().is_some_and(|rule| rule.is_expired(today())),
        FormMode::Create => false,
    };
    let repeat = initial_repeat.clone().unwrap_or_default();

    let title = RwSignal::new(initial.title.clone());
    let memo = RwSignal::new(initial.memo.clone());
    let priority = RwSignal::new(initial.priority);
    let due_input = RwSignal::new(format_date_input(initial.due_date()));
    let repeat_enabled = RwSignal::new(initial_repeat.is_some());
    let repeat_type = RwSignal::new(repeat.repeat_type);
    let interval = RwSignal::new(repeat.interval_value);
    let week_days = RwSignal::new(repeat.week_days);
    let end_date = RwSignal::new(repeat.end_date);
    let errors = RwSignal::new(None::<DraftError>);
    let submitting = RwSignal::new(false);

    let due_date = Signal::derive(move || parse_date_input(&due_input.get()));

    let field_error = move |field: Field| {
        errors.with(|e| e.as_ref().and_then(|e| e.message_for(field)).map(str::to_string))
    };

    // Keep the end date at or after the minimum while the rule changes
    Effect::new(move |_| {
        if !repeat_enabled.get() {
            return;
        }
        let corrected = auto_correct_end_date(
            due_date.get(),
            repeat_type.get(),
            interval.get(),
            week_days.get(),
            end_date.get_untracked(),
        );
        if let Some(corrected) = corrected {
            end_date.set(Some(corrected));
            ctx.notify(ToastKind::Warning, format!("종료일이 {}(으)로 조정되었습니다.", corrected));
        }
    });

    let build_draft = move || {
        let repeat = repeat_enabled.get_untracked().then(|| RepeatDraft {
            repeat_type: repeat_type.get_untracked(),
            interval_value: interval.get_untracked(),
            week_days: week_days.get_untracked(),
            end_date: end_date.get_untracked(),
        });
        TodoDraft::new(
            title.get_untracked(),
            memo.get_untracked(),
            priority.get_untracked(),
            due_date.get_untracked(),
            repeat,
        )
    };

    let heading = mode.title();
    let submit_label = mode.submit_label();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let draft = build_draft();
        let mode = mode.clone();
        submitting.set(true);
        spawn_local(async move {
            let gateway = RestTodoGateway;
            let result = match &mode {
                FormMode::Create => flow::submit_create(&gateway, &draft)
                    .await
                    .map(|_| Some("할 일이 추가되었습니다.")),
                FormMode::Edit(todo) => flow::submit_edit(&gateway, &ctx.prompts, todo, &draft)
                    .await
                    .map(|outcome| match outcome {
                        EditOutcome::Updated(_) => Some("할 일이 수정되었습니다."),
                        EditOutcome::Cancelled => None,
                    }),
            };
            submitting.set(false);
            match result {
                Ok(Some(message)) => {
                    errors.set(None);
                    ctx.success(message);
                    ctx.close_form();
                    ctx.reload();
                }
                Ok(None) => ctx.info("수정이 취소되었습니다."),
                Err(FlowError::Validation(err)) => {
                    tracing::debug!("form rejected: {}", err);
                    errors.set(Some(err));
                }
                Err(FlowError::Api(err)) => {
                    tracing::warn!("saving todo failed: {}", err);
                    ctx.error(err.to_string());
                    ctx.reload();
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| ctx.close_form()>
            <form class="modal todo-form" on:click=|ev| ev.stop_propagation() on:submit=on_submit>
                <h2>{heading}</h2>
                {expired_series.then(|| view! { <p class="modal-warning">{REPEAT_EXPIRED_NOTICE}</p> })}

                <label class="field">
                    <span>"제목"</span>
                    <input
                        type="text"
                        placeholder="할 일을 입력하세요"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <span class="char-count">
                        {move || format!("{}/{}", title.with(|t| t.trim().chars().count()), MAX_TITLE_CHARS)}
                    </span>
                </label>
                {move || field_error(Field::Title).map(|msg| view! { <p class="field-error">{msg}</p> })}

                <label class="field">
                    <span>"메모"</span>
                    <textarea
                        prop:value=move || memo.get()
                        on:input=move |ev| memo.set(event_target_value(&ev))
                    />
                    <span class="char-count">
                        {move || format!("{}/{}", memo.with(|m| m.chars().count()), MAX_MEMO_CHARS)}
                    </span>
                </label>
                {move || field_error(Field::Memo).map(|msg| view! { <p class="field-error">{msg}</p> })}

                <label class="field">
                    <span>"우선순위"</span>
                    <select on:change=move |ev| priority.set(Priority::from_key(&event_target_value(&ev)))>
                        {Priority::ALL.iter().map(|&level| view! {
                            <option value=level.as_key() selected=move || priority.get() == level>
                                {level.label()}
                            </option>
                        }).collect_view()}
                    </select>
                </label>

                <label class="field">
                    <span>"마감일"</span>
                    <input
                        type="date"
                        prop:value=move || due_input.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            // no due date, no recurrence
                            if parse_date_input(&value).is_none() {
                                repeat_enabled.set(false);
                            }
                            due_input.set(value);
                        }
                    />
                </label>

                <label class="field checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || repeat_enabled.get()
                        disabled=move || due_date.get().is_none()
                        on:change=move |ev| repeat_enabled.set(event_target_checked(&ev))
                    />
                    <span>"반복"</span>
                    <Show when=move || due_date.get().is_none()>
                        <span class="field-hint">"마감일을 먼저 선택하세요"</span>
                    </Show>
                </label>

                <Show when=move || repeat_enabled.get()>
                    <RepeatFields
                        due_date=due_date
                        repeat_type=repeat_type
                        interval=interval
                        week_days=week_days
                        end_date=end_date
                        interval_error=Signal::derive(move || field_error(Field::Interval))
                        end_date_error=Signal::derive(move || field_error(Field::EndDate))
                    />
                </Show>

                <div class="modal-actions">
                    <button type="button" class="cancel-btn" on:click=move |_| ctx.close_form()>"취소"</button>
                    <button type="submit" class="confirm-btn" disabled=move || submitting.get()>
                        {submit_label}
                    </button>
                </div>
            </form>
        </div>
    }
}
