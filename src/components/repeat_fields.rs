//! Repeat Fields Component
//!
//! Recurrence section of the todo form: type, interval, weekdays, end date.

use chrono::NaiveDate;
use leptos::prelude::*;
use todo_recurrence::{compute_minimum_end_date, RepeatDraft, RepeatType, WeekDay, WeekDays};

use crate::models::{format_date_input, parse_date_input};

/// Label preview for the rule being edited; `None` while the rule is invalid
fn preview_label(repeat: RepeatDraft) -> Option<String> {
    repeat.into_rule().ok().map(|rule| rule.label())
}

fn interval_unit(repeat_type: RepeatType) -> &'static str {
    match repeat_type {
        RepeatType::Daily => "일마다",
        RepeatType::Weekly => "주마다",
        RepeatType::Monthly => "개월마다",
    }
}

/// Weekday set to preselect when switching to weekly: the due date's weekday.
/// Only on an actual type change, so re-clicking weekly leaves a rule untouched.
fn seed_week_days(
    current: RepeatType,
    selected: RepeatType,
    week_days: WeekDays,
    due_date: Option<NaiveDate>,
) -> Option<WeekDays> {
    if current == selected || selected != RepeatType::Weekly || !week_days.is_empty() {
        return None;
    }
    due_date.map(|due| WeekDays::empty().with(WeekDay::of(due)))
}

/// Recurrence inputs bound to the form's signals
#[component]
pub fn RepeatFields(
    #[prop(into)] due_date: Signal<Option<NaiveDate>>,
    repeat_type: RwSignal<RepeatType>,
    interval: RwSignal<u32>,
    week_days: RwSignal<WeekDays>,
    end_date: RwSignal<Option<NaiveDate>>,
    #[prop(into)] interval_error: Signal<Option<String>>,
    #[prop(into)] end_date_error: Signal<Option<String>>,
) -> impl IntoView {
    let effective_days = move || match repeat_type.get() {
        RepeatType::Weekly => week_days.get(),
        _ => WeekDays::empty(),
    };

    let minimum = move || {
        let due = due_date.get()?;
        compute_minimum_end_date(due, repeat_type.get(), interval.get(), effective_days()).ok()
    };

    let label = move || {
        preview_label(RepeatDraft {
            repeat_type: repeat_type.get(),
            interval_value: interval.get(),
            week_days: week_days.get(),
            end_date: end_date.get(),
        })
    };

    let select_type = move |selected: RepeatType| {
        let seeded = seed_week_days(
            repeat_type.get_untracked(),
            selected,
            week_days.get_untracked(),
            due_date.get_untracked(),
        );
        repeat_type.set(selected);
        if let Some(days) = seeded {
            week_days.set(days);
        }
    };

    view! {
        <div class="repeat-fields">
            <div class="type-selector">
                {RepeatType::ALL.iter().map(|&value| {
                    view! {
                        <button
                            type="button"
                            class=move || if repeat_type.get() == value { "type-btn active" } else { "type-btn" }
                            on:click=move |_| select_type(value)
                        >
                            {value.display_name()}
                        </button>
                    }
                }).collect_view()}
            </div>

            <label class="field-row">
                <input
                    type="number"
                    min="1"
                    class="interval-input"
                    prop:value=move || interval.get().to_string()
                    on:input=move |ev| interval.set(event_target_value(&ev).trim().parse().unwrap_or(0))
                />
                <span>{move || interval_unit(repeat_type.get())}</span>
            </label>
            {move || interval_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}

            <Show when=move || repeat_type.get() == RepeatType::Weekly>
                <div class="weekday-selector">
                    {WeekDay::ALL.iter().map(|&day| {
                        view! {
                            <button
                                type="button"
                                class=move || if week_days.get().contains(day) { "weekday-btn active" } else { "weekday-btn" }
                                on:click=move |_| week_days.update(|days| days.toggle(day))
                            >
                                {day.short_label()}
                            </button>
                        }
                    }).collect_view()}
                </div>
            </Show>

            <label class="field-row">
                <span>"종료일"</span>
                <input
                    type="date"
                    prop:min=move || format_date_input(minimum())
                    prop:value=move || format_date_input(end_date.get())
                    on:input=move |ev| end_date.set(parse_date_input(&event_target_value(&ev)))
                />
                <button type="button" class="clear-btn" on:click=move |_| end_date.set(None)>"×"</button>
            </label>
            {move || minimum().map(|min| view! { <p class="field-hint">{format!("{} 이후로 선택할 수 있어요", min)}</p> })}
            {move || end_date_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}

            {move || label().map(|text| view! { <p class="repeat-preview">{text}</p> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_label() {
        let repeat = RepeatDraft {
            repeat_type: RepeatType::Weekly,
            interval_value: 2,
            week_days: WeekDays::from_indices([1, 3]),
            end_date: None,
        };
        assert_eq!(preview_label(repeat).as_deref(), Some("2주마다 (월, 수)"));
    }

    #[test]
    fn test_seed_week_days_on_switch_to_weekly() {
        // 2025-01-15 is a Wednesday
        let due = NaiveDate::from_ymd_opt(2025, 1, 15);
        assert_eq!(
            seed_week_days(RepeatType::Daily, RepeatType::Weekly, WeekDays::empty(), due),
            Some(WeekDays::from_indices([3]))
        );
        assert_eq!(
            seed_week_days(RepeatType::Daily, RepeatType::Weekly, WeekDays::from_indices([1]), due),
            None
        );
        assert_eq!(seed_week_days(RepeatType::Daily, RepeatType::Weekly, WeekDays::empty(), None), None);
        assert_eq!(seed_week_days(RepeatType::Weekly, RepeatType::Monthly, WeekDays::empty(), due), None);
    }

    #[test]
    fn test_reselecting_weekly_keeps_empty_days() {
        let due = NaiveDate::from_ymd_opt(2025, 1, 15);
        assert_eq!(seed_week_days(RepeatType::Weekly, RepeatType::Weekly, WeekDays::empty(), due), None);
    }

    #[test]
    fn test_preview_label_invalid_interval() {
        let repeat = RepeatDraft { interval_value: 0, ..RepeatDraft::default() };
        assert_eq!(preview_label(repeat), None);
    }
}
