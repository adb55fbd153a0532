//! Recurrence Window Calculator
//!
//! Earliest date a rule produces its first occurrence after the due date,
//! and end date validation against it. All arithmetic is on calendar dates.

use chrono::{Days, Months, NaiveDate};

use crate::error::{EndDateError, RecurrenceError, RecurrenceResult};
use crate::rule::{RecurrenceRule, RepeatType, WeekDay, WeekDays};

fn add_days(date: NaiveDate, days: u64) -> RecurrenceResult<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or(RecurrenceError::OutOfRange(date))
}

fn add_weeks(date: NaiveDate, weeks: u32) -> RecurrenceResult<NaiveDate> {
    add_days(date, u64::from(weeks) * 7)
}

/// Minimum end date for a rule anchored on `due_date`.
///
/// Never returns `due_date` itself: the first occurrence is always strictly later.
pub fn compute_minimum_end_date(
    due_date: NaiveDate,
    repeat_type: RepeatType,
    interval_value: u32,
    week_days: WeekDays,
) -> RecurrenceResult<NaiveDate> {
    if interval_value == 0 {
        return Err(RecurrenceError::InvalidInterval);
    }

    let minimum = match repeat_type {
        RepeatType::Daily => add_days(due_date, u64::from(interval_value))?,
        RepeatType::Weekly if week_days.is_empty() => add_weeks(due_date, interval_value)?,
        RepeatType::Weekly => {
            let start_day = WeekDay::of(due_date);
            match week_days.first_after(start_day) {
                Some(next) => add_days(due_date, u64::from(next.index() - start_day.index()))?,
                None => {
                    // Jump a whole interval, then land on the smallest selected
                    // weekday of that week. The offset may go backwards.
                    let anchor = add_weeks(due_date, interval_value)?;
                    let smallest = week_days.first().unwrap_or(start_day);
                    let delta = i64::from(smallest.index()) - i64::from(WeekDay::of(anchor).index());
                    anchor
                        .checked_add_signed(chrono::Duration::days(delta))
                        .ok_or(RecurrenceError::OutOfRange(anchor))?
                }
            }
        }
        RepeatType::Monthly => due_date
            .checked_add_months(Months::new(interval_value))
            .ok_or(RecurrenceError::OutOfRange(due_date))?,
    };

    tracing::debug!(
        "minimum end date for {} x{} from {}: {}",
        repeat_type.as_str(),
        interval_value,
        due_date,
        minimum
    );
    Ok(minimum)
}

/// Minimum end date for a configured rule; `None` when there is no due date
/// (recurrence is off, so there is no constraint).
pub fn minimum_end_date_for(
    due_date: Option<NaiveDate>,
    rule: &RecurrenceRule,
) -> RecurrenceResult<Option<NaiveDate>> {
    due_date
        .map(|due| {
            compute_minimum_end_date(
                due,
                rule.repeat_type,
                rule.interval_value(),
                rule.effective_week_days(),
            )
        })
        .transpose()
}

/// Check the rule's end date against the due date and the minimum end date.
/// Equality with the minimum is accepted.
pub fn validate_end_date(due_date: NaiveDate, rule: &RecurrenceRule) -> Result<(), EndDateError> {
    let Some(end_date) = rule.end_date else {
        return Ok(());
    };
    if end_date < due_date {
        return Err(EndDateError::BeforeDueDate { due_date, end_date });
    }
    let minimum = compute_minimum_end_date(
        due_date,
        rule.repeat_type,
        rule.interval_value(),
        rule.effective_week_days(),
    )?;
    if end_date < minimum {
        return Err(EndDateError::BeforeMinimum { minimum, end_date });
    }
    Ok(())
}

/// Advanced end date when the chosen one fell behind a freshly computed minimum.
///
/// Returns `None` when nothing needs to change, including when there is no
/// due date, no end date, or the rule cannot be evaluated.
pub fn auto_correct_end_date(
    due_date: Option<NaiveDate>,
    repeat_type: RepeatType,
    interval_value: u32,
    week_days: WeekDays,
    end_date: Option<NaiveDate>,
) -> Option<NaiveDate> {
    let (due, end) = (due_date?, end_date?);
    let week_days = match repeat_type {
        RepeatType::Weekly => week_days,
        _ => WeekDays::empty(),
    };
    let minimum = compute_minimum_end_date(due, repeat_type, interval_value, week_days).ok()?;
    if end < minimum {
        tracing::debug!("end date {} advanced to {}", end, minimum);
        Some(minimum)
    } else {
        None
    }
}
