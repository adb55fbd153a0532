//! Scope Resolution
//!
//! Decides when an edit of a recurring todo needs an ALL / AFTER_THIS choice,
//! when that choice terminates the series, and holds the delete scope selection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rule::{RecurrenceRule, RepeatType};

pub const TERMINATION_WARNING: &str =
    "마감일을 삭제하면, 이후 모든 반복 일정이 삭제되고 반복이 종료됩니다.";

pub const FUTURE_DELETE_WARNING: &str =
    "이 할 일과 이후의 모든 반복 일정이 삭제됩니다. 삭제된 일정은 되돌릴 수 없습니다.";

/// Which part of a series an edit rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeScope {
    /// Rewrite the entire series
    All,
    /// Rewrite this occurrence and every later one
    AfterThis,
}

impl ChangeScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeScope::All => "ALL",
            ChangeScope::AfterThis => "AFTER_THIS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeScope::All => "전체 반복 일정 수정",
            ChangeScope::AfterThis => "이후 일정 모두 수정",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChangeScope::All => "과거와 미래를 포함한 모든 반복 일정에 변경 사항을 적용합니다.",
            ChangeScope::AfterThis => "선택한 일정부터 그 이후의 모든 반복 일정에 변경 사항을 적용합니다.",
        }
    }
}

/// Which occurrences a delete removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteScope {
    OneTodo,
    Future,
}

impl DeleteScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteScope::OneTodo => "ONE_TODO",
            DeleteScope::Future => "FUTURE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeleteScope::OneTodo => "이 할 일만 삭제",
            DeleteScope::Future => "향후 모든 할 일 삭제",
        }
    }
}

/// Rule equality as the edit flow sees it.
///
/// Weekday sets only count for weekly rules and compare regardless of order.
pub fn rules_equal(old: Option<&RecurrenceRule>, new: Option<&RecurrenceRule>) -> bool {
    match (old, new) {
        (None, None) => true,
        (Some(old), Some(new)) => {
            old.repeat_type == new.repeat_type
                && old.interval_value() == new.interval_value()
                && old.end_date == new.end_date
                && (old.repeat_type != RepeatType::Weekly || old.week_days == new.week_days)
        }
        _ => false,
    }
}

/// An existing series whose rule changed must ask for a scope.
/// Adding recurrence to a plain todo never does.
pub fn needs_change_scope(old: Option<&RecurrenceRule>, new: Option<&RecurrenceRule>) -> bool {
    old.is_some() && !rules_equal(old, new)
}

/// Warning for rewriting the whole series after the due date was cleared
pub fn termination_warning(
    scope: ChangeScope,
    new_due_date: Option<NaiveDate>,
    old_rule: Option<&RecurrenceRule>,
) -> Option<&'static str> {
    (scope == ChangeScope::All && new_due_date.is_none() && old_rule.is_some())
        .then_some(TERMINATION_WARNING)
}

/// What the scope prompt needs to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeScopeRequest {
    pub old_rule: RecurrenceRule,
    pub new_rule: Option<RecurrenceRule>,
    pub new_due_date: Option<NaiveDate>,
}

impl ChangeScopeRequest {
    /// `Some` only when the edit has to pause for a scope choice
    pub fn for_edit(
        old_rule: Option<&RecurrenceRule>,
        new_rule: Option<&RecurrenceRule>,
        new_due_date: Option<NaiveDate>,
    ) -> Option<Self> {
        if !needs_change_scope(old_rule, new_rule) {
            return None;
        }
        let old_rule = old_rule?.clone();
        Some(Self {
            old_rule,
            new_rule: new_rule.cloned(),
            new_due_date,
        })
    }

    pub fn due_date_cleared(&self) -> bool {
        self.new_due_date.is_none()
    }

    pub fn warning(&self, scope: ChangeScope) -> Option<&'static str> {
        termination_warning(scope, self.new_due_date, Some(&self.old_rule))
    }

    /// One-line summary of the change, e.g. "매주 (월) → 매주 (월, 수)"
    pub fn summary(&self) -> String {
        let new = self
            .new_rule
            .as_ref()
            .map(RecurrenceRule::label)
            .unwrap_or_else(|| "반복 없음".to_string());
        format!("{} → {}", self.old_rule.label(), new)
    }
}

/// Selection state of the delete scope prompt.
///
/// Starts on FUTURE; the choice still has to be confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteScopeSelector {
    selected: DeleteScope,
}

impl Default for DeleteScopeSelector {
    fn default() -> Self {
        Self { selected: DeleteScope::Future }
    }
}

impl DeleteScopeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, scope: DeleteScope) {
        self.selected = scope;
    }

    pub fn selected(&self) -> DeleteScope {
        self.selected
    }

    /// Inline warning shown before confirming
    pub fn warning(&self) -> Option<&'static str> {
        (self.selected == DeleteScope::Future).then_some(FUTURE_DELETE_WARNING)
    }

    pub fn confirm(self) -> DeleteScope {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::WeekDays;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly(days: &[u32]) -> RecurrenceRule {
        RecurrenceRule::weekly(1, WeekDays::from_indices(days.iter().copied())).unwrap()
    }

    #[test]
    fn test_rules_equal_absent() {
        let rule = RecurrenceRule::daily(1).unwrap();
        assert!(rules_equal(None, None));
        assert!(!rules_equal(Some(&rule), None));
        assert!(!rules_equal(None, Some(&rule)));
    }

    #[test]
    fn test_rules_equal_weekday_order_independent() {
        let end = Some(date(2025, 3, 1));
        let a = weekly(&[1, 3, 5]).with_end_date(end);
        let b = weekly(&[5, 1, 3]).with_end_date(end);
        assert!(rules_equal(Some(&a), Some(&b)));
    }

    #[test]
    fn test_rules_differ_on_type_interval_or_end() {
        let base = weekly(&[1]);
        let other_type = RecurrenceRule::daily(1).unwrap();
        let other_interval = RecurrenceRule::weekly(2, WeekDays::from_indices([1])).unwrap();
        let other_end = base.clone().with_end_date(Some(date(2025, 2, 1)));
        assert!(!rules_equal(Some(&base), Some(&other_type)));
        assert!(!rules_equal(Some(&base), Some(&other_interval)));
        assert!(!rules_equal(Some(&base), Some(&other_end)));
    }

    #[test]
    fn test_weekdays_ignored_for_daily_rules() {
        let a = RecurrenceRule::daily(1).unwrap().with_week_days(WeekDays::from_indices([2]));
        let b = RecurrenceRule::daily(1).unwrap();
        assert!(rules_equal(Some(&a), Some(&b)));
    }

    #[test]
    fn test_scope_prompt_gating() {
        let old = weekly(&[1]);
        let new = weekly(&[1, 3]);
        assert!(needs_change_scope(Some(&old), Some(&new)));
        assert!(!needs_change_scope(Some(&old), Some(&old.clone())));
        // first-time recurrence never prompts
        assert!(!needs_change_scope(None, Some(&new)));
        // removing the rule from a series does
        assert!(needs_change_scope(Some(&old), None));
    }

    #[test]
    fn test_termination_warning_only_for_all() {
        let old = weekly(&[1]);
        assert_eq!(termination_warning(ChangeScope::All, None, Some(&old)), Some(TERMINATION_WARNING));
        assert_eq!(termination_warning(ChangeScope::AfterThis, None, Some(&old)), None);
        assert_eq!(termination_warning(ChangeScope::All, Some(date(2025, 1, 1)), Some(&old)), None);
        assert_eq!(termination_warning(ChangeScope::All, None, None), None);
    }

    #[test]
    fn test_change_scope_request() {
        let old = weekly(&[1]);
        assert!(ChangeScopeRequest::for_edit(Some(&old), Some(&old), Some(date(2025, 1, 6))).is_none());

        let request = ChangeScopeRequest::for_edit(Some(&old), None, None).unwrap();
        assert!(request.due_date_cleared());
        assert_eq!(request.warning(ChangeScope::All), Some(TERMINATION_WARNING));
        assert_eq!(request.warning(ChangeScope::AfterThis), None);
        assert_eq!(request.summary(), "매주 (월) → 반복 없음");
    }

    #[test]
    fn test_delete_selector_defaults_to_future() {
        let mut selector = DeleteScopeSelector::new();
        assert_eq!(selector.selected(), DeleteScope::Future);
        assert_eq!(selector.warning(), Some(FUTURE_DELETE_WARNING));

        selector.select(DeleteScope::OneTodo);
        assert_eq!(selector.warning(), None);
        assert_eq!(selector.confirm(), DeleteScope::OneTodo);
    }

    #[test]
    fn test_scope_wire_names() {
        assert_eq!(serde_json::to_string(&ChangeScope::AfterThis).unwrap(), "\"AFTER_THIS\"");
        assert_eq!(serde_json::to_string(&DeleteScope::OneTodo).unwrap(), "\"ONE_TODO\"");
        assert_eq!(DeleteScope::Future.as_str(), "FUTURE");
    }
}
