//! Todo Draft
//!
//! Form state of the create / edit form. The constructor and setters keep
//! recurrence off whenever there is no due date.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DraftError, Field, FieldError, RecurrenceError};
use crate::model::{CreateTodoRequest, RepeatRuleRequest, TodoResponse, UpdateTodoRequest};
use crate::rule::{RecurrenceRule, RepeatType, WeekDays};
use crate::scope::ChangeScope;
use crate::window::validate_end_date;

pub const MIN_TITLE_CHARS: usize = 2;
pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_MEMO_CHARS: usize = 500;

/// Priority, sent to the backend as 0 / 1 / 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Low = 0,
    #[default]
    Medium = 1,
    High = 2,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_key(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "낮음",
            Priority::Medium => "보통",
            Priority::High => "높음",
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Priority::Low),
            1 => Some(Priority::Medium),
            2 => Some(Priority::High),
            _ => None,
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let level = u8::deserialize(deserializer)?;
        Priority::from_level(level)
            .ok_or_else(|| serde::de::Error::custom(format!("priority out of range: {}", level)))
    }
}

/// Recurrence inputs as typed into the form, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatDraft {
    pub repeat_type: RepeatType,
    pub interval_value: u32,
    pub week_days: WeekDays,
    pub end_date: Option<NaiveDate>,
}

impl Default for RepeatDraft {
    fn default() -> Self {
        Self {
            repeat_type: RepeatType::Daily,
            interval_value: 1,
            week_days: WeekDays::empty(),
            end_date: None,
        }
    }
}

impl RepeatDraft {
    pub fn into_rule(self) -> Result<RecurrenceRule, RecurrenceError> {
        Ok(RecurrenceRule::new(self.repeat_type, self.interval_value)?
            .with_week_days(self.week_days)
            .with_end_date(self.end_date))
    }
}

impl From<&RecurrenceRule> for RepeatDraft {
    fn from(rule: &RecurrenceRule) -> Self {
        Self {
            repeat_type: rule.repeat_type,
            interval_value: rule.interval_value(),
            week_days: rule.week_days,
            end_date: rule.end_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoDraft {
    pub title: String,
    pub memo: String,
    pub priority: Priority,
    due_date: Option<NaiveDate>,
    repeat: Option<RepeatDraft>,
}

impl TodoDraft {
    /// Recurrence without a due date is dropped.
    pub fn new(
        title: impl Into<String>,
        memo: impl Into<String>,
        priority: Priority,
        due_date: Option<NaiveDate>,
        repeat: Option<RepeatDraft>,
    ) -> Self {
        Self {
            title: title.into(),
            memo: memo.into(),
            priority,
            due_date,
            repeat: due_date.and(repeat),
        }
    }

    /// Prefill for editing an existing todo
    pub fn from_todo(todo: &TodoResponse) -> Self {
        Self::new(
            todo.title.clone(),
            todo.memo.clone().unwrap_or_default(),
            todo.priority,
            todo.due_date,
            todo.repeat_rule().as_ref().map(RepeatDraft::from),
        )
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn repeat(&self) -> Option<&RepeatDraft> {
        self.repeat.as_ref()
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    /// Clearing the due date turns recurrence off
    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
        if due_date.is_none() {
            self.repeat = None;
        }
    }

    /// Returns false (and leaves recurrence off) when there is no due date
    pub fn set_repeat(&mut self, repeat: Option<RepeatDraft>) -> bool {
        if repeat.is_some() && self.due_date.is_none() {
            return false;
        }
        self.repeat = repeat;
        true
    }

    /// Field checks; yields the candidate recurrence rule on success
    pub fn validate(&self) -> Result<Option<RecurrenceRule>, DraftError> {
        let mut errors = Vec::new();

        let title_chars = self.title.trim().chars().count();
        if title_chars == 0 {
            errors.push(FieldError::new(Field::Title, "제목을 입력해주세요."));
        } else if title_chars < MIN_TITLE_CHARS {
            errors.push(FieldError::new(Field::Title, "제목은 최소 2자 이상이어야 합니다."));
        } else if title_chars > MAX_TITLE_CHARS {
            errors.push(FieldError::new(Field::Title, "제목은 100자를 초과할 수 없습니다."));
        }

        if self.memo.chars().count() > MAX_MEMO_CHARS {
            errors.push(FieldError::new(Field::Memo, "메모는 500자를 초과할 수 없습니다."));
        }

        let mut rule = None;
        if let (Some(due), Some(repeat)) = (self.due_date, self.repeat.clone()) {
            match repeat.into_rule() {
                Ok(candidate) => match validate_end_date(due, &candidate) {
                    Ok(()) => rule = Some(candidate),
                    Err(e) => errors.push(FieldError::new(Field::EndDate, e.to_string())),
                },
                Err(e) => errors.push(FieldError::new(Field::Interval, e.to_string())),
            }
        }

        if errors.is_empty() {
            Ok(rule)
        } else {
            Err(DraftError { errors })
        }
    }

    fn memo_value(&self) -> Option<String> {
        let memo = self.memo.trim();
        (!memo.is_empty()).then(|| memo.to_string())
    }

    pub fn to_create_request(&self, rule: Option<&RecurrenceRule>) -> CreateTodoRequest {
        CreateTodoRequest {
            title: self.title.trim().to_string(),
            memo: self.memo_value(),
            due_date: self.due_date,
            priority: self.priority,
            repeat_rule: rule.map(RepeatRuleRequest::from),
        }
    }

    /// Full form state as an update; `change_type` only when a scope was chosen
    pub fn to_update_request(
        &self,
        rule: Option<&RecurrenceRule>,
        change_type: Option<ChangeScope>,
    ) -> UpdateTodoRequest {
        UpdateTodoRequest {
            title: Some(self.title.trim().to_string()),
            memo: Some(self.memo.trim().to_string()),
            is_completed: None,
            due_date: Some(self.due_date),
            priority: Some(self.priority),
            repeat_rule: Some(rule.map(RepeatRuleRequest::from)),
            change_type,
        }
    }
}
