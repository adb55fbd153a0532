//! Backend Wire Models
//!
//! Request and response shapes of the todo REST API.

use std::convert::TryFrom;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::draft::Priority;
use crate::error::{ApiError, RecurrenceError};
use crate::rule::{RecurrenceRule, RepeatType, WeekDays};
use crate::scope::{ChangeScope, DeleteScope};

pub type TodoId = i64;

/// Completion flag, stored as 'Y' / 'N' by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Completion {
    #[serde(rename = "Y")]
    Yes,
    #[default]
    #[serde(rename = "N")]
    No,
}

impl Completion {
    pub fn from_bool(done: bool) -> Self {
        if done { Completion::Yes } else { Completion::No }
    }

    pub fn as_bool(&self) -> bool {
        matches!(self, Completion::Yes)
    }

    pub fn toggled(&self) -> Self {
        Self::from_bool(!self.as_bool())
    }
}

/// Standard response envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the envelope; `status` is the HTTP status it arrived with
    pub fn into_result(self, status: u16) -> Result<Option<T>, ApiError> {
        if self.success {
            return Ok(self.data);
        }
        let message = self
            .message
            .or(self.error)
            .unwrap_or_else(|| "요청을 처리하지 못했습니다.".to_string());
        Err(ApiError::Server { status, message })
    }
}

/// Recurrence rule as the backend returns it.
///
/// `type` and `weekDays` stay raw so that one bad rule cannot fail the
/// decode of a whole todo list; they are parsed in `TryFrom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatVo {
    #[serde(default)]
    pub repeat_rule_id: Option<i64>,
    #[serde(rename = "type")]
    pub repeat_type: String,
    #[serde(default)]
    pub interval_value: Option<u32>,
    #[serde(default)]
    pub week_days: Option<String>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl TryFrom<&RepeatVo> for RecurrenceRule {
    type Error = RecurrenceError;

    /// Unknown weekday tokens are dropped; an unknown type or a zero
    /// interval rejects the rule.
    fn try_from(vo: &RepeatVo) -> Result<Self, Self::Error> {
        let repeat_type: RepeatType = vo.repeat_type.parse()?;
        let week_days = vo
            .week_days
            .as_deref()
            .map(WeekDays::parse_csv_lossy)
            .unwrap_or_default();
        Ok(RecurrenceRule::new(repeat_type, vo.interval_value.unwrap_or(1))?
            .with_week_days(week_days)
            .with_end_date(vo.end_date))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub todo_id: TodoId,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub is_completed: Completion,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(rename = "repeatVO", default)]
    pub repeat_vo: Option<RepeatVo>,
}

impl TodoResponse {
    pub fn is_completed(&self) -> bool {
        self.is_completed.as_bool()
    }

    pub fn is_recurring(&self) -> bool {
        self.repeat_vo.is_some()
    }

    /// Parsed recurrence rule. A malformed rule from the backend is logged
    /// and treated as no rule.
    pub fn repeat_rule(&self) -> Option<RecurrenceRule> {
        let vo = self.repeat_vo.as_ref()?;
        match RecurrenceRule::try_from(vo) {
            Ok(rule) => Some(rule),
            Err(e) => {
                tracing::warn!("todo {} has an unusable repeat rule: {}", self.todo_id, e);
                None
            }
        }
    }
}

/// Recurrence block of create / update payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatRuleRequest {
    #[serde(rename = "type")]
    pub repeat_type: RepeatType,
    pub interval_value: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_days: Option<String>,
}

impl From<&RecurrenceRule> for RepeatRuleRequest {
    fn from(rule: &RecurrenceRule) -> Self {
        let days = rule.effective_week_days();
        Self {
            repeat_type: rule.repeat_type,
            interval_value: rule.interval_value(),
            end_date: rule.end_date,
            week_days: (!days.is_empty()).then(|| days.to_csv()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_rule: Option<RepeatRuleRequest>,
}

/// Partial update. Outer `None` leaves a field alone; `Some(None)` sends
/// `null` so the backend can tell a cleared value from an untouched one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<Completion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_rule: Option<Option<RepeatRuleRequest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_type: Option<ChangeScope>,
}

impl UpdateTodoRequest {
    pub fn completion(is_completed: Completion) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteTodoRequest {
    pub id: TodoId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<DeleteScope>,
}

impl DeleteTodoRequest {
    /// Path and query, e.g. "/api/todos/3?scope=FUTURE"
    pub fn path(&self) -> String {
        match self.scope {
            Some(scope) => format!("/api/todos/{}?scope={}", self.id, scope.as_str()),
            None => format!("/api/todos/{}", self.id),
        }
    }
}
