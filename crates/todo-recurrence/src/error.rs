//! Error Types
//!
//! Every failure in this crate is recoverable: the form goes back to the user.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

pub type RecurrenceResult<T> = Result<T, RecurrenceError>;

/// Rule construction and date arithmetic errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("반복 간격은 1 이상이어야 합니다.")]
    InvalidInterval,
    #[error("date out of range: {0} cannot be advanced further")]
    OutOfRange(NaiveDate),
    #[error("unknown weekday token: {0}")]
    UnknownWeekDay(String),
    #[error("unknown repeat type: {0}")]
    UnknownRepeatType(String),
}

/// End date validation, reported against the end date field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndDateError {
    #[error("종료일은 마감일 이후여야 합니다.")]
    BeforeDueDate { due_date: NaiveDate, end_date: NaiveDate },
    #[error("종료일은 첫 반복일({minimum}) 이후여야 합니다.")]
    BeforeMinimum { minimum: NaiveDate, end_date: NaiveDate },
    #[error(transparent)]
    Rule(#[from] RecurrenceError),
}

/// Form fields that can carry an inline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Memo,
    DueDate,
    Interval,
    EndDate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Memo => "memo",
            Field::DueDate => "dueDate",
            Field::Interval => "intervalValue",
            Field::EndDate => "endDate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

/// Draft validation failed on one or more fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("입력 값에 오류가 있어요 ({} field(s))", .errors.len())]
pub struct DraftError {
    pub errors: Vec<FieldError>,
}

impl DraftError {
    /// First message for a field, if any
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}

/// Backend communication errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] DraftError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
