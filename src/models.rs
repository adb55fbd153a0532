//! Frontend Models
//!
//! UI-only state; backend entities live in `todo_recurrence`.

use chrono::{Local, NaiveDate};
use todo_recurrence::TodoResponse;

/// What the todo form is doing
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(TodoResponse),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "할 일 추가",
            FormMode::Edit(_) => "할 일 수정",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "추가",
            FormMode::Edit(_) => "저장",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Info => "toast info",
            ToastKind::Warning => "toast warning",
            ToastKind::Error => "toast error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

// ========================
// Date input helpers
// ========================

/// `<input type="date">` value; empty or malformed means no date
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Local calendar date in the browser
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
