//! Todo Recurrence Core
//!
//! Layered the same way as the rest of the app:
//! - rule / window: recurrence rules and the minimum end date calculation
//! - scope / prompt: edit and delete scope decisions, awaited from the UI
//! - draft / model: form state invariants and backend wire shapes
//! - flow: create, edit, toggle and delete sequencing over a gateway

mod error;
mod rule;
mod window;
mod scope;
mod draft;
mod model;

pub mod prompt;
pub mod flow;

pub use error::{ApiError, DraftError, EndDateError, Field, FieldError, FlowError, RecurrenceError, RecurrenceResult};
pub use rule::{RepeatType, RecurrenceRule, WeekDay, WeekDays};
pub use window::{auto_correct_end_date, compute_minimum_end_date, minimum_end_date_for, validate_end_date};
pub use scope::{
    needs_change_scope, rules_equal, termination_warning, ChangeScope, ChangeScopeRequest,
    DeleteScope, DeleteScopeSelector, FUTURE_DELETE_WARNING, TERMINATION_WARNING,
};
pub use draft::{Priority, RepeatDraft, TodoDraft, MAX_MEMO_CHARS, MAX_TITLE_CHARS, MIN_TITLE_CHARS};
pub use model::{
    ApiResponse, Completion, CreateTodoRequest, DeleteTodoRequest, RepeatRuleRequest, RepeatVo,
    TodoId, TodoResponse, UpdateTodoRequest,
};
pub use prompt::PromptOutcome;
