//! UI Components
//!
//! Reusable Leptos components.

mod todo_item;
mod todo_list;
mod todo_form;
mod repeat_fields;
mod repeat_update_modal;
mod repeat_delete_modal;
mod confirm_delete_modal;
mod toast;
mod modal;

pub use todo_item::{TodoItem, REPEAT_EXPIRED_NOTICE};
pub use todo_list::TodoList;
pub use todo_form::TodoFormModal;
pub use repeat_fields::RepeatFields;
pub use repeat_update_modal::RepeatUpdateModal;
pub use repeat_delete_modal::RepeatDeleteModal;
pub use confirm_delete_modal::ConfirmDeleteModal;
pub use toast::ToastHost;
