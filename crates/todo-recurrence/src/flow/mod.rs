//! Submit Flows
//!
//! Sequencing of create, edit, completion toggle and delete against the
//! backend. For one todo the order is fixed: candidate rule, prompt check,
//! awaited prompt, payload, then exactly one request (or none when cancelled).

use async_trait::async_trait;

use crate::draft::TodoDraft;
use crate::error::{ApiError, FlowError};
use crate::model::{
    CreateTodoRequest, DeleteTodoRequest, TodoId, TodoResponse, UpdateTodoRequest,
};
use crate::prompt::PromptOutcome;
use crate::scope::{ChangeScope, ChangeScopeRequest, DeleteScope};

#[cfg(test)]
mod tests;

/// Todo endpoints the flows call into
#[async_trait(?Send)]
pub trait TodoGateway {
    async fn create_todo(&self, request: &CreateTodoRequest) -> Result<TodoResponse, ApiError>;

    async fn update_todo(&self, id: TodoId, request: &UpdateTodoRequest) -> Result<TodoResponse, ApiError>;

    async fn delete_todo(&self, request: &DeleteTodoRequest) -> Result<(), ApiError>;
}

/// User decisions the flows wait on
#[async_trait(?Send)]
pub trait ScopePrompter {
    /// ALL or AFTER_THIS for an edited series
    async fn choose_change_scope(&self, request: ChangeScopeRequest) -> PromptOutcome<ChangeScope>;

    /// ONE_TODO or FUTURE for a recurring todo
    async fn choose_delete_scope(&self, todo_id: TodoId) -> PromptOutcome<DeleteScope>;

    /// Plain delete / cancel for a todo without recurrence
    async fn confirm_delete(&self, todo_id: TodoId) -> PromptOutcome<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Updated(TodoResponse),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Option<DeleteScope>),
    Cancelled,
}

pub async fn submit_create<G>(gateway: &G, draft: &TodoDraft) -> Result<TodoResponse, FlowError>
where
    G: TodoGateway + ?Sized,
{
    let rule = draft.validate()?;
    let request = draft.to_create_request(rule.as_ref());
    tracing::info!("creating todo (repeating: {})", rule.is_some());
    let created = gateway.create_todo(&request).await?;
    Ok(created)
}

pub async fn submit_edit<G, P>(
    gateway: &G,
    prompter: &P,
    existing: &TodoResponse,
    draft: &TodoDraft,
) -> Result<EditOutcome, FlowError>
where
    G: TodoGateway + ?Sized,
    P: ScopePrompter + ?Sized,
{
    let new_rule = draft.validate()?;
    let old_rule = existing.repeat_rule();

    let change_type = match ChangeScopeRequest::for_edit(old_rule.as_ref(), new_rule.as_ref(), draft.due_date()) {
        Some(request) => {
            tracing::debug!("todo {}: rule changed, asking for scope ({})", existing.todo_id, request.summary());
            match prompter.choose_change_scope(request).await {
                PromptOutcome::Chosen(scope) => Some(scope),
                PromptOutcome::Cancelled => {
                    tracing::info!("todo {}: edit cancelled at scope prompt", existing.todo_id);
                    return Ok(EditOutcome::Cancelled);
                }
            }
        }
        None => None,
    };

    let request = draft.to_update_request(new_rule.as_ref(), change_type);
    tracing::info!(
        "updating todo {} (changeType: {})",
        existing.todo_id,
        change_type.map(|s| s.as_str()).unwrap_or("-")
    );
    let updated = gateway.update_todo(existing.todo_id, &request).await?;
    Ok(EditOutcome::Updated(updated))
}

/// Flip completion; never prompts
pub async fn toggle_completed<G>(gateway: &G, todo: &TodoResponse) -> Result<TodoResponse, FlowError>
where
    G: TodoGateway + ?Sized,
{
    let request = UpdateTodoRequest::completion(todo.is_completed.toggled());
    let updated = gateway.update_todo(todo.todo_id, &request).await?;
    Ok(updated)
}

pub async fn delete_todo<G, P>(gateway: &G, prompter: &P, todo: &TodoResponse) -> Result<DeleteOutcome, FlowError>
where
    G: TodoGateway + ?Sized,
    P: ScopePrompter + ?Sized,
{
    let scope = if todo.is_recurring() {
        match prompter.choose_delete_scope(todo.todo_id).await {
            PromptOutcome::Chosen(scope) => Some(scope),
            PromptOutcome::Cancelled => return Ok(DeleteOutcome::Cancelled),
        }
    } else {
        if prompter.confirm_delete(todo.todo_id).await.is_cancelled() {
            return Ok(DeleteOutcome::Cancelled);
        }
        None
    };

    let request = DeleteTodoRequest { id: todo.todo_id, scope };
    tracing::info!("deleting {}", request.path());
    gateway.delete_todo(&request).await?;
    Ok(DeleteOutcome::Deleted(scope))
}
