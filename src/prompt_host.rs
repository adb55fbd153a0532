//! Prompt Host
//!
//! Holds the pending scope / confirm prompts the modals render. Each slot
//! keeps at most one prompt; asking again cancels the one before it.

use async_trait::async_trait;
use leptos::prelude::*;
use todo_recurrence::flow::ScopePrompter;
use todo_recurrence::prompt::{self, PromptResolver};
use todo_recurrence::{ChangeScope, ChangeScopeRequest, DeleteScope, PromptOutcome, TodoId};

struct Pending<Q, T> {
    query: Q,
    resolver: PromptResolver<T>,
}

/// One modal's worth of pending prompt
pub struct PromptSlot<Q: Send + Sync + 'static, T: Send + Sync + 'static> {
    pending: RwSignal<Option<Pending<Q, T>>>,
}

impl<Q: Send + Sync + 'static, T: Send + Sync + 'static> Clone for PromptSlot<Q, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Q: Send + Sync + 'static, T: Send + Sync + 'static> Copy for PromptSlot<Q, T> {}

impl<Q: Send + Sync + 'static, T: Send + Sync + 'static> PromptSlot<Q, T> {
    pub fn new() -> Self {
        Self { pending: RwSignal::new(None) }
    }

    /// Show `query` and wait for the user
    pub async fn ask(&self, query: Q) -> PromptOutcome<T> {
        let (resolver, pending) = prompt::channel();
        let replaced = self
            .pending
            .try_update(|slot| slot.replace(Pending { query, resolver }))
            .flatten();
        if let Some(previous) = replaced {
            tracing::debug!("replacing an unanswered prompt");
            previous.resolver.cancel();
        }
        pending.await
    }

    /// Currently shown query (tracked)
    pub fn query(&self) -> Option<Q>
    where
        Q: Clone,
    {
        self.pending.with(|slot| slot.as_ref().map(|p| p.query.clone()))
    }

    pub fn is_open(&self) -> bool {
        self.pending.with(Option::is_some)
    }

    pub fn resolve(&self, value: T) {
        if let Some(pending) = self.take() {
            pending.resolver.resolve(value);
        }
    }

    pub fn cancel(&self) {
        if let Some(pending) = self.take() {
            pending.resolver.cancel();
        }
    }

    fn take(&self) -> Option<Pending<Q, T>> {
        self.pending.try_update(Option::take).flatten()
    }
}

/// Prompts the submit flows wait on, provided through `AppContext`
#[derive(Clone, Copy)]
pub struct PromptHost {
    pub change_scope: PromptSlot<ChangeScopeRequest, ChangeScope>,
    pub delete_scope: PromptSlot<TodoId, DeleteScope>,
    pub confirm_delete: PromptSlot<TodoId, ()>,
}

impl PromptHost {
    pub fn new() -> Self {
        Self {
            change_scope: PromptSlot::new(),
            delete_scope: PromptSlot::new(),
            confirm_delete: PromptSlot::new(),
        }
    }
}

#[async_trait(?Send)]
impl ScopePrompter for PromptHost {
    async fn choose_change_scope(&self, request: ChangeScopeRequest) -> PromptOutcome<ChangeScope> {
        self.change_scope.ask(request).await
    }

    async fn choose_delete_scope(&self, todo_id: TodoId) -> PromptOutcome<DeleteScope> {
        self.delete_scope.ask(todo_id).await
    }

    async fn confirm_delete(&self, todo_id: TodoId) -> PromptOutcome<()> {
        self.confirm_delete.ask(todo_id).await
    }
}
