//! Single-resolution prompts
//!
//! A UI prompt hands out a [`PromptResolver`] and the submit flow awaits the
//! matching [`PendingPrompt`]. The resolver is consumed on use, so a prompt
//! resolves exactly once; dropping it unresolved counts as a cancel.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

/// Result of awaiting a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome<T> {
    Chosen(T),
    Cancelled,
}

impl<T> PromptOutcome<T> {
    pub fn chosen(self) -> Option<T> {
        match self {
            PromptOutcome::Chosen(value) => Some(value),
            PromptOutcome::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, PromptOutcome::Cancelled)
    }
}

/// Create a linked resolver / pending pair
pub fn channel<T>() -> (PromptResolver<T>, PendingPrompt<T>) {
    let (tx, rx) = oneshot::channel();
    (PromptResolver { tx }, PendingPrompt { rx })
}

/// UI side of a prompt
#[derive(Debug)]
pub struct PromptResolver<T> {
    tx: oneshot::Sender<T>,
}

impl<T> PromptResolver<T> {
    pub fn resolve(self, value: T) {
        // The flow may have been dropped already; nothing is waiting then.
        if self.tx.send(value).is_err() {
            tracing::debug!("prompt resolved after its flow was dropped");
        }
    }

    pub fn cancel(self) {
        drop(self);
    }

    /// Whether the awaiting flow is gone
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_canceled()
    }
}

/// Flow side of a prompt. No timeout: waits until the resolver is used or dropped.
#[derive(Debug)]
pub struct PendingPrompt<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Future for PendingPrompt<T> {
    type Output = PromptOutcome<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|result| match result {
            Ok(value) => PromptOutcome::Chosen(value),
            Err(oneshot::Canceled) => PromptOutcome::Cancelled,
        })
    }
}
