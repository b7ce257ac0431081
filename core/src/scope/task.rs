//! Scope propagation across task boundaries.
//!
//! A [`Scoped`] future owns a copy of the scope stack taken at the branch
//! point. The stack is installed into the polling thread's context around
//! every `poll` and taken back out afterwards, so a task suspended mid-scope
//! never observes a sibling's frames, and the spawning context never observes
//! the task's.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::task::JoinHandle;
use tracing::trace;

use super::{ScopeStack, with_current};

/// Wrap `fut` with a copy of the current context's scope stack.
pub fn scoped<F: Future>(fut: F) -> Scoped<F> {
    let stack = with_current(|stack| stack.clone());
    trace!(depth = stack.depth(), "captured scope stack for task");
    Scoped {
        stack: Some(stack),
        inner: Box::pin(fut),
    }
}

/// Spawn `fut` on the tokio runtime with the current scope stack attached.
pub fn spawn<F>(fut: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::task::spawn(scoped(fut))
}

/// A future carrying its own scope stack across suspension points.
pub struct Scoped<F> {
    stack: Option<ScopeStack>,
    inner: Pin<Box<F>>,
}

impl<F: Future> Future for Scoped<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let stack = this
            .stack
            .take()
            .expect("scoped future polled after completion");
        let mut installed = Installed::swap_in(stack);
        let out = this.inner.as_mut().poll(cx);
        this.stack = Some(installed.swap_out());
        out
    }
}

/// Swaps a stack into the thread-local context; the drop path restores the
/// previous stack even when the inner poll unwinds.
struct Installed {
    prev: Option<ScopeStack>,
}

impl Installed {
    fn swap_in(stack: ScopeStack) -> Self {
        let prev = with_current(|current| std::mem::replace(current, stack));
        Self { prev: Some(prev) }
    }

    fn swap_out(&mut self) -> ScopeStack {
        let prev = self.prev.take().expect("context already restored");
        with_current(|current| std::mem::replace(current, prev))
    }
}

impl Drop for Installed {
    fn drop(&mut self) {
        if let Some(prev) = self.prev.take() {
            with_current(|current| *current = prev);
        }
    }
}
