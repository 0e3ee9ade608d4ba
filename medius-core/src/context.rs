//! Dispatch-scoped context carrying cancellation and deadline signals.
//!
//! A [`Context`] travels with a request through the whole dispatch chain.
//! The chain itself never cancels anything; it only threads the context
//! along so that behaviors and handlers can observe the caller's intent
//! and stop early. Behaviors may hand a derived context (for example one
//! with a tighter deadline) to the rest of the chain.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Cancellation state shared between a context, its handles and every
/// context derived from it. Parent links let a child observe ancestor
/// cancellation without the parent knowing its children.
#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    parent: Option<Arc<CancelState>>,
}

impl CancelState {
    fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::Acquire) {
            return true;
        }
        self.parent.as_deref().is_some_and(CancelState::is_cancelled)
    }
}

/// Cancellation and deadline view for one dispatch.
///
/// Cheap to clone; clones observe the same cancellation signal. Derivation
/// never mutates the original: [`Context::with_cancel`],
/// [`Context::with_deadline`] and [`Context::with_timeout`] all return new
/// contexts.
///
/// Cancellation is cooperative and poll-based. Code that wants to honor it
/// checks [`Context::is_cancelled`] or [`Context::is_expired`] at its own
/// boundaries.
#[derive(Clone, Debug, Default)]
pub struct Context {
    cancel: Option<Arc<CancelState>>,
    deadline: Option<Instant>,
}

impl Context {
    /// The root context: never cancelled, no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derives a cancellable context and the handle that cancels it.
    ///
    /// Cancelling an ancestor also cancels the derived context; cancelling
    /// the derived context leaves the ancestor untouched.
    pub fn with_cancel(&self) -> (Context, CancelHandle) {
        let state = Arc::new(CancelState {
            cancelled: AtomicBool::new(false),
            parent: self.cancel.clone(),
        });
        let ctx = Context {
            cancel: Some(Arc::clone(&state)),
            deadline: self.deadline,
        };
        (ctx, CancelHandle { state })
    }

    /// Derives a context that expires at `deadline`.
    ///
    /// An earlier deadline already in effect is kept, so derivation can
    /// only tighten the budget.
    pub fn with_deadline(&self, deadline: Instant) -> Context {
        let deadline = match self.deadline {
            Some(existing) if existing <= deadline => existing,
            _ => deadline,
        };
        Context {
            cancel: self.cancel.clone(),
            deadline: Some(deadline),
        }
    }

    /// Derives a context that expires `timeout` from now.
    pub fn with_timeout(&self, timeout: Duration) -> Context {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Whether this context (or any ancestor) has been cancelled.
    ///
    /// Expiry is reported separately by [`Context::is_expired`].
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_deref().is_some_and(CancelState::is_cancelled)
    }

    /// The instant after which work on behalf of this context should stop,
    /// if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline. `None` without a deadline, zero once
    /// it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Whether the deadline, if any, has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| deadline <= Instant::now())
    }
}

/// Cancels the [`Context`] it was derived with.
///
/// Handles are cheap to clone and may be triggered from any thread.
/// Cancellation is idempotent and cannot be undone.
#[derive(Clone)]
pub struct CancelHandle {
    state: Arc<CancelState>,
}

impl CancelHandle {
    /// Marks the associated context, and everything derived from it,
    /// cancelled.
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::Release);
    }

    /// Whether the associated context is already cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.state.is_cancelled()
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
