//! Compensating-transaction primitive for multi-step backend writes.
//!
//! No shared atomic transaction spans the document database and the blob
//! store, so multi-step writes register an undo for every completed step.
//! On the first failed step the saga unwinds the registered compensations in
//! reverse order; a compensation failure is logged and never masks the
//! error that triggered the unwind.

use futures::future::BoxFuture;
use tracing::warn;

use docbox_core::error::AppError;

type Compensation = (&'static str, BoxFuture<'static, Result<(), AppError>>);

/// An in-progress multi-step write.
///
/// After each successful step whose effect must be undone on later failure,
/// register the undo with [`Saga::push`]. When every step has succeeded,
/// [`Saga::commit`] discards the compensations; when a step fails,
/// [`Saga::abort`] runs them newest-first and hands the original error back.
/// Dropping a saga without either runs nothing.
pub struct Saga {
    name: &'static str,
    compensations: Vec<Compensation>,
}

impl Saga {
    /// Start a saga. The name only appears in unwind logging.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            compensations: Vec::new(),
        }
    }

    /// Register the undo for a step that just succeeded.
    pub fn push<F>(&mut self, label: &'static str, compensation: F)
    where
        F: Future<Output = Result<(), AppError>> + Send + 'static,
    {
        self.compensations.push((label, Box::pin(compensation)));
    }

    /// All steps succeeded; discard the registered compensations.
    pub fn commit(mut self) {
        self.compensations.clear();
    }

    /// A step failed; unwind compensations in reverse registration order and
    /// return the original error. Compensation failures are logged only.
    pub async fn abort(mut self, error: AppError) -> AppError {
        while let Some((label, compensation)) = self.compensations.pop() {
            if let Err(undo_error) = compensation.await {
                warn!(
                    saga = self.name,
                    step = label,
                    error = %undo_error,
                    "Compensation failed during saga unwind"
                );
            }
        }
        error
    }
}
