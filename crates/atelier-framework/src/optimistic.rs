//! # Optimistic Updates
//!
//! [`Optimistic<T>`] holds a locally displayed value together with the copy
//! needed to undo an unconfirmed change. The three steps are explicit:
//!
//! 1. [`apply`](Optimistic::apply) mutates the displayed value and remembers
//!    the pre-edit copy (only the first time, so stacked edits roll back to
//!    the last confirmed state).
//! 2. [`commit`](Optimistic::commit) replaces the value with the server's
//!    authoritative version and forgets the rollback copy.
//! 3. [`rollback`](Optimistic::rollback) restores the pre-edit copy.
//!
//! [`Optimistic::run`] chains the three for the common request/response case.

use std::future::Future;

#[derive(Debug, Clone, PartialEq)]
pub struct Optimistic<T: Clone> {
    current: T,
    rollback: Option<T>,
}

impl<T: Clone> Optimistic<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: value,
            rollback: None,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    /// True between `apply` and `commit`/`rollback`.
    pub fn is_pending(&self) -> bool {
        self.rollback.is_some()
    }

    pub fn apply(&mut self, change: impl FnOnce(&mut T)) {
        if self.rollback.is_none() {
            self.rollback = Some(self.current.clone());
        }
        change(&mut self.current);
    }

    pub fn commit(&mut self, confirmed: T) {
        self.current = confirmed;
        self.rollback = None;
    }

    /// Restores the last confirmed value. Returns false if nothing was pending.
    pub fn rollback(&mut self) -> bool {
        match self.rollback.take() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Replaces the value with a server snapshot unless a change is pending.
    /// Returns whether the snapshot was taken.
    pub fn refresh(&mut self, snapshot: T) -> bool {
        if self.is_pending() {
            return false;
        }
        self.current = snapshot;
        true
    }

    /// Applies `change`, sends the optimistic value through `send`, then
    /// commits the response or rolls back on error.
    pub async fn run<F, Fut, E>(&mut self, change: impl FnOnce(&mut T), send: F) -> Result<(), E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.apply(change);
        match send(self.current.clone()).await {
            Ok(confirmed) => {
                self.commit(confirmed);
                Ok(())
            }
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }
}
