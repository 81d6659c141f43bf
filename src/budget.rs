//! Cooperative cancellation of long-running searches.
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// The number of steps between two polls of the deadline and the cancel flag.
pub const POLL_INTERVAL: u64 = 256;

/// Limits on how much work a search may do before it gives up and reports
/// [`Outcome::Cancelled`](crate::Outcome::Cancelled).
///
/// A *step* is one cell being added to the path. The step limit is checked
/// on every step. The deadline and the cancel flag are polled at the first
/// step and then every [`POLL_INTERVAL`] steps.
///
/// The default budget is unlimited.
#[derive(Debug, Clone, Default)]
pub struct Budget {
    max_steps: Option<u64>,
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Budget {
    /// Construct an unlimited `Budget`.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Allow at most `max_steps` steps.
    pub fn with_max_steps(self, max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
            ..self
        }
    }

    /// Give up once `deadline` has passed.
    pub fn with_deadline(self, deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..self
        }
    }

    /// Give up once `timeout` has elapsed from now.
    ///
    /// A timeout too large to represent is treated as no deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            ..self
        }
    }

    /// Give up once `flag` becomes `true`. The flag can be shared with
    /// another thread to abort a search in progress.
    pub fn with_cancel_flag(self, flag: Arc<AtomicBool>) -> Self {
        Self {
            cancel: Some(flag),
            ..self
        }
    }

    pub fn max_steps(&self) -> Option<u64> {
        self.max_steps
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Check if taking the `step`-th step (counting from `1`) would exceed
    /// the budget.
    ///
    /// `force_poll` polls the deadline and the cancel flag regardless of
    /// `step`.
    pub(crate) fn is_exceeded_at(&self, step: u64, force_poll: bool) -> bool {
        if let Some(max_steps) = self.max_steps {
            if step > max_steps {
                return true;
            }
        }

        if !force_poll && step % POLL_INTERVAL != 0 {
            return false;
        }

        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return true;
            }
        }

        match &self.cancel {
            Some(flag) => flag.load(Ordering::Relaxed),
            None => false,
        }
    }
}
