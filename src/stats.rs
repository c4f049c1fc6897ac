//! Counters and step data accumulated during an integration run.

use crate::{Float, status::Status};

/// The statistics of an integration run.
///
/// Counters only ever grow while a run is in progress. The same value is
/// returned on success and attached to numerical errors, see
/// [`crate::Error::statistics`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Statistics {
    /// Number of attempted steps, accepted and rejected.
    pub step_count: usize,
    /// Number of rejected steps.
    pub rejected_count: usize,
    /// Number of right-hand side evaluations.
    pub evaluation_count: usize,
    /// Evaluations spent by a startup procedure after the initial `f(t0, y0)`.
    /// Always zero for single-step methods.
    pub startup_evaluation_count: usize,
    /// Size of the last attempted step.
    pub last_step_size: Float,
    /// Size of the step the integrator would take next.
    pub next_step_size: Float,
    /// Time up to which the integration was performed.
    pub current_time: Float,
    /// Final state of the run.
    pub status: Status,
}

impl Statistics {
    /// Record `count` evaluations made by a startup procedure.
    pub(crate) fn add_startup_evaluations(&mut self, count: usize) {
        self.evaluation_count += count;
        self.startup_evaluation_count += count;
    }

    /// Record the end of a run.
    pub(crate) fn finish(&mut self, t: Float, h: Float, h_next: Float, status: Status) {
        self.current_time = t;
        self.last_step_size = h;
        self.next_step_size = h_next;
        self.status = status;
    }

    /// Number of accepted steps.
    pub fn accepted_count(&self) -> usize {
        self.step_count - self.rejected_count
    }
}
