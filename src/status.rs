//! Status codes for integrators

/// State of an integration run.
///
/// A run starts in `Running`, moves through `AcceptedStep`/`RejectedStep`
/// once per attempted step, and ends in `Done` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Running,
    AcceptedStep,
    RejectedStep,
    Done,
    Failed,
}

impl Status {
    /// `true` once the run has ended, successfully or not.
    pub fn is_finished(self) -> bool {
        matches!(self, Status::Done | Status::Failed)
    }
}
