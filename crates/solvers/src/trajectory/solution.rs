use orrery_core::Snapshot;

/// Indicates how the integration terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Completed all requested steps.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of integrating a trajectory.
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// How the integration terminated.
    pub outcome: Outcome,

    /// Snapshots from each step, including the initial state.
    pub history: Vec<Snapshot>,

    /// Number of integration steps completed.
    pub steps: usize,

    /// Number of implicit steps that hit their iteration limit.
    pub unconverged: usize,
}

impl Trajectory {
    /// Returns the last snapshot, or `None` if the history was emptied.
    #[must_use]
    pub fn last(&self) -> Option<&Snapshot> {
        self.history.last()
    }
}
