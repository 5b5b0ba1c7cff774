use orrery_core::Snapshot;

use crate::Status;

/// Event emitted by [`integrate`](super::integrate) for each snapshot.
///
/// Step 0 is the initial state before any integration.
/// Steps 1..N are emitted after each integration step.
#[derive(Debug, Clone)]
pub struct Event {
    /// The step number (0 for initial, 1..N for integration steps).
    pub step: usize,

    /// Time and state after this step.
    pub snapshot: Snapshot,

    /// How the step was computed; [`Status::Explicit`] for step 0.
    pub status: Status,
}
