use crate::State;

/// A state captured at a point in simulated time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub t: f64,
    pub state: State,
}

impl Snapshot {
    /// Creates a new snapshot.
    pub fn new(t: f64, state: State) -> Self {
        Self { t, state }
    }
}
