use orrery_core::State;

/// How a step's result was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    /// Computed directly by an explicit method.
    Explicit,

    /// An implicit method met its tolerance after `iters` iterations.
    Converged { iters: usize },

    /// An implicit method hit its iteration limit.
    ///
    /// The state is the last fixed-point guess and may be inaccurate.
    MaxIters { iters: usize, residual: f64 },

    /// An observer stopped the fixed-point iteration early.
    StoppedByObserver { iters: usize },
}

impl Status {
    /// Returns `true` if an implicit method stopped at its iteration limit.
    ///
    /// Explicit steps, converged steps, and steps stopped by an observer all
    /// return `false`.
    #[must_use]
    pub fn hit_iteration_limit(&self) -> bool {
        matches!(self, Status::MaxIters { .. })
    }

    /// Returns the number of fixed-point iterations performed.
    #[must_use]
    pub fn iters(&self) -> usize {
        match self {
            Status::Explicit => 0,
            Status::Converged { iters }
            | Status::MaxIters { iters, .. }
            | Status::StoppedByObserver { iters } => *iters,
        }
    }
}

/// The result of advancing a state by one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: State,
    pub status: Status,
}

impl Step {
    pub(crate) fn explicit(state: State) -> Self {
        Self {
            state,
            status: Status::Explicit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_max_iters_hits_the_iteration_limit() {
        assert!(!Status::Explicit.hit_iteration_limit());
        assert!(!Status::Converged { iters: 3 }.hit_iteration_limit());
        assert!(!Status::StoppedByObserver { iters: 2 }.hit_iteration_limit());
        assert!(
            Status::MaxIters {
                iters: 100,
                residual: 0.1
            }
            .hit_iteration_limit()
        );
    }
}
