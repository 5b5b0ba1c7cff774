use crate::Method;

/// Event emitted by an implicit method during fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// One fixed-point iteration finished.
    Iteration {
        method: Method,
        /// Iteration counter, starting at 1.
        iter: usize,
        /// RMS change from the previous guess.
        residual: f64,
    },

    /// The iteration limit was reached without meeting the tolerance.
    ///
    /// This is a warning: the step still returns its last guess so a driver
    /// can keep producing frames.
    NotConverged {
        method: Method,
        iters: usize,
        residual: f64,
        tolerance: f64,
    },
}

impl Event {
    /// Returns the method that emitted the event.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Event::Iteration { method, .. } | Event::NotConverged { method, .. } => *method,
        }
    }

    /// Returns the most recent residual.
    #[must_use]
    pub fn residual(&self) -> f64 {
        match self {
            Event::Iteration { residual, .. } | Event::NotConverged { residual, .. } => *residual,
        }
    }

    /// Returns `true` for the non-convergence warning.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::NotConverged { .. })
    }
}
