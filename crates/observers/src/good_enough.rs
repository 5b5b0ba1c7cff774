use orrery_core::Observer;

use crate::traits::{CanStopEarly, HasResidual};

/// Stops fixed-point iteration once the residual is below a looser tolerance.
///
/// Useful for interactive drivers that prefer a cheap, slightly less accurate
/// implicit step over spending the full iteration budget every frame.
/// Counts events across solves; call [`GoodEnough::reset`] between steps if
/// `min_iters` should apply per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoodEnough {
    tolerance: f64,
    min_iters: usize,
    seen: usize,
}

impl GoodEnough {
    /// Creates an observer that stops when `|residual| < tolerance` after at
    /// least `min_iters` events.
    #[must_use]
    pub fn new(tolerance: f64, min_iters: usize) -> Self {
        Self {
            tolerance,
            min_iters,
            seen: 0,
        }
    }

    /// Forgets how many events have been seen.
    pub fn reset(&mut self) {
        self.seen = 0;
    }
}

impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for GoodEnough {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.seen += 1;
        (self.seen >= self.min_iters && event.residual().abs() < self.tolerance)
            .then(A::stop_early)
    }
}
