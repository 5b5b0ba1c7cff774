use orrery_core::Observer;

use crate::traits::{CanStopEarly, HasTime};

/// Stops a trajectory once simulated time reaches a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Until {
    end_time: f64,
}

impl Until {
    /// Creates an observer that stops at or after `end_time`.
    #[must_use]
    pub fn new(end_time: f64) -> Self {
        Self { end_time }
    }

    /// Returns the stopping time.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }
}

impl<E: HasTime, A: CanStopEarly> Observer<E, A> for Until {
    fn observe(&mut self, event: &E) -> Option<A> {
        (event.time() >= self.end_time).then(A::stop_early)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use orrery_core::{Snapshot, State, StateError};
    use orrery_solvers::{
        Config, Method, Solver,
        trajectory::{Outcome, integrate},
    };

    #[test]
    fn stops_trajectory_at_end_time() {
        let solver = Solver::new(|_t: f64, _y: &State| -> Result<State, StateError> {
            Ok(State::from(1.0))
        });

        let trajectory = integrate(
            &solver,
            Method::Euler,
            Snapshot::new(0.0, State::from(0.0)),
            0.1,
            100,
            &Config::default(),
            Until::new(0.45),
        )
        .unwrap();

        assert_eq!(trajectory.outcome, Outcome::StoppedByObserver);
        assert_eq!(trajectory.steps, 5);

        let last = trajectory.last().unwrap();
        assert_relative_eq!(last.t, 0.5, epsilon = 1e-12);
        assert_relative_eq!(last.state.as_scalar().unwrap(), 0.5, epsilon = 1e-12);
    }
}
