//! Fixed-step trajectory integration.
//!
//! Repeatedly applies one [`Method`] with a constant step size and records
//! every intermediate state:
//!
//! ```text
//! state_{n+1} = step(method, state_n, dt, t_n)
//! t_{n+1}     = t_n + dt
//! ```
//!
//! # Example
//!
//! ```
//! use orrery_core::{Snapshot, State, StateError};
//! use orrery_solvers::{Config, Method, Solver, trajectory};
//!
//! let solver = Solver::new(|_t: f64, _y: &State| -> Result<State, StateError> {
//!     Ok(State::from(2.0))
//! });
//! let initial = Snapshot::new(0.0, State::from(0.0));
//!
//! let result = trajectory::integrate_unobserved(
//!     &solver, Method::Euler, initial, 0.1, 10, &Config::default(),
//! ).unwrap();
//!
//! assert_eq!(result.history.len(), 11);
//! assert!((result.last().unwrap().t - 1.0).abs() < 1e-12);
//! ```

mod action;
mod event;
mod solution;

pub use action::Action;
pub use event::Event;
pub use solution::{Outcome, Trajectory};

use orrery_core::{OdeSystem, Observer, Snapshot};

use crate::{Config, Error, Method, Solver, Status};

/// Integrates `steps` fixed steps of size `dt` from `initial`.
///
/// # Algorithm
///
/// 1. Emit the initial snapshot as step 0.
/// 2. For each step:
///    - Advance the state with `method`.
///    - Advance time by `dt`.
///    - Count the step if an implicit method did not converge.
///    - Emit an [`Event`] to the observer.
///    - If the observer returns `StopEarly`, terminate.
/// 3. Return the trajectory with the full history.
///
/// # Errors
///
/// Returns an error if any step fails. Non-convergence of an implicit method
/// is not an error; see [`Trajectory::unconverged`].
pub fn integrate<S, Obs>(
    solver: &Solver<S>,
    method: Method,
    initial: Snapshot,
    dt: f64,
    steps: usize,
    config: &Config,
    mut observer: Obs,
) -> Result<Trajectory, Error>
where
    S: OdeSystem,
    Obs: Observer<Event, Action>,
{
    let mut history = Vec::with_capacity(steps + 1);
    history.push(initial.clone());

    let event = Event {
        step: 0,
        snapshot: initial.clone(),
        status: Status::Explicit,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Trajectory {
            outcome: Outcome::StoppedByObserver,
            history,
            steps: 0,
            unconverged: 0,
        });
    }

    let mut current = initial;
    let mut unconverged = 0;

    for step in 1..=steps {
        let next = solver.solve(method, &current.state, dt, current.t, config)?;
        if next.status.hit_iteration_limit() {
            unconverged += 1;
        }

        let snapshot = Snapshot::new(current.t + dt, next.state);
        history.push(snapshot.clone());

        let event = Event {
            step,
            snapshot: snapshot.clone(),
            status: next.status,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Trajectory {
                outcome: Outcome::StoppedByObserver,
                history,
                steps: step,
                unconverged,
            });
        }

        current = snapshot;
    }

    Ok(Trajectory {
        outcome: Outcome::Complete,
        history,
        steps,
        unconverged,
    })
}

/// Integrates a trajectory without observation.
///
/// This is a convenience wrapper around [`integrate`] that discards events.
///
/// # Errors
///
/// Returns an error if any step fails.
pub fn integrate_unobserved<S: OdeSystem>(
    solver: &Solver<S>,
    method: Method,
    initial: Snapshot,
    dt: f64,
    steps: usize,
    config: &Config,
) -> Result<Trajectory, Error> {
    integrate(solver, method, initial, dt, steps, config, ())
}
