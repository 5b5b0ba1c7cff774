//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, so one
//! observer can serve the implicit methods and the trajectory integrator.
//!
//! # Event traits
//!
//! - [`HasResidual`]: events that carry a fixed-point residual
//! - [`HasTime`]: events that carry a simulated time
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use orrery_core::Observer;
//! use orrery_observers::traits::{CanStopEarly, HasTime};
//!
//! struct StopAfter {
//!     t: f64,
//! }
//!
//! impl<E: HasTime, A: CanStopEarly> Observer<E, A> for StopAfter {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.time() >= self.t).then(A::stop_early)
//!     }
//! }
//! ```

use orrery_solvers::{implicit, trajectory};

/// An event that carries a residual value.
pub trait HasResidual {
    /// Returns the residual for this event.
    fn residual(&self) -> f64;
}

/// An event that carries a simulated time.
pub trait HasTime {
    /// Returns the simulated time the event refers to.
    fn time(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl HasResidual for implicit::Event {
    fn residual(&self) -> f64 {
        implicit::Event::residual(self)
    }
}

impl HasTime for trajectory::Event {
    fn time(&self) -> f64 {
        self.snapshot.t
    }
}

impl CanStopEarly for implicit::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for trajectory::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
