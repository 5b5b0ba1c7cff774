use orrery_core::StateError;
use thiserror::Error;

/// Errors returned by [`Simulation`](crate::Simulation).
#[derive(Debug, Error)]
pub enum Error {
    #[error("integration step failed at t = {t}")]
    Step {
        t: f64,
        #[source]
        source: orrery_solvers::Error,
    },

    #[error("invalid settings: {reason}")]
    InvalidSettings { reason: &'static str },

    #[error("elapsed time must be finite, got {elapsed}")]
    InvalidElapsed { elapsed: f64 },

    #[error("replacement state does not match the simulation")]
    Shape(#[from] StateError),
}
