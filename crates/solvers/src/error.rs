use std::error::Error as StdError;

use orrery_core::StateError;
use thiserror::Error;

/// Errors that can occur while taking an integration step.
///
/// Non-convergence of an implicit method is not an error; it is reported
/// through [`Status::MaxIters`](crate::Status::MaxIters) and an observer event.
#[derive(Debug, Error)]
pub enum Error {
    #[error("derivative evaluation failed at t = {t}")]
    System {
        t: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error(transparent)]
    Shape(#[from] StateError),

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
}

impl Error {
    pub(crate) fn system<E: StdError + Send + Sync + 'static>(t: f64, err: E) -> Self {
        Self::System {
            t,
            source: Box::new(err),
        }
    }
}
