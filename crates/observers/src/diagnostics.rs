use std::fmt;

use orrery_core::Observer;
use orrery_solvers::{Method, implicit::Event};

/// A recorded non-convergence warning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Warning {
    pub method: Method,
    pub iters: usize,
    pub residual: f64,
    pub tolerance: f64,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} did not converge after {} iterations (residual {:e}, tolerance {:e})",
            self.method, self.iters, self.residual, self.tolerance,
        )
    }
}

/// Records implicit-method diagnostics without influencing the solve.
///
/// Counts every fixed-point iteration and keeps each
/// [`Event::NotConverged`] warning. A driver that wants the warnings in its
/// own log can drain them into any [`fmt::Write`] sink with
/// [`Diagnostics::write_to`].
///
/// # Example
///
/// ```
/// use orrery_core::{State, StateError};
/// use orrery_observers::Diagnostics;
/// use orrery_solvers::{Config, Method, Solver};
///
/// let solver = Solver::new(|_t: f64, y: &State| -> Result<State, StateError> {
///     Ok(y.scale(-50.0))
/// });
/// let config = Config { max_iters: 3, tolerance: 1e-12 };
///
/// let mut diagnostics = Diagnostics::new();
/// solver
///     .solve_observed(Method::BackwardEuler, &State::from(1.0), 0.1, 0.0, &config, &mut diagnostics)
///     .unwrap();
///
/// assert_eq!(diagnostics.warning_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    iterations: usize,
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of fixed-point iterations observed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the recorded warnings, oldest first.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Returns the number of recorded warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Returns the final residual of the most recent warning.
    pub fn last_residual(&self) -> Option<f64> {
        self.warnings.last().map(|warning| warning.residual)
    }

    /// Returns each warning formatted as a log line.
    pub fn messages(&self) -> impl Iterator<Item = String> + '_ {
        self.warnings.iter().map(ToString::to_string)
    }

    /// Writes each recorded warning as one line to `sink`, then clears them.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails. Warnings not yet written are kept.
    pub fn write_to<W: fmt::Write>(&mut self, sink: &mut W) -> fmt::Result {
        let mut written = 0;
        let result = self.warnings.iter().try_for_each(|warning| {
            writeln!(sink, "warning: {warning}")?;
            written += 1;
            Ok(())
        });
        self.warnings.drain(..written);
        result
    }

    /// Forgets all iterations and warnings.
    pub fn clear(&mut self) {
        self.iterations = 0;
        self.warnings.clear();
    }
}

impl<A> Observer<Event, A> for Diagnostics {
    fn observe(&mut self, event: &Event) -> Option<A> {
        match *event {
            Event::Iteration { .. } => self.iterations += 1,
            Event::NotConverged {
                method,
                iters,
                residual,
                tolerance,
            } => self.warnings.push(Warning {
                method,
                iters,
                residual,
                tolerance,
            }),
        }
        None
    }
}

impl<A> Observer<Event, A> for &mut Diagnostics {
    fn observe(&mut self, event: &Event) -> Option<A> {
        Observer::<Event, A>::observe(&mut **self, event)
    }
}
