use orrery_core::{Observer, OdeSystem, State};

use crate::{
    Error, Method, Step, explicit,
    implicit::{self, Action, Config, Event},
};

/// Advances states of an [`OdeSystem`] with a method chosen per call.
///
/// A solver owns its derivative provider and whatever constants that
/// provider captured (spring constant, masses, gravitational constant). It
/// holds no simulation time or state; callers pass the current state in and
/// receive the next one back. Rebuilding a solver whenever constants change is
/// always safe.
///
/// # Example
///
/// ```
/// use orrery_core::{State, StateError};
/// use orrery_solvers::{Config, Method, Solver};
///
/// let solver = Solver::new(|_t: f64, y: &State| -> Result<State, StateError> {
///     Ok(y.scale(-1.0))
/// });
///
/// let step = solver
///     .solve(Method::Rk4, &State::from(1.0), 0.1, 0.0, &Config::default())
///     .unwrap();
///
/// assert!((step.state.as_scalar().unwrap() - (-0.1_f64).exp()).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Solver<S> {
    system: S,
}

impl<S: OdeSystem> Solver<S> {
    /// Creates a solver for the given derivative provider.
    pub fn new(system: S) -> Self {
        Self { system }
    }

    /// Returns the derivative provider.
    pub fn system(&self) -> &S {
        &self.system
    }

    /// Consumes the solver and returns its derivative provider.
    pub fn into_system(self) -> S {
        self.system
    }

    /// Evaluates the derivative of `state` at `t`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] if the derivative provider fails.
    pub fn derivative(&self, t: f64, state: &State) -> Result<State, Error> {
        explicit::evaluate(&self.system, t, state)
    }

    /// Takes one explicit Euler step. See [`explicit::euler`].
    ///
    /// # Errors
    ///
    /// Returns an error if the derivative provider fails or returns a
    /// derivative of the wrong shape.
    pub fn euler(&self, state: &State, dt: f64, t: f64) -> Result<State, Error> {
        explicit::euler(&self.system, state, dt, t)
    }

    /// Takes one explicit midpoint step. See [`explicit::midpoint`].
    ///
    /// # Errors
    ///
    /// Returns an error if the derivative provider fails or returns a
    /// derivative of the wrong shape.
    pub fn midpoint(&self, state: &State, dt: f64, t: f64) -> Result<State, Error> {
        explicit::midpoint(&self.system, state, dt, t)
    }

    /// Takes one classic Runge–Kutta step. See [`explicit::rk4`].
    ///
    /// # Errors
    ///
    /// Returns an error if the derivative provider fails or returns a
    /// derivative of the wrong shape.
    pub fn rk4(&self, state: &State, dt: f64, t: f64) -> Result<State, Error> {
        explicit::rk4(&self.system, state, dt, t)
    }

    /// Takes one backward Euler step. See [`implicit::backward_euler`].
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, the derivative provider
    /// fails, or a derivative has the wrong shape.
    pub fn backward_euler(
        &self,
        state: &State,
        dt: f64,
        t: f64,
        config: &Config,
    ) -> Result<Step, Error> {
        implicit::backward_euler(&self.system, state, dt, t, config, ())
    }

    /// Takes one implicit midpoint step. See [`implicit::implicit_midpoint`].
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, the derivative provider
    /// fails, or a derivative has the wrong shape.
    pub fn implicit_midpoint(
        &self,
        state: &State,
        dt: f64,
        t: f64,
        config: &Config,
    ) -> Result<Step, Error> {
        implicit::implicit_midpoint(&self.system, state, dt, t, config, ())
    }

    /// Advances `state` by `dt` using `method`.
    ///
    /// `config` only affects implicit methods.
    ///
    /// # Errors
    ///
    /// Returns an error if the derivative provider fails, a derivative has the
    /// wrong shape, or (for implicit methods) the config is invalid.
    pub fn solve(
        &self,
        method: Method,
        state: &State,
        dt: f64,
        t: f64,
        config: &Config,
    ) -> Result<Step, Error> {
        self.solve_observed(method, state, dt, t, config, ())
    }

    /// Advances `state` by `dt` using `method`, reporting implicit iterations
    /// and non-convergence warnings to `observer`.
    ///
    /// Explicit methods emit no events.
    ///
    /// # Errors
    ///
    /// Returns an error if the derivative provider fails, a derivative has the
    /// wrong shape, or (for implicit methods) the config is invalid.
    pub fn solve_observed<Obs>(
        &self,
        method: Method,
        state: &State,
        dt: f64,
        t: f64,
        config: &Config,
        observer: Obs,
    ) -> Result<Step, Error>
    where
        Obs: Observer<Event, Action>,
    {
        match method {
            Method::Euler => self.euler(state, dt, t).map(Step::explicit),
            Method::Midpoint => self.midpoint(state, dt, t).map(Step::explicit),
            Method::Rk4 => self.rk4(state, dt, t).map(Step::explicit),
            Method::BackwardEuler => {
                implicit::backward_euler(&self.system, state, dt, t, config, observer)
            }
            Method::ImplicitMidpoint => {
                implicit::implicit_midpoint(&self.system, state, dt, t, config, observer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use orrery_core::StateError;

    use crate::Status;

    /// Damped oscillator with k = 4, m = 1, b = 0.5.
    fn damped(_t: f64, y: &State) -> Result<State, StateError> {
        let x = y.expect_scalar_field("x")?;
        let v = y.expect_scalar_field("v")?;
        Ok(State::record([("x", v), ("v", -4.0 * x - 0.5 * v)]))
    }

    #[test]
    fn dispatch_matches_direct_calls() {
        let solver = Solver::new(damped);
        let state = State::record([("x", 1.0), ("v", 0.5)]);
        let config = Config::default();

        let direct = [
            solver.euler(&state, 0.05, 1.0).unwrap(),
            solver.midpoint(&state, 0.05, 1.0).unwrap(),
            solver.rk4(&state, 0.05, 1.0).unwrap(),
            solver.backward_euler(&state, 0.05, 1.0, &config).unwrap().state,
            solver.implicit_midpoint(&state, 0.05, 1.0, &config).unwrap().state,
        ];

        for (method, expected) in Method::ALL.into_iter().zip(direct) {
            let step = solver.solve(method, &state, 0.05, 1.0, &config).unwrap();
            assert_eq!(step.state, expected, "{method}");
            assert_eq!(step.status == Status::Explicit, !method.is_implicit());
        }
    }

    #[test]
    fn explicit_methods_ignore_invalid_config() {
        let solver = Solver::new(damped);
        let state = State::record([("x", 1.0), ("v", 0.0)]);
        let config = Config {
            max_iters: 0,
            tolerance: -1.0,
        };

        assert!(solver.solve(Method::Rk4, &state, 0.1, 0.0, &config).is_ok());
        assert!(matches!(
            solver.solve(Method::BackwardEuler, &state, 0.1, 0.0, &config),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn implicit_methods_agree_with_rk4_for_small_steps() {
        let solver = Solver::new(damped);
        let state = State::record([("x", 1.0), ("v", 0.0)]);
        let config = Config {
            max_iters: 100,
            tolerance: 1e-10,
        };

        let reference = solver.rk4(&state, 0.001, 0.0).unwrap();
        for method in [Method::BackwardEuler, Method::ImplicitMidpoint] {
            let step = solver.solve(method, &state, 0.001, 0.0, &config).unwrap();
            assert!(matches!(step.status, Status::Converged { .. }));
            assert_relative_eq!(
                step.state.distance(&reference).unwrap(),
                0.0,
                epsilon = 1e-5
            );
        }
    }

    #[test]
    fn derivative_passes_through() {
        let solver = Solver::new(damped);
        let dy = solver
            .derivative(0.0, &State::record([("x", 1.0), ("v", 2.0)]))
            .unwrap();
        assert_eq!(dy, State::record([("x", 2.0), ("v", -5.0)]));
    }
}
