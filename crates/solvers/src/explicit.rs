//! Explicit single-step methods.
//!
//! Each function computes the next state directly from derivative
//! evaluations at known states. They never iterate, and the only failures
//! come from the derivative provider or a malformed derivative shape.
//!
//! A zero step size returns the input state unchanged for every method.

use orrery_core::{OdeSystem, State};

use crate::Error;

/// Advances `state` by `dt` using explicit Euler.
///
/// ```text
/// y' = y + dt * f(t, y)
/// ```
///
/// # Errors
///
/// Returns an error if the derivative provider fails or returns a derivative
/// with a different shape than `state`.
pub fn euler<S: OdeSystem>(system: &S, state: &State, dt: f64, t: f64) -> Result<State, Error> {
    let k1 = evaluate(system, t, state)?;
    Ok(state.add_scaled(&k1, dt)?)
}

/// Advances `state` by `dt` using the explicit midpoint method (RK2).
///
/// ```text
/// k1 = f(t, y)
/// k2 = f(t + dt/2, y + dt/2 * k1)
/// y' = y + dt * k2
/// ```
///
/// # Errors
///
/// Returns an error if the derivative provider fails or returns a derivative
/// with a different shape than `state`.
pub fn midpoint<S: OdeSystem>(system: &S, state: &State, dt: f64, t: f64) -> Result<State, Error> {
    let half = 0.5 * dt;

    let k1 = evaluate(system, t, state)?;
    let k2 = evaluate(system, t + half, &state.add_scaled(&k1, half)?)?;

    Ok(state.add_scaled(&k2, dt)?)
}

/// Advances `state` by `dt` using classic fourth-order Runge–Kutta.
///
/// ```text
/// k1 = f(t, y)
/// k2 = f(t + dt/2, y + dt/2 * k1)
/// k3 = f(t + dt/2, y + dt/2 * k2)
/// k4 = f(t + dt, y + dt * k3)
/// y' = y + dt/6 * (k1 + 2 k2 + 2 k3 + k4)
/// ```
///
/// # Errors
///
/// Returns an error if the derivative provider fails or returns a derivative
/// with a different shape than `state`.
pub fn rk4<S: OdeSystem>(system: &S, state: &State, dt: f64, t: f64) -> Result<State, Error> {
    let half = 0.5 * dt;

    let k1 = evaluate(system, t, state)?;
    let k2 = evaluate(system, t + half, &state.add_scaled(&k1, half)?)?;
    let k3 = evaluate(system, t + half, &state.add_scaled(&k2, half)?)?;
    let k4 = evaluate(system, t + dt, &state.add_scaled(&k3, dt)?)?;

    let weighted = k1
        .add_scaled(&k2, 2.0)?
        .add_scaled(&k3, 2.0)?
        .add(&k4)?;

    Ok(state.add_scaled(&weighted, dt / 6.0)?)
}

/// Calls the derivative provider, tagging failures with the evaluation time.
pub(crate) fn evaluate<S: OdeSystem>(system: &S, t: f64, state: &State) -> Result<State, Error> {
    system
        .derivative(t, state)
        .map_err(|err| Error::system(t, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{cell::Cell, convert::Infallible};

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use orrery_core::StateError;

    /// dy/dt = -y, with y(0) = 1.
    fn decay(_t: f64, y: &State) -> Result<State, Infallible> {
        Ok(y.scale(-1.0))
    }

    /// dx/dt = v, dv/dt = -x.
    fn unit_oscillator(_t: f64, y: &State) -> Result<State, StateError> {
        let x = y.expect_scalar_field("x")?;
        let v = y.expect_scalar_field("v")?;
        Ok(State::record([("x", v), ("v", -x)]))
    }

    type System<E> = fn(f64, &State) -> Result<State, E>;
    type Stepper<E> = fn(&System<E>, &State, f64, f64) -> Result<State, Error>;

    fn solve_decay(method: Stepper<Infallible>, steps: usize) -> f64 {
        let dt = 1.0 / steps as f64;
        let system: System<Infallible> = decay;

        let mut y = State::from(1.0);
        let mut t = 0.0;
        for _ in 0..steps {
            y = method(&system, &y, dt, t).unwrap();
            t += dt;
        }
        y.as_scalar().unwrap()
    }

    #[test]
    fn euler_single_step() {
        let next = euler(&decay, &State::from(2.0), 0.1, 0.0).unwrap();
        assert_relative_eq!(next.as_scalar().unwrap(), 1.8);
    }

    #[test]
    fn midpoint_single_step() {
        // k1 = -2, y_mid = 1.9, k2 = -1.9, y' = 2 - 0.19
        let next = midpoint(&decay, &State::from(2.0), 0.1, 0.0).unwrap();
        assert_relative_eq!(next.as_scalar().unwrap(), 1.81);
    }

    #[test]
    fn rk4_single_step_matches_taylor_series() {
        // RK4 on a linear system reproduces exp(-h) to fourth order.
        let h: f64 = 0.1;
        let expected = 1.0 - h + h.powi(2) / 2.0 - h.powi(3) / 6.0 + h.powi(4) / 24.0;

        let next = rk4(&decay, &State::from(1.0), h, 0.0).unwrap();
        assert_relative_eq!(next.as_scalar().unwrap(), expected, epsilon = 1e-15);
    }

    #[test]
    fn zero_step_is_identity() {
        let state = State::record([("x", 3.0), ("v", -1.5)]);

        let system: System<StateError> = unit_oscillator;
        let methods: [Stepper<StateError>; 3] = [euler, midpoint, rk4];

        for method in methods {
            let next = method(&system, &state, 0.0, 7.0).unwrap();
            assert_eq!(next, state);
        }
    }

    #[test]
    fn convergence_order() {
        let exact = (-1.0_f64).exp();

        let euler_error = (solve_decay(euler, 100) - exact).abs();
        let midpoint_error = (solve_decay(midpoint, 100) - exact).abs();
        let rk4_error = (solve_decay(rk4, 100) - exact).abs();

        assert!(midpoint_error < euler_error);
        assert!(rk4_error < midpoint_error);

        // Halving the step roughly halves Euler's error and divides RK4's by 16.
        let euler_ratio = euler_error / (solve_decay(euler, 200) - exact).abs();
        let rk4_ratio = rk4_error / (solve_decay(rk4, 200) - exact).abs();
        assert_abs_diff_eq!(euler_ratio, 2.0, epsilon = 0.05);
        assert_abs_diff_eq!(rk4_ratio, 16.0, epsilon = 1.0);
    }

    #[test]
    fn rk4_evaluates_four_times_at_stage_times() {
        let times = Cell::new(Vec::new());
        let recorder = |t: f64, y: &State| -> Result<State, Infallible> {
            let mut seen = times.take();
            seen.push(t);
            times.set(seen);
            Ok(y.zeros_like())
        };

        rk4(&recorder, &State::from(1.0), 0.5, 2.0).unwrap();

        assert_eq!(times.take(), vec![2.0, 2.25, 2.25, 2.5]);
    }

    #[test]
    fn malformed_derivative_is_shape_error() {
        let bad = |_t: f64, _y: &State| -> Result<State, Infallible> { Ok(State::from([0.0, 0.0])) };

        let err = euler(&bad, &State::from([1.0, 2.0, 3.0]), 0.1, 0.0).unwrap_err();
        assert!(matches!(err, Error::Shape(_)));
    }

    #[test]
    fn provider_errors_carry_time() {
        let err = midpoint(&unit_oscillator, &State::from(1.0), 0.2, 1.0).unwrap_err();

        let Error::System { t, source } = err else {
            panic!("expected a system error");
        };
        assert_relative_eq!(t, 1.0);
        assert!(source.to_string().contains("record with field `x`"));
    }
}
