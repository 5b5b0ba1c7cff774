use crate::{State, StateError};

/// A provider of time derivatives for a [`State`].
///
/// Implementations map simulation time and state to the rate of change of
/// every leaf. The returned state must have the same shape as the input.
///
/// A derivative provider must be pure: solvers call it several times per
/// step (four times for RK4, once per iteration for implicit methods) and
/// rely on repeated calls with equal arguments returning equal results.
///
/// Closures of the form `Fn(f64, &State) -> Result<State, E>` implement this
/// trait, which is convenient for ad-hoc systems:
///
/// ```
/// use orrery_core::{OdeSystem, State, StateError};
///
/// // Exponential decay: dy/dt = -y
/// let decay = |_t: f64, y: &State| -> Result<State, StateError> { Ok(y.scale(-1.0)) };
///
/// let dy = decay.derivative(0.0, &State::from(2.0)).unwrap();
/// assert_eq!(dy, State::from(-2.0));
/// ```
pub trait OdeSystem {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Computes the derivative of `state` at time `t`.
    ///
    /// # Errors
    ///
    /// Each system defines its own `Error`, typically a [`StateError`] when the
    /// state does not have the shape the system expects.
    fn derivative(&self, t: f64, state: &State) -> Result<State, Self::Error>;
}

impl<F, E> OdeSystem for F
where
    F: Fn(f64, &State) -> Result<State, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn derivative(&self, t: f64, state: &State) -> Result<State, E> {
        self(t, state)
    }
}

/// Checks that a derivative has the same shape as the state it describes.
///
/// Solvers use this to catch providers that return malformed derivatives
/// before they are folded into the state.
///
/// # Errors
///
/// Returns [`StateError::ShapeMismatch`] if the shapes differ.
pub fn check_shape(state: &State, derivative: &State) -> Result<(), StateError> {
    // Zero-weight sum is the cheapest recursive shape comparison available.
    state.add_scaled(derivative, 0.0).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl OdeSystem for Constant {
        type Error = StateError;

        fn derivative(&self, _t: f64, state: &State) -> Result<State, StateError> {
            state.zeros_like().add(&State::from(self.0))
        }
    }

    #[test]
    fn closures_are_systems() {
        let time_derivative = |t: f64, _y: &State| -> Result<State, StateError> { Ok(State::from(t)) };

        assert_eq!(
            time_derivative.derivative(3.0, &State::from(0.0)).unwrap(),
            State::from(3.0)
        );
    }

    #[test]
    fn struct_systems_propagate_shape_errors() {
        let system = Constant(2.0);

        assert_eq!(
            system.derivative(0.0, &State::from(5.0)).unwrap(),
            State::from(2.0)
        );
        assert!(system.derivative(0.0, &State::from([5.0])).is_err());
    }

    #[test]
    fn check_shape_detects_malformed_derivatives() {
        let state = State::record([("x", 1.0), ("v", 0.0)]);

        assert!(check_shape(&state, &State::record([("x", 0.0), ("v", -1.0)])).is_ok());
        assert!(check_shape(&state, &State::record([("x", 0.0)])).is_err());
    }
}
