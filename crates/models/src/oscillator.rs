//! A damped harmonic oscillator.
//!
//! ```text
//! m x'' = -k x - b x'
//! ```
//!
//! written as the first-order system `x' = v`, `v' = -(k/m) x - (b/m) v` over
//! the record state `{x, v}`.

use orrery_core::{OdeSystem, State, StateError};
use uom::{
    si::{
        Quantity, ISQ, SI,
        f64::{Force, Length, Mass, Time},
        force::newton,
        length::meter,
        mass::kilogram,
        time::second,
    },
    typenum::{N1, N2, P1, Z0},
};

use crate::ParameterError;

/// Stiffness: force per unit length (N/m or kg/s²).
pub type Stiffness = Quantity<ISQ<Z0, P1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Damping coefficient: force per unit velocity (N·s/m or kg/s).
pub type DampingCoefficient = Quantity<ISQ<Z0, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Position and velocity of an oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OscillatorState {
    pub x: f64,
    pub v: f64,
}

/// Derivative provider for a damped spring-mass system.
///
/// Constants are stored in SI base units. Changing any of them means
/// constructing a new oscillator; the caller's state is unaffected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    stiffness: f64,
    mass: f64,
    damping: f64,
}

impl Oscillator {
    /// Creates an oscillator from dimensioned quantities.
    ///
    /// # Errors
    ///
    /// Returns an error if the mass is not positive, or the stiffness or
    /// damping is negative.
    pub fn new(
        stiffness: Stiffness,
        mass: Mass,
        damping: DampingCoefficient,
    ) -> Result<Self, ParameterError> {
        Self::new_si(stiffness.value, mass.value, damping.value)
    }

    /// Creates an oscillator from SI values (N/m, kg, N·s/m).
    ///
    /// # Errors
    ///
    /// Returns an error if the mass is not positive, or the stiffness or
    /// damping is negative.
    pub fn new_si(stiffness: f64, mass: f64, damping: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            stiffness: ParameterError::non_negative("stiffness", stiffness)?,
            mass: ParameterError::positive("mass", mass)?,
            damping: ParameterError::non_negative("damping", damping)?,
        })
    }

    /// Creates an undamped oscillator from SI values (N/m, kg).
    ///
    /// # Errors
    ///
    /// Returns an error if the mass is not positive or the stiffness is
    /// negative.
    pub fn undamped_si(stiffness: f64, mass: f64) -> Result<Self, ParameterError> {
        Self::new_si(stiffness, mass, 0.0)
    }

    /// Returns the stiffness.
    #[must_use]
    pub fn stiffness(&self) -> Stiffness {
        Force::new::<newton>(self.stiffness) / Length::new::<meter>(1.0)
    }

    /// Returns the mass.
    #[must_use]
    pub fn mass(&self) -> Mass {
        Mass::new::<kilogram>(self.mass)
    }

    /// Returns the damping coefficient.
    #[must_use]
    pub fn damping(&self) -> DampingCoefficient {
        Force::new::<newton>(self.damping) * Time::new::<second>(1.0) / Length::new::<meter>(1.0)
    }

    /// Returns the undamped natural frequency `ω = sqrt(k/m)` in rad/s.
    #[must_use]
    pub fn omega(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Returns the undamped period `2π/ω`, or infinity without a spring.
    #[must_use]
    pub fn period(&self) -> f64 {
        std::f64::consts::TAU / self.omega()
    }

    /// Evaluates the closed-form undamped solution `t` after `initial`.
    ///
    /// ```text
    /// x(t) = x0 cos(ωt) + (v0/ω) sin(ωt)
    /// v(t) = -x0 ω sin(ωt) + v0 cos(ωt)
    /// ```
    ///
    /// Damping is ignored; this is the reference curve drawn alongside the
    /// numerical solution. With zero stiffness the mass coasts at `v0`.
    #[must_use]
    pub fn analytic(&self, initial: OscillatorState, t: f64) -> OscillatorState {
        let OscillatorState { x: x0, v: v0 } = initial;
        let omega = self.omega();

        if omega == 0.0 {
            return OscillatorState { x: x0 + v0 * t, v: v0 };
        }

        let (sin, cos) = (omega * t).sin_cos();
        OscillatorState {
            x: x0 * cos + (v0 / omega) * sin,
            v: -x0 * omega * sin + v0 * cos,
        }
    }

    /// Returns the mechanical energy `½ m v² + ½ k x²`.
    #[must_use]
    pub fn energy(&self, state: OscillatorState) -> f64 {
        0.5 * self.mass * state.v * state.v + 0.5 * self.stiffness * state.x * state.x
    }
}

impl OdeSystem for Oscillator {
    type Error = StateError;

    fn derivative(&self, _t: f64, state: &State) -> Result<State, StateError> {
        let OscillatorState { x, v } = OscillatorState::try_from(state)?;

        let acceleration = -(self.stiffness / self.mass) * x - (self.damping / self.mass) * v;

        Ok(State::record([("x", v), ("v", acceleration)]))
    }
}

impl From<OscillatorState> for State {
    fn from(OscillatorState { x, v }: OscillatorState) -> Self {
        State::record([("x", x), ("v", v)])
    }
}

impl TryFrom<&State> for OscillatorState {
    type Error = StateError;

    fn try_from(state: &State) -> Result<Self, Self::Error> {
        Ok(Self {
            x: state.expect_scalar_field("x")?,
            v: state.expect_scalar_field("v")?,
        })
    }
}
