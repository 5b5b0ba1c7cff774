//! Planar N-body gravity.
//!
//! The state is a sequence with one record per body:
//!
//! ```text
//! [{x, y, vx, vy}, {x, y, vx, vy}, ...]
//! ```
//!
//! Each body accelerates toward every other body with
//! `G m_j (r_j - r_i) / r³`, where the separation `r` is clamped to a minimum
//! distance so close encounters cannot produce unbounded forces. The clamp
//! trades physical accuracy for stability at near-zero separations.
//!
//! Extra numeric fields in a body record (a display radius or the body's mass,
//! for example) receive a zero derivative and pass through integration
//! unchanged.

use orrery_core::{OdeSystem, State, StateError};

use crate::ParameterError;

/// Default minimum separation used by the force law.
pub const DEFAULT_MIN_DISTANCE: f64 = 50.0;

/// Position and velocity of one body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Body {
    /// Creates a body from position and velocity.
    #[must_use]
    pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self { x, y, vx, vy }
    }
}

impl From<Body> for State {
    fn from(Body { x, y, vx, vy }: Body) -> Self {
        State::record([("x", x), ("y", y), ("vx", vx), ("vy", vy)])
    }
}

impl TryFrom<&State> for Body {
    type Error = StateError;

    fn try_from(state: &State) -> Result<Self, Self::Error> {
        Ok(Self {
            x: state.expect_scalar_field("x")?,
            y: state.expect_scalar_field("y")?,
            vx: state.expect_scalar_field("vx")?,
            vy: state.expect_scalar_field("vy")?,
        })
    }
}

/// Derivative provider for planar gravitational N-body systems.
///
/// Masses are fixed at construction; changing a mass means building a new
/// `NBody`. The state's body count must match the number of masses.
#[derive(Debug, Clone, PartialEq)]
pub struct NBody {
    g: f64,
    masses: Vec<f64>,
    min_distance: f64,
}

impl NBody {
    /// Creates a system with gravitational constant `g` and one mass per body.
    ///
    /// Uses [`DEFAULT_MIN_DISTANCE`] as the softening floor.
    ///
    /// # Errors
    ///
    /// Returns an error if `g` is negative or any mass is not positive.
    pub fn new(g: f64, masses: impl Into<Vec<f64>>) -> Result<Self, ParameterError> {
        let masses = masses.into();
        for &mass in &masses {
            ParameterError::positive("mass", mass)?;
        }

        Ok(Self {
            g: ParameterError::non_negative("gravitational constant", g)?,
            masses,
            min_distance: DEFAULT_MIN_DISTANCE,
        })
    }

    /// Replaces the softening floor.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_distance` is negative or not finite.
    pub fn with_min_distance(mut self, min_distance: f64) -> Result<Self, ParameterError> {
        self.min_distance = ParameterError::non_negative("minimum distance", min_distance)?;
        Ok(self)
    }

    /// Returns the gravitational constant.
    #[must_use]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Returns the body masses.
    #[must_use]
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Returns the softening floor.
    #[must_use]
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Returns the number of bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Returns `true` if the system has no bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Reads the bodies out of a state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state is not a sequence of body records or its
    /// length differs from the number of masses.
    pub fn bodies(&self, state: &State) -> Result<Vec<Body>, StateError> {
        let items = state.expect_sequence()?;
        self.check_count(items.len())?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| Body::try_from(item).map_err(|err| err.within_index(i)))
            .collect()
    }

    /// Builds a state from bodies.
    #[must_use]
    pub fn to_state(bodies: &[Body]) -> State {
        bodies.iter().copied().map(State::from).collect()
    }

    /// Computes the acceleration of every body.
    ///
    /// # Errors
    ///
    /// Returns an error if `bodies` does not hold one entry per mass.
    pub fn accelerations(&self, bodies: &[Body]) -> Result<Vec<(f64, f64)>, StateError> {
        self.check_count(bodies.len())?;

        let mut acc = vec![(0.0, 0.0); bodies.len()];

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let dx = bodies[j].x - bodies[i].x;
                let dy = bodies[j].y - bodies[i].y;
                let r = dx.hypot(dy).max(self.min_distance);
                if r == 0.0 {
                    // Coincident bodies with no softening floor exert no
                    // well-defined force.
                    continue;
                }

                // G / r² times the unit vector (dx, dy) / r.
                let scale = self.g / (r * r * r);
                acc[i].0 += scale * self.masses[j] * dx;
                acc[i].1 += scale * self.masses[j] * dy;
                acc[j].0 -= scale * self.masses[i] * dx;
                acc[j].1 -= scale * self.masses[i] * dy;
            }
        }

        Ok(acc)
    }

    /// Returns the total linear momentum `Σ m v`.
    ///
    /// # Errors
    ///
    /// Returns an error if `bodies` does not hold one entry per mass.
    pub fn total_momentum(&self, bodies: &[Body]) -> Result<(f64, f64), StateError> {
        self.check_count(bodies.len())?;

        Ok(self
            .masses
            .iter()
            .zip(bodies)
            .fold((0.0, 0.0), |(px, py), (m, b)| (px + m * b.vx, py + m * b.vy)))
    }

    /// Returns the mass-weighted center of the bodies.
    ///
    /// # Errors
    ///
    /// Returns an error if `bodies` does not hold one entry per mass.
    pub fn center_of_mass(&self, bodies: &[Body]) -> Result<(f64, f64), StateError> {
        self.check_count(bodies.len())?;

        let total: f64 = self.masses.iter().sum();
        let (sx, sy) = self
            .masses
            .iter()
            .zip(bodies)
            .fold((0.0, 0.0), |(sx, sy), (m, b)| (sx + m * b.x, sy + m * b.y));
        Ok((sx / total, sy / total))
    }

    /// Returns the kinetic plus gravitational potential energy.
    ///
    /// The potential of each pair uses the same clamped separation as the
    /// force law, so the value is exact only while all pairs are farther apart
    /// than the softening floor.
    ///
    /// # Errors
    ///
    /// Returns an error if `bodies` does not hold one entry per mass.
    pub fn total_energy(&self, bodies: &[Body]) -> Result<f64, StateError> {
        self.check_count(bodies.len())?;

        let kinetic: f64 = self
            .masses
            .iter()
            .zip(bodies)
            .map(|(m, b)| 0.5 * m * (b.vx * b.vx + b.vy * b.vy))
            .sum();

        let mut potential = 0.0;
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let r = (bodies[j].x - bodies[i].x)
                    .hypot(bodies[j].y - bodies[i].y)
                    .max(self.min_distance);
                if r > 0.0 {
                    potential -= self.g * self.masses[i] * self.masses[j] / r;
                }
            }
        }

        Ok(kinetic + potential)
    }

    fn check_count(&self, count: usize) -> Result<(), StateError> {
        if count == self.masses.len() {
            return Ok(());
        }
        Err(StateError::ShapeMismatch {
            path: String::new(),
            expected: format!("sequence of length {}", self.masses.len()),
            found: format!("sequence of length {count}"),
        })
    }
}

impl OdeSystem for NBody {
    type Error = StateError;

    fn derivative(&self, _t: f64, state: &State) -> Result<State, StateError> {
        let bodies = self.bodies(state)?;
        let acc = self.accelerations(&bodies)?;

        state
            .expect_sequence()?
            .iter()
            .zip(bodies.iter().zip(acc))
            .map(|(record, (body, (ax, ay)))| body_derivative(record, body, ax, ay))
            .collect::<Result<Vec<_>, _>>()
            .map(State::Sequence)
    }
}

/// Builds a body's derivative record, zeroing any extra fields.
fn body_derivative(record: &State, body: &Body, ax: f64, ay: f64) -> Result<State, StateError> {
    let State::Record(fields) = record else {
        return Err(StateError::ShapeMismatch {
            path: String::new(),
            expected: "body record".to_string(),
            found: record.to_string(),
        });
    };

    Ok(State::Record(
        fields
            .iter()
            .map(|(name, value)| {
                let rate = match name.as_str() {
                    "x" => State::Scalar(body.vx),
                    "y" => State::Scalar(body.vy),
                    "vx" => State::Scalar(ax),
                    "vy" => State::Scalar(ay),
                    _ => value.zeros_like(),
                };
                (name.clone(), rate)
            })
            .collect(),
    ))
}
