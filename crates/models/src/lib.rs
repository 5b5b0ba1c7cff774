//! Physical models that provide time derivatives for Orrery solvers.
//!
//! - [`Oscillator`]: damped harmonic oscillator with an analytic reference
//! - [`NBody`]: planar N-body gravity with a softening floor
//! - [`presets`]: initial configurations used by the demos
//!
//! Models are pure derivative providers. They hold physical constants only;
//! position and velocity live in the caller's [`State`](orrery_core::State).

mod error;
mod nbody;
mod oscillator;
pub mod presets;

pub use error::ParameterError;
pub use nbody::{Body, DEFAULT_MIN_DISTANCE, NBody};
pub use oscillator::{DampingCoefficient, Oscillator, OscillatorState, Stiffness};
