//! Shared scenarios for the cross-crate tests.

use orrery_models::{NBody, Oscillator, ParameterError, presets};
use orrery_sim::Simulation;
use serde::Deserialize;

/// Gravitational constant used by the three-body scenarios.
pub const G: f64 = 1000.0;

/// Mass of each body in the three-body scenarios.
pub const BODY_MASS: f64 = 10.0;

/// A scenario file: driver settings plus an optional end time.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub settings: orrery_sim::Settings,
    pub end_time: Option<f64>,
}

/// The undamped oscillator demo: `k = 10`, `m = 1`, displaced 100 units.
pub fn oscillator() -> Result<Simulation<Oscillator>, ParameterError> {
    let model = Oscillator::undamped_si(10.0, 1.0)?;
    Ok(Simulation::new(model, presets::displaced_oscillator().into()))
}

/// Three equal masses on the symmetric triangular start.
pub fn three_body() -> Result<Simulation<NBody>, ParameterError> {
    let model = NBody::new(G, [BODY_MASS; 3])?;
    let bodies = presets::three_body((400.0, 300.0), 100.0, 1.5);
    Ok(Simulation::new(model, NBody::to_state(&bodies)))
}
