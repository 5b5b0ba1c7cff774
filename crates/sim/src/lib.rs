//! A frame-driven driver for Orrery solvers.
//!
//! [`Simulation`] owns the current state and simulated time of one system. A
//! render loop calls [`Simulation::advance`] once per frame with the elapsed
//! wall-clock time and the frame's [`Settings`]; the driver converts that into
//! as many fixed-size integration steps as needed.

mod error;
mod settings;
mod simulation;

pub use error::Error;
pub use settings::Settings;
pub use simulation::{Frame, Phase, Simulation};
