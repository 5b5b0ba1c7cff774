//! Reusable observers for Orrery solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the implicit step methods and the trajectory integrator.
//!
//! # Modules
//!
//! - [`traits`]: capability traits for cross-solver observers
//!   ([`HasResidual`], [`HasTime`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`Diagnostics`] records non-convergence warnings.
//! - [`GoodEnough`] stops fixed-point iteration at a looser tolerance.
//! - [`Until`] stops a trajectory at a simulated time.
//!
//! [`Observer`]: orrery_core::Observer
//! [`HasResidual`]: traits::HasResidual
//! [`HasTime`]: traits::HasTime
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod diagnostics;
mod good_enough;
mod until;

pub use diagnostics::{Diagnostics, Warning};
pub use good_enough::GoodEnough;
pub use until::Until;
