//! Core types for the Orrery integration toolkit.
//!
//! This crate defines the shared abstractions that solvers, models, and
//! simulation drivers build on:
//!
//! - [`State`]: a scalar, sequence, or record of numeric leaves with
//!   element-wise `add`, `scale`, and `distance`
//! - [`OdeSystem`]: a derivative provider `f(t, state) -> state'`
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`Snapshot`]: a state captured at a point in time

mod observer;
mod snapshot;
mod state;
mod system;

pub use observer::Observer;
pub use snapshot::Snapshot;
pub use state::{Leaves, State, StateError};
pub use system::{OdeSystem, check_shape};
