//! Numerical integration methods for [`orrery_core::State`] values.
//!
//! - [`explicit`]: Euler, midpoint (RK2), and classic RK4 steps
//! - [`implicit`]: backward Euler and implicit midpoint, solved by
//!   fixed-point iteration with observable convergence
//! - [`Solver`]: owns a derivative provider and dispatches by [`Method`]
//! - [`trajectory`]: fixed-step integration with recorded history

pub mod explicit;
pub mod implicit;
pub mod trajectory;

mod error;
mod method;
mod solver;
mod step;

pub use error::Error;
pub use implicit::Config;
pub use method::{Method, UnknownMethod};
pub use solver::Solver;
pub use step::{Status, Step};
