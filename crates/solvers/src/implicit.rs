//! Implicit single-step methods solved by fixed-point iteration.
//!
//! Both methods seed the iteration with an explicit Euler estimate and then
//! repeatedly substitute the latest guess into the implicit update until the
//! RMS change between successive guesses drops below
//! [`Config::tolerance`].
//!
//! If [`Config::max_iters`] is reached first, the last guess is returned with
//! [`Status::MaxIters`] and the observer receives [`Event::NotConverged`].
//! Non-convergence never fails the step; an animation loop must keep
//! producing frames.

mod action;
mod config;
mod event;

pub use action::Action;
pub use config::Config;
pub use event::Event;

use orrery_core::{Observer, OdeSystem, State};

use crate::{Error, Method, Status, Step, explicit};

/// Advances `state` by `dt` using backward Euler.
///
/// Solves `y' = y + dt * f(t + dt, y')` for `y'`.
///
/// # Errors
///
/// Returns an error if the config is invalid, the derivative provider fails,
/// or a derivative has the wrong shape.
pub fn backward_euler<S, Obs>(
    system: &S,
    state: &State,
    dt: f64,
    t: f64,
    config: &Config,
    observer: Obs,
) -> Result<Step, Error>
where
    S: OdeSystem,
    Obs: Observer<Event, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let seed = explicit::euler(system, state, dt, t)?;

    fixed_point(
        Method::BackwardEuler,
        state,
        seed,
        dt,
        config,
        observer,
        |guess| explicit::evaluate(system, t + dt, guess),
    )
}

/// Advances `state` by `dt` using the implicit midpoint rule.
///
/// Solves `y' = y + dt * f(t + dt/2, (y + y') / 2)` for `y'`.
///
/// # Errors
///
/// Returns an error if the config is invalid, the derivative provider fails,
/// or a derivative has the wrong shape.
pub fn implicit_midpoint<S, Obs>(
    system: &S,
    state: &State,
    dt: f64,
    t: f64,
    config: &Config,
    observer: Obs,
) -> Result<Step, Error>
where
    S: OdeSystem,
    Obs: Observer<Event, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let seed = explicit::euler(system, state, dt, t)?;
    let t_mid = t + 0.5 * dt;

    fixed_point(
        Method::ImplicitMidpoint,
        state,
        seed,
        dt,
        config,
        observer,
        |guess| {
            let mid = state.add(guess)?.scale(0.5);
            explicit::evaluate(system, t_mid, &mid)
        },
    )
}

/// Iterates `y_{k+1} = y + dt * slope(y_k)` starting from `seed`.
fn fixed_point<F, Obs>(
    method: Method,
    state: &State,
    seed: State,
    dt: f64,
    config: &Config,
    mut observer: Obs,
    slope: F,
) -> Result<Step, Error>
where
    F: Fn(&State) -> Result<State, Error>,
    Obs: Observer<Event, Action>,
{
    let mut guess = seed;
    let mut residual = f64::INFINITY;

    for iter in 1..=config.max_iters {
        let next = state.add_scaled(&slope(&guess)?, dt)?;
        residual = next.distance(&guess)?;
        guess = next;

        let action = observer.observe(&Event::Iteration {
            method,
            iter,
            residual,
        });

        if residual < config.tolerance {
            return Ok(Step {
                state: guess,
                status: Status::Converged { iters: iter },
            });
        }

        if let Some(Action::StopEarly) = action {
            return Ok(Step {
                state: guess,
                status: Status::StoppedByObserver { iters: iter },
            });
        }
    }

    observer.observe(&Event::NotConverged {
        method,
        iters: config.max_iters,
        residual,
        tolerance: config.tolerance,
    });

    Ok(Step {
        state: guess,
        status: Status::MaxIters {
            iters: config.max_iters,
            residual,
        },
    })
}
