use orrery_core::{Observer, OdeSystem, Snapshot, State, check_shape};
use orrery_solvers::{
    Solver, Status,
    implicit::{Action, Event},
};

use crate::{Error, Settings};

/// Relative slack that lets a final step absorb rounding in accumulated time,
/// so no vanishingly short step follows a full one.
const STEP_SLACK: f64 = 1e-9;

/// Lifecycle of a simulation.
///
/// ```text
/// Paused ⇄ Running → Finished
///    ↑__________________|  (reset)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Time does not advance. The initial phase.
    #[default]
    Paused,

    /// Each call to [`Simulation::advance`] integrates forward.
    Running,

    /// The end time was reached; only [`Simulation::reset`] leaves this phase.
    Finished,
}

/// Summary of one call to [`Simulation::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Integration steps taken this frame.
    pub steps: usize,

    /// Simulated time after the frame.
    pub t: f64,

    /// Implicit steps this frame that hit their iteration limit.
    pub unconverged: usize,

    /// Phase after the frame.
    pub phase: Phase,
}

/// Holds the evolving state of one system and advances it frame by frame.
///
/// The simulation owns a [`Solver`] for the system's constants, the initial
/// state it resets to, and the current state and time. It also tracks an
/// *origin* snapshot: the most recent reset or external state change, which
/// is where an analytic reference solution should start.
#[derive(Debug, Clone)]
pub struct Simulation<S> {
    solver: Solver<S>,
    initial: State,
    current: Snapshot,
    origin: Snapshot,
    phase: Phase,
    end_time: Option<f64>,
}

impl<S: OdeSystem> Simulation<S> {
    /// Creates a paused simulation at `t = 0`.
    pub fn new(system: S, initial: State) -> Self {
        let start = Snapshot::new(0.0, initial.clone());
        Self {
            solver: Solver::new(system),
            initial,
            current: start.clone(),
            origin: start,
            phase: Phase::Paused,
            end_time: None,
        }
    }

    /// Sets a simulated time at which the simulation finishes.
    #[must_use]
    pub fn with_end_time(mut self, end_time: f64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Returns the current state.
    pub fn state(&self) -> &State {
        &self.current.state
    }

    /// Returns the current simulated time.
    pub fn time(&self) -> f64 {
        self.current.t
    }

    /// Returns the current time and state.
    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    /// Returns the snapshot set by the last reset or [`Self::set_state`].
    pub fn origin(&self) -> &Snapshot {
        &self.origin
    }

    /// Returns the simulated time elapsed since the origin.
    pub fn time_since_origin(&self) -> f64 {
        self.current.t - self.origin.t
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the solver.
    pub fn solver(&self) -> &Solver<S> {
        &self.solver
    }

    /// Returns the derivative provider.
    pub fn system(&self) -> &S {
        self.solver.system()
    }

    /// Starts or resumes integration. Has no effect once finished.
    pub fn run(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    /// Pauses integration. Has no effect once finished.
    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    /// Switches between running and paused, returning the new phase.
    pub fn toggle(&mut self) -> Phase {
        match self.phase {
            Phase::Paused => self.run(),
            Phase::Running => self.pause(),
            Phase::Finished => {}
        }
        self.phase
    }

    /// Restores the initial state at `t = 0` and pauses.
    pub fn reset(&mut self) {
        self.current = Snapshot::new(0.0, self.initial.clone());
        self.origin = self.current.clone();
        self.phase = Phase::Paused;
    }

    /// Replaces the initial state used by [`Self::reset`], then resets.
    pub fn reset_to(&mut self, initial: State) {
        self.initial = initial;
        self.reset();
    }

    /// Swaps the derivative provider, keeping the current state and time.
    ///
    /// Used when physical constants change mid-run.
    pub fn replace_system(&mut self, system: S) {
        self.solver = Solver::new(system);
    }

    /// Overwrites the current state, for example while a body is dragged.
    ///
    /// The new state becomes the origin for analytic references.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if `state` does not have the same shape as
    /// the current state.
    pub fn set_state(&mut self, state: State) -> Result<(), Error> {
        check_shape(&self.current.state, &state)?;
        self.current.state = state;
        self.origin = self.current.clone();
        Ok(())
    }

    /// Advances simulated time by `elapsed * settings.speed`.
    ///
    /// The interval is covered by steps of `settings.step`, the last one
    /// shortened to land exactly on the target time. Does nothing unless the
    /// simulation is running.
    ///
    /// # Errors
    ///
    /// Returns an error if `elapsed` is not finite, the settings are invalid,
    /// or a step fails. The state keeps every step completed before the
    /// failure.
    pub fn advance(&mut self, elapsed: f64, settings: &Settings) -> Result<Frame, Error> {
        self.advance_observed(elapsed, settings, &mut ())
    }

    /// Advances like [`Self::advance`], reporting implicit-method events to
    /// `observer`.
    ///
    /// # Errors
    ///
    /// Returns an error if `elapsed` is not finite, the settings are invalid,
    /// or a step fails.
    pub fn advance_observed<Obs>(
        &mut self,
        elapsed: f64,
        settings: &Settings,
        observer: &mut Obs,
    ) -> Result<Frame, Error>
    where
        Obs: Observer<Event, Action>,
    {
        settings
            .validate()
            .map_err(|reason| Error::InvalidSettings { reason })?;
        if !elapsed.is_finite() {
            return Err(Error::InvalidElapsed { elapsed });
        }

        if self.phase != Phase::Running || elapsed <= 0.0 {
            return Ok(self.frame(0, 0));
        }

        let mut target = self.current.t + elapsed * settings.speed;
        if let Some(end_time) = self.end_time {
            target = target.min(end_time);
        }

        let mut steps = 0;
        let mut unconverged = 0;

        while self.current.t < target {
            let remaining = target - self.current.t;
            let (dt, next_t) = if remaining <= settings.step * (1.0 + STEP_SLACK) {
                (remaining, target)
            } else {
                (settings.step, self.current.t + settings.step)
            };

            let status = self.step_by(dt, next_t, settings, observer)?;
            steps += 1;
            if status.hit_iteration_limit() {
                unconverged += 1;
            }
        }

        if self.end_time.is_some_and(|end| self.current.t >= end) {
            self.phase = Phase::Finished;
        }

        Ok(self.frame(steps, unconverged))
    }

    /// Takes one step of `settings.step` if running.
    ///
    /// Some demos advance a fixed step per rendered frame regardless of
    /// wall-clock time; this is that policy. The step is shortened so it never
    /// passes the end time.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the step fails.
    pub fn tick(&mut self, settings: &Settings) -> Result<Frame, Error> {
        settings
            .validate()
            .map_err(|reason| Error::InvalidSettings { reason })?;

        if self.phase != Phase::Running {
            return Ok(self.frame(0, 0));
        }

        let mut next_t = self.current.t + settings.step;
        if let Some(end_time) = self.end_time {
            next_t = next_t.min(end_time);
        }

        let dt = next_t - self.current.t;
        if dt <= 0.0 {
            self.phase = Phase::Finished;
            return Ok(self.frame(0, 0));
        }
        let status = self.step_by(dt, next_t, settings, &mut ())?;

        if self.end_time.is_some_and(|end| self.current.t >= end) {
            self.phase = Phase::Finished;
        }

        Ok(self.frame(1, usize::from(status.hit_iteration_limit())))
    }

    fn step_by<Obs>(
        &mut self,
        dt: f64,
        next_t: f64,
        settings: &Settings,
        observer: &mut Obs,
    ) -> Result<Status, Error>
    where
        Obs: Observer<Event, Action>,
    {
        let t = self.current.t;
        let step = self
            .solver
            .solve_observed(
                settings.method,
                &self.current.state,
                dt,
                t,
                &settings.config,
                |event: &Event| observer.observe(event),
            )
            .map_err(|source| Error::Step { t, source })?;

        self.current = Snapshot::new(next_t, step.state);
        Ok(step.status)
    }

    fn frame(&self, steps: usize, unconverged: usize) -> Frame {
        Frame {
            steps,
            t: self.current.t,
            unconverged,
            phase: self.phase,
        }
    }
}
