use orrery_solvers::{Config, Method};

/// Per-frame driver configuration.
///
/// User interfaces rebuild this value from their controls and pass it to
/// [`Simulation::advance`](crate::Simulation::advance); the driver never
/// reads ambient globals.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Settings {
    /// Integration method for every sub-step.
    pub method: Method,

    /// Largest simulated time advanced by one integration step.
    pub step: f64,

    /// Simulated seconds per wall-clock second.
    pub speed: f64,

    /// Fixed-point settings for implicit methods.
    pub config: Config,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            method: Method::Rk4,
            step: 0.01,
            speed: 1.0,
            config: Config::default(),
        }
    }
}

impl Settings {
    /// Validates the step size, speed, and implicit config.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is not finite and positive, `speed` is not
    /// finite and non-negative, or the implicit config is invalid.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err("step must be finite and positive");
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err("speed must be finite and non-negative");
        }
        if self.method.is_implicit() {
            self.config.validate()?;
        }
        Ok(())
    }

    /// Returns these settings with a different method.
    #[must_use]
    pub fn with_method(self, method: Method) -> Self {
        Self { method, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.method, Method::Rk4);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let bad_step = Settings {
            step: 0.0,
            ..Settings::default()
        };
        assert!(bad_step.validate().is_err());

        let bad_speed = Settings {
            speed: -1.0,
            ..Settings::default()
        };
        assert!(bad_speed.validate().is_err());

        let bad_config = Settings {
            config: Config {
                max_iters: 0,
                tolerance: 1e-6,
            },
            ..Settings::default()
        };
        // The config only matters to implicit methods.
        assert!(bad_config.validate().is_ok());
        assert!(bad_config.with_method(Method::BackwardEuler).validate().is_err());
    }
}
