use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Speed applied when no configuration value is loaded at startup.
pub const DEFAULT_SPEED_RPM: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("negative speed rejected: {requested} rpm")]
    NegativeSpeed { requested: i64 },
}

/// Current actuator speed, shared between the configuration loader (startup),
/// the actuator producer loop (runtime) and any future command path. Every
/// access goes through the one internal lock.
#[derive(Debug)]
pub struct ActuatorState {
    speed_rpm: Mutex<i64>,
}

impl ActuatorState {
    pub fn new() -> Self {
        Self {
            speed_rpm: Mutex::new(DEFAULT_SPEED_RPM),
        }
    }

    /// Validated mutation: a negative speed is rejected and the prior value
    /// is retained.
    pub fn set_speed(&self, rpm: i64) -> Result<(), CommandError> {
        if rpm < 0 {
            return Err(CommandError::NegativeSpeed { requested: rpm });
        }
        let mut speed = self
            .speed_rpm
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *speed = rpm;
        Ok(())
    }

    pub fn speed(&self) -> i64 {
        *self
            .speed_rpm
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ActuatorState {
    fn default() -> Self {
        Self::new()
    }
}
