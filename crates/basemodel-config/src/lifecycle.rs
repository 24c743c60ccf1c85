//! Settings for the lifecycle walkthrough command.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Upper bound on the pause between lifecycle steps.
pub const MAX_STEP_DELAY_MS: u64 = 60_000;

const fn default_step_delay_ms() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LifecycleConfig {
    /// Pause between insert, update, and delete so each step gets a distinct
    /// timestamp.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
        }
    }
}

impl LifecycleConfig {
    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `step_delay_ms` exceeds
    /// [`MAX_STEP_DELAY_MS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_delay_ms > MAX_STEP_DELAY_MS {
            return Err(ConfigError::InvalidValue {
                field: "lifecycle.step_delay_ms".to_string(),
                reason: format!(
                    "{} exceeds the maximum of {MAX_STEP_DELAY_MS}",
                    self.step_delay_ms
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = LifecycleConfig::default();
        assert_eq!(config.step_delay_ms, 10);
        assert_eq!(config.step_delay(), Duration::from_millis(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_delay_is_valid() {
        let config = LifecycleConfig { step_delay_ms: 0 };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn oversized_delay_is_rejected() {
        let config = LifecycleConfig {
            step_delay_ms: MAX_STEP_DELAY_MS + 1,
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "lifecycle.step_delay_ms")
        );
    }
}
