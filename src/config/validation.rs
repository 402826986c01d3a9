use std::fmt;

use super::RigConfig;

/// The firmware drives eight output valves and eight output sensors
pub const MAX_OUTPUT_CHANNELS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub error: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

impl std::error::Error for ValidationError {}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(cfg: &RigConfig) -> Result<(), ValidationError> {
        if cfg.serial.device.trim().is_empty() {
            return Err(ValidationError {
                field: "serial.device".to_string(),
                error: "Cannot be empty".to_string(),
            });
        }

        if cfg.serial.baud == 0 {
            return Err(ValidationError {
                field: "serial.baud".to_string(),
                error: "Must be greater than 0".to_string(),
            });
        }

        if cfg.serial.timeout_ms == 0 {
            return Err(ValidationError {
                field: "serial.timeout_ms".to_string(),
                error: "Must be greater than 0".to_string(),
            });
        }

        if cfg.output_channels > MAX_OUTPUT_CHANNELS {
            return Err(ValidationError {
                field: "output_channels".to_string(),
                error: format!("Must be at most {}", MAX_OUTPUT_CHANNELS),
            });
        }

        Ok(())
    }
}
