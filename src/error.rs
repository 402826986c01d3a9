use thiserror::Error;

use crate::config::ValidationError;
use crate::rig::registry::DeviceClass;

#[derive(Error, Debug)]
pub enum PneumaticError {
    #[error("Command needs an id, a value, or both")]
    InvalidCommandArguments,

    #[error("Invalid target '{0}': expected an input line (NEG or POS)")]
    InvalidTarget(String),

    #[error("No {class} registered under '{name}'")]
    UnknownDevice { class: DeviceClass, name: String },

    #[error("Transport session is closed")]
    SessionClosed,

    #[error("Input channel switch cancelled during settle wait")]
    SwitchCancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serial port error: {0}")]
    SerialError(#[from] tokio_serial::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] ValidationError),
}

impl PneumaticError {
    pub(crate) fn unknown_device(class: DeviceClass, name: &str) -> Self {
        PneumaticError::UnknownDevice {
            class,
            name: name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PneumaticError>;
