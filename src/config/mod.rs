//! Rig configuration loaded from YAML.
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use crate::error::Result;

mod validation;

pub use validation::{ConfigValidator, ValidationError, MAX_OUTPUT_CHANNELS};

pub const DEFAULT_DEVICE: &str = "/dev/ttyACM0";
pub const DEFAULT_BAUD: u32 = 19200;
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_SWITCH_DELAY_MS: u64 = 5000;

/// Serial link settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub device: String,
    pub baud: u32,
    pub timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            baud: DEFAULT_BAUD,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl SerialConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub serial: SerialConfig,
    /// Number of output channels wired to the rig (OUT0..OUT{n-1})
    pub output_channels: usize,
    /// Neutral evacuation time used by the input channel switch
    pub switch_delay_ms: u64,
    /// File logging directory; logs only go to tracing when unset
    pub log_dir: Option<String>,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            output_channels: 1,
            switch_delay_ms: DEFAULT_SWITCH_DELAY_MS,
            log_dir: None,
        }
    }
}

impl RigConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: RigConfig = serde_yaml::from_str(yaml)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path)?;
        Self::from_yaml(&config_content)
    }

    pub fn switch_delay(&self) -> Duration {
        Duration::from_millis(self.switch_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PneumaticError;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = RigConfig::from_yaml("{}").unwrap();
        assert_eq!(config, RigConfig::default());
        assert_eq!(config.serial.baud, 19200);
        assert_eq!(config.switch_delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
serial:
  device: "COM7"
  timeout_ms: 250
output_channels: 3
"#;

        let config = RigConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.serial.device, "COM7");
        assert_eq!(config.serial.baud, DEFAULT_BAUD);
        assert_eq!(config.serial.read_timeout(), Duration::from_millis(250));
        assert_eq!(config.output_channels, 3);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_too_many_output_channels() {
        let result = RigConfig::from_yaml("output_channels: 9");
        assert!(matches!(result, Err(PneumaticError::ConfigError(_))));
    }

    #[test]
    fn test_bad_yaml() {
        let result = RigConfig::from_yaml("serial: [not, a, map]");
        assert!(matches!(result, Err(PneumaticError::YamlError(_))));
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rig.yml");
        fs::write(&path, "output_channels: 2\nswitch_delay_ms: 0\n").unwrap();

        let config = RigConfig::load_from_path(&path).unwrap();
        assert_eq!(config.output_channels, 2);
        assert_eq!(config.switch_delay(), Duration::ZERO);
    }
}
