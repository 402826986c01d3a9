//! Device Index Registry - logical device names to firmware ids.
//!
//! Output-side valve and sensor ids start at 0, the same as input-side ids.
//! The firmware tells the two apart by command code (`SI` vs `SO`, `GI` vs
//! `GO`), never by id, so input and output names must not be mixed up.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{PneumaticError, Result};

pub const NEG: &str = "NEG";
pub const NEU: &str = "NEU";
pub const POS: &str = "POS";
pub const OUT_PREFIX: &str = "OUT";

/// One of the three fixed lines feeding the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputLine {
    Negative,
    Neutral,
    Positive,
}

impl InputLine {
    pub const ALL: [InputLine; 3] = [InputLine::Negative, InputLine::Neutral, InputLine::Positive];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputLine::Negative => NEG,
            InputLine::Neutral => NEU,
            InputLine::Positive => POS,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|line| line.as_str() == name)
    }
}

impl AsRef<str> for InputLine {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for InputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputLine {
    type Err = PneumaticError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| PneumaticError::InvalidTarget(s.to_string()))
    }
}

/// Logical name of output channel `channel`
pub fn output_name(channel: usize) -> String {
    format!("{}{}", OUT_PREFIX, channel)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelSide {
    Input,
    Output,
}

impl ChannelSide {
    /// NEG, NEU and POS are input-side; every other name is output-side,
    /// whether or not it is registered.
    pub fn classify(name: &str) -> Self {
        if InputLine::from_name(name).is_some() {
            ChannelSide::Input
        } else {
            ChannelSide::Output
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Valve,
    Sensor,
    Pump,
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceClass::Valve => "valve",
            DeviceClass::Sensor => "sensor",
            DeviceClass::Pump => "pump",
        })
    }
}

pub type DeviceIndex = HashMap<String, u32>;

/// Per-class name -> id maps, fixed for the whole session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIndexRegistry {
    valves: DeviceIndex,
    sensors: DeviceIndex,
    pumps: DeviceIndex,
    output_channels: usize,
}

impl DeviceIndexRegistry {
    pub fn build(output_channels: usize) -> Self {
        let pumps: DeviceIndex = [(NEG, 0), (POS, 1)]
            .into_iter()
            .map(|(name, id)| (name.to_string(), id))
            .collect();

        let mut valves: DeviceIndex = [(NEG, 0), (NEU, 1), (POS, 2)]
            .into_iter()
            .map(|(name, id)| (name.to_string(), id))
            .collect();

        let mut sensors: DeviceIndex = [(NEG, 0), (POS, 1)]
            .into_iter()
            .map(|(name, id)| (name.to_string(), id))
            .collect();

        for channel in 0..output_channels {
            let id = channel as u32;
            valves.insert(output_name(channel), id);
            sensors.insert(output_name(channel), id);
        }

        Self {
            valves,
            sensors,
            pumps,
            output_channels,
        }
    }

    pub fn output_channels(&self) -> usize {
        self.output_channels
    }

    pub fn index(&self, class: DeviceClass) -> &DeviceIndex {
        match class {
            DeviceClass::Valve => &self.valves,
            DeviceClass::Sensor => &self.sensors,
            DeviceClass::Pump => &self.pumps,
        }
    }

    pub fn lookup(&self, class: DeviceClass, name: &str) -> Result<u32> {
        self.index(class)
            .get(name)
            .copied()
            .ok_or_else(|| PneumaticError::unknown_device(class, name))
    }

    pub fn valve_id(&self, name: &str) -> Result<u32> {
        self.lookup(DeviceClass::Valve, name)
    }

    pub fn sensor_id(&self, name: &str) -> Result<u32> {
        self.lookup(DeviceClass::Sensor, name)
    }

    pub fn pump_id(&self, name: &str) -> Result<u32> {
        self.lookup(DeviceClass::Pump, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(entries: &[(&str, u32)]) -> DeviceIndex {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_three_output_channels_overlap_input_ids() {
        let registry = DeviceIndexRegistry::build(3);

        assert_eq!(
            registry.index(DeviceClass::Valve),
            &index(&[("NEG", 0), ("NEU", 1), ("POS", 2), ("OUT0", 0), ("OUT1", 1), ("OUT2", 2)])
        );
        assert_eq!(
            registry.index(DeviceClass::Sensor),
            &index(&[("NEG", 0), ("POS", 1), ("OUT0", 0), ("OUT1", 1), ("OUT2", 2)])
        );
        assert_eq!(registry.index(DeviceClass::Pump), &index(&[("NEG", 0), ("POS", 1)]));
    }

    #[test]
    fn test_no_output_channels() {
        let registry = DeviceIndexRegistry::build(0);

        assert_eq!(registry.index(DeviceClass::Valve).len(), 3);
        assert!(matches!(
            registry.valve_id("OUT0"),
            Err(PneumaticError::UnknownDevice { class: DeviceClass::Valve, .. })
        ));
    }

    #[test]
    fn test_neutral_has_no_sensor_or_pump() {
        let registry = DeviceIndexRegistry::build(1);

        assert_eq!(registry.valve_id(NEU).unwrap(), 1);
        assert!(registry.sensor_id(NEU).is_err());
        assert!(registry.pump_id(NEU).is_err());
        assert!(registry.pump_id("OUT0").is_err());
    }

    #[test]
    fn test_classification_needs_no_registry() {
        for name in [NEG, NEU, POS] {
            assert_eq!(ChannelSide::classify(name), ChannelSide::Input);
        }
        for name in ["OUT0", "OUT7", "neg", "", "Positive", "MYSTERY"] {
            assert_eq!(ChannelSide::classify(name), ChannelSide::Output);
        }
    }

    #[test]
    fn test_input_line_parse() {
        assert_eq!("POS".parse::<InputLine>().unwrap(), InputLine::Positive);
        assert_eq!(InputLine::Neutral.to_string(), "NEU");
        assert!(matches!(
            "OUT0".parse::<InputLine>(),
            Err(PneumaticError::InvalidTarget(name)) if name == "OUT0"
        ));
    }
}
