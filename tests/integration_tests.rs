use pneumatics_rig::config::RigConfig;
use pneumatics_rig::rig::{
    assemble, ChannelSide, CommandArgs, DeviceClass, DeviceController, DeviceIndexRegistry, ValveState,
};
use pneumatics_rig::{PneumaticError, TransportSession};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{duplex, AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::test]
async fn test_controller_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rig.yml");
    fs::write(
        &config_path,
        r#"
serial:
  device: "/dev/ttyACM1"
  baud: 19200
  timeout_ms: 200
output_channels: 2
switch_delay_ms: 0
"#,
    )
    .unwrap();

    let config = RigConfig::load_from_path(&config_path).unwrap();

    // Stand-in rig: echo every line with a carriage return and record it
    let (host, rig) = duplex(512);
    let rig_task = tokio::spawn(async move {
        let mut rig = BufReader::new(rig);
        let mut seen = Vec::new();
        loop {
            let mut line = String::new();
            if rig.read_line(&mut line).await.unwrap_or(0) == 0 {
                break;
            }
            let line = line.trim().to_string();
            rig.write_all(format!("{}\r\n", line).as_bytes()).await.unwrap();
            seen.push(line);
        }
        seen
    });

    let session = TransportSession::new(host, config.serial.read_timeout());
    let registry = DeviceIndexRegistry::build(config.output_channels);
    let mut controller = DeviceController::new(session, registry);

    assert!(controller.set_single_valve("OUT1", ValveState::Open).await.unwrap());
    assert!(controller.switch_input_channel("NEG", config.switch_delay()).await.unwrap());
    controller.close().await.unwrap();

    let seen = rig_task.await.unwrap();
    assert_eq!(
        seen,
        vec!["<SO,1,1>", "<AI,99,0>", "<SI,1,1>", "<SI,1,0>", "<SI,0,1>"]
    );
}

#[test]
fn test_registry_ids_overlap_across_sides() {
    let registry = DeviceIndexRegistry::build(3);

    for (name, id) in [("NEG", 0), ("NEU", 1), ("POS", 2), ("OUT0", 0), ("OUT1", 1), ("OUT2", 2)] {
        assert_eq!(registry.valve_id(name).unwrap(), id, "valve {}", name);
    }
    for (name, id) in [("NEG", 0), ("POS", 1), ("OUT0", 0), ("OUT1", 1), ("OUT2", 2)] {
        assert_eq!(registry.sensor_id(name).unwrap(), id, "sensor {}", name);
    }
    assert!(matches!(
        registry.sensor_id("OUT3"),
        Err(PneumaticError::UnknownDevice { class: DeviceClass::Sensor, .. })
    ));
}

#[test]
fn test_classification_of_unregistered_names() {
    assert_eq!(ChannelSide::classify("NEU"), ChannelSide::Input);
    assert_eq!(ChannelSide::classify("OUT42"), ChannelSide::Output);
}

#[test]
fn test_wire_format() {
    assert_eq!(assemble("VI", CommandArgs::WithId(1)), "<VI,1,99>");
    assert!(matches!(
        CommandArgs::from_options(None, None),
        Err(PneumaticError::InvalidCommandArguments)
    ));
}

#[test]
fn test_default_config_timeouts() {
    let config = RigConfig::default();
    assert_eq!(config.serial.read_timeout(), Duration::from_secs(1));
    assert_eq!(config.output_channels, 1);
}
