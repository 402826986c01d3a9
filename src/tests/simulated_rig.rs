// src/tests/simulated_rig.rs
//! Firmware stand-in on the far end of a duplex pipe. Behaves like the rig:
//! echoes each command line, then prints the answer to queries on a line of
//! its own.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{duplex, AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};
use tokio::task::JoinHandle;

use crate::rig::{parse_wire, DeviceController, DeviceIndexRegistry};
use crate::util::io::TransportSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoMode {
    Verbatim,
    /// Echo without the angle brackets
    StripBrackets,
    /// Swallow everything
    Silent,
}

#[derive(Debug, Default)]
pub struct RigModel {
    pub received: Vec<String>,
    pub input_valves: [i64; 3],
    pub output_valves: [i64; 8],
    pub pump_setpoints: [i64; 2],
    pub pump_states: [i64; 2],
    pub input_pressures: [f32; 2],
    pub output_pressures: [f32; 8],
    /// Bumped whenever more than one input valve is open at once
    pub unsafe_input_states: usize,
}

impl RigModel {
    fn check_inputs(&mut self) {
        let open = self.input_valves.iter().filter(|&&s| s != 0).count();
        if open > 1 {
            self.unsafe_input_states += 1;
        }
    }

    fn execute(&mut self, line: &str) -> Option<String> {
        let cmd = parse_wire(line)?;
        let id = cmd.id as usize;
        let value = cmd.value;

        match cmd.code.as_str() {
            "SI" => {
                if let Some(slot) = self.input_valves.get_mut(id) {
                    *slot = value;
                }
                self.check_inputs();
                None
            }
            "SO" => {
                if let Some(slot) = self.output_valves.get_mut(id) {
                    *slot = value;
                }
                None
            }
            "AI" => {
                self.input_valves = [value; 3];
                self.check_inputs();
                None
            }
            "AO" => {
                self.output_valves = [value; 8];
                None
            }
            "RS" => {
                if let Some(slot) = self.pump_setpoints.get_mut(id) {
                    *slot = value;
                }
                None
            }
            "PS" => {
                if let Some(slot) = self.pump_states.get_mut(id) {
                    *slot = value;
                }
                None
            }
            "GI" => self.input_pressures.get(id).map(|p| format!("{:.2}", p)),
            "GO" => self.output_pressures.get(id).map(|p| format!("{:.2}", p)),
            "VI" => self.input_valves.get(id).map(|s| s.to_string()),
            "VO" => self.output_valves.get(id).map(|s| s.to_string()),
            "RG" => self.pump_setpoints.get(id).map(|s| s.to_string()),
            "PG" => self.pump_states.get(id).map(|s| s.to_string()),
            _ => Some("Serial command validity check failed!".to_string()),
        }
    }
}

pub struct SimulatedRig {
    pub model: Arc<Mutex<RigModel>>,
    _task: JoinHandle<()>,
}

impl SimulatedRig {
    pub fn received(&self) -> Vec<String> {
        self.model.lock().unwrap().received.clone()
    }

    pub fn with_model<R>(&self, f: impl FnOnce(&RigModel) -> R) -> R {
        f(&self.model.lock().unwrap())
    }
}

pub fn spawn_rig(output_channels: usize, echo: EchoMode) -> (DeviceController<DuplexStream>, SimulatedRig) {
    spawn_rig_with(output_channels, echo, RigModel::default(), Duration::from_millis(200))
}

pub fn spawn_rig_with(
    output_channels: usize,
    echo: EchoMode,
    model: RigModel,
    read_timeout: Duration,
) -> (DeviceController<DuplexStream>, SimulatedRig) {
    let (host, rig) = duplex(1024);
    let model = Arc::new(Mutex::new(model));

    let task = tokio::spawn(run_firmware(rig, echo, Arc::clone(&model)));

    let controller = DeviceController::new(
        TransportSession::new(host, read_timeout),
        DeviceIndexRegistry::build(output_channels),
    );

    (controller, SimulatedRig { model, _task: task })
}

async fn run_firmware(stream: DuplexStream, echo: EchoMode, model: Arc<Mutex<RigModel>>) {
    let mut stream = BufReader::new(stream);

    loop {
        let mut line = String::new();
        match stream.read_line(&mut line).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim().to_string();

        let reply = {
            let mut model = model.lock().unwrap();
            model.received.push(line.clone());
            model.execute(&line)
        };

        let echo_line = match echo {
            EchoMode::Verbatim => line.clone(),
            EchoMode::StripBrackets => line.trim_start_matches('<').trim_end_matches('>').to_string(),
            EchoMode::Silent => continue,
        };

        // println-style endings, like the firmware
        let mut out = format!("{}\r\n", echo_line);
        if let Some(reply) = reply {
            out.push_str(&reply);
            out.push_str("\r\n");
        }

        if stream.write_all(out.as_bytes()).await.is_err() {
            break;
        }
    }
}
