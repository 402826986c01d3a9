use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use pneumatics_rig::{
    config::{ConfigValidator, RigConfig},
    log_info,
    rig::{ChannelSide, CommandArgs, DeviceController, PumpState, ValveState},
    util,
};

#[derive(Parser, Debug)]
#[command(name = "pneumatics-rig", version, about = "Send one command to the pneumatic rig")]
struct Cli {
    /// YAML rig configuration
    #[arg(short, long, env = "PNEUMATICS_CONFIG")]
    config: Option<PathBuf>,

    /// Serial device, overrides the config file
    #[arg(long)]
    port: Option<String>,

    #[arg(long)]
    baud: Option<u32>,

    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Number of output channels
    #[arg(long)]
    outputs: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: RigCommand,
}

#[derive(Subcommand, Debug)]
enum RigCommand {
    /// Send a test string and show the echo and the next line
    Ping { text: String },
    /// Open or close one valve (NEG, NEU, POS, OUT0..)
    Valve { name: String, state: OpenClose },
    /// Open or close every valve on one side
    Valves { side: Side, state: OpenClose },
    ValveState { name: String },
    /// Read one pressure sensor
    Pressure { name: String },
    /// Read the negative and positive pump lines
    Pressures,
    /// Read a pump setpoint, or set it when a value is given
    Setpoint {
        pump: String,
        #[arg(allow_negative_numbers = true)]
        value: Option<i32>,
    },
    /// Read a pump's run state, or set it
    Pump { pump: String, state: Option<OnOff> },
    /// Switch the active input line through a neutral vent (Ctrl-C cuts the vent short)
    Switch {
        target: String,
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Send any code with an id and/or value
    Raw {
        code: String,
        #[arg(long)]
        id: Option<u32>,
        #[arg(long, allow_negative_numbers = true)]
        value: Option<i32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OpenClose {
    Open,
    Close,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OnOff {
    On,
    Off,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    Input,
    Output,
}

impl From<OpenClose> for ValveState {
    fn from(value: OpenClose) -> Self {
        match value {
            OpenClose::Open => ValveState::Open,
            OpenClose::Close => ValveState::Closed,
        }
    }
}

impl From<OnOff> for PumpState {
    fn from(value: OnOff) -> Self {
        match value {
            OnOff::On => PumpState::On,
            OnOff::Off => PumpState::Off,
        }
    }
}

impl From<Side> for ChannelSide {
    fn from(value: Side) -> Self {
        match value {
            Side::Input => ChannelSide::Input,
            Side::Output => ChannelSide::Output,
        }
    }
}

fn load_config(cli: &Cli) -> color_eyre::Result<RigConfig> {
    let mut config = match &cli.config {
        Some(path) => RigConfig::load_from_path(path)?,
        None => RigConfig::default(),
    };

    if let Some(port) = &cli.port {
        config.serial.device = port.clone();
    }
    if let Some(baud) = cli.baud {
        config.serial.baud = baud;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.serial.timeout_ms = timeout_ms;
    }
    if let Some(outputs) = cli.outputs {
        config.output_channels = outputs;
    }

    ConfigValidator::validate(&config)?;
    Ok(config)
}

async fn run<S>(
    controller: &mut DeviceController<S>,
    command: RigCommand,
    config: &RigConfig,
) -> color_eyre::Result<Value>
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let value = match command {
        RigCommand::Ping { text } => {
            let report = controller.test_connection(&text).await?;
            serde_json::to_value(report)?
        }
        RigCommand::Valve { name, state } => {
            let acked = controller.set_single_valve(&name, state.into()).await?;
            json!({ "acked": acked })
        }
        RigCommand::Valves { side, state } => {
            let acked = controller.set_valve_group(side.into(), state.into()).await?;
            json!({ "acked": acked })
        }
        RigCommand::ValveState { name } => {
            let reply = controller.get_valve_state(&name).await?;
            json!({ "acked": reply.acked, "reply": reply.reply, "open": reply.state() })
        }
        RigCommand::Pressure { name } => {
            let reading = controller.get_pressure(&name).await?;
            json!({ "sensor": name, "pressure": reading })
        }
        RigCommand::Pressures => {
            let [negative, positive] = controller.get_pump_pressures().await?;
            json!({ "negative": negative, "positive": positive })
        }
        RigCommand::Setpoint { pump, value: Some(setpoint) } => {
            let acked = controller.set_pump_setpoint(&pump, setpoint).await?;
            json!({ "acked": acked })
        }
        RigCommand::Setpoint { pump, value: None } => {
            let reply = controller.get_pump_setpoint(&pump).await?;
            json!({ "acked": reply.acked, "reply": reply.reply, "setpoint": reply.value::<i32>() })
        }
        RigCommand::Pump { pump, state: Some(state) } => {
            let acked = controller.set_pump_state(&pump, state.into()).await?;
            json!({ "acked": acked })
        }
        RigCommand::Pump { pump, state: None } => {
            let reply = controller.get_pump_state(&pump).await?;
            json!({ "acked": reply.acked, "reply": reply.reply, "on": reply.state() })
        }
        RigCommand::Switch { target, delay_ms } => {
            let delay = delay_ms.map(Duration::from_millis).unwrap_or_else(|| config.switch_delay());

            let cancel = CancellationToken::new();
            let ctrl_c = {
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        cancel.cancel();
                    }
                })
            };

            let result = controller
                .switch_input_channel_with_cancel(&target, delay, &cancel)
                .await;
            ctrl_c.abort();

            json!({ "target": target, "acked": result? })
        }
        RigCommand::Raw { code, id, value } => {
            let args = CommandArgs::from_options(id, value)?;
            let reply = controller.send_raw(&code, args).await?;
            serde_json::to_value(reply)?
        }
    };

    Ok(value)
}

fn print_value(value: &Value, as_json: bool) -> color_eyre::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    }

    match value.as_object() {
        Some(fields) => {
            for (key, field) in fields {
                match field {
                    Value::String(s) => println!("{}: {}", key, s),
                    other => println!("{}: {}", key, other),
                }
            }
        }
        None => println!("{}", value),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    tracing_subscriber::fmt::init();
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        util::log::init(log_dir)?;
    }
    log_info!("Running {:?} against {}", cli.command, config.serial.device);

    let mut controller = pneumatics_rig::connect(&config)?;
    let outcome = run(&mut controller, cli.command, &config).await;
    controller.close().await?;

    print_value(&outcome?, cli.json)
}
