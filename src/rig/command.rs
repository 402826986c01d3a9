//! Command Codec - `<CODE,ID,VALUE>` wire strings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PneumaticError, Result};
use crate::rig::registry::ChannelSide;

/// Placeholder for an unused id or value slot
pub const FILLER: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandCode {
    SetSingleInValve,
    SetSingleOutValve,
    SetAllInValves,
    SetAllOutValves,
    GetInValveState,
    GetOutValveState,
    GetInPressure,
    GetOutPressure,
    SetRefSetpoint,
    GetRefSetpoint,
    SetPumpState,
    GetPumpState,
}

impl CommandCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandCode::SetSingleInValve => "SI",
            CommandCode::SetSingleOutValve => "SO",
            CommandCode::SetAllInValves => "AI",
            CommandCode::SetAllOutValves => "AO",
            CommandCode::GetInValveState => "VI",
            CommandCode::GetOutValveState => "VO",
            CommandCode::GetInPressure => "GI",
            CommandCode::GetOutPressure => "GO",
            CommandCode::SetRefSetpoint => "RS",
            CommandCode::GetRefSetpoint => "RG",
            CommandCode::SetPumpState => "PS",
            CommandCode::GetPumpState => "PG",
        }
    }

    /// Pick the input or output flavour of a sided command.
    pub fn sided(side: ChannelSide, input: CommandCode, output: CommandCode) -> CommandCode {
        match side {
            ChannelSide::Input => input,
            ChannelSide::Output => output,
        }
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The slots a command fills. There is no variant with neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandArgs {
    WithId(u32),
    WithValue(i32),
    WithBoth { id: u32, value: i32 },
}

impl CommandArgs {
    /// Build from optional slots, e.g. user input.
    pub fn from_options(id: Option<u32>, value: Option<i32>) -> Result<Self> {
        match (id, value) {
            (Some(id), Some(value)) => Ok(CommandArgs::WithBoth { id, value }),
            (Some(id), None) => Ok(CommandArgs::WithId(id)),
            (None, Some(value)) => Ok(CommandArgs::WithValue(value)),
            (None, None) => Err(PneumaticError::InvalidCommandArguments),
        }
    }

    /// `(id, value)` with unused slots set to [`FILLER`]
    pub fn slots(&self) -> (i64, i64) {
        let filler = FILLER as i64;
        match *self {
            CommandArgs::WithId(id) => (id as i64, filler),
            CommandArgs::WithValue(value) => (filler, value as i64),
            CommandArgs::WithBoth { id, value } => (id as i64, value as i64),
        }
    }
}

pub fn assemble(code: &str, args: CommandArgs) -> String {
    let (id, value) = args.slots();
    format!("<{},{},{}>", code, id, value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub code: CommandCode,
    pub args: CommandArgs,
}

impl Command {
    pub fn new(code: CommandCode, args: CommandArgs) -> Self {
        Self { code, args }
    }

    pub fn wire(&self) -> String {
        assemble(self.code.as_str(), self.args)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire())
    }
}

/// A decoded wire line, as the firmware sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireCommand {
    pub code: String,
    pub id: i64,
    pub value: i64,
}

/// Decode `<CODE,ID,VALUE>`. Returns `None` for anything else.
pub fn parse_wire(line: &str) -> Option<WireCommand> {
    let inner = line.trim().strip_prefix('<')?.strip_suffix('>')?;

    let mut parts = inner.split(',');
    let code = parts.next()?.to_string();
    let id = parts.next()?.parse().ok()?;
    let value = parts.next()?.parse().ok()?;
    if parts.next().is_some() || code.is_empty() {
        return None;
    }

    Some(WireCommand { code, id, value })
}
