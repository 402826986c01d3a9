pub mod session;

pub use session::{open_serial, SerialSession, TransportSession, TERMINATOR};
