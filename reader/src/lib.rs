mod cancel;
mod config;
mod endpoints;
mod error;
mod handshake;
mod logging;
mod session;
mod sink;
mod transport;

pub use anyhow::Result as AnyResult;
pub use cancel::CancelToken;
pub use config::{Args, HexParseError, parse_hex_bytes, parse_hex_u16};
pub use endpoints::{EndpointInfo, EndpointPair, InterfaceInfo, resolve};
pub use error::{Error, Result};
pub use handshake::{FrameOutcome, HandshakeSummary, run as run_handshake};
pub use logging::init as init_logging;
pub use session::{Session, SessionSettings, SessionState};
pub use sink::{ConsoleSink, ReportRecord, ReportSink};
pub use transport::{ReadOutcome, Transport, UsbTransport};
