use std::time::Duration;

use clap::Parser;
use protocol::{HANDSHAKE_FRAMES, USB_PID, USB_VID};
use thiserror::Error as ThisError;

use crate::SessionSettings;

/// Reads and decodes input reports from an Xbox One controller over USB.
#[derive(Debug, Parser)]
#[command(name = "xone-reader", version)]
pub struct Args {
    /// Vendor ID of the controller.
    #[arg(long, value_name = "HEX", default_value = "045e", value_parser = parse_hex_u16)]
    pub vid: u16,

    /// Product ID of the controller.
    #[arg(long, value_name = "HEX", default_value = "02d1", value_parser = parse_hex_u16)]
    pub pid: u16,

    /// Handshake frame to send instead of the built-in ones, e.g. "05 20 00 01 00".
    /// Repeat to send several frames, in the given order.
    #[arg(long = "handshake", value_name = "HEX", value_parser = parse_hex_bytes)]
    pub handshake: Vec<Vec<u8>>,

    /// Timeout of a single interrupt read.
    #[arg(long, value_name = "MS", default_value_t = 500)]
    pub read_timeout_ms: u64,

    /// Timeout of a single handshake write.
    #[arg(long, value_name = "MS", default_value_t = 500)]
    pub write_timeout_ms: u64,

    /// Pause after each handshake frame.
    #[arg(long, value_name = "MS", default_value_t = 20)]
    pub frame_delay_ms: u64,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,

    /// Send logs to journald instead of stderr.
    #[arg(long)]
    pub journald: bool,
}

impl Args {
    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            read_timeout: Duration::from_millis(self.read_timeout_ms),
            write_timeout: Duration::from_millis(self.write_timeout_ms),
            frame_delay: Duration::from_millis(self.frame_delay_ms),
        }
    }

    /// Frames given on the command line, or the built-in table.
    #[must_use]
    pub fn frames(&self) -> Vec<Vec<u8>> {
        if self.handshake.is_empty() {
            HANDSHAKE_FRAMES.iter().map(|frame| frame.to_vec()).collect()
        } else {
            self.handshake.clone()
        }
    }

    #[must_use]
    pub fn uses_default_device(&self) -> bool {
        self.vid == USB_VID && self.pid == USB_PID
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum HexParseError {
    #[error("no hex digits")]
    Empty,
    #[error("odd number of hex digits")]
    OddLength,
    #[error("invalid hex digit `{0}`")]
    InvalidDigit(char),
    #[error("value does not fit in 16 bits")]
    Overflow,
}

/// Parses `045e`, `0x045E` and the like.
///
/// # Errors
pub fn parse_hex_u16(s: &str) -> Result<u16, HexParseError> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    if digits.is_empty() {
        return Err(HexParseError::Empty);
    }

    if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(HexParseError::InvalidDigit(c));
    }

    u16::from_str_radix(digits, 16).map_err(|_| HexParseError::Overflow)
}

/// Parses a byte sequence such as `05 20 00 01 00`, `05:20` or `0520`.
///
/// # Errors
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, HexParseError> {
    let digits = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != ',')
        .map(|c| {
            c.to_digit(16)
                .and_then(|d| u8::try_from(d).ok())
                .ok_or(HexParseError::InvalidDigit(c))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if digits.is_empty() {
        return Err(HexParseError::Empty);
    }

    if digits.len() % 2 != 0 {
        return Err(HexParseError::OddLength);
    }

    let bytes = digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect();

    Ok(bytes)
}
