#![no_std]

mod button;
mod handshake;
mod hex;
mod report;

use core::time::Duration;

pub use button::{Button, Buttons, PressedButtons};
pub use handshake::HANDSHAKE_FRAMES;
pub use hex::HexBytes;
pub use report::{InputReport, REPORT_MIN_LEN};

pub const USB_VID: u16 = 0x045E;
pub const USB_PID: u16 = 0x02D1;

/// Size of the buffer handed to every IN endpoint read.
/// Reports may be shorter, see [`REPORT_MIN_LEN`].
pub const REPORT_BUF_LEN: usize = 64;

pub const READ_TIMEOUT: Duration = Duration::from_millis(500);
pub const WRITE_TIMEOUT: Duration = Duration::from_millis(500);

/// Pause after each handshake frame so the firmware can process it
/// before the next one arrives.
pub const FRAME_DELAY: Duration = Duration::from_millis(20);
