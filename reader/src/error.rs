use std::io;

use thiserror::Error as ThisError;

use crate::SessionState;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("device {vid:04x}:{pid:04x} not found")]
    DeviceNotFound { vid: u16, pid: u16 },
    #[error("no interface exposes both an interrupt IN and an interrupt OUT endpoint")]
    NoSuitableInterface,
    #[error("claiming interface {interface}")]
    Claim {
        interface: u8,
        #[source]
        source: rusb::Error,
    },
    #[error("interrupt read failed")]
    Transfer(#[source] rusb::Error),
    #[error("writing report record")]
    Sink(#[source] io::Error),
    #[error("session is {actual:?}, expected {expected:?}")]
    InvalidState {
        expected: SessionState,
        actual: SessionState,
    },
    #[error(transparent)]
    Usb(#[from] rusb::Error),
}

impl Error {
    /// Process exit code for a run that ended with this error.
    ///
    /// A missing device is `1`, an unusable device `2` and every other
    /// fatal failure `3`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::DeviceNotFound { .. } => 1,
            Self::NoSuitableInterface => 2,
            Self::Claim { .. }
            | Self::Transfer(_)
            | Self::Sink(_)
            | Self::InvalidState { .. }
            | Self::Usb(_) => 3,
        }
    }
}
