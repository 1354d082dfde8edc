#[cfg(test)]
pub mod mock;
mod usb;

use std::time::Duration;

pub use usb::UsbTransport;

use crate::InterfaceInfo;

/// Outcome of a blocking interrupt read.
///
/// A timeout only means no packet arrived within the window, so it is
/// kept apart from real transport failures.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome<'a> {
    Data(&'a [u8]),
    Timeout,
    Failed(rusb::Error),
}

impl<'a> ReadOutcome<'a> {
    /// Maps the result of a read into `buf`.
    #[must_use]
    pub fn from_read(result: rusb::Result<usize>, buf: &'a [u8]) -> Self {
        match result {
            Ok(len) => Self::Data(buf.get(..len).unwrap_or(buf)),
            Err(rusb::Error::Timeout) => Self::Timeout,
            Err(e) => Self::Failed(e),
        }
    }
}

/// The USB operations a session needs from an opened device.
pub trait Transport {
    /// Interface descriptors of the active configuration, in descriptor order.
    ///
    /// # Errors
    fn interfaces(&self) -> rusb::Result<Vec<InterfaceInfo>>;

    /// # Errors
    fn kernel_driver_active(&self, interface: u8) -> rusb::Result<bool>;

    /// # Errors
    fn detach_kernel_driver(&mut self, interface: u8) -> rusb::Result<()>;

    /// # Errors
    fn attach_kernel_driver(&mut self, interface: u8) -> rusb::Result<()>;

    /// # Errors
    fn claim_interface(&mut self, interface: u8) -> rusb::Result<()>;

    /// # Errors
    fn set_alternate_setting(&mut self, interface: u8, setting: u8) -> rusb::Result<()>;

    /// # Errors
    fn release_interface(&mut self, interface: u8) -> rusb::Result<()>;

    /// Blocks for at most `timeout` waiting for a packet on `endpoint`.
    fn read_interrupt<'b>(
        &self,
        endpoint: u8,
        buf: &'b mut [u8],
        timeout: Duration,
    ) -> ReadOutcome<'b>;

    /// # Errors
    fn write_interrupt(&self, endpoint: u8, data: &[u8], timeout: Duration) -> rusb::Result<usize>;
}
