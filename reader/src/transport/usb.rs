use std::time::Duration;

use rusb::{Context, DeviceHandle, LogCallbackMode, LogLevel, UsbContext};
use tracing::instrument;

use crate::{Error, InterfaceInfo, ReadOutcome, Result, Transport};

/// [`Transport`] backed by a libusb device handle.
#[derive(Debug)]
pub struct UsbTransport {
    handle: DeviceHandle<Context>,
}

impl UsbTransport {
    /// Opens the first device matching `vid:pid` and makes sure it is configured.
    ///
    /// # Errors
    /// [`Error::DeviceNotFound`] if no device matches.
    #[instrument(err(Debug))]
    pub fn open(vid: u16, pid: u16) -> Result<Self> {
        let mut context = Context::new()?;

        context.set_log_level(LogLevel::Warning);
        context.set_log_callback(
            Box::new(|level: LogLevel, message: String| match level {
                LogLevel::Error => tracing::error!(target: "libusb", "{}", message.trim_end()),
                LogLevel::Warning => tracing::warn!(target: "libusb", "{}", message.trim_end()),
                _ => tracing::debug!(target: "libusb", "{}", message.trim_end()),
            }),
            LogCallbackMode::Global,
        );

        let device = context
            .devices()?
            .iter()
            .find(|device| {
                device
                    .device_descriptor()
                    .is_ok_and(|desc| desc.vendor_id() == vid && desc.product_id() == pid)
            })
            .ok_or(Error::DeviceNotFound { vid, pid })?;

        tracing::info!(
            "found device {vid:04x}:{pid:04x} on bus {} address {}",
            device.bus_number(),
            device.address()
        );

        let mut handle = device.open()?;

        // Unconfigured devices report configuration 0.
        if handle.active_configuration()? == 0 {
            let config_number = device.config_descriptor(0)?.number();
            tracing::info!("selecting configuration {config_number}");
            handle.set_active_configuration(config_number)?;
        }

        Ok(Self { handle })
    }
}

impl Transport for UsbTransport {
    fn interfaces(&self) -> rusb::Result<Vec<InterfaceInfo>> {
        let config = self.handle.device().active_config_descriptor()?;
        Ok(InterfaceInfo::from_config(&config))
    }

    fn kernel_driver_active(&self, interface: u8) -> rusb::Result<bool> {
        self.handle.kernel_driver_active(interface)
    }

    fn detach_kernel_driver(&mut self, interface: u8) -> rusb::Result<()> {
        self.handle.detach_kernel_driver(interface)
    }

    fn attach_kernel_driver(&mut self, interface: u8) -> rusb::Result<()> {
        self.handle.attach_kernel_driver(interface)
    }

    fn claim_interface(&mut self, interface: u8) -> rusb::Result<()> {
        self.handle.claim_interface(interface)
    }

    fn set_alternate_setting(&mut self, interface: u8, setting: u8) -> rusb::Result<()> {
        self.handle.set_alternate_setting(interface, setting)
    }

    fn release_interface(&mut self, interface: u8) -> rusb::Result<()> {
        self.handle.release_interface(interface)
    }

    fn read_interrupt<'b>(
        &self,
        endpoint: u8,
        buf: &'b mut [u8],
        timeout: Duration,
    ) -> ReadOutcome<'b> {
        let result = self.handle.read_interrupt(endpoint, buf, timeout);
        ReadOutcome::from_read(result, buf)
    }

    fn write_interrupt(&self, endpoint: u8, data: &[u8], timeout: Duration) -> rusb::Result<usize> {
        self.handle.write_interrupt(endpoint, data, timeout)
    }
}
