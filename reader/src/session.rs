use std::time::Duration;

use protocol::{FRAME_DELAY, READ_TIMEOUT, REPORT_BUF_LEN, WRITE_TIMEOUT};
use tracing::instrument;

use crate::{
    CancelToken, EndpointPair, Error, HandshakeSummary, ReadOutcome, ReportRecord, ReportSink,
    Result, Transport, endpoints, handshake,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No device claimed yet, i.e. before [`Session::connect`] succeeds.
    Idle,
    Connected,
    HandshakeSent,
    Streaming,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    /// Upper bound for a single blocking read. Expiry just re-polls.
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    /// Pause after each handshake frame.
    pub frame_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            read_timeout: READ_TIMEOUT,
            write_timeout: WRITE_TIMEOUT,
            frame_delay: FRAME_DELAY,
        }
    }
}

/// Exclusive use of a device's interrupt endpoint pair.
///
/// The interface is claimed when the session is created and released
/// exactly once when it is closed, either explicitly or on drop.
#[derive(Debug)]
pub struct Session<T>
where
    T: Transport,
{
    transport: T,
    endpoints: EndpointPair,
    settings: SessionSettings,
    state: SessionState,
    kernel_driver_detached: bool,
}

impl<T> Session<T>
where
    T: Transport,
{
    /// Resolves the endpoint pair and claims its interface.
    ///
    /// # Errors
    /// [`Error::NoSuitableInterface`] when no interface qualifies,
    /// [`Error::Claim`] when the interface cannot be claimed.
    #[instrument(skip_all, err(Debug))]
    pub fn connect(mut transport: T, settings: SessionSettings) -> Result<Self> {
        let interfaces = transport.interfaces()?;
        let endpoints = endpoints::resolve(&interfaces)?;

        tracing::info!(
            "interface {} (setting {}): IN 0x{:02x}, OUT 0x{:02x}",
            endpoints.interface,
            endpoints.setting,
            endpoints.in_address,
            endpoints.out_address
        );

        let kernel_driver_detached = Self::detach_kernel_driver(&mut transport, endpoints.interface);

        if let Err(source) = transport.claim_interface(endpoints.interface) {
            if kernel_driver_detached {
                transport.attach_kernel_driver(endpoints.interface).ok();
            }

            return Err(Error::Claim {
                interface: endpoints.interface,
                source,
            });
        }

        let mut session = Self {
            transport,
            endpoints,
            settings,
            state: SessionState::Connected,
            kernel_driver_detached,
        };

        if endpoints.setting != 0 {
            if let Err(e) = session
                .transport
                .set_alternate_setting(endpoints.interface, endpoints.setting)
            {
                tracing::warn!("selecting alternate setting {}: {e}", endpoints.setting);
            }
        }

        Ok(session)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn endpoints(&self) -> &EndpointPair {
        &self.endpoints
    }

    /// Sends the activation frames. Individual write failures are logged
    /// and reported in the summary, they never fail the session.
    ///
    /// # Errors
    /// [`Error::InvalidState`] unless the session is [`SessionState::Connected`].
    pub fn handshake<F>(&mut self, frames: &[F]) -> Result<HandshakeSummary>
    where
        F: AsRef<[u8]>,
    {
        self.expect_state(SessionState::Connected)?;

        let summary = handshake::run(&self.transport, &self.endpoints, frames, &self.settings);

        if summary.sent() == 0 && !frames.is_empty() {
            tracing::warn!("no handshake frame was accepted, input may never start");
        }

        self.state = SessionState::HandshakeSent;
        Ok(summary)
    }

    /// Reads, decodes and emits reports until `cancel` fires or the
    /// transport fails. The session is closed in both cases.
    ///
    /// # Errors
    /// [`Error::Transfer`] on a failed read, [`Error::Sink`] if the sink fails.
    #[instrument(skip_all, err(Debug))]
    pub fn stream<S>(&mut self, sink: &mut S, cancel: &CancelToken) -> Result<()>
    where
        S: ReportSink + ?Sized,
    {
        self.expect_state(SessionState::HandshakeSent)?;
        self.state = SessionState::Streaming;

        tracing::info!("reading input, press Ctrl-C to stop");

        let result = self.read_loop(sink, cancel);
        self.close();
        result
    }

    /// Handshake followed by [`Session::stream`].
    ///
    /// # Errors
    pub fn run<F, S>(&mut self, frames: &[F], sink: &mut S, cancel: &CancelToken) -> Result<()>
    where
        F: AsRef<[u8]>,
        S: ReportSink + ?Sized,
    {
        self.handshake(frames)?;
        self.stream(sink, cancel)
    }

    /// Releases the interface and gives the kernel driver back. Idempotent.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }

        self.state = SessionState::Closed;
        let interface = self.endpoints.interface;

        match self.transport.release_interface(interface) {
            Ok(()) => tracing::info!("released interface {interface}"),
            Err(e) => tracing::warn!("releasing interface {interface}: {e}"),
        }

        if self.kernel_driver_detached {
            self.transport.attach_kernel_driver(interface).ok();
        }
    }

    fn read_loop<S>(&self, sink: &mut S, cancel: &CancelToken) -> Result<()>
    where
        S: ReportSink + ?Sized,
    {
        let mut buf = [0; REPORT_BUF_LEN];

        while !cancel.is_cancelled() {
            let outcome = self.transport.read_interrupt(
                self.endpoints.in_address,
                &mut buf,
                self.settings.read_timeout,
            );

            match outcome {
                ReadOutcome::Data(data) => {
                    let record = ReportRecord::new(data);
                    tracing::trace!("{record}");
                    sink.emit(&record).map_err(Error::Sink)?;
                }
                ReadOutcome::Timeout => {}
                // Reads interrupted by the shutdown signal are not failures.
                ReadOutcome::Failed(_) if cancel.is_cancelled() => break,
                ReadOutcome::Failed(e) => return Err(Error::Transfer(e)),
            }
        }

        tracing::info!("interrupted by user");
        Ok(())
    }

    fn expect_state(&self, expected: SessionState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    /// Best effort, some platforms do not support it at all.
    fn detach_kernel_driver(transport: &mut T, interface: u8) -> bool {
        match transport.kernel_driver_active(interface) {
            Ok(true) => match transport.detach_kernel_driver(interface) {
                Ok(()) => {
                    tracing::info!("detached kernel driver from interface {interface}");
                    true
                }
                Err(e) => {
                    tracing::warn!("detaching kernel driver from interface {interface}: {e}");
                    false
                }
            },
            Ok(false) => false,
            Err(e) => {
                tracing::debug!("kernel driver state of interface {interface}: {e}");
                false
            }
        }
    }
}

impl<T> Drop for Session<T>
where
    T: Transport,
{
    fn drop(&mut self) {
        self.close();
    }
}
