use std::{cell::RefCell, collections::VecDeque, rc::Rc, time::Duration};

use rusb::Direction;

use crate::{CancelToken, EndpointInfo, InterfaceInfo, ReadOutcome, Transport};

pub const IN_ADDRESS: u8 = 0x81;
pub const OUT_ADDRESS: u8 = 0x01;

/// Every call a [`MockTransport`] received, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Detach(u8),
    Attach(u8),
    Claim(u8),
    SetAlternateSetting(u8, u8),
    Release(u8),
    Read(u8),
    Write(u8, Vec<u8>),
}

#[derive(Clone, Debug)]
pub enum MockRead {
    Data(Vec<u8>),
    Timeout,
    Fail(rusb::Error),
    /// Cancellation arrives while this read is pending, then the read completes.
    CancelDuring(Vec<u8>),
    /// Cancellation interrupts the pending read, which then fails.
    Interrupted,
}

/// Scripted [`Transport`]. Once the scripted reads run out it cancels the
/// session so read loops always terminate.
#[derive(Debug)]
pub struct MockTransport {
    pub interfaces: Vec<InterfaceInfo>,
    pub kernel_driver_active: rusb::Result<bool>,
    pub detach_result: rusb::Result<()>,
    pub claim_result: rusb::Result<()>,
    /// Indices of writes that fail with [`rusb::Error::Pipe`].
    pub failing_writes: Vec<usize>,
    reads: RefCell<VecDeque<MockRead>>,
    cancel: CancelToken,
    calls: Rc<RefCell<Vec<Call>>>,
}

impl MockTransport {
    /// A single interface exposing one interrupt endpoint pair.
    pub fn new(cancel: CancelToken) -> Self {
        Self {
            interfaces: vec![InterfaceInfo {
                number: 0,
                setting: 0,
                endpoints: vec![
                    EndpointInfo::interrupt(IN_ADDRESS, Direction::In),
                    EndpointInfo::interrupt(OUT_ADDRESS, Direction::Out),
                ],
            }],
            kernel_driver_active: Ok(false),
            detach_result: Ok(()),
            claim_result: Ok(()),
            failing_writes: Vec::new(),
            reads: RefCell::default(),
            cancel,
            calls: Rc::default(),
        }
    }

    pub fn with_reads(self, reads: impl IntoIterator<Item = MockRead>) -> Self {
        self.reads.borrow_mut().extend(reads);
        self
    }

    pub fn calls(&self) -> Rc<RefCell<Vec<Call>>> {
        self.calls.clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn write_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::Write(..)))
            .count()
    }
}

impl Transport for MockTransport {
    fn interfaces(&self) -> rusb::Result<Vec<InterfaceInfo>> {
        Ok(self.interfaces.clone())
    }

    fn kernel_driver_active(&self, _interface: u8) -> rusb::Result<bool> {
        self.kernel_driver_active
    }

    fn detach_kernel_driver(&mut self, interface: u8) -> rusb::Result<()> {
        self.record(Call::Detach(interface));
        self.detach_result
    }

    fn attach_kernel_driver(&mut self, interface: u8) -> rusb::Result<()> {
        self.record(Call::Attach(interface));
        Ok(())
    }

    fn claim_interface(&mut self, interface: u8) -> rusb::Result<()> {
        self.record(Call::Claim(interface));
        self.claim_result
    }

    fn set_alternate_setting(&mut self, interface: u8, setting: u8) -> rusb::Result<()> {
        self.record(Call::SetAlternateSetting(interface, setting));
        Ok(())
    }

    fn release_interface(&mut self, interface: u8) -> rusb::Result<()> {
        self.record(Call::Release(interface));
        Ok(())
    }

    fn read_interrupt<'b>(
        &self,
        endpoint: u8,
        buf: &'b mut [u8],
        _timeout: Duration,
    ) -> ReadOutcome<'b> {
        self.record(Call::Read(endpoint));

        let Some(read) = self.reads.borrow_mut().pop_front() else {
            self.cancel.cancel();
            return ReadOutcome::Timeout;
        };

        let data = match read {
            MockRead::Data(data) => data,
            MockRead::Timeout => return ReadOutcome::Timeout,
            MockRead::Fail(e) => return ReadOutcome::Failed(e),
            MockRead::CancelDuring(data) => {
                self.cancel.cancel();
                data
            }
            MockRead::Interrupted => {
                self.cancel.cancel();
                return ReadOutcome::Failed(rusb::Error::Interrupted);
            }
        };

        let len = data.len().min(buf.len());
        buf[..len].copy_from_slice(&data[..len]);
        ReadOutcome::from_read(Ok(len), buf)
    }

    fn write_interrupt(&self, endpoint: u8, data: &[u8], _timeout: Duration) -> rusb::Result<usize> {
        let index = self.write_count();
        self.record(Call::Write(endpoint, data.to_vec()));

        if self.failing_writes.contains(&index) {
            Err(rusb::Error::Pipe)
        } else {
            Ok(data.len())
        }
    }
}
