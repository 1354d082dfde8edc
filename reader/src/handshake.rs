use std::thread;

use protocol::HexBytes;
use tracing::instrument;

use crate::{EndpointPair, SessionSettings, Transport};

/// Result of writing a single handshake frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameOutcome {
    pub frame: Vec<u8>,
    pub result: rusb::Result<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HandshakeSummary {
    outcomes: Vec<FrameOutcome>,
}

impl HandshakeSummary {
    /// Number of frames the device accepted.
    #[must_use]
    pub fn sent(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.sent()
    }

    #[must_use]
    pub fn outcomes(&self) -> &[FrameOutcome] {
        &self.outcomes
    }
}

/// Writes every frame to the OUT endpoint, in order.
///
/// Frames are independent probes: nothing is awaited in between besides
/// the configured delay and a failed write does not stop the sequence.
/// Whether the handshake worked only shows once input reports arrive.
#[instrument(skip_all, fields(endpoint = endpoints.out_address, frames = frames.len()))]
pub fn run<T, F>(
    transport: &T,
    endpoints: &EndpointPair,
    frames: &[F],
    settings: &SessionSettings,
) -> HandshakeSummary
where
    T: Transport + ?Sized,
    F: AsRef<[u8]>,
{
    let mut summary = HandshakeSummary::default();

    for (i, frame) in frames.iter().enumerate() {
        let frame = frame.as_ref();
        let result =
            transport.write_interrupt(endpoints.out_address, frame, settings.write_timeout);

        match result {
            Ok(written) => tracing::info!(
                "handshake {}: wrote {written} bytes: {}",
                i + 1,
                HexBytes(frame)
            ),
            Err(e) => tracing::warn!("handshake {}: {}: {e}", i + 1, HexBytes(frame)),
        }

        summary.outcomes.push(FrameOutcome {
            frame: frame.to_vec(),
            result,
        });

        if !settings.frame_delay.is_zero() {
            thread::sleep(settings.frame_delay);
        }
    }

    summary
}
