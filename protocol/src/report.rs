use core::fmt::{self, Display};

use crate::{Buttons, PressedButtons};

/// Shortest buffer that carries every field of an [`InputReport`].
/// Anything shorter is treated as noise or a partial read.
pub const REPORT_MIN_LEN: usize = 16;

/// Decoded input report.
///
/// Layout (little endian):
///
/// | offset | width | field         |
/// |--------|-------|---------------|
/// | 0      | 1     | report type   |
/// | 1..4   |       | not decoded   |
/// | 4      | 2     | buttons       |
/// | 6      | 1     | left trigger  |
/// | 7      | 1     | right trigger |
/// | 8      | 2     | left stick X  |
/// | 10     | 2     | left stick Y  |
/// | 12     | 2     | right stick X |
/// | 14     | 2     | right stick Y |
///
/// Bytes past [`REPORT_MIN_LEN`] are not decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputReport {
    report_type: u8,
    buttons: Buttons,
    lt: u8,
    rt: u8,
    lx: i16,
    ly: i16,
    rx: i16,
    ry: i16,
}

impl InputReport {
    /// Decodes `buf`, returning [`None`] when it is shorter than [`REPORT_MIN_LEN`].
    #[must_use]
    pub fn decode(buf: &[u8]) -> Option<Self> {
        let buf: &[u8; REPORT_MIN_LEN] = buf.get(..REPORT_MIN_LEN)?.try_into().ok()?;

        let report = Self {
            report_type: buf[0],
            buttons: Buttons::new(u16::from_le_bytes([buf[4], buf[5]])),
            lt: buf[6],
            rt: buf[7],
            lx: i16::from_le_bytes([buf[8], buf[9]]),
            ly: i16::from_le_bytes([buf[10], buf[11]]),
            rx: i16::from_le_bytes([buf[12], buf[13]]),
            ry: i16::from_le_bytes([buf[14], buf[15]]),
        };

        Some(report)
    }

    #[inline]
    #[must_use]
    pub fn report_type(&self) -> u8 {
        self.report_type
    }

    #[inline]
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        self.buttons
    }

    #[inline]
    #[must_use]
    pub fn pressed(&self) -> PressedButtons {
        self.buttons.pressed()
    }

    #[inline]
    #[must_use]
    pub fn lt(&self) -> u8 {
        self.lt
    }

    #[inline]
    #[must_use]
    pub fn rt(&self) -> u8 {
        self.rt
    }

    #[inline]
    #[must_use]
    pub fn lx(&self) -> i16 {
        self.lx
    }

    #[inline]
    #[must_use]
    pub fn ly(&self) -> i16 {
        self.ly
    }

    #[inline]
    #[must_use]
    pub fn rx(&self) -> i16 {
        self.rx
    }

    #[inline]
    #[must_use]
    pub fn ry(&self) -> i16 {
        self.ry
    }
}

impl Display for InputReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DECODE: type=0x{:02x} btn=0x{:04x} pressed={} LT={} RT={} LX={} LY={} RX={} RY={}",
            self.report_type,
            self.buttons.raw(),
            self.pressed(),
            self.lt,
            self.rt,
            self.lx,
            self.ly,
            self.rx,
            self.ry,
        )
    }
}
