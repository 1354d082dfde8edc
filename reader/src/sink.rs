use std::{
    fmt::{self, Display},
    io::{self, Stdout, Write},
};

use protocol::{HexBytes, InputReport};

/// One successful read: the raw bytes and, if long enough, the decoded report.
#[derive(Clone, Copy, Debug)]
pub struct ReportRecord<'a> {
    raw: &'a [u8],
    report: Option<InputReport>,
}

impl<'a> ReportRecord<'a> {
    #[must_use]
    pub fn new(raw: &'a [u8]) -> Self {
        Self {
            raw,
            report: InputReport::decode(raw),
        }
    }

    #[must_use]
    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    #[must_use]
    pub fn report(&self) -> Option<&InputReport> {
        self.report.as_ref()
    }
}

/// `RAW[len]: bytes`, followed by the decoded line on a second line when
/// the buffer could be decoded.
impl Display for ReportRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RAW[{:02}]:", self.raw.len())?;

        if !self.raw.is_empty() {
            write!(f, " {}", HexBytes(self.raw))?;
        }

        if let Some(report) = &self.report {
            write!(f, "\n{report}")?;
        }

        Ok(())
    }
}

/// Consumer of report records. Called synchronously from the read loop,
/// so a slow sink slows down reading.
pub trait ReportSink {
    /// # Errors
    fn emit(&mut self, record: &ReportRecord<'_>) -> io::Result<()>;
}

/// Writes every record as text, flushing after each one.
#[derive(Debug)]
pub struct ConsoleSink<W> {
    out: W,
}

impl<W> ConsoleSink<W>
where
    W: Write,
{
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleSink<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> ReportSink for ConsoleSink<W>
where
    W: Write,
{
    fn emit(&mut self, record: &ReportRecord<'_>) -> io::Result<()> {
        writeln!(self.out, "{record}")?;
        self.out.flush()
    }
}
