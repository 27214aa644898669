use crate::sink::LogSink;
use std::io;

/// A sink that simply drops all records.
///
/// Useful for measuring the overhead of formatting without any I/O, and
/// for tests that only care about side effects other than output.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn write_line(&self, _line: &[u8]) -> io::Result<()> {
        Ok(())
    }
}
