use crate::sink::LogSink;
use std::io::{self, Write};

/// Writes each record to standard output.
///
/// The line is written with a single `write_all` while holding the stdout
/// lock, so records from concurrent threads never interleave.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(line)
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}
