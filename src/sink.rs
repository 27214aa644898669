use std::io;

/// Line-oriented destination for encoded records.
///
/// Implementations are called synchronously from whatever thread is
/// logging, possibly many at once. Each call to [`LogSink::write_line`]
/// must land as one contiguous line: concurrent writes may be reordered
/// but never interleaved.
pub trait LogSink: Send + Sync {
    /// Append one encoded record.
    ///
    /// **Parameters**
    /// - `line`: a complete JSON object including the trailing `\n`.
    ///
    /// **Returns**
    /// - `Ok(())` once the line has been handed to the underlying output.
    /// - `Err(..)` if the output rejected it. The logger does not retry;
    ///   retry and backpressure belong to the sink.
    fn write_line(&self, line: &[u8]) -> io::Result<()>;

    /// Flush buffered output.
    ///
    /// Called before the process terminates on a fatal or panic record.
    /// Default implementation is a no-op.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}
