//! Buffer writer: create or truncate a file and write a buffer's full
//! contents to it.
//!
//! Unlike the reader, the writer never raises. Every failure is reported
//! through the injected sinks and surfaced as a `false` return, so the
//! orchestrator always completes its run.

use std::io;
use std::os::raw::c_int;

use crate::buffer::Buffer;
use crate::sink::{MessageSink, Reporter};

const WRITE_FLAGS: c_int = libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC;
const WRITE_MODE: libc::mode_t = 0o755;

/// Write the buffer's full contents to `path`, creating or truncating it.
///
/// Returns `true` only when every byte was written. Open failures, write
/// failures and partial writes are logged and notified, then reported as
/// `false`. Close is always attempted after the write attempt; a close
/// error after a fully successful write is logged as a warning and does
/// not downgrade the result.
pub fn write_buffer_to_file<L: MessageSink, N: MessageSink>(
    path: &str,
    buffer: &Buffer,
    reporter: &Reporter<L, N>,
) -> bool {
    let handle = match crate::raw::open(path, WRITE_FLAGS, WRITE_MODE) {
        Ok(handle) => handle,
        Err(e) => {
            let msg = format!("[ERROR] open for write failed: {path}: {e}");
            reporter.log(&msg);
            reporter.notify(&msg);
            return false;
        }
    };

    let wrote = handle.write(buffer.as_slice());
    let closed = handle.close();
    finish_write(path, buffer.len(), wrote, closed, reporter)
}

/// Write seam consumed by the orchestrator.
///
/// The production implementation delegates to [`write_buffer_to_file`];
/// tests substitute a failing writer to drive the orchestrator's
/// write-failure reporting without inducing a real filesystem fault.
pub trait BufferWriter {
    /// Write the buffer's full contents to `path`, reporting failures
    /// through the sinks. Returns `true` only on a complete write.
    fn write<L: MessageSink, N: MessageSink>(
        &self,
        path: &str,
        buffer: &Buffer,
        reporter: &Reporter<L, N>,
    ) -> bool;
}

/// Writer backed by the raw file-I/O primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

impl BufferWriter for FsWriter {
    fn write<L: MessageSink, N: MessageSink>(
        &self,
        path: &str,
        buffer: &Buffer,
        reporter: &Reporter<L, N>,
    ) -> bool {
        write_buffer_to_file(path, buffer, reporter)
    }
}

/// Map the raw write and close results to the reported outcome.
fn finish_write<L: MessageSink, N: MessageSink>(
    path: &str,
    expected: usize,
    wrote: io::Result<usize>,
    closed: io::Result<()>,
    reporter: &Reporter<L, N>,
) -> bool {
    match wrote {
        Err(e) => {
            let msg = format!("[ERROR] write failed for {path}: {e}");
            reporter.log(&msg);
            reporter.notify(&msg);
            false
        }
        Ok(actual) if actual != expected => {
            let msg = format!("[WARN] partial write for {path} wrote={actual} expected={expected}");
            reporter.log(&msg);
            reporter.notify(&msg);
            false
        }
        Ok(_) => {
            if let Err(e) = closed {
                let msg = format!("[WARN] close returned error for {path}: {e}");
                reporter.log(&msg);
                reporter.notify(&msg);
            }
            true
        }
    }
}
