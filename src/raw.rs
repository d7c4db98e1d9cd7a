//! Raw I/O primitives: thin wrappers around the stat, open, read, write
//! and close system calls.
//!
//! Every wrapper translates the raw numeric result into either a success
//! value or an [`std::io::Error`] carrying the OS error code. Unsafe FFI is
//! confined to this module; everything above it is safe Rust.

use std::ffi::CString;
use std::io;
use std::os::raw::c_int;

/// Ephemeral file metadata. Only the byte size field is consumed.
///
/// The size is kept signed exactly as the kernel reports it; callers must
/// treat a negative value as an error condition, not as an empty file.
#[derive(Debug, Clone, Copy)]
pub struct FileStat {
    /// File size in bytes as reported by the stat call.
    pub size: i64,
}

/// An open file descriptor.
///
/// The descriptor is owned exclusively by this handle and is released
/// exactly once: either through an explicit [`FileHandle::close`], which
/// surfaces the close status, or through the drop guard on every other
/// exit path.
#[derive(Debug)]
pub struct FileHandle {
    fd: c_int,
    closed: bool,
}

impl FileHandle {
    /// Read up to `buf.len()` bytes into `buf`, returning the number of
    /// bytes transferred. A short count is a legal kernel result; deciding
    /// whether it is acceptable is the caller's contract.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the read call reports a negative result.
    pub fn read(&self, buf: &mut [u8]) -> io::Result<usize> {
        // SAFETY: fd is open for the lifetime of self, buf is valid for
        // buf.len() writable bytes.
        let n = unsafe { libc::read(self.fd, buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        #[allow(clippy::cast_sign_loss)] // n checked non-negative above
        let n = n as usize;
        Ok(n)
    }

    /// Write `buf` to the descriptor, returning the number of bytes
    /// transferred. A short count is a partial write, distinct from a hard
    /// failure; the caller decides how to report it.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the write call reports a negative result.
    pub fn write(&self, buf: &[u8]) -> io::Result<usize> {
        // SAFETY: fd is open for the lifetime of self, buf is valid for
        // buf.len() readable bytes.
        let n = unsafe { libc::write(self.fd, buf.as_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        #[allow(clippy::cast_sign_loss)] // n checked non-negative above
        let n = n as usize;
        Ok(n)
    }

    /// Release the descriptor, surfacing the close status.
    ///
    /// After this call the handle is consumed; the drop guard will not
    /// close the descriptor a second time.
    ///
    /// # Errors
    ///
    /// Returns the OS error when close reports a negative status. Callers
    /// treat this as a warning, never as a hard failure.
    pub fn close(mut self) -> io::Result<()> {
        self.closed = true;
        // SAFETY: fd has not been closed yet; the flag above keeps the
        // drop guard from closing it again.
        let ret = unsafe { libc::close(self.fd) };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        if !self.closed {
            // SAFETY: fd is still open; this is the only remaining owner.
            unsafe {
                libc::close(self.fd);
            }
        }
    }
}

fn cpath(path: &str) -> io::Result<CString> {
    CString::new(path).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

/// Query file metadata.
///
/// # Errors
///
/// Returns the OS error when the stat call returns non-zero; the size
/// must not be trusted on failure.
pub fn stat(path: &str) -> io::Result<FileStat> {
    let cpath = cpath(path)?;
    let mut st = std::mem::MaybeUninit::<libc::stat>::uninit();
    // SAFETY: cpath is NUL-terminated and st is a properly sized
    // out-parameter for the stat result.
    let ret = unsafe { libc::stat(cpath.as_ptr(), st.as_mut_ptr()) };
    if ret != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: stat returned 0, so the out-parameter is initialized.
    let st = unsafe { st.assume_init() };
    Ok(FileStat { size: st.st_size })
}

/// Check whether a path exists, by stat success alone.
#[must_use]
pub fn file_exists(path: &str) -> bool {
    stat(path).is_ok()
}

/// Open a file with the given flags and permission mode.
///
/// # Errors
///
/// Returns the OS error when the open call reports a negative descriptor.
pub fn open(path: &str, flags: c_int, mode: libc::mode_t) -> io::Result<FileHandle> {
    let cpath = cpath(path)?;
    // SAFETY: cpath is NUL-terminated; mode is only consumed by the kernel
    // when flags include O_CREAT.
    let fd = unsafe { libc::open(cpath.as_ptr(), flags, libc::c_uint::from(mode)) };
    if fd < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(FileHandle { fd, closed: false })
}
