//! Buffer reader: materialize a file's full contents into an owned buffer.

use crate::buffer::Buffer;
use crate::error::{IconSyncError, Result};
use crate::raw;

/// Read the entire file at `path` into an owned [`Buffer`] sized exactly
/// to the length reported by stat.
///
/// An empty file short-circuits to a zero-length buffer without any
/// open/read/close. The open descriptor is guard-scoped, so close runs
/// exactly once whether the read succeeds, comes up short, or fails.
///
/// # Errors
///
/// Returns [`IconSyncError::Stat`] when the metadata query fails,
/// [`IconSyncError::InvalidSize`] when stat reports a negative size,
/// [`IconSyncError::Open`] when the file cannot be opened read-only,
/// [`IconSyncError::Read`] when the read call fails, and
/// [`IconSyncError::IncompleteRead`] when fewer bytes arrive than stat
/// promised. An incomplete read is always an error, never silently
/// tolerated.
pub fn read_file_to_buffer(path: &str) -> Result<Buffer> {
    let st = raw::stat(path).map_err(|source| IconSyncError::Stat {
        path: path.to_string(),
        source,
    })?;

    if st.size < 0 {
        return Err(IconSyncError::InvalidSize {
            path: path.to_string(),
            size: st.size,
        });
    }
    #[allow(clippy::cast_sign_loss)] // size checked non-negative above
    let size = st.size as usize;

    if size == 0 {
        return Ok(Buffer::empty());
    }

    let handle = raw::open(path, libc::O_RDONLY, 0).map_err(|source| IconSyncError::Open {
        path: path.to_string(),
        source,
    })?;

    // The handle's drop guard closes the descriptor on every exit path
    // below, including the error returns.
    let mut buffer = Buffer::zeroed(size);
    let actual = handle
        .read(buffer.as_mut_slice())
        .map_err(|source| IconSyncError::Read {
            path: path.to_string(),
            source,
        })?;

    if actual != size {
        return Err(IconSyncError::IncompleteRead {
            path: path.to_string(),
            expected: size,
            actual,
        });
    }

    Ok(buffer)
}
