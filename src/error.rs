//! Error types for iconsync operations.

use std::io;

use thiserror::Error;

/// Errors raised by the read path and path resolution.
///
/// Each variant corresponds to one primitive failure kind and carries the
/// originating path plus the raw OS error for diagnostics. Write failures
/// are deliberately absent: the writer reports them as a boolean and never
/// raises.
#[derive(Error, Debug)]
pub enum IconSyncError {
    /// Metadata query failed for the given path.
    #[error("stat failed for {path}: {source}")]
    Stat {
        /// Path whose metadata could not be queried.
        path: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Stat reported a negative byte size, which is never valid.
    #[error("invalid file size {size} reported for {path}")]
    InvalidSize {
        /// Path with the bogus size.
        path: String,
        /// The size value as reported.
        size: i64,
    },

    /// File could not be opened for reading.
    #[error("open failed for {path}: {source}")]
    Open {
        /// Path that failed to open.
        path: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The read call itself failed.
    #[error("read failed for {path}: {source}")]
    Read {
        /// Path being read.
        path: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The read call completed but transferred fewer bytes than the file
    /// size reported by stat. Never silently tolerated.
    #[error("incomplete read for {path}: expected {expected} bytes, got {actual}")]
    IncompleteRead {
        /// Path being read.
        path: String,
        /// Bytes requested (the stat size).
        expected: usize,
        /// Bytes actually transferred.
        actual: usize,
    },

    /// The identity resolver produced an empty title identifier.
    #[error("empty title id")]
    EmptyTitleId,
}

/// Result type for iconsync operations.
pub type Result<T> = std::result::Result<T, IconSyncError>;
