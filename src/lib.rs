//! # iconsync
//!
//! Single-file icon synchronization over raw system calls.
//!
//! Iconsync keeps an application's installed icon in step with a staged
//! replacement: it reads both files into memory through direct
//! stat/open/read/close wrappers, compares them byte for byte, and
//! overwrites the installed icon only when the contents differ. Outcomes
//! are reported through injected logging and notification sinks.
//!
//! ## Example
//!
//! ```rust
//! use iconsync::{IconPaths, IconUpdater, NullSink, UpdateOutcome};
//!
//! let paths = IconPaths::with_roots("/tmp/appmeta", "/tmp/sandbox", "DEMO00000");
//! let updater = IconUpdater::new(paths, NullSink, NullSink);
//!
//! // The current icon does not exist, so the run is a no-op.
//! assert_eq!(updater.update_icon(), UpdateOutcome::MissingCurrent);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

mod buffer;
mod error;
mod identity;
mod raw;
mod reader;
mod sink;
mod update;
mod writer;

pub use buffer::{compare_buffers, Buffer};
pub use error::{IconSyncError, Result};
pub use identity::{FixedIdentity, IdentityResolver};
pub use raw::{file_exists, open, stat, FileHandle, FileStat};
pub use reader::read_file_to_buffer;
pub use sink::{MemorySink, MessageSink, NullSink, Reporter, StdoutSink, TracingSink};
pub use update::{
    IconPaths, IconUpdater, UpdateOutcome, CURRENT_ICON_ROOT, ICON_FILE_NAME, STAGED_ICON_ROOT,
};
pub use writer::{write_buffer_to_file, BufferWriter, FsWriter};
