//! Update orchestrator: existence check, two reads, compare, conditional
//! write, outcome report.

use crate::buffer::compare_buffers;
use crate::error::{IconSyncError, Result};
use crate::identity::IdentityResolver;
use crate::raw;
use crate::reader::read_file_to_buffer;
use crate::sink::{MessageSink, Reporter};
use crate::writer::{BufferWriter, FsWriter};

/// Root directory holding the installed icon.
pub const CURRENT_ICON_ROOT: &str = "/user/appmeta";

/// Root directory holding the staged replacement icon.
pub const STAGED_ICON_ROOT: &str = "/mnt/sandbox";

/// File name of the icon under both roots.
pub const ICON_FILE_NAME: &str = "icon0.png";

/// Cache directory name for the staged splash-screen icon.
const SPLASH_CACHE_KEY: &str = "aHR0cHM6Ly93d3cueW91dHViZS5jb20vdHY=";

/// The two absolute paths a run operates on: the installed icon and its
/// staged replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPaths {
    /// Installed icon location.
    pub current: String,
    /// Staged replacement location.
    pub staged: String,
}

impl IconPaths {
    /// Build both paths from a title identifier over the default roots.
    #[must_use]
    pub fn resolve(title_id: &str) -> Self {
        Self::with_roots(CURRENT_ICON_ROOT, STAGED_ICON_ROOT, title_id)
    }

    /// Build both paths from a title identifier over explicit roots.
    #[must_use]
    pub fn with_roots(current_root: &str, staged_root: &str, title_id: &str) -> Self {
        Self {
            current: format!("{current_root}/{title_id}/{ICON_FILE_NAME}"),
            staged: format!(
                "{staged_root}/{title_id}_000/download0/cache/splash_screen/{SPLASH_CACHE_KEY}/{ICON_FILE_NAME}"
            ),
        }
    }

    /// Build both paths from an identity resolver over the default roots.
    ///
    /// # Errors
    ///
    /// Returns [`IconSyncError::EmptyTitleId`] when the resolver produces
    /// an empty identifier.
    pub fn for_identity(identity: &impl IdentityResolver) -> Result<Self> {
        Self::for_identity_with_roots(CURRENT_ICON_ROOT, STAGED_ICON_ROOT, identity)
    }

    /// Build both paths from an identity resolver over explicit roots.
    ///
    /// # Errors
    ///
    /// Returns [`IconSyncError::EmptyTitleId`] when the resolver produces
    /// an empty identifier.
    pub fn for_identity_with_roots(
        current_root: &str,
        staged_root: &str,
        identity: &impl IdentityResolver,
    ) -> Result<Self> {
        let title_id = identity.resolve();
        if title_id.is_empty() {
            return Err(IconSyncError::EmptyTitleId);
        }
        Ok(Self::with_roots(current_root, staged_root, &title_id))
    }
}

/// Terminal state of one orchestrator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The staged content replaced the installed icon.
    Updated,
    /// Both files already hold identical bytes; no write performed.
    Identical,
    /// The installed icon does not exist; nothing was read or written.
    MissingCurrent,
    /// A read raised or the write reported failure. Already logged and
    /// notified; the run still completed normally.
    Failed,
}

/// Top-level orchestrator for one icon synchronization run.
///
/// All failures are terminal to the run but never propagate outward:
/// reader errors are caught at this boundary and reported through the
/// sinks, writer failures arrive as boolean results, and the run always
/// returns an [`UpdateOutcome`].
#[derive(Debug, Clone)]
pub struct IconUpdater<L, N, W = FsWriter> {
    paths: IconPaths,
    reporter: Reporter<L, N>,
    writer: W,
}

impl<L: MessageSink, N: MessageSink> IconUpdater<L, N> {
    /// Create an updater over the given paths and sinks, writing through
    /// the raw file-I/O primitives.
    pub fn new(paths: IconPaths, log: L, notify: N) -> Self {
        Self::with_writer(paths, log, notify, FsWriter)
    }
}

impl<L: MessageSink, N: MessageSink, W: BufferWriter> IconUpdater<L, N, W> {
    /// Create an updater with an explicit writer implementation.
    pub fn with_writer(paths: IconPaths, log: L, notify: N, writer: W) -> Self {
        Self {
            paths,
            reporter: Reporter::new(log, notify),
            writer,
        }
    }

    /// The paths this updater operates on.
    #[must_use]
    pub fn paths(&self) -> &IconPaths {
        &self.paths
    }

    /// Run one synchronization pass.
    ///
    /// Missing current icon is a no-op, not an error. Any failure in the
    /// read/compare/write sequence is caught here, logged with its message
    /// text, surfaced through the notification sink, and folded into the
    /// returned outcome.
    pub fn update_icon(&self) -> UpdateOutcome {
        if !raw::file_exists(&self.paths.current) {
            self.reporter
                .log(&format!("icon file does not exist: {}", self.paths.current));
            return UpdateOutcome::MissingCurrent;
        }

        match self.sync_icon() {
            Ok(outcome) => outcome,
            Err(e) => {
                self.reporter.log(&format!("[ERROR] icon update failed: {e}"));
                self.reporter.notify(&format!("[ERROR] icon update: {e}"));
                UpdateOutcome::Failed
            }
        }
    }

    fn sync_icon(&self) -> Result<UpdateOutcome> {
        let IconPaths { current, staged } = &self.paths;

        self.reporter.log(&format!("reading current icon from {current}"));
        let current_icon = read_file_to_buffer(current)?;
        self.reporter
            .log(&format!("current icon size: {} bytes", current_icon.len()));

        self.reporter.log(&format!("reading staged icon from {staged}"));
        let staged_icon = read_file_to_buffer(staged)?;
        self.reporter
            .log(&format!("staged icon size: {} bytes", staged_icon.len()));

        // A size mismatch already proves the contents differ; the byte
        // comparison only runs when the declared lengths are equal.
        let identical = if current_icon.len() == staged_icon.len() {
            self.reporter.log("icons are the same size, comparing contents");
            compare_buffers(&current_icon, &staged_icon, current_icon.len())
        } else {
            self.reporter.log("icons are different (size mismatch)");
            false
        };

        if identical {
            self.reporter.log("icons are identical, no update needed");
            return Ok(UpdateOutcome::Identical);
        }

        self.reporter.log("icons are different, updating icon");
        if self.writer.write(current, &staged_icon, &self.reporter) {
            self.reporter
                .log(&format!("icon updated successfully at {current}"));
            self.reporter.notify("icon updated successfully");
            Ok(UpdateOutcome::Updated)
        } else {
            self.reporter
                .log(&format!("failed to update icon at {current}"));
            Ok(UpdateOutcome::Failed)
        }
    }
}

impl<L, N, W> IconUpdater<L, N, W>
where
    L: MessageSink + Clone + Send + 'static,
    N: MessageSink + Clone + Send + 'static,
    W: BufferWriter + Send + 'static,
{
    /// Awaitable entry point.
    ///
    /// The synchronization pass itself is synchronous; it runs to
    /// completion on the blocking pool with exactly one logical operation
    /// in flight. A pass that dies before producing an outcome is still
    /// reported through both sinks, like every other failure path.
    pub async fn run(self) -> UpdateOutcome {
        let reporter = self.reporter.clone();
        match tokio::task::spawn_blocking(move || self.update_icon()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                reporter.log(&format!("[ERROR] icon update task failed: {e}"));
                reporter.notify(&format!("[ERROR] icon update task failed: {e}"));
                UpdateOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::identity::FixedIdentity;
    use crate::sink::MemorySink;

    /// Writer that reports a partial write and fails, without touching
    /// the filesystem.
    #[derive(Debug, Clone, Copy)]
    struct ShortWriter;

    impl BufferWriter for ShortWriter {
        fn write<L: MessageSink, N: MessageSink>(
            &self,
            path: &str,
            buffer: &Buffer,
            reporter: &Reporter<L, N>,
        ) -> bool {
            let wrote = buffer.len() / 2;
            let expected = buffer.len();
            let msg = format!("[WARN] partial write for {path} wrote={wrote} expected={expected}");
            reporter.log(&msg);
            reporter.notify(&msg);
            false
        }
    }

    /// Writer that dies mid-pass.
    #[derive(Debug, Clone, Copy)]
    struct PanickingWriter;

    impl BufferWriter for PanickingWriter {
        fn write<L: MessageSink, N: MessageSink>(
            &self,
            _path: &str,
            _buffer: &Buffer,
            _reporter: &Reporter<L, N>,
        ) -> bool {
            panic!("writer died");
        }
    }

    fn updater_for(
        paths: IconPaths,
    ) -> (IconUpdater<MemorySink, MemorySink>, MemorySink, MemorySink) {
        let log = MemorySink::new();
        let notify = MemorySink::new();
        (
            IconUpdater::new(paths, log.clone(), notify.clone()),
            log,
            notify,
        )
    }

    #[test]
    fn paths_resolve_from_title_id() {
        let paths = IconPaths::resolve("CUSA01234");
        assert_eq!(paths.current, "/user/appmeta/CUSA01234/icon0.png");
        assert_eq!(
            paths.staged,
            "/mnt/sandbox/CUSA01234_000/download0/cache/splash_screen/\
             aHR0cHM6Ly93d3cueW91dHViZS5jb20vdHY=/icon0.png"
        );
    }

    #[test]
    fn paths_with_custom_roots() {
        let paths = IconPaths::with_roots("/tmp/meta", "/tmp/box", "T1");
        assert_eq!(paths.current, "/tmp/meta/T1/icon0.png");
        assert!(paths.staged.starts_with("/tmp/box/T1_000/"));
        assert!(paths.staged.ends_with("/icon0.png"));
    }

    #[test]
    fn empty_title_id_is_rejected() {
        let identity = FixedIdentity::new("");
        let err = IconPaths::for_identity(&identity).unwrap_err();
        assert!(matches!(err, IconSyncError::EmptyTitleId));
    }

    #[test]
    fn identity_feeds_path_resolution() {
        let identity = FixedIdentity::new("CUSA09999");
        let paths = IconPaths::for_identity(&identity).unwrap();
        assert_eq!(paths, IconPaths::resolve("CUSA09999"));
    }

    #[test]
    fn missing_current_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let paths = IconPaths::with_roots(root, root, "NOPE00000");
        let (updater, log, notify) = updater_for(paths);

        assert_eq!(updater.update_icon(), UpdateOutcome::MissingCurrent);
        assert!(log.contains("does not exist"));
        assert!(notify.is_empty());
    }

    #[test]
    fn missing_staged_is_reported_failure() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let paths = IconPaths::with_roots(root, root, "HALF00000");

        let current_dir = std::path::Path::new(&paths.current).parent().unwrap();
        std::fs::create_dir_all(current_dir).unwrap();
        std::fs::write(&paths.current, b"installed").unwrap();

        let (updater, log, notify) = updater_for(paths);
        assert_eq!(updater.update_icon(), UpdateOutcome::Failed);
        assert!(log.contains("[ERROR] icon update failed"));
        assert!(notify.contains("[ERROR] icon update"));
    }

    #[test]
    fn failed_write_logs_and_returns_normally() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let paths = IconPaths::with_roots(root, root, "SHORTWR00");

        for path in [&paths.current, &paths.staged] {
            let parent = std::path::Path::new(path).parent().unwrap();
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&paths.current, vec![1u8; 50]).unwrap();
        std::fs::write(&paths.staged, vec![2u8; 100]).unwrap();

        let log = MemorySink::new();
        let notify = MemorySink::new();
        let updater =
            IconUpdater::with_writer(paths.clone(), log.clone(), notify.clone(), ShortWriter);

        assert_eq!(updater.update_icon(), UpdateOutcome::Failed);
        assert!(log.contains("wrote=50"));
        assert!(log.contains("expected=100"));
        assert!(log.contains("failed to update icon"));
        assert!(notify.contains("[WARN] partial write"));
        // The installed icon is untouched.
        assert_eq!(std::fs::read(&paths.current).unwrap(), vec![1u8; 50]);
    }

    #[tokio::test]
    async fn dead_pass_is_reported_through_the_sinks() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let paths = IconPaths::with_roots(root, root, "PANICKED0");

        for path in [&paths.current, &paths.staged] {
            let parent = std::path::Path::new(path).parent().unwrap();
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&paths.current, b"before").unwrap();
        std::fs::write(&paths.staged, b"after!").unwrap();

        let log = MemorySink::new();
        let notify = MemorySink::new();
        let updater =
            IconUpdater::with_writer(paths, log.clone(), notify.clone(), PanickingWriter);

        assert_eq!(updater.run().await, UpdateOutcome::Failed);
        assert!(log.contains("[ERROR] icon update task failed"));
        assert!(notify.contains("[ERROR] icon update task failed"));
    }

    #[tokio::test]
    async fn async_entry_runs_to_completion() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let paths = IconPaths::with_roots(root, root, "ASYNC0000");
        let (updater, log, _) = updater_for(paths);

        assert_eq!(updater.run().await, UpdateOutcome::MissingCurrent);
        assert!(log.contains("does not exist"));
    }
}
