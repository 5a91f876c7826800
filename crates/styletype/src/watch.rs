//! Save watching for automatic regeneration.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebouncedEventKind, Debouncer, new_debouncer};

use crate::{Error, Result};

/// Watches directory trees for saved style sheets.
///
/// Events are debounced and drained with [`poll`](Self::poll); the caller
/// decides what to do with each changed path. No extension filtering
/// happens here: the processing gate owns that decision, which also keeps
/// freshly written `.d.ts` artifacts from retriggering themselves.
///
/// # Example
///
/// ```ignore
/// let mut watcher = SaveWatcher::new()?;
/// watcher.watch("src/styles")?;
///
/// // In your event loop:
/// for path in watcher.poll() {
///     pipeline.process_file(&path, false).await;
/// }
/// ```
pub struct SaveWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<std::result::Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    watched_roots: HashSet<PathBuf>,
}

impl SaveWatcher {
    /// Create a watcher with a 100 ms debounce window.
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let debouncer =
            new_debouncer(Duration::from_millis(100), tx).map_err(|e| Error::Watch(e.to_string()))?;

        Ok(Self {
            debouncer,
            rx,
            watched_roots: HashSet::new(),
        })
    }

    /// Start watching a directory tree recursively.
    pub fn watch(&mut self, root: impl AsRef<Path>) -> Result<()> {
        let root = root
            .as_ref()
            .canonicalize()
            .map_err(|e| Error::io(root.as_ref(), e))?;

        if !self.watched_roots.contains(&root) {
            self.debouncer
                .watcher()
                .watch(&root, RecursiveMode::Recursive)
                .map_err(|e| Error::Watch(e.to_string()))?;

            self.watched_roots.insert(root.clone());
            tracing::info!("Watching {}", root.display());
        }

        Ok(())
    }

    /// Stop watching a directory tree.
    pub fn unwatch(&mut self, root: impl AsRef<Path>) -> Result<()> {
        let root = match root.as_ref().canonicalize() {
            Ok(p) => p,
            Err(_) => return Ok(()), // Directory doesn't exist, nothing to unwatch
        };

        if self.watched_roots.remove(&root) {
            let _ = self.debouncer.watcher().unwatch(&root);
            tracing::info!("Stopped watching {}", root.display());
        }

        Ok(())
    }

    /// Drain pending save events.
    ///
    /// Returns changed files, sorted and deduplicated. Directory events and
    /// removals are dropped: directories are not documents, and artifacts
    /// are never deleted on behalf of a vanished source.
    pub fn poll(&mut self) -> Vec<PathBuf> {
        let mut changed = vec![];

        loop {
            match self.rx.try_recv() {
                Ok(Ok(events)) => {
                    for event in events {
                        if event.kind == DebouncedEventKind::Any && event.path.is_file() {
                            changed.push(event.path);
                        }
                    }
                }
                Ok(Err(e)) => {
                    tracing::warn!("File watcher error: {}", e);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("File watcher disconnected");
                    break;
                }
            }
        }

        // The same file may have produced several events in one window
        changed.sort();
        changed.dedup();

        changed
    }

    /// Number of watched roots.
    pub fn watched_count(&self) -> usize {
        self.watched_roots.len()
    }

    /// The watched roots.
    pub fn watched_roots(&self) -> impl Iterator<Item = &Path> {
        self.watched_roots.iter().map(|p| p.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn watcher_creation() {
        let watcher = SaveWatcher::new();
        assert!(watcher.is_ok());
    }

    #[test]
    fn watch_directory() {
        let dir = tempdir().unwrap();

        let mut watcher = SaveWatcher::new().unwrap();
        watcher.watch(dir.path()).unwrap();
        assert_eq!(watcher.watched_count(), 1);

        // Watching the same root twice is a no-op
        watcher.watch(dir.path()).unwrap();
        assert_eq!(watcher.watched_count(), 1);
    }

    #[test]
    fn unwatch_directory() {
        let dir = tempdir().unwrap();

        let mut watcher = SaveWatcher::new().unwrap();
        watcher.watch(dir.path()).unwrap();
        assert_eq!(watcher.watched_count(), 1);

        watcher.unwatch(dir.path()).unwrap();
        assert_eq!(watcher.watched_count(), 0);
    }

    #[test]
    fn missing_watch_root_is_an_error() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("nope");

        let mut watcher = SaveWatcher::new().unwrap();
        assert!(watcher.watch(&gone).is_err());
    }

    #[test]
    fn poll_reports_saved_files_not_directories() {
        let dir = tempdir().unwrap();
        let mut watcher = SaveWatcher::new().unwrap();
        watcher.watch(dir.path()).unwrap();

        std::fs::create_dir(dir.path().join("components")).unwrap();
        std::fs::write(dir.path().join("app.css"), ".a {}\n").unwrap();

        // Wait out the debounce window; directory-only batches drain to
        // nothing, so keep polling until the file shows up.
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        let mut changed = vec![];
        while changed.is_empty() && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(50));
            changed = watcher.poll();
        }

        assert!(
            changed.iter().any(|p| p.ends_with("app.css")),
            "expected the saved file to be reported: {changed:?}"
        );
        assert!(
            changed.iter().all(|p| p.is_file()),
            "directories must never be reported: {changed:?}"
        );
    }
}
