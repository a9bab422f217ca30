//! File watching functionality using the notify crate.

use crate::error::Result;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Watches the directory containing one log file.
pub(crate) struct FileWatcher {
    watcher: RecommendedWatcher,
    receiver: mpsc::UnboundedReceiver<notify::Result<Event>>,
    file_path: PathBuf,
}

impl FileWatcher {
    /// Creates a new file watcher for the specified path.
    pub(crate) fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();

        let (tx, rx) = mpsc::unbounded_channel();

        let watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        Ok(Self {
            watcher,
            receiver: rx,
            file_path,
        })
    }

    /// Registers the watch on the file's containing directory.
    pub(crate) fn start_watching(&mut self) -> Result<()> {
        let watch_path = watch_dir(&self.file_path);
        self.watcher.watch(watch_path, RecursiveMode::NonRecursive)?;
        Ok(())
    }

    /// Returns the next file system event.
    pub(crate) async fn next_event(&mut self) -> Option<notify::Result<Event>> {
        self.receiver.recv().await
    }

    /// Name of the watched file, used to filter directory events.
    pub(crate) fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Directory to register with notify. A bare file name lives in `.`.
fn watch_dir(file_path: &Path) -> &Path {
    match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Check if a notify event is relevant to a specific file
pub(crate) fn is_event_relevant_to_file(event: &Event, target_file_name: &str) -> bool {
    event.paths.iter().any(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy() == target_file_name)
            .unwrap_or(false)
    })
}

/// Only `Modify` events trigger a re-read.
pub(crate) fn is_modification(event: &Event) -> bool {
    matches!(event.kind, EventKind::Modify(_))
}
