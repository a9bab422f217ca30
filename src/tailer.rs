//! The `LogTailer` façade over one log file.

use crate::error::Result;
use crate::reader::{ensure_exists, read_lines, take_last};
use crate::search::{LineMatcher, search_file};
use crate::stream::{LogWatch, WatchHandle};
use crate::watcher::FileWatcher;
use std::path::{Path, PathBuf};

/// Read, search and watch access to a single append-only text file.
///
/// No file handle is kept between calls: each operation opens the file,
/// checks that it exists and reads the content present at that moment.
/// Clones share nothing and may be used concurrently.
#[derive(Debug, Clone)]
pub struct LogTailer {
    path: PathBuf,
}

impl LogTailer {
    /// Creates a tailer for `path`. No I/O happens until an operation runs.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every line of the file, in order.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) if the file is
    /// missing and [`Error::Read`](crate::Error::Read) on any I/O failure.
    pub async fn read_all(&self) -> Result<Vec<String>> {
        ensure_exists(&self.path).await?;
        let lines = read_lines(&self.path).await?;

        tracing::debug!(path = %self.path.display(), lines = lines.len(), "read log file");
        Ok(lines)
    }

    /// Reads the last `n` lines in their original order.
    ///
    /// `n == 0` yields nothing; an `n` past the line count yields the whole
    /// file. The whole file is read before slicing.
    pub async fn read_last(&self, n: usize) -> Result<Vec<String>> {
        ensure_exists(&self.path).await?;
        let lines = take_last(read_lines(&self.path).await?, n);

        tracing::debug!(
            path = %self.path.display(),
            requested = n,
            lines = lines.len(),
            "read log tail"
        );
        Ok(lines)
    }

    /// Returns every line containing `term`, ignoring case.
    ///
    /// Case is compared by code point, without locale rules. An empty term
    /// matches every line. The file is streamed rather than loaded whole.
    pub async fn search(&self, term: &str) -> Result<Vec<String>> {
        ensure_exists(&self.path).await?;
        let matches = search_file(&self.path, &LineMatcher::new(term)).await?;

        tracing::debug!(
            path = %self.path.display(),
            term,
            matches = matches.len(),
            "searched log file"
        );
        Ok(matches)
    }

    /// Starts watching the file and returns a stream of its most recent line
    /// after each modification.
    ///
    /// The existence check and the watch registration both complete before
    /// this returns, so their errors surface here and any later append is
    /// observed. Failures while handling a single notification are logged
    /// and skipped.
    pub async fn watch(&self) -> Result<LogWatch> {
        ensure_exists(&self.path).await?;

        let mut watcher = FileWatcher::new(&self.path)?;
        watcher.start_watching()?;

        tracing::info!(path = %self.path.display(), "watching log file");
        Ok(LogWatch::spawn(self.path.clone(), watcher))
    }

    /// Like [`watch`](Self::watch), but hands each line to `on_new_line`.
    pub async fn watch_with<F>(&self, on_new_line: F) -> Result<WatchHandle>
    where
        F: FnMut(String) + Send + 'static,
    {
        let watch = self.watch().await?;
        Ok(WatchHandle::spawn(watch, on_new_line))
    }
}
