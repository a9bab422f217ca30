//! Ad-hoc access to a single append-only text log file.
//!
//! [`LogTailer`] reads a log in full, reads its tail, searches it by
//! case-insensitive substring and watches it for new lines. Nothing is cached:
//! every call sees the file as it is on disk at that moment.
//!
//! # Example
//!
//! ```rust,no_run
//! use log_tailer::LogTailer;
//! use tokio_stream::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tailer = LogTailer::new("app.log");
//!
//!     for line in tailer.read_last(20).await? {
//!         println!("{}", line);
//!     }
//!
//!     let mut watch = tailer.watch().await?;
//!     while let Some(line) = watch.next().await {
//!         println!("latest: {}", line);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Internal modules - not part of public API
mod error;
mod reader;
mod search;
mod stream;
mod tailer;
mod watcher;

#[cfg(test)]
mod test_helpers;

// Public API exports
pub use error::{Error, Result};
pub use stream::{LogWatch, WatchHandle};
pub use tailer::LogTailer;

use std::path::PathBuf;

/// Starts watching a log file for new lines.
///
/// Shorthand for `LogTailer::new(path).watch()`.
///
/// ```rust,no_run
/// use log_tailer::watch_log;
/// use tokio_stream::StreamExt;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut lines = watch_log("app.log").await?;
///
///     while let Some(line) = lines.next().await {
///         println!("New line: {}", line);
///     }
///
///     Ok(())
/// }
/// ```
pub async fn watch_log<P: Into<PathBuf>>(path: P) -> Result<LogWatch> {
    LogTailer::new(path).watch().await
}
