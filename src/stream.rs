//! Delivery of watch notifications, as a stream or through a callback.

use crate::reader::read_last_line;
use crate::watcher::{FileWatcher, is_event_relevant_to_file, is_modification};
use futures::Stream;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

/// A stream of the most recent line, yielded each time the log file is modified.
///
/// Delivery is at-least-once and may repeat a line: every modification event
/// re-reads the file and yields its last line, so several appends between two
/// events surface only the newest one. Use [`LogTailer::read_last`] when every
/// line matters.
///
/// Dropping the stream stops the background watch. [`LogWatch::stop`] does the
/// same and waits until the OS registration has been released.
///
/// [`LogTailer::read_last`]: crate::LogTailer::read_last
#[derive(Debug)]
pub struct LogWatch {
    receiver: mpsc::UnboundedReceiver<String>,
    shutdown_tx: broadcast::Sender<()>,
    task_handle: Option<JoinHandle<()>>,
}

impl LogWatch {
    /// Spawns the notification task around an already registered watcher.
    pub(crate) fn spawn(file_path: PathBuf, watcher: FileWatcher) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let task_handle = tokio::spawn(notification_task(file_path, watcher, tx, shutdown_rx));

        LogWatch {
            receiver: rx,
            shutdown_tx,
            task_handle: Some(task_handle),
        }
    }

    /// Stops watching and waits for the watcher to be released.
    ///
    /// Lines still buffered are discarded; the stream yields `None` afterwards.
    pub async fn stop(&mut self) {
        let _ = self.shutdown_tx.send(());

        if let Some(handle) = self.task_handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "watch task ended abnormally");
            }
        }

        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}
    }

    /// Returns true once the background watch has exited.
    pub fn is_stopped(&self) -> bool {
        self.task_handle
            .as_ref()
            .is_none_or(|handle| handle.is_finished())
    }
}

impl Drop for LogWatch {
    fn drop(&mut self) {
        // No receivers left means the task already exited.
        let _ = self.shutdown_tx.send(());
    }
}

impl Stream for LogWatch {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_recv(cx)
    }
}

/// Background task turning modification events into last-line notifications.
async fn notification_task(
    file_path: PathBuf,
    mut watcher: FileWatcher,
    tx: mpsc::UnboundedSender<String>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let file_name = watcher.file_name();

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,

            _ = tx.closed() => {
                tracing::debug!(path = %file_path.display(), "watch receiver dropped");
                break;
            }

            event = watcher.next_event() => {
                match event {
                    Some(Ok(event)) => {
                        let relevant = is_modification(&event)
                            && is_event_relevant_to_file(&event, &file_name);
                        if !relevant {
                            tracing::trace!(kind = ?event.kind, "ignoring file system event");
                        } else {
                            match read_last_line(&file_path).await {
                                Ok(Some(line)) => {
                                    if tx.send(line).is_err() {
                                        break;
                                    }
                                }
                                Ok(None) => {
                                    tracing::debug!(
                                        path = %file_path.display(),
                                        "log file is empty"
                                    );
                                }
                                Err(e) => {
                                    tracing::warn!(
                                        path = %file_path.display(),
                                        error = %e,
                                        "skipping change notification"
                                    );
                                }
                            }
                        }
                    }
                    Some(Err(e)) => {
                        tracing::warn!(
                            path = %file_path.display(),
                            error = %e,
                            "file watcher error"
                        );
                    }
                    None => break,
                }
            }
        }
    }

    tracing::info!(path = %file_path.display(), "stopped watching log file");
}

/// Handle for a watch delivering lines to a callback.
///
/// The callback runs on a single task, so invocations never overlap and
/// arrive in the order the lines were produced. Dropping the handle stops the
/// watch without waiting.
#[derive(Debug)]
pub struct WatchHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    task_handle: Option<JoinHandle<()>>,
}

impl WatchHandle {
    pub(crate) fn spawn<F>(mut watch: LogWatch, mut on_new_line: F) -> Self
    where
        F: FnMut(String) + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task_handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    // Also resolves when the handle is dropped.
                    _ = &mut stop_rx => break,

                    line = watch.next() => match line {
                        Some(line) => on_new_line(line),
                        None => break,
                    },
                }
            }

            watch.stop().await;
        });

        WatchHandle {
            stop_tx: Some(stop_tx),
            task_handle: Some(task_handle),
        }
    }

    /// Stops the watch. No callback runs once this returns.
    pub async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        if let Some(handle) = self.task_handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "watch callback task ended abnormally");
            }
        }
    }

    /// Returns true once callback delivery has ended.
    pub fn is_finished(&self) -> bool {
        self.task_handle
            .as_ref()
            .is_none_or(|handle| handle.is_finished())
    }
}
