//! File reading utilities for log processing.

use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// Fail with `NotFound` unless the path names an existing regular file.
pub(crate) async fn ensure_exists(file_path: &Path) -> Result<()> {
    match tokio::fs::metadata(file_path).await {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(Error::not_found(file_path)),
        // A regular file used as a directory component also means "no such file".
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            Err(Error::not_found(file_path))
        }
        Err(e) => Err(Error::read(file_path, e)),
    }
}

/// Read the whole file and split it into lines.
pub(crate) async fn read_lines(file_path: &Path) -> Result<Vec<String>> {
    let bytes = tokio::fs::read(file_path)
        .await
        .map_err(|e| Error::read(file_path, e))?;

    let content = String::from_utf8_lossy(&bytes);
    Ok(split_lines(strip_bom(&content)))
}

/// Re-read the file and return its most recent line, if it has any.
pub(crate) async fn read_last_line(file_path: &Path) -> Result<Option<String>> {
    let mut lines = read_lines(file_path).await?;
    Ok(lines.pop())
}

/// Keep only the final `n` lines, in their original order.
pub(crate) fn take_last(mut lines: Vec<String>, n: usize) -> Vec<String> {
    let start = lines.len().saturating_sub(n);
    lines.split_off(start)
}

/// Split content on `\n`, `\r\n` or a lone `\r`.
///
/// A terminator at the very end does not produce a trailing empty line;
/// empty lines anywhere else are kept.
pub(crate) fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(idx) => {
                lines.push(rest[..idx].to_string());
                let terminator_len = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + terminator_len..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}

pub(crate) fn strip_bom(content: &str) -> &str {
    content.strip_prefix(UTF8_BOM).unwrap_or(content)
}
