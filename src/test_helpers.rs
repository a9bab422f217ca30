//! Test utilities for creating temporary log files.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct TempLogFile {
    path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TempLogFile {
    /// Create a new, empty temporary log file
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("test.log");

        File::create(&path)?;

        Ok(Self {
            path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a temporary log file holding the given lines, each newline-terminated
    pub fn with_lines(lines: &[&str]) -> std::io::Result<Self> {
        let temp_file = Self::new()?;
        for line in lines {
            temp_file.append_line(line)?;
        }
        Ok(temp_file)
    }

    /// Append one newline-terminated line
    pub fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;

        writeln!(file, "{}", line)?;
        file.flush()?;
        Ok(())
    }

    /// Replace the file's content with raw bytes
    pub fn write_raw(&self, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::write(&self.path, bytes)
    }

    /// Remove the file while keeping its directory alive
    pub fn remove(&self) -> std::io::Result<()> {
        std::fs::remove_file(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_log_file_creation() {
        let temp_file = TempLogFile::new().unwrap();
        assert!(temp_file.path().exists());
    }

    #[test]
    fn test_with_lines() {
        let temp_file = TempLogFile::with_lines(&["line 1", "line 2"]).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "line 1\nline 2\n");
    }

    #[test]
    fn test_remove() {
        let temp_file = TempLogFile::with_lines(&["gone"]).unwrap();
        temp_file.remove().unwrap();
        assert!(!temp_file.path().exists());
    }
}
