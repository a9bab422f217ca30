//! Case-insensitive substring search over a log file.

use crate::error::{Error, Result};
use crate::reader::{split_lines, strip_bom};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Matches lines containing a term, ignoring case by ordinal code point.
pub(crate) struct LineMatcher {
    folded_term: String,
}

impl LineMatcher {
    pub(crate) fn new(term: &str) -> Self {
        Self {
            folded_term: fold_case(term),
        }
    }

    pub(crate) fn is_match(&self, line: &str) -> bool {
        self.folded_term.is_empty() || fold_case(line).contains(&self.folded_term)
    }
}

/// Map every code point to its simple uppercase form.
///
/// Code points whose uppercase expands to several characters (`ß` -> `SS`)
/// are kept as they are, so the folded text lines up one-to-one with the
/// original.
fn fold_case(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Stream the file line by line and collect every matching line.
pub(crate) async fn search_file(file_path: &Path, matcher: &LineMatcher) -> Result<Vec<String>> {
    let file = File::open(file_path)
        .await
        .map_err(|e| Error::read(file_path, e))?;
    let mut reader = BufReader::new(file);

    let mut matches = Vec::new();
    let mut buf = Vec::new();
    let mut first_chunk = true;

    loop {
        buf.clear();
        // Chunks end on '\n', so a "\r\n" pair never straddles two chunks
        // and a multi-byte UTF-8 sequence is never split.
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| Error::read(file_path, e))?;
        if read == 0 {
            break;
        }

        let decoded = String::from_utf8_lossy(&buf);
        let chunk: &str = &decoded;
        let chunk = if first_chunk { strip_bom(chunk) } else { chunk };
        first_chunk = false;

        matches.extend(
            split_lines(chunk)
                .into_iter()
                .filter(|line| matcher.is_match(line)),
        );
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_lines;
    use crate::test_helpers::TempLogFile;

    #[test]
    fn test_matcher_ignores_ascii_case() {
        let matcher = LineMatcher::new("error");
        assert!(matcher.is_match("2023-01-01 ERROR boom"));
        assert!(matcher.is_match("an Error occurred"));
        assert!(!matcher.is_match("all good"));
    }

    #[test]
    fn test_matcher_empty_term_matches_everything() {
        let matcher = LineMatcher::new("");
        assert!(matcher.is_match(""));
        assert!(matcher.is_match("anything"));
    }

    #[test]
    fn test_matcher_non_ascii_simple_case() {
        let matcher = LineMatcher::new("ÉCHEC");
        assert!(matcher.is_match("connexion: échec"));

        let matcher = LineMatcher::new("σ");
        assert!(matcher.is_match("ΣΙΓΜΑ"));
    }

    #[test]
    fn test_matcher_does_not_expand_multi_char_uppercase() {
        let matcher = LineMatcher::new("ß");
        assert!(matcher.is_match("straße"));
        assert!(!matcher.is_match("STRASSE"));

        let matcher = LineMatcher::new("ss");
        assert!(!matcher.is_match("straße"));
    }

    #[test]
    fn test_fold_case_keeps_char_count() {
        let text = "straße ǅ ﬁ Ab";
        assert_eq!(fold_case(text).chars().count(), text.chars().count());
    }

    #[tokio::test]
    async fn test_search_fixture_file() {
        let matcher = LineMatcher::new("info");
        let matches = search_file(Path::new("fixtures/simple_append.log"), &matcher)
            .await
            .unwrap();

        assert_eq!(matches.len(), 6);
        assert!(matches.iter().all(|line| line.contains("INFO")));
    }

    #[tokio::test]
    async fn test_search_scenario() {
        let temp_file = TempLogFile::with_lines(&["a", "bb", "ccc", "d"]).unwrap();

        let matches = search_file(temp_file.path(), &LineMatcher::new("c")).await.unwrap();
        assert_eq!(matches, vec!["ccc"]);

        let matches = search_file(temp_file.path(), &LineMatcher::new("C")).await.unwrap();
        assert_eq!(matches, vec!["ccc"]);
    }

    #[tokio::test]
    async fn test_search_empty_term_equals_read_all() {
        let temp_file = TempLogFile::new().unwrap();
        temp_file
            .write_raw(b"\xEF\xBB\xBFone\r\n\r\ntwo\rthree\nfour")
            .unwrap();

        let all = read_lines(temp_file.path()).await.unwrap();
        let matches = search_file(temp_file.path(), &LineMatcher::new("")).await.unwrap();

        assert_eq!(all, vec!["one", "", "two", "three", "four"]);
        assert_eq!(matches, all);
    }

    #[tokio::test]
    async fn test_search_missing_file() {
        let matcher = LineMatcher::new("x");
        let result = search_file(Path::new("fixtures/nonexistent.log"), &matcher).await;
        assert!(matches!(result, Err(Error::Read { .. })));
    }
}
