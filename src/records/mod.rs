//! Flat-file record store for the training dataset and the staging file.
//!
//! The training dataset is a tab-separated file with a `ReviewText\tLabel`
//! header. Labels may be written as `True`/`False` or as `1`/`0`; both
//! spellings can appear in the same file. The staging file holds one raw
//! review per line with no header.

use std::path::{Path, PathBuf};

use thiserror::Error;

mod staging;
mod training;

pub use staging::{load_staging_reviews, overwrite_staging_reviews};
pub use training::{
    TRAINING_HEADER, append_training_record, existing_texts, format_training_line,
    load_training_dataset, parse_training_line,
};

/// Errors raised while reading or writing review files.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A training line could not be split into text and label.
    #[error("Malformed record at {path}:{line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl RecordError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A single review with an optional sentiment label (`true` = positive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub text: String,
    pub label: Option<bool>,
}

impl ReviewRecord {
    /// Unlabeled review. Tabs and line breaks are folded into spaces so the
    /// text always serializes onto a single column of a single line.
    pub fn unlabeled(text: &str) -> Self {
        Self {
            text: normalize_text(text),
            label: None,
        }
    }

    /// Labeled review, normalized the same way as [`ReviewRecord::unlabeled`].
    pub fn labeled(text: &str, label: bool) -> Self {
        Self {
            text: normalize_text(text),
            label: Some(label),
        }
    }
}

/// Parse a label token. Accepts textual and numeric booleans.
pub fn parse_label(token: &str) -> Option<bool> {
    let token = token.trim();
    if token == "1" || token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token == "0" || token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Human-readable sentiment for a predicted label.
pub fn sentiment_name(label: bool) -> &'static str {
    if label { "Positive" } else { "Negative" }
}

/// Canonical form of a review text: trimmed, with tabs and line breaks as
/// spaces. Duplicate detection compares texts in this form.
pub fn normalize_text(text: &str) -> String {
    text.trim()
        .chars()
        .map(|ch| if matches!(ch, '\t' | '\r' | '\n') { ' ' } else { ch })
        .collect()
}

/// Read a whole file as text. Invalid UTF-8 is replaced with U+FFFD so one
/// bad byte does not make the rest of the file unreadable.
pub(crate) fn read_text_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            tracing::warn!(
                "{} is not valid UTF-8; invalid bytes replaced",
                path.display()
            );
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_label_accepts_mixed_encodings() {
        assert_eq!(parse_label("True"), Some(true));
        assert_eq!(parse_label("false"), Some(false));
        assert_eq!(parse_label("1"), Some(true));
        assert_eq!(parse_label(" 0 "), Some(false));
        assert_eq!(parse_label("2"), None);
        assert_eq!(parse_label("maybe"), None);
        assert_eq!(parse_label(""), None);
    }

    #[test]
    fn records_fold_tabs_and_newlines() {
        let record = ReviewRecord::labeled("  good\tvalue\r\nfor money ", true);
        assert_eq!(record.text, "good value  for money");
        assert_eq!(record.label, Some(true));
        assert_eq!(ReviewRecord::unlabeled("ok").label, None);
    }

    #[test]
    fn invalid_utf8_is_read_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bytes.tsv");
        std::fs::write(&path, b"caf\xe9 ok\nfine\n").unwrap();
        let text = read_text_lossy(&path).unwrap();
        assert_eq!(text, "caf\u{FFFD} ok\nfine\n");
    }
}
