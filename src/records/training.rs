use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use super::{RecordError, ReviewRecord, normalize_text, parse_label, read_text_lossy};

/// Header row of the training dataset.
pub const TRAINING_HEADER: &str = "ReviewText\tLabel";

/// Load every labeled record from the training dataset, in file order.
///
/// The first line is treated as the header and skipped. Blank lines are
/// ignored. Any other line without a tab-separated boolean label fails the
/// whole load.
pub fn load_training_dataset(path: &Path) -> Result<Vec<ReviewRecord>, RecordError> {
    let contents = read_text_lossy(path).map_err(|err| RecordError::io(path, err))?;
    let mut records = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if idx == 0 {
            check_header(path, line);
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let record = parse_training_line(line).map_err(|reason| RecordError::Malformed {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        })?;
        records.push(record);
    }
    tracing::info!(
        "Loaded {} training records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parse one `text\tlabel` data line.
pub fn parse_training_line(line: &str) -> Result<ReviewRecord, String> {
    let (text, label) = line
        .split_once('\t')
        .ok_or_else(|| "missing label column".to_string())?;
    let label =
        parse_label(label).ok_or_else(|| format!("label {:?} is not a boolean", label.trim()))?;
    Ok(ReviewRecord {
        text: text.to_string(),
        label: Some(label),
    })
}

/// Serialize a record as a training line (without the trailing newline).
///
/// Labels are written numerically; unlabeled records have no training form.
pub fn format_training_line(record: &ReviewRecord) -> Option<String> {
    let label = record.label?;
    Some(format!("{}\t{}", record.text, u8::from(label)))
}

/// Append one labeled line to the training dataset.
///
/// The file is created with a header if it does not exist yet. The handle is
/// dropped before returning, on success or failure.
pub fn append_training_record(path: &Path, text: &str, label: bool) -> Result<(), RecordError> {
    let record = ReviewRecord::labeled(text, label);
    let line = format_training_line(&record).unwrap_or_default();
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .map_err(|err| RecordError::io(path, err))?;
    let prefix = line_prefix(&mut file).map_err(|err| RecordError::io(path, err))?;
    let payload = format!("{prefix}{line}\n");
    file.write_all(payload.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|err| RecordError::io(path, err))?;
    tracing::info!("Appended {:?} with label {} to {}", record.text, label, path.display());
    Ok(())
}

/// Set of review texts already present in the training dataset.
///
/// Only the text column is read; labels are not validated here. Texts are
/// stored in [`normalize_text`] form. A missing file yields an empty set.
pub fn existing_texts(path: &Path) -> Result<HashSet<String>, RecordError> {
    let contents = match read_text_lossy(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(err) => return Err(RecordError::io(path, err)),
    };
    let mut texts = HashSet::new();
    for line in contents.lines().skip(1) {
        let text = line.split_once('\t').map_or(line, |(text, _)| text);
        let text = normalize_text(text);
        if !text.is_empty() {
            texts.insert(text);
        }
    }
    Ok(texts)
}

fn check_header(path: &Path, line: &str) {
    let mut columns = line.split('\t').map(str::trim);
    let matches = columns
        .next()
        .is_some_and(|col| col.eq_ignore_ascii_case("ReviewText"))
        && columns
            .next()
            .is_some_and(|col| col.eq_ignore_ascii_case("Label"));
    if !matches {
        tracing::warn!(
            "Unexpected header {:?} in {}; skipping it anyway",
            line,
            path.display()
        );
    }
}

// Header for a fresh file, or a newline if the last line was left unterminated.
fn line_prefix(file: &mut File) -> std::io::Result<String> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(format!("{TRAINING_HEADER}\n"));
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(if last[0] == b'\n' {
        String::new()
    } else {
        "\n".to_string()
    })
}
