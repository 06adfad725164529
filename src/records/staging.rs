use std::path::Path;

use super::{RecordError, read_text_lossy};

/// Read the staging file, one raw review per line.
///
/// A missing file is an empty staging set.
pub fn load_staging_reviews(path: &Path) -> Result<Vec<String>, RecordError> {
    let contents = match read_text_lossy(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No staging file at {}", path.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(RecordError::io(path, err)),
    };
    Ok(contents
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect())
}

/// Replace the staging file with `reviews`, one per line.
///
/// An empty slice truncates the file to zero bytes.
pub fn overwrite_staging_reviews<S: AsRef<str>>(
    path: &Path,
    reviews: &[S],
) -> Result<(), RecordError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| RecordError::io(parent, err))?;
    }
    let mut contents = String::new();
    for review in reviews {
        contents.push_str(review.as_ref());
        contents.push('\n');
    }
    std::fs::write(path, contents).map_err(|err| RecordError::io(path, err))?;
    tracing::info!("Wrote {} staged reviews to {}", reviews.len(), path.display());
    Ok(())
}
