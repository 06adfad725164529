#![allow(dead_code)]

pub mod fake_model;
pub mod sentirev_env;

use std::path::{Path, PathBuf};

use sentirev::records::TRAINING_HEADER;

/// Write a training dataset with the standard header and the given rows.
pub fn write_training(dir: &Path, rows: &[(&str, &str)]) -> PathBuf {
    let path = dir.join("Reviews.tsv");
    let mut contents = format!("{TRAINING_HEADER}\n");
    for (text, label) in rows {
        contents.push_str(&format!("{text}\t{label}\n"));
    }
    std::fs::write(&path, contents).expect("write training data");
    path
}

/// Write the staging file, one review per line.
pub fn write_staging(dir: &Path, reviews: &[&str]) -> PathBuf {
    let path = dir.join("NewReviews.tsv");
    let mut contents = String::new();
    for review in reviews {
        contents.push_str(review);
        contents.push('\n');
    }
    std::fs::write(&path, contents).expect("write staging data");
    path
}

pub fn line_count(path: &Path) -> usize {
    std::fs::read_to_string(path)
        .expect("read file")
        .lines()
        .count()
}

pub fn output_text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).expect("utf8 console output")
}
