//! Hashed bag-of-n-grams text featurizer.
//!
//! Word n-grams and character n-grams are hashed with blake3 into a fixed
//! number of buckets, then the count vector is L2-normalized. Hashing keeps
//! the artifact free of a vocabulary and makes bucket assignment stable
//! across runs and platforms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sparse feature vector as `(bucket, value)` pairs sorted by bucket.
pub type SparseVector = Vec<(u32, f32)>;

/// Serializable featurizer settings; the same instance is used for fit and predict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFeaturizer {
    pub dimensions: usize,
    pub word_ngrams: usize,
    pub char_ngrams: usize,
}

impl TextFeaturizer {
    pub fn new(dimensions: usize, word_ngrams: usize, char_ngrams: usize) -> Self {
        Self {
            dimensions,
            word_ngrams,
            char_ngrams,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.dimensions == 0 || self.dimensions > u32::MAX as usize {
            return Err(format!("invalid feature dimensions {}", self.dimensions));
        }
        if self.word_ngrams == 0 && self.char_ngrams == 0 {
            return Err("featurizer emits no n-grams".to_string());
        }
        Ok(())
    }

    /// Map `text` to an L2-normalized sparse vector. Empty text maps to an
    /// empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let lowered = text.to_lowercase();
        let mut counts: BTreeMap<u32, f32> = BTreeMap::new();

        let words = tokenize(&lowered);
        for n in 1..=self.word_ngrams {
            for gram in words.windows(n) {
                let key = format!("w{n}:{}", gram.join(" "));
                *counts.entry(self.bucket(&key)).or_insert(0.0) += 1.0;
            }
        }

        if self.char_ngrams > 0 && !words.is_empty() {
            let padded: Vec<char> = format!(" {} ", words.join(" ")).chars().collect();
            for gram in padded.windows(self.char_ngrams) {
                let key = format!("c:{}", gram.iter().collect::<String>());
                *counts.entry(self.bucket(&key)).or_insert(0.0) += 1.0;
            }
        }

        let norm = counts.values().map(|v| v * v).sum::<f32>().sqrt();
        if norm == 0.0 {
            return Vec::new();
        }
        counts.into_iter().map(|(idx, v)| (idx, v / norm)).collect()
    }

    fn bucket(&self, key: &str) -> u32 {
        let hash = blake3::hash(key.as_bytes());
        let bytes = hash.as_bytes();
        let raw = u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]);
        (raw % self.dimensions as u64) as u32
    }
}

/// Lower-cased alphanumeric word runs; apostrophes stay inside words.
fn tokenize(lowered: &str) -> Vec<&str> {
    lowered
        .split(|ch: char| !(ch.is_alphanumeric() || ch == '\''))
        .map(|token| token.trim_matches('\''))
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn featurizer() -> TextFeaturizer {
        TextFeaturizer::new(1 << 12, 2, 3)
    }

    #[test]
    fn tokenize_splits_on_punctuation_and_keeps_apostrophes() {
        assert_eq!(
            tokenize("don't buy, it's 'bad'!!"),
            vec!["don't", "buy", "it's", "bad"]
        );
    }

    #[test]
    fn vectors_are_unit_length_and_sorted() {
        let vector = featurizer().transform("Great product, would buy again");
        assert!(!vector.is_empty());
        let norm: f32 = vector.iter().map(|(_, v)| v * v).sum();
        assert!((norm - 1.0).abs() < 1e-5);
        assert!(vector.windows(2).all(|pair| pair[0].0 < pair[1].0));
        assert!(vector.iter().all(|(idx, _)| (*idx as usize) < 1 << 12));
    }

    #[test]
    fn transform_is_case_insensitive_and_deterministic() {
        let f = featurizer();
        assert_eq!(f.transform("Terrible SERVICE"), f.transform("terrible service"));
        assert_eq!(f.transform("terrible service"), f.transform("terrible service"));
    }

    #[test]
    fn blank_text_has_no_features() {
        assert!(featurizer().transform("   ...  ").is_empty());
    }

    #[test]
    fn validate_rejects_degenerate_settings() {
        assert!(TextFeaturizer::new(0, 1, 3).validate().is_err());
        assert!(TextFeaturizer::new(16, 0, 0).validate().is_err());
        assert!(featurizer().validate().is_ok());
    }
}
