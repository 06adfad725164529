//! Binary logistic regression over sparse text features.

use serde::{Deserialize, Serialize};

use super::features::SparseVector;

mod train;
pub use train::{TrainDataset, TrainOptions, train_logreg};

/// Fitted weights for `p(positive) = sigmoid(w·x + b)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryLogReg {
    pub dim: usize,
    pub weights: Vec<f32>,
    pub bias: f32,
}

impl BinaryLogReg {
    /// Untrained classifier with zero weights (always predicts positive at p = 0.5).
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            weights: vec![0.0; dim],
            bias: 0.0,
        }
    }

    /// Validate the model dimensions and parameter values.
    pub fn validate(&self) -> Result<(), String> {
        if self.dim == 0 {
            return Err("classifier has zero dimensions".to_string());
        }
        if self.weights.len() != self.dim {
            return Err(format!(
                "weights length {} does not match dim {}",
                self.weights.len(),
                self.dim
            ));
        }
        if !self.bias.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err("classifier parameters must be finite".to_string());
        }
        Ok(())
    }

    /// Raw margin `w·x + b`. Buckets outside the weight range are ignored.
    pub fn decision(&self, features: &SparseVector) -> f32 {
        features
            .iter()
            .filter_map(|&(idx, value)| self.weights.get(idx as usize).map(|w| w * value))
            .sum::<f32>()
            + self.bias
    }

    /// Positive when the margin is non-negative (`p >= 0.5`).
    pub fn predict(&self, features: &SparseVector) -> bool {
        self.decision(features) >= 0.0
    }
}

pub(crate) fn sigmoid(z: f32) -> f32 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_model_validates_and_sits_on_the_boundary() {
        let model = BinaryLogReg::zeros(8);
        model.validate().unwrap();
        let x = vec![(1, 0.6), (3, 0.8)];
        assert_eq!(model.decision(&x), 0.0);
        assert!((sigmoid(model.decision(&x)) - 0.5).abs() < 1e-6);
        assert!(model.predict(&x));
    }

    #[test]
    fn decision_ignores_out_of_range_buckets() {
        let mut model = BinaryLogReg::zeros(2);
        model.weights = vec![1.0, -2.0];
        model.bias = 0.25;
        let x = vec![(0, 1.0), (1, 0.5), (9, 100.0)];
        assert!((model.decision(&x) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn validate_rejects_mismatched_or_nan_weights() {
        let mut model = BinaryLogReg::zeros(4);
        model.weights.pop();
        assert!(model.validate().is_err());
        let mut model = BinaryLogReg::zeros(4);
        model.bias = f32::NAN;
        assert!(model.validate().is_err());
    }

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(1_000.0) <= 1.0);
        assert!(sigmoid(-1_000.0) >= 0.0);
        assert!(sigmoid(-1_000.0).is_finite());
    }
}
