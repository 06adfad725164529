use rand::rngs::StdRng;
use rand::{SeedableRng, seq::SliceRandom};

use super::BinaryLogReg;
use super::sigmoid;
use crate::ml::features::SparseVector;

/// Training options for the binary logistic regression stage.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub epochs: usize,
    pub learning_rate: f32,
    pub l2: f32,
    pub batch_size: usize,
    pub seed: u64,
    pub balance_classes: bool,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 40,
            learning_rate: 0.5,
            l2: 1e-4,
            batch_size: 32,
            seed: 42,
            balance_classes: true,
        }
    }
}

/// In-memory featurized training set.
#[derive(Debug, Clone)]
pub struct TrainDataset {
    pub dim: usize,
    pub x: Vec<SparseVector>,
    pub y: Vec<bool>,
}

/// Fit a [`BinaryLogReg`] with seeded mini-batch SGD on the full dataset.
pub fn train_logreg(
    dataset: &TrainDataset,
    options: &TrainOptions,
) -> Result<BinaryLogReg, String> {
    if dataset.x.is_empty() || dataset.y.is_empty() {
        return Err("Empty training set".to_string());
    }
    if dataset.x.len() != dataset.y.len() {
        return Err("Mismatched training inputs/labels".to_string());
    }
    if dataset.dim == 0 {
        return Err("Zero feature dimensions".to_string());
    }
    let dim = dataset.dim;
    if dataset
        .x
        .iter()
        .flatten()
        .any(|&(idx, _)| idx as usize >= dim)
    {
        return Err("Feature index out of range".to_string());
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut weights = vec![0.0f32; dim];
    let mut bias = 0.0f32;

    let mut indices: Vec<usize> = (0..dataset.x.len()).collect();
    let batch_size = options.batch_size.max(1);
    let lr = options.learning_rate;
    let l2 = options.l2.max(0.0);
    let class_weights = class_weights(&dataset.y, options.balance_classes);

    let mut grad_w = vec![0.0f32; dim];
    let mut touched: Vec<usize> = Vec::new();
    for _epoch in 0..options.epochs {
        indices.shuffle(&mut rng);
        for chunk in indices.chunks(batch_size) {
            let mut grad_b = 0.0f32;
            let mut batch_weight = 0.0f32;
            for &idx in chunk {
                let x = &dataset.x[idx];
                let y = dataset.y[idx];
                let weight = class_weights[usize::from(y)];
                if weight == 0.0 {
                    continue;
                }
                let margin = x
                    .iter()
                    .map(|&(i, v)| weights[i as usize] * v)
                    .sum::<f32>()
                    + bias;
                let diff = (sigmoid(margin) - if y { 1.0 } else { 0.0 }) * weight;
                for &(i, v) in x {
                    let i = i as usize;
                    if grad_w[i] == 0.0 {
                        touched.push(i);
                    }
                    grad_w[i] += diff * v;
                }
                grad_b += diff;
                batch_weight += weight;
            }
            if batch_weight == 0.0 {
                continue;
            }
            let inv = 1.0 / batch_weight;
            if l2 > 0.0 {
                let decay = 1.0 - lr * l2;
                for w in &mut weights {
                    *w *= decay;
                }
            }
            for &i in &touched {
                weights[i] -= lr * grad_w[i] * inv;
                grad_w[i] = 0.0;
            }
            touched.clear();
            bias -= lr * grad_b * inv;
        }
    }

    let model = BinaryLogReg { dim, weights, bias };
    model.validate()?;
    Ok(model)
}

// Indexed by `usize::from(label)`.
fn class_weights(labels: &[bool], balance: bool) -> [f32; 2] {
    if !balance {
        return [1.0, 1.0];
    }
    let positives = labels.iter().filter(|&&y| y).count() as f32;
    let negatives = labels.len() as f32 - positives;
    let total = labels.len() as f32;
    let weight = |count: f32| if count == 0.0 { 0.0 } else { total / (2.0 * count) };
    [weight(negatives), weight(positives)]
}
