use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sentirev::ml::features::TextFeaturizer;
use sentirev::ml::logreg::TrainOptions;
use sentirev::ml::pipeline::SentimentPipeline;

const REVIEW_COUNT: usize = 1_000;

const POSITIVE: &[&str] = &["great", "excellent", "love", "perfect", "works well"];
const NEGATIVE: &[&str] = &["terrible", "awful", "broke", "refund", "waste"];

fn reviews() -> Vec<(String, bool)> {
    (0..REVIEW_COUNT)
        .map(|i| {
            let positive = i % 2 == 0;
            let words = if positive { POSITIVE } else { NEGATIVE };
            let text = format!(
                "review {i}: {} and {} overall",
                words[i % words.len()],
                words[(i / 7) % words.len()]
            );
            (text, positive)
        })
        .collect()
}

fn bench_featurize(c: &mut Criterion) {
    let featurizer = TextFeaturizer::new(1 << 14, 2, 3);
    let data = reviews();
    c.bench_with_input(
        BenchmarkId::new("featurize", REVIEW_COUNT),
        &data,
        |b, data| {
            b.iter(|| {
                for (text, _) in data {
                    black_box(featurizer.transform(black_box(text)));
                }
            });
        },
    );
}

fn bench_fit(c: &mut Criterion) {
    let data = reviews();
    let options = TrainOptions {
        epochs: 10,
        ..TrainOptions::default()
    };
    c.bench_with_input(BenchmarkId::new("fit", REVIEW_COUNT), &data, |b, data| {
        b.iter(|| {
            SentimentPipeline::fit(
                data.iter().map(|(text, label)| (text.as_str(), *label)),
                TextFeaturizer::new(1 << 14, 2, 3),
                &options,
            )
            .expect("fit");
        });
    });
}

criterion_group!(benches, bench_featurize, bench_fit);
criterion_main!(benches);
