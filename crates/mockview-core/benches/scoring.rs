use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mockview_core::evaluator::{domain_relevance, response_quality, ScoringWeights};
use mockview_core::model::Domain;

const SHORT: &str = "I would use cross-validation.";

const LONG: &str = "To validate a machine learning model I first split the dataset into \
training, validation, and test partitions. I train on the training data and tune \
hyperparameters with cross-validation so that the algorithm does not overfit to a single \
split. I then compare precision, recall, and accuracy on the validation set, and look at \
the confusion matrix to understand which classes are confused. Feature engineering is \
revisited when the metrics plateau. Finally I report results on the untouched test set \
and monitor the deployed model for drift in production. Regression models get the same \
treatment with mean squared error instead of accuracy.";

fn bench_relevance(c: &mut Criterion) {
    let mut group = c.benchmark_group("domain_relevance");

    group.bench_function("short", |b| {
        b.iter(|| domain_relevance(black_box(SHORT), black_box(Domain::DataScience)))
    });

    group.bench_function("long", |b| {
        b.iter(|| domain_relevance(black_box(LONG), black_box(Domain::DataScience)))
    });

    group.finish();
}

fn bench_quality(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_quality");

    group.bench_function("short", |b| b.iter(|| response_quality(black_box(SHORT))));
    group.bench_function("long", |b| b.iter(|| response_quality(black_box(LONG))));

    group.finish();
}

fn bench_blend(c: &mut Criterion) {
    let weights = ScoringWeights::default();
    c.bench_function("blend", |b| {
        b.iter(|| weights.blend(black_box(0.72), black_box(0.6), black_box(0.45)))
    });
}

criterion_group!(benches, bench_relevance, bench_quality, bench_blend);
criterion_main!(benches);
