//! Benchmarks do scorer de credibilidade.
//!
//! Testa performance de:
//! - Scoring de URL individual por faixa de credibilidade
//! - Scoring em batch de um mix realista de URLs
//!
//! Executar: `cargo bench --bench scorer_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use cred_checker::credibility::score_url;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// HELPERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn create_test_urls() -> Vec<String> {
    vec![
        "https://arxiv.org/abs/2301.00001".to_string(),
        "https://www.nature.com/articles/s41586-023-0001".to_string(),
        "https://mit.edu/research/ai/paper.pdf".to_string(),
        "https://springer.com/journal/11229".to_string(),
        "https://dx.doi.org/10.1000/182".to_string(),
        "https://who.int/publications/report".to_string(),
        "https://medium.com/@user/ml-article".to_string(),
        "https://reddit.com/r/MachineLearning".to_string(),
        "https://random-blog.com/ml-tutorial".to_string(),
        "https://example.com/about".to_string(),
    ]
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK: Scoring Individual
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn bench_score_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_single");

    group.bench_function("tier1_url", |bencher| {
        bencher.iter(|| black_box(score_url("https://arxiv.org/abs/2301.00001")))
    });

    group.bench_function("low_credibility_url", |bencher| {
        bencher.iter(|| black_box(score_url("https://medium.com/@user/ml-article")))
    });

    group.bench_function("plain_url", |bencher| {
        bencher.iter(|| black_box(score_url("https://example.com/about")))
    });

    group.bench_function("unparsable_url", |bencher| {
        bencher.iter(|| black_box(score_url("not a url")))
    });

    group.finish();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK: Scoring em Batch
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn bench_score_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_batch");
    let urls = create_test_urls();

    group.throughput(Throughput::Elements(urls.len() as u64));
    group.bench_function("mixed_10_urls", |bencher| {
        bencher.iter(|| {
            let results: Vec<_> = urls.iter().map(|url| score_url(url)).collect();
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_score_single, bench_score_batch);
criterion_main!(benches);
