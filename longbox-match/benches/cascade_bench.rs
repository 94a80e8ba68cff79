//! Cascade throughput over a synthetic name pool.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use longbox_match::{match_cascade, CascadeConfig, Normalizer};

fn synthetic_pool(size: usize) -> Vec<String> {
    let stems = [
        "Amazing Spider-Man",
        "Fantastic Four",
        "Uncanny X-Men",
        "Avengers",
        "Detective Comics",
        "Saga of the Swamp Thing",
    ];
    (0..size)
        .map(|i| format!("{} #{}", stems[i % stems.len()], i))
        .collect()
}

fn bench_cascade(c: &mut Criterion) {
    let normalizer = Normalizer::default();
    let pool = synthetic_pool(1000);
    let names: Vec<&str> = pool.iter().map(String::as_str).collect();

    c.bench_function("cascade_exact_hit", |b| {
        let config = CascadeConfig::default();
        b.iter(|| {
            match_cascade(
                black_box("Amazing Spider-Man #0"),
                names.iter().copied(),
                &config,
                &normalizer,
            )
        })
    });

    c.bench_function("cascade_full_escalation", |b| {
        // A typo that survives to the edit-distance tier.
        let config = CascadeConfig::default();
        b.iter(|| {
            match_cascade(
                black_box("Amzaing Spiderman"),
                names.iter().copied(),
                &config,
                &normalizer,
            )
        })
    });
}

criterion_group!(benches, bench_cascade);
criterion_main!(benches);
