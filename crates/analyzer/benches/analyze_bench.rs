use analyzer::{analyze, compute_fingerprint, compute_statistics};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn sample(size: usize) -> String {
    let paragraph = "Plain words, a comma; some punctuation! And (brackets) too.\n\n";
    paragraph.repeat(size / paragraph.len() + 1)
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for size in [64, 512, 4096, 32768].iter() {
        let text = sample(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("statistics_{size}"), |b| {
            b.iter(|| compute_statistics(black_box(&text)))
        });
        group.bench_function(format!("fingerprint_{size}"), |b| {
            b.iter(|| compute_fingerprint(black_box(&text)))
        });
        group.bench_function(format!("both_{size}"), |b| {
            b.iter(|| analyze(black_box(&text)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
