use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use music_buffer::simd::transpose;

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");
    for &len in &[64_usize, 1024, 65536] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut pitches: Vec<i32> = (0..len as i32).map(|i| 60 + (i % 24)).collect();
            b.iter(|| {
                transpose(black_box(&mut pitches), 1);
            });
        });
    }
    group.finish();
}

criterion_group!(transpose_benches, bench_transpose);
criterion_main!(transpose_benches);
