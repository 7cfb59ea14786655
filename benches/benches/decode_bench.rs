use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gt3x_benchmark::{random_bytes, synthetic_log};
use gt3x_core::{decode, unpack_uint12};

fn bench_unpack(c: &mut Criterion) {
    let mut group = c.benchmark_group("unpack_uint12");

    for size in [3 * 1024, 3 * 64 * 1024, 3 * 1024 * 1024] {
        let buf = random_bytes(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &buf, |b, buf| {
            b.iter(|| unpack_uint12(black_box(buf)))
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let info = "Sample Rate: 30\r\nAcceleration Scale: 256.0\r\n";
    // Сутки записи
    let raw = synthetic_log(86_400);

    let mut group = c.benchmark_group("decode");
    group.sample_size(10);
    group.throughput(Throughput::Bytes(raw.len() as u64));
    group.bench_function("one_day_30hz", |b| {
        b.iter(|| decode(black_box(info), black_box(&raw)))
    });
    group.finish();
}

criterion_group!(benches, bench_unpack, bench_decode);
criterion_main!(benches);
