//! Buffer throughput benchmarks.
//!
//! Measures line writes, line reads, and the steady-state pattern where a
//! producer and a consumer share one buffer.

#![allow(missing_docs, clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use linebuf::core::Buffer;
use std::hint::black_box;

fn bench_write_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_line");

    for width in [16usize, 256, 4096] {
        let line = "x".repeat(width);
        group.throughput(Throughput::Bytes(((width + 1) * 1000) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &line, |b, line| {
            b.iter(|| {
                let mut buffer = Buffer::new();
                for _ in 0..1000 {
                    buffer.write_line(black_box(line)).unwrap();
                }
                black_box(buffer.size())
            });
        });
    }

    group.finish();
}

fn bench_read_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_line");

    let mut source = Buffer::new();
    for i in 0..10_000 {
        source.write_line(&format!("line {i} of the benchmark input")).unwrap();
    }
    group.throughput(Throughput::Bytes(source.size() as u64));

    group.bench_function("drain_10k", |b| {
        b.iter(|| {
            let mut buffer = source.clone();
            let mut total = 0;
            while !buffer.read_line().is_end_of_data() {
                total += 1;
            }
            black_box(total)
        });
    });

    group.finish();
}

fn bench_interleaved(c: &mut Criterion) {
    let mut group = c.benchmark_group("interleaved");

    // Consumed prefix gives growth something to slide away.
    group.bench_function("write2_read1", |b| {
        b.iter(|| {
            let mut buffer = Buffer::new();
            for i in 0..5000 {
                buffer.write_line("payload-a").unwrap();
                buffer.write_line("payload-b").unwrap();
                if i % 2 == 0 {
                    black_box(buffer.read_line().len());
                }
            }
            black_box(buffer.cap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_write_line, bench_read_line, bench_interleaved);
criterion_main!(benches);
