//! Criterion benchmarks for rust_level_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_level_logger::prelude::*;
use std::sync::Arc;
use std::thread;

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_filtered(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::new(std::io::sink(), "", LogFlags::STD);

    group.bench_function("debug_values", |b| {
        b.iter(|| {
            logger.debug(&[&black_box("Debug message"), &black_box(42)]);
        });
    });

    group.bench_function("debug_formatted", |b| {
        b.iter(|| {
            logger.debugf(format_args!("Debug message {}", black_box(42)));
        });
    });

    group.finish();
}

// ============================================================================
// Admitted Line Benchmarks
// ============================================================================

fn bench_admitted(c: &mut Criterion) {
    let mut group = c.benchmark_group("admitted");
    group.throughput(Throughput::Elements(1));

    let cases = [
        ("level_only", LogFlags::NONE),
        ("datetime", LogFlags::DATETIME),
        ("file", LogFlags::FILE),
        ("std", LogFlags::STD),
        ("std_micros", LogFlags::STD | LogFlags::MICROSECONDS),
    ];

    for (name, flags) in cases {
        let logger = Logger::new(std::io::sink(), "bench: ", flags);
        group.bench_function(name, |b| {
            b.iter(|| {
                logger.infof(format_args!("request {} took {}ms", black_box(7), black_box(12)));
            });
        });
    }

    group.finish();
}

// ============================================================================
// Contention Benchmarks
// ============================================================================

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");
    const THREADS: usize = 4;
    const LINES: usize = 250;
    group.throughput(Throughput::Elements((THREADS * LINES) as u64));

    group.bench_function("4_threads", |b| {
        let logger = Arc::new(Logger::new(std::io::sink(), "", LogFlags::STD));
        b.iter(|| {
            let handles: Vec<_> = (0..THREADS)
                .map(|t| {
                    let logger = Arc::clone(&logger);
                    thread::spawn(move || {
                        for i in 0..LINES {
                            logger.info(&[&"worker", &t, &i]);
                        }
                    })
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_filtered, bench_admitted, bench_contention);
criterion_main!(benches);
