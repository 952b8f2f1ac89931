use core::str::FromStr;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scaled_decimal64::{Decimal, ScaleMetrics, F2, F8};
use std::hint::black_box;

fn mk_data<S: ScaleMetrics>() -> (Vec<Decimal<S>>, Vec<Decimal<S>>) {
    // 1024 deterministic values: 0.00..10.23 for F2 (or scaled equivalents)
    let mut pos = Vec::with_capacity(1024);
    for i in 0..1024u32 {
        let s = format!("{}.{:02}", i / 100, i % 100);
        pos.push(Decimal::<S>::from_str(&s).unwrap());
    }
    let neg = pos.iter().map(|x| x.negated()).collect();
    (pos, neg)
}

fn bench_add_sub<S: ScaleMetrics>(c: &mut Criterion, label: &str) {
    let (pos, neg) = mk_data::<S>();
    let mut g = c.benchmark_group(format!("add_sub_{label}"));
    g.throughput(Throughput::Elements(pos.len() as u64));

    g.bench_with_input(BenchmarkId::new("add_same_sign", label), &pos, |b, data| {
        b.iter(|| {
            let mut acc = Decimal::<S>::ZERO;
            for x in data.iter() {
                acc = black_box(acc) + black_box(*x);
            }
            black_box(acc)
        })
    });

    g.bench_with_input(
        BenchmarkId::new("add_opposite_sign", label),
        &(pos.as_slice(), neg.as_slice()),
        |b, (p, n)| {
            b.iter(|| {
                let mut acc = Decimal::<S>::ZERO;
                for i in 0..p.len() {
                    acc = black_box(acc) + black_box(p[i]) + black_box(n[i]);
                }
                black_box(acc)
            })
        },
    );

    g.bench_with_input(BenchmarkId::new("sub", label), &pos, |b, data| {
        b.iter(|| {
            let mut acc = Decimal::<S>::ZERO;
            for x in data.iter() {
                acc = black_box(acc) - black_box(*x);
            }
            black_box(acc)
        })
    });

    g.finish();
}

fn add_sub_benches(c: &mut Criterion) {
    bench_add_sub::<F2>(c, "F2");
    bench_add_sub::<F8>(c, "F8");
}

criterion_group!(benches, add_sub_benches);
criterion_main!(benches);
