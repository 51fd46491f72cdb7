// Registry lookups: cache hits versus first-time creation, across key counts.

use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pattern_catalog::diagnostics::{DiagnosticSink, Diagnostics, Record};
use pattern_catalog::FlyweightFactory;

struct Discard;

impl DiagnosticSink for Discard {
    fn emit(&self, record: Record) {
        black_box(record);
    }
}

fn lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("flyweight_lookup");

    for count in [10usize, 100, 1000].iter() {
        let keys: Vec<String> = (0..*count).map(|i| format!("state-{i}")).collect();

        group.bench_with_input(BenchmarkId::new("create", count), &keys, |b, keys| {
            b.iter(|| {
                let mut factory = FlyweightFactory::with_diagnostics(Diagnostics::new(Rc::new(Discard)));
                for key in keys {
                    black_box(factory.get_flyweight(key));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("reuse", count), &keys, |b, keys| {
            let mut factory = FlyweightFactory::with_diagnostics(Diagnostics::new(Rc::new(Discard)));
            for key in keys {
                factory.get_flyweight(key);
            }
            b.iter(|| {
                for key in keys {
                    black_box(factory.get_flyweight(key));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, lookup_benchmark);
criterion_main!(benches);
