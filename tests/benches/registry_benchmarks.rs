//! # Custody Registry Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | custody-cycle | One ship + receive hop on a single product |
//! | custody-parallel | Independent products driven from several threads |
//! | custody-wire | Decode, dispatch and encode of a JSON request |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use custody_registry::{CustodyRegistryApi, ManufacturerEnrollment, RegistryRequest};
use custody_tests::fixtures::{TestRegistry, ADMIN, MAKER, RETAILER};
use rand::Rng;
use shared_types::{AccountId, AuthenticatedRequest, ProductCode};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn seeded() -> TestRegistry {
    let net = TestRegistry::new();
    net.registry
        .enroll_manufacturer(
            ADMIN,
            ManufacturerEnrollment::new(MAKER, "321", "NewCompany LLC", Duration::from_secs(3600)),
        )
        .unwrap();
    net
}

fn bench_custody_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("custody-cycle");
    let net = seeded();
    let item = ProductCode::new("112257").unwrap();
    net.registry.enroll_product(MAKER, item.clone()).unwrap();

    // Each iteration hands the item over and back so it ends where it began.
    group.bench_function("ship_receive_round_trip", |b| {
        b.iter(|| {
            net.registry.ship_product(MAKER, &item, RETAILER).unwrap();
            net.registry.receive_product(RETAILER, &item).unwrap();
            net.registry.ship_product(RETAILER, &item, MAKER).unwrap();
            black_box(net.registry.receive_product(MAKER, &item).unwrap());
        })
    });

    group.bench_function("get_product_status", |b| {
        b.iter(|| black_box(net.registry.get_product_status(&item).unwrap()))
    });

    group.finish();
}

fn bench_parallel_products(c: &mut Criterion) {
    let mut group = c.benchmark_group("custody-parallel");
    group.measurement_time(Duration::from_secs(10));

    for threads in [1usize, 4, 8] {
        let net = seeded();
        let registry = Arc::clone(&net.registry);
        let items: Vec<_> = (0..threads)
            .map(|i| {
                let item = ProductCode::new(format!("{}", 500 + i)).unwrap();
                registry.enroll_product(MAKER, item.clone()).unwrap();
                item
            })
            .collect();

        group.throughput(Throughput::Elements(threads as u64));
        group.bench_with_input(BenchmarkId::new("hops", threads), &items, |b, items| {
            b.iter(|| {
                let handles: Vec<_> = items
                    .iter()
                    .cloned()
                    .map(|item| {
                        let registry = Arc::clone(&registry);
                        thread::spawn(move || {
                            registry.ship_product(MAKER, &item, RETAILER).unwrap();
                            registry.receive_product(RETAILER, &item).unwrap();
                            registry.ship_product(RETAILER, &item, MAKER).unwrap();
                            registry.receive_product(MAKER, &item).unwrap();
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            })
        });
    }

    group.finish();
}

fn bench_wire_requests(c: &mut Criterion) {
    let mut group = c.benchmark_group("custody-wire");
    let net = seeded();
    let mut rng = rand::thread_rng();
    let codes: Vec<String> = (0..64).map(|_| rng.gen_range(1..1_000_000u64).to_string()).collect();
    for code in &codes {
        // Random codes may repeat; duplicates are rejected and ignored here.
        let _ = net
            .registry
            .enroll_product(MAKER, ProductCode::new(code.as_str()).unwrap());
    }

    let queries: Vec<String> = codes
        .iter()
        .map(|code| {
            let request = AuthenticatedRequest::new(
                AccountId::repeat_byte(0x33),
                RegistryRequest::GetProduct {
                    product_code: code.clone(),
                },
            );
            serde_json::to_string(&request).unwrap()
        })
        .collect();

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("handle_json_get_product", |b| {
        b.iter(|| {
            for raw in &queries {
                black_box(net.handler.handle_json(raw).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_custody_cycle,
    bench_parallel_products,
    bench_wire_requests,
);
criterion_main!(benches);
