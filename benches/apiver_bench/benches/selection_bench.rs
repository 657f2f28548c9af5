//! Version selection benchmarks
//!
//! Measures token parsing, candidate selection and full route resolution.
//!
//! Run with: cargo bench --package apiver-bench

use apiver::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn v(text: &str) -> ApiVersion {
    text.parse().unwrap()
}

/// An endpoint with `count` controllers, one per major version
fn endpoint_with_versions(count: u32) -> Endpoint {
    (1..=count).fold(Endpoint::new("api/orders"), |endpoint, major| {
        endpoint.candidates(
            ResourceConventions::new(format!("OrdersV{}", major))
                .has(ApiVersion::new(major, 0))
                .build(),
        )
    })
}

/// Benchmark version token parsing
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for token in ["1", "2.0", "1.0-beta", "2024-01-15", "2024-01-15.1.0-rc"] {
        group.bench_with_input(BenchmarkId::from_parameter(token), token, |b, token| {
            b.iter(|| ApiVersion::parse(black_box(token)))
        });
    }

    group.finish();
}

/// Benchmark selection against endpoints of growing size
fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    let selector = VersionSelector::default();

    for count in [2u32, 8, 32] {
        let endpoint = endpoint_with_versions(count);

        group.bench_with_input(BenchmarkId::new("explicit", count), &endpoint, |b, endpoint| {
            b.iter(|| selector.select(black_box(Some("2.0")), endpoint))
        });

        group.bench_with_input(BenchmarkId::new("unspecified", count), &endpoint, |b, endpoint| {
            b.iter(|| selector.select(black_box(None), endpoint))
        });

        group.bench_with_input(BenchmarkId::new("unsupported", count), &endpoint, |b, endpoint| {
            b.iter(|| selector.select(black_box(Some("99.0")), endpoint))
        });
    }

    group.finish();
}

/// Benchmark a full resolution including header rendering
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    let table = RouteTable::builder(VersioningOptions::default())
        .resource(
            "api/helloworld",
            ResourceConventions::new("HelloWorld")
                .has(v("1.0"))
                .has(v("2.0"))
                .action("Get", |a| a)
                .action("GetV2", |a| a.map_to(v("2.0"))),
        )
        .build();

    group.bench_function("resolve_and_headers", |b| {
        b.iter(|| {
            let resolution = table.resolve(black_box("/api/HelloWorld"), Some("2.0")).unwrap();
            let mut headers = HeaderMap::new();
            resolution.reported().apply(&mut headers);
            headers
        })
    });

    group.bench_function("error_payload", |b| {
        b.iter(|| {
            let resolution = table.resolve(black_box("api/helloworld"), Some("3.0")).unwrap();
            resolution.error().map(|err| err.to_json())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_select, bench_resolve);
criterion_main!(benches);
