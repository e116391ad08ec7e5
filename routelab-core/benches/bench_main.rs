use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use routelab_core::{
    Algorithm, EngineConfig, RouteNodeId, algo::complexity::synthetic_route, build_route_graph,
    routing::RouteRequest,
};

fn search_benchmark(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("search");

    for size in [50, 120, 500] {
        let points = synthetic_route(size);
        for algorithm in Algorithm::ALL {
            let family = algorithm.family();
            let graph = build_route_graph(&points, family, config.shortcuts.policy(family)).unwrap();
            let goal = RouteNodeId::new(size - 1);

            group.bench_with_input(BenchmarkId::new(algorithm.name(), size), &graph, |b, graph| {
                b.iter(|| algorithm.search(black_box(graph), RouteNodeId::new(0), goal));
            });
        }
    }
    group.finish();
}

fn pipeline_benchmark(c: &mut Criterion) {
    let request = RouteRequest::new(synthetic_route(2_000)).with_route_stats(150_000.0, 7_200.0);
    let config = EngineConfig::default();

    c.bench_function("compare_algorithms 2000 points", |b| {
        b.iter(|| routelab_core::compare_algorithms(black_box(&request), &config));
    });
}

criterion_group!(benches, search_benchmark, pipeline_benchmark);
criterion_main!(benches);
