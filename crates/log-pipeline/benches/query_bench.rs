//! 조회/집계 벤치마크
//!
//! 10,000개 레코드 저장소에 대한 검색과 대시보드 집계 성능을 측정합니다.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geolog_log_pipeline::{LogPipelineBuilder, RecordStore, SearchQuery};

fn build_store(size: usize) -> RecordStore {
    let lines = (0..size).map(|i| match i % 4 {
        0 => format!(
            r#"{{"level":"info","logger":"GeocodingAPI","message":"Geocoding successful | geocode_time_ms:{} response_time_ms:{}"}}"#,
            i % 900,
            i % 1500
        ),
        1 => format!(
            r#"{{"level":"error","logger":"GeocodingAPI","message":"Geocoding failed | address:addr_{}"}}"#,
            i
        ),
        2 => format!(
            r#"{{"level":"warn","logger":"HttpServer","message":"HTTP request slow | response_time_ms:{}"}}"#,
            i % 3000
        ),
        _ => format!("unstructured line {}", i),
    });

    let pipeline = LogPipelineBuilder::new().build().unwrap();
    let (store, _) = pipeline.ingest_lines(lines).unwrap();
    store
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for size in [1_000usize, 10_000] {
        let store = build_store(size);
        let query = SearchQuery::new().text("geocoding").level("error");

        group.bench_with_input(BenchmarkId::new("search", size), &store, |b, store| {
            b.iter(|| store.query().search(black_box(&query)).len())
        });
        group.bench_with_input(
            BenchmarkId::new("performance_summary", size),
            &store,
            |b, store| b.iter(|| store.query().performance_summary()),
        );
        group.bench_with_input(BenchmarkId::new("dashboard", size), &store, |b, store| {
            b.iter(|| store.query().dashboard())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
