use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use schema_graph::catalog::CatalogRow;
use schema_graph::graph::{to_json, ReferenceMatching, SchemaSnapshot};
use schema_graph::ui::{view_model, UiState};
use std::hint::black_box;

/// Chain of tables where each one references its predecessor and table_0
fn generate_rows(tables: usize, extra_columns: usize) -> Vec<CatalogRow> {
    let mut rows = Vec::new();

    for t in 0..tables {
        let name = format!("table_{}", t);
        rows.push(CatalogRow::new(&name, "id", "INTEGER", None));
        if t > 0 {
            rows.push(CatalogRow::new(
                &name,
                &format!("table_{}_id", t - 1),
                "INTEGER",
                None,
            ));
            rows.push(CatalogRow::new(&name, "table_0_id", "INTEGER", Some("root")));
        }
        for c in 0..extra_columns {
            rows.push(CatalogRow::new(
                &name,
                &format!("col_{}", c),
                "VARCHAR(255)",
                None,
            ));
        }
    }

    rows
}

fn bench_build_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_snapshot");

    for tables in [100, 1000, 5000] {
        let rows = generate_rows(tables, 8);
        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("from_rows", format!("{}_tables", tables)),
            &rows,
            |b, rows| {
                b.iter(|| {
                    let snapshot =
                        SchemaSnapshot::from_rows(rows.iter().cloned(), ReferenceMatching::Plural);
                    black_box(snapshot.dependency_count())
                })
            },
        );
    }

    group.finish();
}

fn bench_view_model(c: &mut Criterion) {
    let snapshot = SchemaSnapshot::from_rows(generate_rows(1000, 8), ReferenceMatching::Exact);
    let mut group = c.benchmark_group("view_model");

    let states = [
        ("unselected", UiState::default()),
        (
            "hub_selected",
            UiState {
                selection: Some("table_0".to_string()),
                ..Default::default()
            },
        ),
        (
            "filtered",
            UiState {
                selection: Some("table_500".to_string()),
                filter: "table_5".to_string(),
                ..Default::default()
            },
        ),
    ];

    for (label, state) in &states {
        group.bench_with_input(BenchmarkId::new("derive", label), state, |b, state| {
            b.iter(|| black_box(view_model(&snapshot, state)))
        });
    }

    group.finish();
}

fn bench_export_json(c: &mut Criterion) {
    let snapshot = SchemaSnapshot::from_rows(generate_rows(1000, 8), ReferenceMatching::Exact);
    c.bench_function("export_json_1000_tables", |b| {
        b.iter(|| black_box(to_json(&snapshot.view(""))))
    });
}

criterion_group!(
    benches,
    bench_build_snapshot,
    bench_view_model,
    bench_export_json
);
criterion_main!(benches);
