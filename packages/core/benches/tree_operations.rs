//! Benchmarks for the interactive tree operations
//!
//! Run with: `cargo bench -p orgchart-core`
//!
//! Aggregation runs on every render and hover, so it must stay well inside
//! a frame budget on charts of a few thousand nodes. The other operations
//! run once per edit or keystroke.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orgchart_core::models::{NewNode, NodeUpdate};
use orgchart_core::services::normalizer::normalize;
use orgchart_core::services::search::filter_tree;
use orgchart_core::services::statistics::aggregate;
use orgchart_core::services::validator::{validate, ValidationLimits};
use orgchart_core::OrgDocument;
use serde_json::{json, Value};

const EMPLOYMENT: [&str; 6] = [
    "military",
    "official",
    "contractor",
    "retired",
    "retired-military",
    "employee",
];

/// Raw chart with `fan_out` children per node, `depth` levels below the root.
fn generate_chart(fan_out: usize, depth: usize, prefix: &str, counter: &mut usize) -> Value {
    *counter += 1;
    let n = *counter;
    let children: Vec<Value> = if depth == 0 {
        Vec::new()
    } else {
        (0..fan_out)
            .map(|i| generate_chart(fan_out, depth - 1, &format!("{}-{}", prefix, i), counter))
            .collect()
    };
    let name = (n % 3 == 0).then(|| format!("Person {}", n));
    json!({
        "label": format!("Unit {}", prefix),
        "name": name,
        "employmentType": EMPLOYMENT[n % EMPLOYMENT.len()],
        "children": children
    })
}

/// 1 + 6 + 36 + 216 + 1296 = 1555 nodes
fn large_chart() -> Value {
    let mut counter = 0;
    generate_chart(6, 4, "0", &mut counter)
}

fn bench_read_paths(c: &mut Criterion) {
    let raw = large_chart();
    let root = normalize(&raw, None).unwrap();

    c.bench_function("normalize_1555_nodes", |b| {
        b.iter(|| normalize(black_box(&raw), None))
    });

    c.bench_function("aggregate_1555_nodes", |b| {
        b.iter(|| aggregate(black_box(&root)))
    });

    c.bench_function("filter_tree_1555_nodes", |b| {
        b.iter(|| filter_tree(black_box(&root), "unit 0-3-2"))
    });

    c.bench_function("validate_1555_nodes", |b| {
        b.iter(|| validate(black_box(&raw), &ValidationLimits::default()))
    });
}

fn bench_mutations(c: &mut Criterion) {
    let doc = OrgDocument::from_json(&large_chart()).unwrap();
    let parent = doc.list_at_level(3)[0].id.clone();
    let target = doc.list_at_level(2)[5].id.clone();

    c.bench_function("insert_1555_nodes", |b| {
        b.iter(|| doc.insert(black_box(&parent), NewNode::new("Bench Unit")))
    });

    c.bench_function("update_1555_nodes", |b| {
        let patch = NodeUpdate::new().with_name("Bench Person");
        b.iter(|| doc.update(black_box(&target), &patch))
    });

    c.bench_function("delete_1555_nodes", |b| {
        b.iter(|| doc.delete(black_box(&target)))
    });
}

criterion_group!(benches, bench_read_paths, bench_mutations);
criterion_main!(benches);
