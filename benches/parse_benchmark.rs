use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gocad_qc::{KeywordConfig, MeshDocument, analyze_text};
use std::hint::black_box;
use std::path::Path;

/// Generate a gridded TSurf with `side * side` vertices
fn generate_surface(side: usize) -> String {
    let mut text = String::from("GOCAD TSurf 1\nHEADER {\nname:SRF_0001_001\n}\nTFACE\n");

    for j in 0..side {
        for i in 0..side {
            let id = j * side + i + 1;
            let z = ((i * 7 + j * 13) % 50) as f64 * -1.5;
            text.push_str(&format!("VRTX {} {} {} {}\n", id, i * 10, j * 10, z));
        }
    }

    for j in 0..side - 1 {
        for i in 0..side - 1 {
            let a = j * side + i + 1;
            let b = a + 1;
            let c = a + side;
            let d = c + 1;
            text.push_str(&format!("TRGL {} {} {}\n", a, b, c));
            text.push_str(&format!("TRGL {} {} {}\n", b, d, c));
        }
    }

    text.push_str("END\n");
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for side in [10, 50, 200] {
        let text = generate_surface(side);
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &text, |b, text| {
            b.iter(|| MeshDocument::parse(black_box(text)));
        });
    }

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let config = KeywordConfig::default();

    for side in [10, 50, 200] {
        let text = generate_surface(side);
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &text, |b, text| {
            b.iter(|| {
                analyze_text(
                    black_box(text),
                    Path::new("surface.ts"),
                    &config,
                    None,
                    None,
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_analyze);
criterion_main!(benches);
