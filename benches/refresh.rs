//! Benchmarks for the refresh cycle.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mdsplit::document::{DocumentState, TextStats, WELCOME_DOCUMENT};
use mdsplit::render::Renderer;
use mdsplit::sync::SyncPipeline;

fn long_document() -> String {
    let mut md = String::from(WELCOME_DOCUMENT);
    for i in 0..200 {
        md.push_str(&format!(
            "\n## Section {i}\n\nSome *emphasis*, a [link](https://example.com) and `code`.\n\n- one\n- two\n"
        ));
    }
    md
}

fn bench_render_welcome(c: &mut Criterion) {
    let renderer = Renderer::default();
    c.bench_function("render_welcome", |b| {
        b.iter(|| renderer.render(black_box(WELCOME_DOCUMENT)))
    });
}

fn bench_refresh_long(c: &mut Criterion) {
    let renderer = Renderer::default();
    let mut document = DocumentState::clean(&long_document());
    let mut pipeline = SyncPipeline::new(300);
    c.bench_function("refresh_long", |b| {
        b.iter(|| pipeline.refresh_now(&mut document, &renderer))
    });
}

fn bench_text_stats(c: &mut Criterion) {
    let md = long_document();
    c.bench_function("text_stats", |b| b.iter(|| TextStats::compute(black_box(&md))));
}

criterion_group!(
    benches,
    bench_render_welcome,
    bench_refresh_long,
    bench_text_stats
);
criterion_main!(benches);
