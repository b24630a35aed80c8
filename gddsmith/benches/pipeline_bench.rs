//! Benchmarks for the per-run text helpers.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gddsmith::core::ProgressEvent;
use gddsmith::pipeline::{final_document, last_line};
use gddsmith::render::{CommonMarkRenderer, MarkupRenderer};
use gddsmith::utils::slugify;

fn pipeline_benchmark(c: &mut Criterion) {
    let idea = "A cozy farming sim where every crop is a tiny puzzle about gravity & light!";
    c.bench_function("slugify", |b| b.iter(|| slugify(black_box(idea))));

    let round = "Game Designer A: Let's consider...\n".repeat(40) + "A tower built from falling blocks";
    c.bench_function("last_line", |b| b.iter(|| last_line(black_box(&round))));

    let gdd = "## Mechanics\n\n| Verb | Effect |\n|---|---|\n| Flip | Inverts gravity |\n\n".repeat(50);
    let document = final_document(&gdd, "https://img.test/art.png");
    c.bench_function("render_final_document", |b| {
        b.iter(|| CommonMarkRenderer.render(black_box(&document)))
    });

    let event = ProgressEvent::progress("discussion", round.clone());
    c.bench_function("progress_event_to_line", |b| {
        b.iter(|| black_box(&event).to_line())
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
