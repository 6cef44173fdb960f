//! Benchmarks for a full region render pass.
//!
//! Run with: cargo bench --package cone-renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cone_regions::builtin_profile;
use cone_renderer::{bundled_font, ConeSource, Renderer};
use test_utils::{cone_ring, patterned_base_image};

fn bench_render_atlantic(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_atlantic");
    let profile = builtin_profile("atlantic").expect("atlantic profile");
    let font = bundled_font().expect("bundled font");
    let renderer = Renderer::new(&profile, &font);
    let base = patterned_base_image(1000, 650);

    for &count in &[100usize, 1_000, 10_000] {
        let sources = vec![ConeSource::new("ring", cone_ring(-60.0, 25.0, 8.0, count))];
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &sources, |b, sources| {
            b.iter(|| renderer.render(black_box(base.clone()), sources.iter().cloned()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render_atlantic);
criterion_main!(benches);
