//! Benchmarks for the per-scroll recompute path.
//!
//! Run with: cargo bench -p readmark-runtime

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use readmark_core::event::Event;
use readmark_outline::HeadingEntry;
use readmark_runtime::{ActivePolicy, DocumentSimulator, FixedLayout, ScrollTracker, TrackerConfig};

// =============================================================================
// Test Data
// =============================================================================

const HEIGHT: f64 = 50_000.0;
const VIEWPORT: f64 = 900.0;

/// A document with `count` evenly spaced sections.
fn document(count: usize) -> (Vec<HeadingEntry>, FixedLayout) {
    let step = HEIGHT / (count as f64 + 1.0);
    let headings = (0..count)
        .map(|i| HeadingEntry::new(2, format!("s{i}"), format!("Section {i}")))
        .collect();
    let layout = FixedLayout::new(HEIGHT, VIEWPORT)
        .headings((0..count).map(|i| (format!("s{i}"), step * (i as f64 + 1.0))));
    (headings, layout)
}

/// Scroll offsets sweeping top to bottom and back.
fn sweep(steps: usize) -> Vec<f64> {
    let distance = HEIGHT - VIEWPORT;
    (0..steps)
        .chain((0..steps).rev())
        .map(|i| distance * i as f64 / steps as f64)
        .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker/recompute");
    let offsets = sweep(256);

    for sections in [4, 16, 64, 256] {
        for policy in [ActivePolicy::ForwardBiased, ActivePolicy::Recount] {
            let (_, mut layout) = document(sections);
            let mut tracker = ScrollTracker::new(policy);
            tracker.measure(&layout);

            group.throughput(Throughput::Elements(offsets.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(policy.as_str(), sections),
                &offsets,
                |b, offsets| {
                    b.iter(|| {
                        for &scroll_y in offsets {
                            layout.set_scroll_y(scroll_y);
                            black_box(tracker.recompute(&layout));
                        }
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker/measure");

    for sections in [4, 64, 256] {
        let (_, layout) = document(sections);
        let mut tracker = ScrollTracker::new(ActivePolicy::ForwardBiased);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &layout, |b, layout| {
            b.iter(|| black_box(tracker.measure(layout).len()))
        });
    }

    group.finish();
}

fn bench_bus_delivery(c: &mut Criterion) {
    let mut group = c.benchmark_group("widget/scroll_delivery");
    let offsets = sweep(128);
    let events: Vec<_> = offsets.iter().map(|&y| Event::scroll(y)).collect();

    for coalesce in [false, true] {
        let (headings, layout) = document(32);
        let mut sim = DocumentSimulator::new(layout);
        let config = TrackerConfig::default().with_coalesce_scroll(coalesce);
        let widget = sim.mount(&headings, config);

        let label = if coalesce { "coalesced" } else { "immediate" };
        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_function(label, |b| {
            b.iter(|| {
                sim.inject_events(&events);
                sim.clear_log();
                black_box(widget.state())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_recompute, bench_measure, bench_bus_delivery);
criterion_main!(benches);
