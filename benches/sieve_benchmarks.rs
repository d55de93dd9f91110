//! Benchmarks for `tri_sieve` subdivision and traversal.
//!
//! Run with: `cargo bench --bench sieve_benchmarks`
//!
//! These benchmarks test:
//! - Cold traversal (empty caches, all geometry computed)
//! - Warm traversal (pure cache hits)
//! - Draw-dedup overhead on replayed frames
//! - Incremental frame sequences (depth growing by one per frame)
//! - Scalability with increasing depth

use divan::{black_box, Bencher};
use glam::DVec2;
use tri_sieve::{DrawSink, Orientation, SierpinskiSieve, Triangle};

fn main() {
    divan::main();
}

/// Sink that swallows draw calls, counting closed paths.
#[derive(Default)]
struct NullSink {
    paths: usize,
}

impl DrawSink for NullSink {
    fn begin_path(&mut self) {}

    fn vertex(&mut self, _p: DVec2) {}

    fn close_path(&mut self) {
        self.paths += 1;
    }
}

fn seed() -> Triangle {
    Triangle::from_anchor(DVec2::new(500.0, 500.0), 700.0, Orientation::Upright)
}

// ============================================================================
// Cold vs. Warm Traversal
// ============================================================================

#[divan::bench(args = [4, 6, 8, 10])]
fn render_cold(bencher: Bencher, depth: i32) {
    let seed = seed();

    bencher.bench_local(|| {
        let mut sieve = SierpinskiSieve::new();
        let mut sink = NullSink::default();
        let pass = sieve.render(&seed, depth, &mut sink);
        black_box((pass.emitted, sink.paths))
    });
}

#[divan::bench(args = [4, 6, 8, 10])]
fn render_warm(bencher: Bencher, depth: i32) {
    let seed = seed();
    let mut sieve = SierpinskiSieve::new();
    let mut sink = NullSink::default();
    sieve.render(&seed, depth, &mut sink);

    bencher.bench_local(|| {
        let mut sink = NullSink::default();
        let pass = sieve.render(&seed, depth, &mut sink);
        black_box(pass.deduped)
    });
}

#[divan::bench(args = [4, 6, 8, 10])]
fn collect_cold(bencher: Bencher, depth: i32) {
    let seed = seed();

    bencher.bench_local(|| {
        let mut sieve = SierpinskiSieve::new();
        black_box(sieve.collect(&seed, depth).len())
    });
}

#[divan::bench(args = [4, 6, 8, 10])]
fn collect_warm(bencher: Bencher, depth: i32) {
    let seed = seed();
    let mut sieve = SierpinskiSieve::new();
    sieve.collect(&seed, depth);

    bencher.bench_local(|| black_box(sieve.collect(&seed, depth).len()));
}

// ============================================================================
// Frame Sequences
// ============================================================================

#[divan::bench(args = [6, 8, 10])]
fn animated_depth_ramp(bencher: Bencher, max_depth: i32) {
    let seed = seed();

    bencher.bench_local(|| {
        let mut sieve = SierpinskiSieve::new();
        let mut sink = NullSink::default();
        for depth in 1..=max_depth {
            sieve.render(&seed, depth, &mut sink);
        }
        black_box(sink.paths)
    });
}

#[divan::bench(args = [6, 8])]
fn surface_clear_replay(bencher: Bencher, depth: i32) {
    let seed = seed();
    let mut sieve = SierpinskiSieve::new();
    let mut sink = NullSink::default();
    sieve.render(&seed, depth, &mut sink);

    bencher.bench_local(|| {
        sieve.surface_cleared();
        let mut sink = NullSink::default();
        let pass = sieve.render(&seed, depth, &mut sink);
        black_box(pass.emitted)
    });
}
