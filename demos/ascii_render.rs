//! Terminal driver demo: grow the depth one level per "frame" and rasterize
//! the result as ASCII art.
//! Run with: cargo run --example ascii_render

use glam::DVec2;
use tri_sieve::{DrawSink, Orientation, SierpinskiSieve, Triangle};

const COLS: usize = 79;
const ROWS: usize = 40;
const MAX_DEPTH: i32 = 6;

/// Sink that accumulates emitted triangles across frames, the way an
/// accumulating canvas keeps previously stroked shapes.
#[derive(Default)]
struct CanvasSink {
    current: Vec<DVec2>,
    triangles: Vec<[DVec2; 3]>,
}

impl DrawSink for CanvasSink {
    fn begin_path(&mut self) {
        self.current.clear();
    }

    fn vertex(&mut self, p: DVec2) {
        self.current.push(p);
    }

    fn close_path(&mut self) {
        if let [a, b, c] = self.current[..] {
            self.triangles.push([a, b, c]);
        }
    }
}

/// Same-side sign test for point-in-triangle containment.
fn point_in_triangle(p: DVec2, t: &[DVec2; 3]) -> bool {
    let sign = |a: DVec2, b: DVec2| (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y);

    let d1 = sign(t[0], t[1]);
    let d2 = sign(t[1], t[2]);
    let d3 = sign(t[2], t[0]);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

fn rasterize(seed: &Triangle, carved: &[[DVec2; 3]]) -> String {
    let seed_pts = [seed.a, seed.b, seed.c];
    let mut out = String::with_capacity((COLS + 1) * ROWS);

    for row in 0..ROWS {
        for col in 0..COLS {
            // Terminal cells are roughly twice as tall as wide
            let sample = DVec2::new(col as f64 + 0.5, (row as f64 + 0.5) * 2.0);
            let filled = point_in_triangle(sample, &seed_pts)
                && !carved.iter().any(|t| point_in_triangle(sample, t));
            out.push(if filled { '#' } else { ' ' });
        }
        out.push('\n');
    }
    out
}

fn main() {
    // Side 68 fits the 79x80 sample space with the apex just inside
    let seed = Triangle::from_anchor(DVec2::new(39.5, 40.0), 68.0, Orientation::Upright);

    let mut sieve = SierpinskiSieve::new();
    let mut canvas = CanvasSink::default();

    for depth in 1..=MAX_DEPTH {
        let pass = sieve.render(&seed, depth, &mut canvas);
        println!(
            "frame {depth}: {pass} ({} triangles on canvas)",
            canvas.triangles.len()
        );
    }

    println!("{}", rasterize(&seed, &canvas.triangles));
}
