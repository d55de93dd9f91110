//! # Memoized Sierpinski Subdivision
//!
//! This module implements the **subdivision sieve**: the recursive descent
//! that carves a Sierpinski triangle out of an upright seed, with memoization
//! on both the geometric and the emission side.
//!
//! ## Key Concepts
//!
//! - **Subdivision**: an upright triangle splits into four children — three
//!   upright corner triangles plus one inverted center triangle
//! - **Center triangle**: the inverted child, the one actually drawn at each
//!   level (the triangle "removed" in the classical construction)
//! - **Centroid key**: a quantized coordinate pair identifying a triangle for
//!   memoization, independent of how it was instantiated
//!
//! ## Algorithm Overview
//!
//! 1. **Subdivide-or-hit**: children of a parent are computed once and cached
//!    under the parent's centroid key
//! 2. **Center-first emission**: each visited node hands its center triangle
//!    to the draw path before recursing
//! 3. **Draw dedup**: re-running the walk at a deeper level re-emits nothing
//!    that already reached the backend
//!
//! ## Complexity
//!
//! | Operation          | Complexity              | Notes                         |
//! |--------------------|-------------------------|-------------------------------|
//! | Subdivide (miss)   | O(1)                    | Three base completions        |
//! | Subdivide (hit)    | O(1) expected           | Hash lookup on centroid key   |
//! | Render to depth d  | O(3^d) nodes            | Geometry work only on misses  |
//! | Re-render, deeper  | O(new triangles) emits  | Dedup skips the drawn prefix  |

#![allow(clippy::cast_possible_truncation)]

use glam::DVec2;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::geometry::Triangle;

/// Default quantization tolerance for centroid cache keys.
const DEFAULT_TOLERANCE: f64 = 1e-7;

/// A triangle's memoization identity: its center point snapped to a fixed
/// grid.
///
/// The original keyed caches by string-concatenating raw centroid
/// coordinates; quantizing to a tolerance grid instead makes the key immune
/// to formatting and last-bit precision artifacts. Centroid equality is the
/// authoritative identity here: two triangles whose centers round to the same
/// grid cell share one cache entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct CentroidKey(i64, i64);

impl CentroidKey {
    /// Snap a center point to the grid defined by `inv_quantum = 1/tolerance`.
    #[inline]
    fn quantize(p: DVec2, inv_quantum: f64) -> Self {
        Self((p.x * inv_quantum).round() as i64, (p.y * inv_quantum).round() as i64)
    }
}

/// The four children of one subdivision step.
///
/// `center` is the inverted triangle that gets drawn; the other three are the
/// upright triangles the traversal recurses into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Subdivision {
    /// Inverted center triangle (drawn, never recursed into).
    pub center: Triangle,
    /// Upright triangle over the right half-base.
    pub bottom_right: Triangle,
    /// Upright triangle over the left half-base.
    pub bottom_left: Triangle,
    /// Upright triangle spanning the two lower apexes.
    pub top: Triangle,
}

impl Subdivision {
    /// The children the traversal descends into, in its fixed order.
    #[inline]
    #[must_use]
    pub const fn recursed(&self) -> [Triangle; 3] {
        [self.bottom_right, self.bottom_left, self.top]
    }
}

/// Split an upright parent into its four children.
///
/// The base is halved at its horizontal midpoint; `bottom_left` and
/// `bottom_right` are the upright triangles over the two half-bases, `top`
/// connects their apexes, and `center` is the inverted triangle over the
/// three inner vertices.
fn subdivide(parent: &Triangle) -> Subdivision {
    let s = parent.side();
    let midbase = DVec2::new(parent.a.x + s / 2.0, parent.a.y);

    let bottom_left = Triangle::upright_over(parent.a, midbase);
    let bottom_right = Triangle::upright_over(midbase, parent.b);
    let top = Triangle::upright_over(bottom_left.c, bottom_right.c);
    let center = Triangle::new(bottom_left.c, bottom_right.c, bottom_left.b);

    Subdivision {
        center,
        bottom_right,
        bottom_left,
        top,
    }
}

/// Memoizes the four children of each parent triangle, keyed by centroid.
///
/// Append-only for the lifetime of a session: entries are never mutated or
/// evicted, so total geometric work across a multi-frame animation is bounded
/// by the number of distinct triangles ever requested, not frames × nodes.
#[derive(Clone, Debug)]
pub struct SubdivisionCache {
    children: FxHashMap<CentroidKey, Subdivision>,
    inv_quantum: f64,
    hits: usize,
    misses: usize,
}

impl SubdivisionCache {
    /// Create a cache with the default key tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }

    /// Create a cache whose keys quantize centroids to `tolerance`.
    #[must_use]
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            children: FxHashMap::default(),
            inv_quantum: 1.0 / tolerance,
            hits: 0,
            misses: 0,
        }
    }

    /// Return the parent's four children, computing them at most once.
    ///
    /// On a hit the stored children are returned without touching geometry,
    /// even if `parent` is a different instantiation of the same triangle.
    pub fn get_or_subdivide(&mut self, parent: &Triangle) -> Subdivision {
        let key = CentroidKey::quantize(parent.center(), self.inv_quantum);
        if let Some(children) = self.children.get(&key) {
            self.hits += 1;
            return *children;
        }
        self.misses += 1;
        let children = subdivide(parent);
        self.children.insert(key, children);
        children
    }

    /// Number of distinct parents subdivided so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if nothing has been subdivided yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Lookups answered from the cache.
    #[inline]
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Lookups that ran the geometric computation.
    #[inline]
    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }

    /// Drop all entries and counters.
    pub fn clear(&mut self) {
        self.children.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl Default for SubdivisionCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Remembers which triangles already reached the rendering backend.
///
/// Checked before every emission so that re-running the traversal each frame
/// at a growing depth never re-strokes edges the backend already has. Cleared
/// only when the driver clears the drawing surface.
#[derive(Clone, Debug)]
pub struct DrawCache {
    seen: FxHashSet<CentroidKey>,
    inv_quantum: f64,
}

impl DrawCache {
    /// Create a cache with the default key tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }

    /// Create a cache whose keys quantize centroids to `tolerance`.
    #[must_use]
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            seen: FxHashSet::default(),
            inv_quantum: 1.0 / tolerance,
        }
    }

    /// Mark a triangle as emitted. Returns `true` exactly once per distinct
    /// triangle; `false` means the triangle was already on the surface.
    pub fn mark_if_new(&mut self, triangle: &Triangle) -> bool {
        self.seen
            .insert(CentroidKey::quantize(triangle.center(), self.inv_quantum))
    }

    /// Number of distinct triangles emitted so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns `true` if nothing has been emitted yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Forget everything, e.g. after the surface was cleared.
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

impl Default for DrawCache {
    fn default() -> Self {
        Self::new()
    }
}

/// The draw-primitive sink the engine emits into.
///
/// One triangle is submitted as `begin_path`, one `vertex` per corner in
/// `a, b, c` order, then `close_path`. The engine treats the sink as an
/// opaque side-effecting surface and never inspects results.
pub trait DrawSink {
    /// Start a new closed path.
    fn begin_path(&mut self);
    /// Append one vertex to the current path.
    fn vertex(&mut self, p: DVec2);
    /// Close and submit the current path.
    fn close_path(&mut self);
}

/// Submit one triangle through a sink using the path protocol.
pub fn emit_triangle<S: DrawSink + ?Sized>(sink: &mut S, triangle: &Triangle) {
    sink.begin_path();
    for p in triangle.vertices() {
        sink.vertex(p);
    }
    sink.close_path();
}

/// Outcome of one [`SierpinskiSieve::render`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderPass {
    /// Nodes whose subdivision was walked (emitted or not).
    pub visited: usize,
    /// Center triangles forwarded to the sink this pass.
    pub emitted: usize,
    /// Center triangles skipped because they were already on the surface.
    pub deduped: usize,
}

impl std::fmt::Display for RenderPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} visited, {} emitted, {} deduped",
            self.visited, self.emitted, self.deduped
        )
    }
}

/// A Sierpinski rendering session: the traversal engine plus the two caches
/// it leans on.
///
/// # Design Decisions
///
/// **Session-owned caches**: both memoization maps live here rather than in
/// ambient globals, so construction and reset have an explicit lifecycle tied
/// to the session.
///
/// **Depth-agnostic walks**: the engine keeps no frame state of its own; the
/// driver supplies `desired_level` per call and may grow it monotonically,
/// with the caches turning repeated walks into pure lookups.
///
/// **Caller-bounded depth**: recursion depth grows linearly and node count as
/// `3^depth`; the engine imposes no ceiling, so drivers should clamp depth
/// (≲15 for interactive frame budgets) before calling.
#[derive(Clone, Debug)]
pub struct SierpinskiSieve {
    subdivisions: SubdivisionCache,
    drawn: DrawCache,
}

impl SierpinskiSieve {
    /// Create a session with the default cache-key tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }

    /// Create a session whose cache keys quantize centroids to `tolerance`.
    #[must_use]
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            subdivisions: SubdivisionCache::with_tolerance(tolerance),
            drawn: DrawCache::with_tolerance(tolerance),
        }
    }

    /// Walk the subdivision tree under `seed` to `desired_level`, emitting
    /// each newly seen center triangle into `sink`.
    ///
    /// Depth-first, pre-order, center-first: at every node below the cutoff
    /// the center triangle goes to the draw path, then the walk descends into
    /// `bottom_right`, `bottom_left`, `top`, in that order. A
    /// `desired_level <= 0` is an immediate no-op.
    pub fn render<S: DrawSink>(
        &mut self,
        seed: &Triangle,
        desired_level: i32,
        sink: &mut S,
    ) -> RenderPass {
        let mut pass = RenderPass::default();
        self.render_walk(seed, desired_level, 0, sink, &mut pass);
        debug!(
            "Render pass to level {}: {} ({} subdivisions cached)",
            desired_level,
            pass,
            self.subdivisions.len()
        );
        pass
    }

    fn render_walk<S: DrawSink>(
        &mut self,
        node: &Triangle,
        desired_level: i32,
        current_level: i32,
        sink: &mut S,
        pass: &mut RenderPass,
    ) {
        if current_level >= desired_level {
            return;
        }
        pass.visited += 1;

        let children = self.subdivisions.get_or_subdivide(node);
        if self.drawn.mark_if_new(&children.center) {
            emit_triangle(sink, &children.center);
            pass.emitted += 1;
        } else {
            pass.deduped += 1;
        }

        for child in children.recursed() {
            self.render_walk(&child, desired_level, current_level + 1, sink, pass);
        }
    }

    /// Pull-style variant of [`render`](Self::render): collect every center
    /// triangle down to `desired_level` instead of emitting.
    ///
    /// Collection bypasses the draw-dedup cache (it is not an emission), so
    /// the result always holds the full visible set:
    /// `1 + 3 + … + 3^(n-1) = (3^n − 1) / 2` triangles for level `n ≥ 1`.
    pub fn collect(&mut self, seed: &Triangle, desired_level: i32) -> Vec<Triangle> {
        let mut centers = Vec::new();
        self.collect_walk(seed, desired_level, 0, &mut centers);
        debug!(
            "Collected {} center triangles to level {}",
            centers.len(),
            desired_level
        );
        centers
    }

    fn collect_walk(
        &mut self,
        node: &Triangle,
        desired_level: i32,
        current_level: i32,
        centers: &mut Vec<Triangle>,
    ) {
        if current_level >= desired_level {
            return;
        }

        let children = self.subdivisions.get_or_subdivide(node);
        centers.push(children.center);

        for child in children.recursed() {
            self.collect_walk(&child, desired_level, current_level + 1, centers);
        }
    }

    /// Tell the session the drawing surface was cleared.
    ///
    /// Forgets what was emitted so the next render re-draws everything. The
    /// subdivision cache survives: geometry depends only on coordinates, not
    /// on pixels already placed.
    pub fn surface_cleared(&mut self) {
        self.drawn.clear();
    }

    /// Drop both caches, returning the session to its freshly built state.
    pub fn reset(&mut self) {
        self.subdivisions.clear();
        self.drawn.clear();
    }

    /// Number of distinct parents whose subdivision is memoized.
    #[inline]
    #[must_use]
    pub fn cached_subdivisions(&self) -> usize {
        self.subdivisions.len()
    }

    /// Number of distinct triangles emitted since the last surface clear.
    #[inline]
    #[must_use]
    pub fn drawn_count(&self) -> usize {
        self.drawn.len()
    }

    /// The subdivision cache, for hit/miss inspection.
    #[inline]
    #[must_use]
    pub const fn subdivision_cache(&self) -> &SubdivisionCache {
        &self.subdivisions
    }
}

impl Default for SierpinskiSieve {
    fn default() -> Self {
        Self::new()
    }
}
