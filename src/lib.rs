//! # `tri_sieve`
//!
//! Memoized Sierpinski triangle subdivision. Walk the fractal one level
//! deeper every frame while **geometry computes once and draw calls go out
//! once**, no matter how many frames replay the same depths.
//!
//! ## What is this?
//!
//! The Sierpinski triangle subdivides an upright equilateral triangle into
//! four children — three upright corner triangles plus one inverted center
//! triangle — and draws only the centers, recursively. This crate is the
//! subdivision + memoization engine for that construction: a per-session
//! cache of each parent's four children, a draw-dedup ledger so growing the
//! depth re-emits nothing already on the surface, and the pre-order traversal
//! that ties them together. Rendering backends, window management, and frame
//! timing stay outside, consumed through the tiny [`DrawSink`] trait.
//!
//! ## Quick Start
//!
//! ```rust
//! use tri_sieve::{Orientation, SierpinskiSieve, Triangle};
//! use tri_sieve::math::DVec2;
//!
//! // Seed triangle anchored at (500, 500) with side 700, apex up
//! let seed = Triangle::from_anchor(DVec2::new(500.0, 500.0), 700.0, Orientation::Upright);
//!
//! let mut sieve = SierpinskiSieve::new();
//!
//! // Pull-style: collect every center triangle down to level 3
//! let centers = sieve.collect(&seed, 3);
//! assert_eq!(centers.len(), 13); // 1 + 3 + 9
//!
//! // Replaying the walk is answered from the subdivision cache
//! let again = sieve.collect(&seed, 3);
//! assert_eq!(again.len(), 13);
//! assert_eq!(sieve.subdivision_cache().misses(), 13);
//! ```
//!
//! ## Key Features
//!
//! - **Memoized subdivision**: children computed once per distinct parent,
//!   keyed by a precision-safe quantized centroid
//! - **Incremental emission**: [`SierpinskiSieve::render`] skips everything a
//!   previous frame already sent through the sink
//! - **Backend-agnostic**: the `begin_path` / `vertex` / `close_path`
//!   protocol of [`DrawSink`] is the entire rendering dependency
//! - **Explicit lifecycle**: caches are owned by the session, with
//!   [`surface_cleared`](SierpinskiSieve::surface_cleared) and
//!   [`reset`](SierpinskiSieve::reset) marking the only invalidation points
//!
//! ## When NOT to Use
//!
//! - Arbitrary polygon subdivision (only equilateral, horizontal-base
//!   triangles are supported)
//! - Unbounded depth: the walk visits `3^depth` nodes and recurses
//!   `depth` frames deep — clamp depth in the driver (≲15 for interactive
//!   budgets) before calling

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod geometry;
mod sieve;

pub use geometry::{triangle_height, GeometryError, Orientation, Triangle, ROOT_3};
pub use sieve::{
    emit_triangle, DrawCache, DrawSink, RenderPass, SierpinskiSieve, Subdivision,
    SubdivisionCache,
};

/// Re-export glam types for convenience
pub mod math {
    pub use glam::DVec2;
}
