//! Triangle value types and pure constructions.
//!
//! Everything here is total and side-effect-free: triangles are plain `Copy`
//! values with no identity beyond their vertex coordinates, and every
//! constructor is a closed-form computation from its inputs.
//!
//! Coordinate convention follows raster surfaces: y grows downward, so an
//! *upright* triangle (apex visually above its base) has `c.y < a.y`.

use glam::DVec2;

/// √3, the ratio driving equilateral-triangle heights.
pub const ROOT_3: f64 = 1.732_050_807_568_877_2;

/// Height of an equilateral triangle with the given side length: `(√3 / 2) s`.
///
/// Total over all inputs; a negative side produces a negative height. Callers
/// are expected to pass non-negative sides — degenerate inputs propagate as
/// degenerate (zero-area or mirrored) triangles rather than failing.
#[inline]
#[must_use]
pub fn triangle_height(side: f64) -> f64 {
    ROOT_3 * side / 2.0
}

/// Which way a triangle's apex points relative to its base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Apex above the base (base at the bottom).
    Upright,
    /// Apex below the base; the shape drawn at each Sierpinski level.
    Inverted,
}

/// An equilateral triangle with a horizontal base.
///
/// Positionally `(a, b, c)`: `a` and `b` form the base (same y, `a.x < b.x`
/// by convention) and `c` is the apex, offset vertically by the triangle's
/// height. The side length is derived as `b.x - a.x`, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    /// Left base vertex.
    pub a: DVec2,
    /// Right base vertex.
    pub b: DVec2,
    /// Apex.
    pub c: DVec2,
}

impl Triangle {
    /// Build a triangle from its three vertices as given.
    #[inline]
    #[must_use]
    pub const fn new(a: DVec2, b: DVec2, c: DVec2) -> Self {
        Self { a, b, c }
    }

    /// Complete the upright triangle over the base `a..b`.
    ///
    /// The apex lands at `(a.x + s/2, a.y - h)` with `s = b.x - a.x`, so for
    /// a left-to-right base the apex sits centered above it.
    #[must_use]
    pub fn upright_over(a: DVec2, b: DVec2) -> Self {
        let s = b.x - a.x;
        let h = triangle_height(s);
        let c = DVec2::new(a.x + s / 2.0, a.y - h);
        Self { a, b, c }
    }

    /// Construct a full triangle from an anchor point and side length.
    ///
    /// This is the seed constructor used once per rendering session. The
    /// anchor is the triangle's horizontal center; vertically the apex sits
    /// at `anchor.y - (2/3)h` for [`Orientation::Upright`] and at
    /// `anchor.y + (2/3)h` for [`Orientation::Inverted`], with the base a
    /// full height away on the opposite side.
    #[must_use]
    pub fn from_anchor(anchor: DVec2, side: f64, orientation: Orientation) -> Self {
        let h = triangle_height(side);

        let cx = anchor.x;
        let cy = match orientation {
            Orientation::Upright => anchor.y - (2.0 / 3.0) * h,
            Orientation::Inverted => anchor.y + (2.0 / 3.0) * h,
        };
        let by = match orientation {
            Orientation::Upright => cy + h,
            Orientation::Inverted => cy - h,
        };
        let bx = cx + side / 2.0;

        Self {
            a: DVec2::new(bx - side, by),
            b: DVec2::new(bx, by),
            c: DVec2::new(cx, cy),
        }
    }

    /// Side length, derived from the base vertices.
    #[inline]
    #[must_use]
    pub fn side(&self) -> f64 {
        self.b.x - self.a.x
    }

    /// Height, derived from the side length.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        triangle_height(self.side())
    }

    /// The canonical center point used as this triangle's cache identity:
    /// `(a.x + s/2, c.y - h/3)`.
    ///
    /// Deterministic given the vertices, so two structurally identical
    /// triangles always map to the same point and memoization hits reliably.
    #[must_use]
    pub fn center(&self) -> DVec2 {
        let s = self.side();
        let h = triangle_height(s);
        DVec2::new(self.a.x + s / 2.0, self.c.y - h / 3.0)
    }

    /// Unsigned area via the shoelace formula.
    #[must_use]
    pub fn area(&self) -> f64 {
        let Self { a, b, c } = *self;
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
    }

    /// The vertices in emission order `[a, b, c]`.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [DVec2; 3] {
        [self.a, self.b, self.c]
    }

    /// Check the base/apex convention this crate assumes.
    ///
    /// The hot path never calls this — malformed geometry propagates as
    /// degenerate triangles. Drivers that accept seed coordinates from
    /// outside can validate up front instead.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::SlantedBase`] if `a.y` and `b.y` differ by more
    ///   than `epsilon`
    /// - [`GeometryError::NonPositiveSide`] if `b.x - a.x <= 0`
    pub fn validate(&self, epsilon: f64) -> Result<(), GeometryError> {
        let dy = (self.b.y - self.a.y).abs();
        if dy > epsilon {
            return Err(GeometryError::SlantedBase { dy });
        }
        let side = self.side();
        if side <= 0.0 {
            return Err(GeometryError::NonPositiveSide { side });
        }
        Ok(())
    }
}

/// Violations of the base/apex triangle convention.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// Base vertices do not share a y-coordinate within tolerance.
    SlantedBase {
        /// Absolute y-difference between the base vertices.
        dy: f64,
    },
    /// Side length `b.x - a.x` is zero or negative.
    NonPositiveSide {
        /// The offending derived side length.
        side: f64,
    },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SlantedBase { dy } => {
                write!(f, "Base vertices differ by {dy} in y (expected a horizontal base)")
            }
            Self::NonPositiveSide { side } => {
                write!(f, "Derived side length {side} is not positive")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_triangle_height() {
        assert!((triangle_height(2.0) - ROOT_3).abs() < EPSILON);
        assert!((triangle_height(10.0) - 8.660_254_037_844_386).abs() < EPSILON);
        assert!(triangle_height(0.0).abs() < EPSILON);
        // Negative sides degrade silently to negative heights
        assert!(triangle_height(-2.0) < 0.0);
    }

    #[test]
    fn test_upright_over() {
        let t = Triangle::upright_over(DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0));

        assert!((t.side() - 10.0).abs() < EPSILON);
        assert!((t.c.x - 5.0).abs() < EPSILON);
        // Apex above the base: smaller y
        assert!((t.c.y + triangle_height(10.0)).abs() < EPSILON);
    }

    #[test]
    fn test_from_anchor_upright() {
        let t = Triangle::from_anchor(DVec2::new(500.0, 500.0), 700.0, Orientation::Upright);
        let h = triangle_height(700.0);

        assert!((t.side() - 700.0).abs() < EPSILON);
        assert!((t.a.y - t.b.y).abs() < EPSILON);
        assert!((t.c.x - 500.0).abs() < EPSILON);
        assert!((t.c.y - (500.0 - (2.0 / 3.0) * h)).abs() < EPSILON);
        assert!((t.a.y - (t.c.y + h)).abs() < EPSILON);
    }

    #[test]
    fn test_from_anchor_inverted() {
        let t = Triangle::from_anchor(DVec2::new(0.0, 0.0), 12.0, Orientation::Inverted);
        let h = triangle_height(12.0);

        // Apex below the anchor, base a full height above it
        assert!((t.c.y - (2.0 / 3.0) * h).abs() < EPSILON);
        assert!((t.a.y - (t.c.y - h)).abs() < EPSILON);
        assert!((t.a.y - t.b.y).abs() < EPSILON);
        // x-layout is orientation-independent
        assert!((t.b.x - 6.0).abs() < EPSILON);
        assert!((t.a.x + 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_center_is_stable_across_rederivation() {
        let a = DVec2::new(3.0, 7.0);
        let b = DVec2::new(11.0, 7.0);

        let t1 = Triangle::upright_over(a, b);
        let t2 = Triangle::upright_over(a, b);

        assert_eq!(t1.center(), t2.center());

        // Same vertex set assembled directly must agree too
        let t3 = Triangle::new(t1.a, t1.b, t1.c);
        assert_eq!(t1.center(), t3.center());
    }

    #[test]
    fn test_center_closed_form() {
        let t = Triangle::upright_over(DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0));
        let center = t.center();
        let h = triangle_height(10.0);

        assert!((center.x - 5.0).abs() < EPSILON);
        assert!((center.y - (-h - h / 3.0)).abs() < EPSILON);
    }

    #[test]
    fn test_area() {
        let t = Triangle::upright_over(DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0));
        let expected = 10.0 * triangle_height(10.0) / 2.0;
        assert!((t.area() - expected).abs() < 1e-9);

        // Degenerate: zero side, zero area
        let degenerate = Triangle::upright_over(DVec2::new(4.0, 4.0), DVec2::new(4.0, 4.0));
        assert!(degenerate.area().abs() < EPSILON);
    }

    #[test]
    fn test_validate() {
        let good = Triangle::upright_over(DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0));
        assert!(good.validate(1e-9).is_ok());

        let slanted = Triangle::new(
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 1.0),
            DVec2::new(5.0, -8.0),
        );
        assert!(matches!(
            slanted.validate(1e-9),
            Err(GeometryError::SlantedBase { .. })
        ));

        let mirrored = Triangle::upright_over(DVec2::new(10.0, 0.0), DVec2::new(0.0, 0.0));
        assert!(matches!(
            mirrored.validate(1e-9),
            Err(GeometryError::NonPositiveSide { .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = GeometryError::SlantedBase { dy: 0.5 };
        assert!(format!("{err}").contains("0.5"));

        let err = GeometryError::NonPositiveSide { side: -3.0 };
        assert!(format!("{err}").contains("-3"));
    }
}
