use super::{Point2, Vector2};

/// Four absolute control points of a cubic Bezier segment, with evaluation
/// and subdivision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point2,
    pub p1: Point2,
    pub p2: Point2,
    pub p3: Point2,
}

impl CubicBezier {
    /// Creates a cubic from four control points.
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Elevates a straight line to a cubic with uniform parametrisation.
    #[must_use]
    pub fn from_line(p0: Point2, p3: Point2) -> Self {
        let d = p3 - p0;
        Self {
            p0,
            p1: p0 + d / 3.0,
            p2: p0 + d * (2.0 / 3.0),
            p3,
        }
    }

    /// Evaluates the point at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn eval(&self, t: f64) -> Point2 {
        let s = 1.0 - t;
        let a = s * s * s;
        let b = 3.0 * s * s * t;
        let c = 3.0 * s * t * t;
        let d = t * t * t;
        Point2::from(
            self.p0.coords * a + self.p1.coords * b + self.p2.coords * c + self.p3.coords * d,
        )
    }

    /// Evaluates the derivative at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn eval_deriv(&self, t: f64) -> Vector2 {
        let s = 1.0 - t;
        (self.p1 - self.p0) * (3.0 * s * s)
            + (self.p2 - self.p1) * (6.0 * s * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// Signed area swept between the origin and the curve, `½∫ p × p' dt`.
    ///
    /// The integrand is a degree-5 polynomial, so three-point Gauss-Legendre
    /// quadrature is exact. Summed over a closed chain this is the enclosed
    /// area, positive for counter-clockwise traversal.
    #[must_use]
    pub fn area_term(&self) -> f64 {
        let offset = 15f64.sqrt() / 10.0;
        [(0.5 - offset, 5.0), (0.5, 8.0), (0.5 + offset, 5.0)]
            .into_iter()
            .map(|(t, w)| {
                let p = self.eval(t);
                let d = self.eval_deriv(t);
                w * (p.x * d.y - p.y * d.x)
            })
            .sum::<f64>()
            / 36.0
    }

    /// Splits at parameter `t` using de Casteljau's algorithm.
    ///
    /// Returns `(left_half, right_half)`.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let ab = self.p0.lerp(&self.p1, t);
        let bc = self.p1.lerp(&self.p2, t);
        let cd = self.p2.lerp(&self.p3, t);
        let abc = ab.lerp(&bc, t);
        let bcd = bc.lerp(&cd, t);
        let abcd = abc.lerp(&bcd, t);
        (
            Self::new(self.p0, ab, abc, abcd),
            Self::new(abcd, bcd, cd, self.p3),
        )
    }

    /// Axis-aligned bounding box of the control hull: `(min, max)`.
    #[must_use]
    pub fn bbox(&self) -> (Point2, Point2) {
        let pts = [self.p0, self.p1, self.p2, self.p3];
        let mut min = self.p0;
        let mut max = self.p0;
        for p in &pts[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }

    /// Diagonal of the control-hull bounding box.
    #[must_use]
    pub fn extent(&self) -> f64 {
        let (min, max) = self.bbox();
        (max.x - min.x).hypot(max.y - min.y)
    }
}
