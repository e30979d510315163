use crate::math::bezier::CubicBezier;
use crate::math::intersect_2d::{cubic_cubic_intersect_2d, segment_segment_intersect_2d};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Axis alignment of a stroke step.
///
/// The ordering `Diagonal < Horizontal < Vertical` is the merge tie-break
/// order (`d`, `h`, `v`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    Diagonal,
    Horizontal,
    Vertical,
}

impl Axis {
    /// Classifies the step from `a` to `b` by exact coordinate comparison.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn between(a: &Point2, b: &Point2) -> Self {
        if a.y == b.y {
            Self::Horizontal
        } else if a.x == b.x {
            Self::Vertical
        } else {
            Self::Diagonal
        }
    }

    /// Returns `true` for horizontal and vertical alignment.
    #[must_use]
    pub fn is_straight(self) -> bool {
        self != Self::Diagonal
    }
}

/// A directed path step stored relative to the point it starts from.
///
/// Lines carry only their displacement; cubics carry both handles as well.
/// All vectors are relative to the segment start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line {
        to: Vector2,
    },
    Cubic {
        ctrl1: Vector2,
        ctrl2: Vector2,
        to: Vector2,
    },
}

impl Segment {
    /// Creates a line segment with the given displacement.
    #[must_use]
    pub fn line(to: Vector2) -> Self {
        Self::Line { to }
    }

    /// Creates a cubic segment from start-relative handles and displacement.
    #[must_use]
    pub fn cubic(ctrl1: Vector2, ctrl2: Vector2, to: Vector2) -> Self {
        Self::Cubic { ctrl1, ctrl2, to }
    }

    /// Creates a segment between absolute points, with absolute handles.
    #[must_use]
    pub fn between(start: &Point2, handles: &[Point2], end: &Point2) -> Option<Self> {
        match handles {
            [] => Some(Self::line(end - start)),
            // Quadratic, elevated to cubic.
            [q] => Some(Self::cubic(
                (q - start) * (2.0 / 3.0),
                (end - start) + (q - end) * (2.0 / 3.0),
                end - start,
            )),
            [c1, c2] => Some(Self::cubic(c1 - start, c2 - start, end - start)),
            _ => None,
        }
    }

    /// Displacement from the start of the segment to its end.
    #[must_use]
    pub fn displacement(&self) -> Vector2 {
        match *self {
            Self::Line { to } | Self::Cubic { to, .. } => to,
        }
    }

    /// Returns `true` when the segment has no extent.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Self::Line { to } => to.norm() < TOLERANCE,
            Self::Cubic { ctrl1, ctrl2, to } => {
                ctrl1.norm() < TOLERANCE && ctrl2.norm() < TOLERANCE && to.norm() < TOLERANCE
            }
        }
    }

    /// Absolute cubic form of this segment when started at `start`.
    #[must_use]
    pub fn to_bezier(&self, start: &Point2) -> CubicBezier {
        match *self {
            Self::Line { to } => CubicBezier::from_line(*start, start + to),
            Self::Cubic { ctrl1, ctrl2, to } => {
                CubicBezier::new(*start, start + ctrl1, start + ctrl2, start + to)
            }
        }
    }

    /// Point at parameter `t` when started at `start`.
    #[must_use]
    pub fn point_at(&self, start: &Point2, t: f64) -> Point2 {
        match *self {
            Self::Line { to } => start + to * t,
            Self::Cubic { .. } => self.to_bezier(start).eval(t),
        }
    }

    /// Unnormalised tangent at parameter `t`.
    #[must_use]
    pub fn tangent_at(&self, t: f64) -> Vector2 {
        match *self {
            Self::Line { to } => to,
            Self::Cubic { .. } => self.to_bezier(&Point2::origin()).eval_deriv(t),
        }
    }

    /// Direction the segment leaves its start point in.
    ///
    /// Falls back to the next handle when a cubic handle coincides with its
    /// anchor.
    #[must_use]
    pub fn start_tangent(&self) -> Vector2 {
        match *self {
            Self::Line { to } => to,
            Self::Cubic { ctrl1, ctrl2, to } => [ctrl1, ctrl2, to]
                .into_iter()
                .find(|v| v.norm() > TOLERANCE)
                .unwrap_or(to),
        }
    }

    /// Direction the segment arrives at its end point in.
    #[must_use]
    pub fn end_tangent(&self) -> Vector2 {
        match *self {
            Self::Line { to } => to,
            Self::Cubic { ctrl1, ctrl2, to } => [to - ctrl2, to - ctrl1, to]
                .into_iter()
                .find(|v| v.norm() > TOLERANCE)
                .unwrap_or(to),
        }
    }

    /// Splits at parameter `t` into `(before, after)`.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        match *self {
            Self::Line { to } => (Self::line(to * t), Self::line(to * (1.0 - t))),
            Self::Cubic { .. } => {
                let (a, b) = self.to_bezier(&Point2::origin()).split(t);
                (Self::from_bezier(&a), Self::from_bezier(&b))
            }
        }
    }

    /// The portion of this segment between parameters `t0` and `t1`.
    #[must_use]
    pub fn subsegment(&self, t0: f64, t1: f64) -> Self {
        let (_, tail) = self.split(t0);
        if (1.0 - t0).abs() < TOLERANCE {
            return tail;
        }
        let (head, _) = tail.split((t1 - t0) / (1.0 - t0));
        head
    }

    /// The same curve traversed from end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match *self {
            Self::Line { to } => Self::line(-to),
            Self::Cubic { ctrl1, ctrl2, to } => Self::cubic(ctrl2 - to, ctrl1 - to, -to),
        }
    }

    /// Offsets the segment sideways.
    ///
    /// The start anchor and first handle move by `start_normal`; the second
    /// handle and end anchor move by `end_normal`. A line keeps its
    /// displacement, since both normals coincide.
    #[must_use]
    pub fn offset(&self, start_normal: &Vector2, end_normal: &Vector2) -> Self {
        match *self {
            Self::Line { to } => Self::line(to),
            Self::Cubic { ctrl1, ctrl2, to } => {
                let shift = end_normal - start_normal;
                Self::cubic(ctrl1, ctrl2 + shift, to + shift)
            }
        }
    }

    /// Axis alignment over every vector of the segment.
    #[must_use]
    pub fn axis(&self) -> Axis {
        let vectors = match *self {
            Self::Line { to } => vec![to],
            Self::Cubic { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
        };
        let origin = Point2::origin();
        let mut axes = vectors
            .iter()
            .filter(|v| v.norm() > 0.0)
            .map(|v| Axis::between(&origin, &(origin + *v)));
        match axes.next() {
            Some(first) if axes.all(|a| a == first) => first,
            _ => Axis::Diagonal,
        }
    }

    /// Intersection parameters `(t, u)` of this segment started at `start`
    /// against `other` started at `other_start`.
    #[must_use]
    pub fn intersect(&self, start: &Point2, other: &Self, other_start: &Point2) -> Vec<(f64, f64)> {
        match (self, other) {
            (Self::Line { to: a }, Self::Line { to: b }) => segment_segment_intersect_2d(
                start,
                &(start + a),
                other_start,
                &(other_start + b),
            )
            .map(|(_, t, u)| vec![(t, u)])
            .unwrap_or_default(),
            _ => cubic_cubic_intersect_2d(&self.to_bezier(start), &other.to_bezier(other_start)),
        }
    }

    fn from_bezier(c: &CubicBezier) -> Self {
        Self::cubic(c.p1 - c.p0, c.p2 - c.p0, c.p3 - c.p0)
    }
}
