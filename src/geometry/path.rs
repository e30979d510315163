use crate::math::{Point2, Vector2, TOLERANCE};

use super::segment::Segment;

/// A start point followed by a chain of relative segments.
///
/// Segment `i` starts where segment `i - 1` ends, so absolute positions are
/// the running sum of displacements. A closed path carries its closing
/// segment explicitly: when `closed` is set, [`Path::end`] equals
/// [`Path::start`].
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub start: Point2,
    pub segments: Vec<Segment>,
    pub closed: bool,
}

impl Path {
    /// Creates an empty open path at `start`.
    #[must_use]
    pub fn new(start: Point2) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
        }
    }

    /// Builds an open polyline through the given points.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let mut path = Self::new(points.first().copied().unwrap_or_else(Point2::origin));
        for pair in points.windows(2) {
            path.push(Segment::line(pair[1] - pair[0]));
        }
        path
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends a segment at the end.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Appends a straight segment to `target`, skipping zero-length steps.
    pub fn push_line_to(&mut self, target: &Point2) {
        let step = target - self.end();
        if step.norm() > TOLERANCE {
            self.segments.push(Segment::line(step));
        }
    }

    /// Removes the first segment, moving the start to its end.
    pub fn pop_front(&mut self) -> Option<Segment> {
        if self.segments.is_empty() {
            return None;
        }
        let first = self.segments.remove(0);
        self.start += first.displacement();
        Some(first)
    }

    /// Removes the last segment.
    pub fn pop_back(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    /// Appends another path's segments. Its start point is not consulted.
    pub fn extend(&mut self, other: &Self) {
        self.segments.extend_from_slice(&other.segments);
    }

    /// Returns the path traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end(),
            segments: self.segments.iter().rev().map(Segment::reversed).collect(),
            closed: self.closed,
        }
    }

    /// Closes the path, adding a straight closing segment if needed.
    pub fn close(&mut self) {
        let start = self.start;
        self.push_line_to(&start);
        self.closed = true;
    }

    /// Absolute end point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.segments
            .iter()
            .fold(self.start, |p, s| p + s.displacement())
    }

    /// Absolute start point of every segment, followed by the end point.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        let mut points = Vec::with_capacity(self.segments.len() + 1);
        let mut p = self.start;
        points.push(p);
        for s in &self.segments {
            p += s.displacement();
            points.push(p);
        }
        points
    }

    /// Absolute start point of segment `index`.
    #[must_use]
    pub fn segment_start(&self, index: usize) -> Point2 {
        self.segments[..index]
            .iter()
            .fold(self.start, |p, s| p + s.displacement())
    }

    /// Signed area enclosed by the path, curves included.
    ///
    /// Positive for counter-clockwise paths. An open path is treated as if
    /// closed by a straight chord back to its start.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let mut at = self.start;
        let mut sum = 0.0;
        for s in &self.segments {
            sum += match *s {
                Segment::Line { to } => cross_area(&at, &(at + to)),
                Segment::Cubic { .. } => s.to_bezier(&at).area_term(),
            };
            at += s.displacement();
        }
        sum + cross_area(&at, &self.start)
    }

    /// Reverses the path if needed so that it winds counter-clockwise
    /// (`true`) or clockwise (`false`).
    pub fn orient(&mut self, counter_clockwise: bool) {
        if (self.signed_area() > 0.0) != counter_clockwise {
            *self = self.reversed();
        }
    }

    /// Moves the whole path by `delta`.
    pub fn translate(&mut self, delta: &Vector2) {
        self.start += *delta;
    }
}

fn cross_area(a: &Point2, b: &Point2) -> f64 {
    0.5 * (a.x * b.y - b.x * a.y)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn l_shape() -> Path {
        Path::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 3.0),
        ])
    }

    #[test]
    fn end_is_running_sum() {
        let p = l_shape();
        assert_eq!(p.len(), 2);
        assert_eq!(p.end(), Point2::new(4.0, 3.0));
        assert_eq!(p.segment_start(1), Point2::new(4.0, 0.0));
    }

    #[test]
    fn reversed_swaps_ends() {
        let p = l_shape().reversed();
        assert_eq!(p.start, Point2::new(4.0, 3.0));
        assert_eq!(p.end(), Point2::new(0.0, 0.0));
        assert_eq!(
            p.points(),
            vec![
                Point2::new(4.0, 3.0),
                Point2::new(4.0, 0.0),
                Point2::new(0.0, 0.0)
            ]
        );
    }

    #[test]
    fn pop_front_moves_start() {
        let mut p = l_shape();
        let first = p.pop_front().unwrap();
        assert_abs_diff_eq!(first.displacement().x, 4.0);
        assert_eq!(p.start, Point2::new(4.0, 0.0));
        assert_eq!(p.end(), Point2::new(4.0, 3.0));
    }

    #[test]
    fn close_adds_closing_segment() {
        let mut p = l_shape();
        p.close();
        assert!(p.closed);
        assert_eq!(p.len(), 3);
        assert_abs_diff_eq!((p.end() - p.start).norm(), 0.0);
    }

    #[test]
    fn push_line_to_skips_zero_length() {
        let mut p = l_shape();
        p.push_line_to(&Point2::new(4.0, 3.0));
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn signed_area_of_ccw_square() {
        let mut p = Path::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ]);
        p.close();
        assert_abs_diff_eq!(p.signed_area(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.reversed().signed_area(), -4.0, epsilon = 1e-12);
    }

    /// A circle of radius 100 drawn counter-clockwise as two half-circle
    /// cubics, so the on-curve points alone enclose nothing.
    fn two_cubic_circle() -> Path {
        let k = 400.0 / 3.0;
        let mut p = Path::new(Point2::new(100.0, 0.0));
        p.push(Segment::cubic(
            Vector2::new(0.0, k),
            Vector2::new(-200.0, k),
            Vector2::new(-200.0, 0.0),
        ));
        p.push(Segment::cubic(
            Vector2::new(0.0, -k),
            Vector2::new(200.0, -k),
            Vector2::new(200.0, 0.0),
        ));
        p.closed = true;
        p
    }

    #[test]
    fn signed_area_follows_curves() {
        let p = two_cubic_circle();
        // Two half-circle cubics with 4/3 handles: 2 * (8/5) * r^2 = 3.2 r^2.
        assert_abs_diff_eq!(p.signed_area(), 32_000.0, epsilon = 1e-6);
        assert!(p.reversed().signed_area() < 0.0);
    }

    #[test]
    fn orient_reverses_only_when_needed() {
        let mut p = two_cubic_circle();
        p.orient(true);
        assert_eq!(p, two_cubic_circle());
        p.orient(false);
        assert!(p.signed_area() < 0.0);
        assert_eq!(p.start, Point2::new(100.0, 0.0));
    }
}
