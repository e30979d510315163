use crate::math::{Point2, Vector2};

use super::path::Path;

/// An unordered set of closed paths forming one filled glyph component.
///
/// Winding between contours is left to the consumer's overlap resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub paths: Vec<Path>,
}

impl Shape {
    /// Creates a shape from its contours.
    #[must_use]
    pub fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    /// Moves every contour by `delta`.
    pub fn translate(&mut self, delta: &Vector2) {
        for path in &mut self.paths {
            path.translate(delta);
        }
    }

    /// Bounding box of the on-curve points: `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point2, Point2)> {
        let mut points = self.paths.iter().flat_map(Path::points);
        let first = points.next()?;
        Some(points.fold((first, first), |(mut min, mut max), p| {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            (min, max)
        }))
    }
}
