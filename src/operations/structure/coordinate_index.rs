use std::cmp::Ordering;

use crate::math::Point2;

/// Sorted distinct coordinates per axis, mapping positions to grid ranks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateIndex {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl CoordinateIndex {
    /// Builds the index from every point visited by the centerlines.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Self {
        let (mut xs, mut ys): (Vec<f64>, Vec<f64>) = points.into_iter().map(|p| (p.x, p.y)).unzip();
        sort_distinct(&mut xs);
        sort_distinct(&mut ys);
        Self { xs, ys }
    }

    /// Number of distinct horizontal positions.
    #[must_use]
    pub fn width(&self) -> usize {
        self.xs.len()
    }

    /// Number of distinct vertical positions.
    #[must_use]
    pub fn height(&self) -> usize {
        self.ys.len()
    }

    /// Rank of `x` among the horizontal positions, if present.
    #[must_use]
    pub fn x_rank(&self, x: f64) -> Option<usize> {
        self.xs.binary_search_by(|v| compare(*v, x)).ok()
    }

    /// Rank of `y` among the vertical positions, if present.
    #[must_use]
    pub fn y_rank(&self, y: f64) -> Option<usize> {
        self.ys.binary_search_by(|v| compare(*v, y)).ok()
    }

    /// Grid cell `(x_rank, y_rank)` of a point, if both coordinates are indexed.
    #[must_use]
    pub fn cell_of(&self, p: &Point2) -> Option<(usize, usize)> {
        Some((self.x_rank(p.x)?, self.y_rank(p.y)?))
    }

    /// Horizontal position at rank `i`.
    #[must_use]
    pub fn x_at(&self, i: usize) -> Option<f64> {
        self.xs.get(i).copied()
    }

    /// Vertical position at rank `i`.
    #[must_use]
    pub fn y_at(&self, i: usize) -> Option<f64> {
        self.ys.get(i).copied()
    }
}

fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[allow(clippy::float_cmp)]
fn sort_distinct(values: &mut Vec<f64>) {
    values.sort_by(|a, b| compare(*a, *b));
    values.dedup_by(|a, b| a == b);
}
