mod coordinate_index;

pub use coordinate_index::CoordinateIndex;

use crate::error::{OutlineError, Result};
use crate::geometry::{Axis, Path};

/// One segment's presence in a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub path: usize,
    pub segment: usize,
    pub axis: Axis,
    /// `true` for cells strictly inside a straight run, `false` at its ends.
    pub padding: bool,
}

/// Per-cell occupancy over the coordinate grid of one glyph.
///
/// Cells are addressed `(x_rank, y_rank)`. Built once, then read-only.
#[derive(Debug, Clone)]
pub struct StructuralView {
    width: usize,
    height: usize,
    cells: Vec<Vec<Occupancy>>,
}

impl StructuralView {
    /// Creates an empty view of `width × height` cells.
    #[must_use]
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Vec::new(); width * height],
        }
    }

    /// Builds the view from merged centerlines.
    ///
    /// Both ends of every segment are recorded; horizontal and vertical
    /// segments also pad every cell strictly between their ends.
    ///
    /// # Errors
    ///
    /// Returns `OutlineError::MissingIndex` if a centerline point is not in
    /// the coordinate index.
    pub fn build(paths: &[Path], index: &CoordinateIndex) -> Result<Self> {
        let mut view = Self::empty(index.width(), index.height());
        for (path_idx, path) in paths.iter().enumerate() {
            let points = path.points();
            let cells = points
                .iter()
                .map(|p| {
                    index.cell_of(p).ok_or(OutlineError::MissingIndex {
                        path: path_idx,
                        x: p.x,
                        y: p.y,
                    })
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;

            for (seg_idx, segment) in path.segments.iter().enumerate() {
                let axis = segment.axis();
                let (from, to) = (cells[seg_idx], cells[seg_idx + 1]);
                let record = Occupancy {
                    path: path_idx,
                    segment: seg_idx,
                    axis,
                    padding: false,
                };
                view.insert(from, record);
                view.insert(to, record);

                let padding = Occupancy {
                    padding: true,
                    ..record
                };
                match axis {
                    Axis::Horizontal => {
                        for x in between(from.0, to.0) {
                            view.insert((x, from.1), padding);
                        }
                    }
                    Axis::Vertical => {
                        for y in between(from.1, to.1) {
                            view.insert((from.0, y), padding);
                        }
                    }
                    Axis::Diagonal => {}
                }
            }
        }
        Ok(view)
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Occupancy records at a cell; empty outside the grid.
    #[must_use]
    pub fn at(&self, x: usize, y: usize) -> &[Occupancy] {
        if x >= self.width || y >= self.height {
            return &[];
        }
        &self.cells[y * self.width + x]
    }

    /// Adds a record at a cell. Cells outside the grid are ignored.
    pub fn insert(&mut self, cell: (usize, usize), record: Occupancy) {
        let (x, y) = cell;
        if x < self.width && y < self.height {
            self.cells[y * self.width + x].push(record);
        }
    }
}

/// Ranks strictly between `a` and `b`, in either order.
fn between(a: usize, b: usize) -> std::ops::Range<usize> {
    a.min(b) + 1..a.max(b)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn view_of(paths: &[Path]) -> (StructuralView, CoordinateIndex) {
        let points: Vec<Point2> = paths.iter().flat_map(Path::points).collect();
        let index = CoordinateIndex::from_points(&points);
        (StructuralView::build(paths, &index).unwrap(), index)
    }

    #[test]
    fn horizontal_run_pads_interior_cells() {
        // A vertical stroke at x = 2 puts an extra column inside the run.
        let paths = vec![
            Path::from_points(&[Point2::new(0.0, 0.0), Point2::new(4.0, 0.0)]),
            Path::from_points(&[Point2::new(2.0, 1.0), Point2::new(2.0, 3.0)]),
        ];
        let (view, index) = view_of(&paths);
        assert_eq!(view.width(), 3);
        let (x, y) = index.cell_of(&Point2::new(2.0, 0.0)).unwrap();
        let cell = view.at(x, y);
        assert_eq!(cell.len(), 1);
        assert!(cell[0].padding);
        assert_eq!(cell[0].axis, Axis::Horizontal);
        assert_eq!(cell[0].path, 0);

        let (x, y) = index.cell_of(&Point2::new(4.0, 0.0)).unwrap();
        assert!(!view.at(x, y)[0].padding);
    }

    #[test]
    fn diagonal_gets_no_padding() {
        let paths = vec![
            Path::from_points(&[Point2::new(0.0, 0.0), Point2::new(4.0, 4.0)]),
            Path::from_points(&[Point2::new(2.0, 2.0), Point2::new(2.0, 9.0)]),
        ];
        let (view, index) = view_of(&paths);
        let (x, y) = index.cell_of(&Point2::new(2.0, 2.0)).unwrap();
        // Only the vertical stroke's own end sits there.
        assert_eq!(view.at(x, y).len(), 1);
        assert_eq!(view.at(x, y)[0].path, 1);
    }

    #[test]
    fn shared_vertex_holds_both_segments() {
        let paths = vec![Path::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 3.0),
        ])];
        let (view, index) = view_of(&paths);
        let (x, y) = index.cell_of(&Point2::new(3.0, 0.0)).unwrap();
        let segs: Vec<usize> = view.at(x, y).iter().map(|o| o.segment).collect();
        assert_eq!(segs, vec![0, 1]);
    }

    #[test]
    fn unindexed_point_is_reported() {
        let paths = vec![Path::from_points(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)])];
        let index = CoordinateIndex::from_points(&[Point2::new(0.0, 0.0)]);
        assert!(StructuralView::build(&paths, &index).is_err());
    }

    #[test]
    fn outside_cells_read_empty() {
        let view = StructuralView::empty(2, 2);
        assert!(view.at(5, 0).is_empty());
    }
}
