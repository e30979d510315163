mod cap;
mod rails;
mod stroke_style;

pub use cap::{extension_at, Extension};
pub use stroke_style::StrokeStyle;

use tracing::debug;

use crate::error::{GeometryError, OutlineError, Result};
use crate::geometry::{Path, Segment, Shape};
use crate::math::{with_length, Vector2};
use crate::operations::structure::{CoordinateIndex, StructuralView};

use rails::{normal_of, RailJoin, Rails};

/// Offsets merged centerlines into filled stroke outlines.
///
/// Open centerlines become one closed contour with end caps sized by the
/// structural view. Closed centerlines become two contours: the outer rail
/// and the inner rail. Every filled boundary winds counter-clockwise and
/// every hole clockwise, so overlapping strokes add up under nonzero fill.
#[derive(Debug)]
pub struct StrokeOutline<'a> {
    paths: &'a [Path],
    index: &'a CoordinateIndex,
    view: &'a StructuralView,
    style: StrokeStyle,
}

impl<'a> StrokeOutline<'a> {
    /// Creates a new stroke outline operation.
    #[must_use]
    pub fn new(
        paths: &'a [Path],
        index: &'a CoordinateIndex,
        view: &'a StructuralView,
        style: StrokeStyle,
    ) -> Self {
        Self {
            paths,
            index,
            view,
            style,
        }
    }

    /// Outlines every centerline into one shape.
    ///
    /// # Errors
    ///
    /// Returns `OutlineError::UnresolvableJoin` if a corner cannot be trimmed,
    /// or `OutlineError::UnresolvableClosure` if a closed rail cannot be
    /// closed.
    pub fn execute(&self) -> Result<Shape> {
        let mut shape = Shape::default();
        for path_idx in 0..self.paths.len() {
            shape.paths.extend(self.outline_path(path_idx)?);
        }
        Ok(shape)
    }

    /// Outlines one centerline: one contour if open, two if closed.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a segment without extent, and
    /// otherwise fails like [`StrokeOutline::execute`].
    pub fn outline_path(&self, path_idx: usize) -> Result<Vec<Path>> {
        let path = &self.paths[path_idx];
        if path.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(k) = path.segments.iter().position(Segment::is_degenerate) {
            return Err(GeometryError::Degenerate(format!(
                "segment {k} of path {path_idx} has no extent"
            ))
            .into());
        }
        if path.closed {
            self.outline_closed(path_idx, path)
        } else {
            self.outline_open(path_idx, path).map(|p| vec![p])
        }
    }

    fn outline_open(&self, path_idx: usize, path: &Path) -> Result<Path> {
        let radius = self.style.radius();
        let vertices = path.points();
        let first = &path.segments[0];
        let last = &path.segments[path.len() - 1];

        let start_normal = normal_of(&first.start_tangent(), radius)?;
        let mut rails = Rails::new(&path.start, &start_normal, radius);
        rails.push_offset(first)?;
        for k in 1..path.len() {
            let (prev, next) = (&path.segments[k - 1], &path.segments[k]);
            if rails.join(&vertices[k], prev, next)?.is_none() {
                return Err(OutlineError::UnresolvableJoin {
                    path: path_idx,
                    segment: k,
                }
                .into());
            }
        }

        let start = path.start;
        let end = path.end();
        let end_dir = unit(&last.end_tangent())?;
        let start_dir = -unit(&first.start_tangent())?;
        let end_normal = normal_of(&end_dir, radius)?;
        let end_ext = extension_at(self.view, self.index, &self.style, &end, &end_dir);
        let start_ext = extension_at(self.view, self.index, &self.style, &start, &start_dir);
        debug!(path = path_idx, ?start_ext, ?end_ext, "open stroke caps");

        let mut outline = rails.left;
        let reach = end_dir * end_ext.length(radius);
        outline.push_line_to(&(end + end_normal + reach));
        outline.push_line_to(&(end - end_normal + reach));
        outline.push_line_to(&(end - end_normal));
        outline.extend(&rails.right.reversed());
        let reach = start_dir * start_ext.length(radius);
        outline.push_line_to(&(start - start_normal + reach));
        outline.push_line_to(&(start + start_normal + reach));
        outline.close();
        outline.orient(true);
        Ok(outline)
    }

    fn outline_closed(&self, path_idx: usize, path: &Path) -> Result<Vec<Path>> {
        let radius = self.style.radius();
        let n = path.len();
        let vertices = path.points();
        let lead = &path.segments[n - 1];
        let lead_start = vertices[n - 1];

        // The last segment leads in so that the wrap-around corner at the
        // start is joined like any other.
        let lead_normal = normal_of(&lead.start_tangent(), radius)?;
        let lead_end_normal = normal_of(&lead.end_tangent(), radius)?;
        let mut rails = Rails::new(&lead_start, &lead_normal, radius);
        rails.push_offset(lead)?;

        let mut first_join = None;
        let mut last_join = None;
        for k in 0..n {
            let prev = &path.segments[(k + n - 1) % n];
            let next = &path.segments[k];
            let outcome = rails
                .join(&vertices[k], prev, next)?
                .ok_or(OutlineError::UnresolvableJoin {
                    path: path_idx,
                    segment: k,
                })?;
            if k > 0 && (outcome.left.reached_front() || outcome.right.reached_front()) {
                return Err(OutlineError::UnresolvableClosure { path: path_idx }.into());
            }
            if k == 0 {
                first_join = Some(outcome);
            }
            last_join = Some(outcome);
        }
        let (Some(first_join), Some(last_join)) = (first_join, last_join) else {
            return Err(OutlineError::UnresolvableClosure { path: path_idx }.into());
        };

        let mut left = rails.left;
        let mut right = rails.right;
        let left_lead = lead.offset(&lead_normal, &lead_end_normal);
        let right_lead = lead.offset(&-lead_normal, &-lead_end_normal);
        close_rail(&mut left, &left_lead, first_join.left, last_join.left)
            .ok_or(OutlineError::UnresolvableClosure { path: path_idx })?;
        close_rail(&mut right, &right_lead, first_join.right, last_join.right)
            .ok_or(OutlineError::UnresolvableClosure { path: path_idx })?;

        // The left side of a counter-clockwise centerline is its interior.
        let (mut outer, mut inner) = if path.signed_area() > 0.0 {
            (right, left)
        } else {
            (left, right)
        };
        outer.orient(true);
        inner.orient(false);
        Ok(vec![outer, inner])
    }
}

/// Replaces the lead-in at the front and the wrap-around copy at the back
/// of a rail with the single piece of the lead segment they share.
///
/// The front holds `lead[0, kept]`, the back `lead[incoming, 1]`; the
/// closing piece is `lead[incoming, kept]`.
fn close_rail(rail: &mut Path, lead: &Segment, first: RailJoin, last: RailJoin) -> Option<()> {
    let (from, to) = (last.incoming(), first.kept());
    if to <= from || rail.len() < 2 {
        return None;
    }
    rail.pop_front()?;
    rail.pop_back()?;
    rail.push(lead.subsegment(from, to));
    rail.closed = true;
    Some(())
}

fn unit(v: &Vector2) -> Result<Vector2> {
    with_length(v, 1.0).ok_or_else(|| GeometryError::ZeroVector.into())
}
