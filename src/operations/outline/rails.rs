use std::f64::consts::FRAC_PI_2;

use tracing::trace;

use crate::error::{GeometryError, Result};
use crate::geometry::{Path, Segment};
use crate::math::intersect_2d::line_line_intersect_2d;
use crate::math::{perp, turn_angle, with_length, Point2, Vector2, ANGLE_TOLERANCE};

/// Offset vector of length `radius` to the left of `tangent`.
pub(super) fn normal_of(tangent: &Vector2, radius: f64) -> Result<Vector2> {
    with_length(&perp(tangent), radius).ok_or_else(|| GeometryError::ZeroVector.into())
}

/// Which rail a join treated as the convex (outer) side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum RailJoin {
    /// No turn; the incoming segment was appended as is.
    Straight,
    /// Mitred or bevelled; the incoming segment was appended whole.
    Outer,
    /// Trimmed: the previous tail was kept up to `kept`, the incoming
    /// segment from `incoming` on.
    Inner {
        kept: f64,
        incoming: f64,
        reached_front: bool,
    },
}

impl RailJoin {
    /// Parameter the rail's previous tail segment was cut at.
    pub(super) fn kept(self) -> f64 {
        match self {
            Self::Inner { kept, .. } => kept,
            Self::Straight | Self::Outer => 1.0,
        }
    }

    /// Parameter the incoming segment starts from on the rail.
    pub(super) fn incoming(self) -> f64 {
        match self {
            Self::Inner { incoming, .. } => incoming,
            Self::Straight | Self::Outer => 0.0,
        }
    }

    /// `true` if trimming popped every segment the rail had.
    pub(super) fn reached_front(self) -> bool {
        matches!(self, Self::Inner { reached_front: true, .. })
    }
}

/// Outcome of one corner join on both rails.
#[derive(Debug, Clone, Copy)]
pub(super) struct JoinOutcome {
    pub left: RailJoin,
    pub right: RailJoin,
}

/// The two offset boundaries built while walking a centerline.
///
/// The left rail lies on the `+normal` side, the right rail on `-normal`.
#[derive(Debug, Clone)]
pub(super) struct Rails {
    pub left: Path,
    pub right: Path,
    radius: f64,
}

impl Rails {
    /// Starts both rails beside `start`, offset by `normal`.
    pub(super) fn new(start: &Point2, normal: &Vector2, radius: f64) -> Self {
        Self {
            left: Path::new(start + normal),
            right: Path::new(start - normal),
            radius,
        }
    }

    /// Appends `segment` offset to both sides.
    pub(super) fn push_offset(&mut self, segment: &Segment) -> Result<()> {
        let ns = normal_of(&segment.start_tangent(), self.radius)?;
        let ne = normal_of(&segment.end_tangent(), self.radius)?;
        self.left.push(segment.offset(&ns, &ne));
        self.right.push(segment.offset(&-ns, &-ne));
        Ok(())
    }

    /// Joins the rails at `vertex`, where `prev` ends and `next` begins.
    ///
    /// Returns `None` if the inner rail has no intersection with the
    /// incoming segment.
    pub(super) fn join(
        &mut self,
        vertex: &Point2,
        prev: &Segment,
        next: &Segment,
    ) -> Result<Option<JoinOutcome>> {
        let prev_dir = prev.end_tangent();
        let next_dir = next.start_tangent();
        let prev_normal = normal_of(&prev_dir, self.radius)?;
        let ns = normal_of(&next_dir, self.radius)?;
        let ne = normal_of(&next.end_tangent(), self.radius)?;
        let turn = turn_angle(&prev_normal, &ns);

        if turn.abs() < ANGLE_TOLERANCE {
            self.left.push(next.offset(&ns, &ne));
            self.right.push(next.offset(&-ns, &-ne));
            return Ok(Some(JoinOutcome {
                left: RailJoin::Straight,
                right: RailJoin::Straight,
            }));
        }

        // A left turn folds the left rail onto itself; a right turn the right.
        let sign = if turn > 0.0 { -1.0 } else { 1.0 };
        let outer_corner = Corner {
            vertex: *vertex,
            prev_offset: prev_normal * sign,
            prev_dir,
            next_offset: ns * sign,
            next_dir,
            turn: turn.abs(),
        };
        let outer_incoming = next.offset(&(ns * sign), &(ne * sign));
        let inner_start = vertex - ns * sign;
        let inner_incoming = next.offset(&(ns * -sign), &(ne * -sign));

        let (outer, inner) = if turn > 0.0 {
            (&mut self.right, &mut self.left)
        } else {
            (&mut self.left, &mut self.right)
        };
        join_outer(outer, &outer_corner, outer_incoming);
        let Some(trim) = trim_inner(inner, &inner_start, &inner_incoming) else {
            return Ok(None);
        };

        Ok(Some(if turn > 0.0 {
            JoinOutcome {
                left: trim,
                right: RailJoin::Outer,
            }
        } else {
            JoinOutcome {
                left: RailJoin::Outer,
                right: trim,
            }
        }))
    }
}

/// Geometry of the convex side of a corner.
struct Corner {
    vertex: Point2,
    prev_offset: Vector2,
    prev_dir: Vector2,
    next_offset: Vector2,
    next_dir: Vector2,
    turn: f64,
}

/// Routes the outer rail around a corner.
///
/// Turns up to 90° get a mitre through the intersection of the two offset
/// tangents; sharper turns are bevelled straight to the next offset start.
fn join_outer(rail: &mut Path, corner: &Corner, incoming: Segment) {
    let from = corner.vertex + corner.prev_offset;
    let to = corner.vertex + corner.next_offset;
    if corner.turn <= FRAC_PI_2 + ANGLE_TOLERANCE {
        if let Some((t, _)) = line_line_intersect_2d(&from, &corner.prev_dir, &to, &corner.next_dir) {
            rail.push_line_to(&(from + corner.prev_dir * t));
            trace!(turn = corner.turn, "mitre join");
        }
    } else {
        trace!(turn = corner.turn, "bevel join");
    }
    rail.push_line_to(&to);
    rail.push(incoming);
}

/// Cuts the inner rail back to where the incoming segment crosses it.
///
/// Pops tail segments until one intersects `incoming` (started at `start`),
/// keeps the popped segment up to the crossing and appends the rest of
/// `incoming`. Returns `None` if no popped segment crosses.
fn trim_inner(rail: &mut Path, start: &Point2, incoming: &Segment) -> Option<RailJoin> {
    while let Some(tail) = rail.pop_back() {
        let tail_start = rail.end();
        let hits = tail.intersect(&tail_start, incoming, start);
        let best = hits
            .into_iter()
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        if let Some((t, u)) = best {
            let (keep, _) = tail.split(t);
            let (_, rest) = incoming.split(u);
            let reached_front = rail.is_empty();
            rail.push(keep);
            rail.push(rest);
            return Some(RailJoin::Inner {
                kept: t,
                incoming: u,
                reached_front,
            });
        }
    }
    None
}
