mod disjoint_set;

pub use disjoint_set::DisjointSet;

use tracing::{debug, trace};

use crate::config::CompileConfig;
use crate::error::{InputError, Result};
use crate::geometry::{Axis, Path, Segment};
use crate::math::Point2;
use crate::operations::structure::CoordinateIndex;
use crate::skeleton::{PointKind, Skeleton, Stroke};

/// Merged centerlines of one glyph plus the index of every visited point.
#[derive(Debug, Clone)]
pub struct MergedSkeleton {
    pub paths: Vec<Path>,
    pub index: CoordinateIndex,
}

/// A scaled key-point kept by the merger.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchor {
    point: Point2,
    control: bool,
}

/// A stroke that survived filtering, before and during merging.
#[derive(Debug, Clone)]
struct Candidate {
    anchors: Vec<Anchor>,
}

impl Candidate {
    fn first(&self) -> Point2 {
        self.anchors[0].point
    }

    fn last(&self) -> Point2 {
        self.anchors[self.anchors.len() - 1].point
    }

    fn head_axis(&self) -> Axis {
        Axis::between(&self.anchors[0].point, &self.anchors[1].point)
    }

    fn tail_axis(&self) -> Axis {
        let n = self.anchors.len();
        Axis::between(&self.anchors[n - 2].point, &self.anchors[n - 1].point)
    }

    fn reverse(&mut self) {
        self.anchors.reverse();
    }
}

/// One stroke end waiting to be matched at a shared point.
#[derive(Debug, Clone, Copy)]
struct Registrant {
    axis: Axis,
    candidate: usize,
}

/// Merges the strokes of a skeleton into centerline paths.
///
/// Hidden strokes and strokes with fewer than two distinct on-curve points are
/// dropped. Open strokes sharing an endpoint are joined pairwise, preferring
/// the highest axis symbol at each point (vertical, then horizontal, then
/// diagonal).
///
/// # Errors
///
/// Returns `InputError::MalformedStroke` if a stroke starts or ends on a
/// control point or has more than two controls between on-curve points.
pub fn merge_strokes(skeleton: &Skeleton, config: &CompileConfig) -> Result<MergedSkeleton> {
    let scale = skeleton.scale * config.point_scale();
    let mut candidates = Vec::new();
    for (stroke_idx, stroke) in skeleton.strokes.iter().enumerate() {
        if stroke.is_hidden() {
            trace!(stroke = stroke_idx, "dropping hidden stroke");
            continue;
        }
        match candidate_from_stroke(stroke_idx, stroke, scale, config.merge_tolerance)? {
            Some(candidate) => candidates.push(candidate),
            None => trace!(stroke = stroke_idx, "dropping degenerate stroke"),
        }
    }

    let index = CoordinateIndex::from_points(
        candidates
            .iter()
            .flat_map(|c| c.anchors.iter())
            .filter(|a| !a.control)
            .map(|a| &a.point),
    );

    let buckets = endpoint_buckets(&candidates);
    let mut set = DisjointSet::new(candidates.len());
    for (point, mut registrants) in buckets {
        if registrants.len() < 2 {
            continue;
        }
        registrants.sort_by_key(|r| r.axis);
        while registrants.len() >= 2 {
            let (Some(b), Some(a)) = (registrants.pop(), registrants.pop()) else {
                break;
            };
            join_at(&mut candidates, &mut set, &point, a, b);
        }
    }

    let mut paths = Vec::new();
    for (i, candidate) in candidates.iter().enumerate() {
        if set.is_root(i) {
            paths.push(build_path(i, candidate)?);
        }
    }
    debug!(paths = paths.len(), strokes = skeleton.strokes.len(), "merged strokes");

    Ok(MergedSkeleton { paths, index })
}

/// Scales, snaps and deduplicates a stroke. `None` marks a degenerate stroke.
fn candidate_from_stroke(
    stroke_idx: usize,
    stroke: &Stroke,
    scale: f64,
    tolerance: Option<f64>,
) -> Result<Option<Candidate>> {
    let mut anchors: Vec<Anchor> = Vec::with_capacity(stroke.points.len());
    for kp in &stroke.points {
        let point = snap(Point2::new(kp.x * scale, kp.y * scale), tolerance);
        let control = kp.kind == PointKind::Control;
        match anchors.last_mut() {
            Some(prev) if prev.point == point => prev.control &= control,
            _ => anchors.push(Anchor { point, control }),
        }
    }

    if anchors.iter().filter(|a| !a.control).count() < 2 {
        return Ok(None);
    }
    if anchors.first().is_some_and(|a| a.control) || anchors.last().is_some_and(|a| a.control) {
        return Err(malformed(stroke_idx, "stroke must start and end on-curve"));
    }
    let mut run = 0;
    for a in &anchors {
        run = if a.control { run + 1 } else { 0 };
        if run > 2 {
            return Err(malformed(stroke_idx, "more than two controls in a row"));
        }
    }
    Ok(Some(Candidate { anchors }))
}

/// Groups the endpoints of open candidates by position, in first-seen order.
fn endpoint_buckets(candidates: &[Candidate]) -> Vec<(Point2, Vec<Registrant>)> {
    let mut buckets: Vec<(Point2, Vec<Registrant>)> = Vec::new();
    let mut register = |point: Point2, registrant: Registrant| {
        if let Some((_, list)) = buckets.iter_mut().find(|(p, _)| *p == point) {
            list.push(registrant);
        } else {
            buckets.push((point, vec![registrant]));
        }
    };
    for (i, c) in candidates.iter().enumerate() {
        if c.first() == c.last() {
            continue;
        }
        register(
            c.first(),
            Registrant {
                axis: c.head_axis(),
                candidate: i,
            },
        );
        register(
            c.last(),
            Registrant {
                axis: c.tail_axis(),
                candidate: i,
            },
        );
    }
    buckets
}

/// Appends one candidate onto the other so that `point` is visited once.
fn join_at(
    candidates: &mut [Candidate],
    set: &mut DisjointSet,
    point: &Point2,
    a: Registrant,
    b: Registrant,
) {
    let ra = set.find(a.candidate);
    let rb = set.find(b.candidate);
    if ra == rb {
        trace!(candidate = ra, "ends already merged");
        return;
    }
    let (earlier, later) = (ra.min(rb), ra.max(rb));

    if !orient(&mut candidates[earlier], point, true) || !orient(&mut candidates[later], point, false)
    {
        debug!(earlier, later, x = point.x, y = point.y, "shared point is no longer an end");
        return;
    }

    let tail = std::mem::take(&mut candidates[later].anchors);
    candidates[earlier].anchors.extend_from_slice(&tail[1..]);
    set.union_into(later, earlier);
    debug!(earlier, later, x = point.x, y = point.y, "merged strokes");
}

/// Reverses `c` if needed so that `point` is its last (`at_end`) or first
/// anchor. Returns `false` if `point` is at neither end.
fn orient(c: &mut Candidate, point: &Point2, at_end: bool) -> bool {
    let (keep, flip) = if at_end {
        (c.last(), c.first())
    } else {
        (c.first(), c.last())
    };
    if keep == *point {
        true
    } else if flip == *point {
        c.reverse();
        true
    } else {
        false
    }
}

/// Builds a centerline from anchors; closed if it returns to its first point.
fn build_path(stroke_idx: usize, candidate: &Candidate) -> Result<Path> {
    let anchors = &candidate.anchors;
    let mut path = Path::new(anchors[0].point);
    let mut from = anchors[0].point;
    let mut handles = Vec::with_capacity(2);
    for a in &anchors[1..] {
        if a.control {
            handles.push(a.point);
            continue;
        }
        let segment = Segment::between(&from, &handles, &a.point)
            .ok_or_else(|| malformed(stroke_idx, "more than two controls in a row"))?;
        path.push(segment);
        handles.clear();
        from = a.point;
    }
    path.closed = candidate.first() == candidate.last();
    Ok(path)
}

fn snap(p: Point2, tolerance: Option<f64>) -> Point2 {
    // Adding 0.0 folds -0.0 into 0.0 so equal positions compare equal.
    match tolerance {
        Some(eps) => Point2::new((p.x / eps).round() * eps + 0.0, (p.y / eps).round() * eps + 0.0),
        None => Point2::new(p.x + 0.0, p.y + 0.0),
    }
}

fn malformed(stroke: usize, reason: &str) -> crate::error::StrokeweldError {
    InputError::MalformedStroke {
        stroke,
        reason: reason.to_owned(),
    }
    .into()
}
