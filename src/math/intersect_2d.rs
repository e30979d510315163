use super::bezier::CubicBezier;
use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Maximum recursion depth for bisection.
const MAX_DEPTH: u32 = 40;

/// Convergence size for bisected sub-curves.
const INTERSECT_TOL: f64 = 1e-9;

/// Upper bound on visited sub-curve pairs, guarding collinear overlaps.
const MAX_VISITS: usize = 1 << 16;

/// Finds all intersections of two cubics by bounding-box bisection.
///
/// Returns `(t, u)` parameter pairs sorted by `t`.
#[must_use]
pub fn cubic_cubic_intersect_2d(a: &CubicBezier, b: &CubicBezier) -> Vec<(f64, f64)> {
    let mut search = Bisection {
        hits: Vec::new(),
        visits: 0,
    };
    search.run(a, b, (0.0, 1.0), (0.0, 1.0), 0);
    search
        .hits
        .sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));
    search.hits
}

struct Bisection {
    hits: Vec<(f64, f64)>,
    visits: usize,
}

impl Bisection {
    fn run(
        &mut self,
        a: &CubicBezier,
        b: &CubicBezier,
        ta: (f64, f64),
        tb: (f64, f64),
        depth: u32,
    ) {
        self.visits += 1;
        if self.visits > MAX_VISITS || !bbox_overlap(&a.bbox(), &b.bbox()) {
            return;
        }

        if (a.extent() < INTERSECT_TOL && b.extent() < INTERSECT_TOL) || depth >= MAX_DEPTH {
            let t = f64::midpoint(ta.0, ta.1);
            let u = f64::midpoint(tb.0, tb.1);
            let seen = self
                .hits
                .iter()
                .any(|h| (h.0 - t).abs() < 1e-7 && (h.1 - u).abs() < 1e-7);
            if !seen {
                self.hits.push((t, u));
            }
            return;
        }

        let ta_mid = f64::midpoint(ta.0, ta.1);
        let tb_mid = f64::midpoint(tb.0, tb.1);
        let (a_lo, a_hi) = a.split(0.5);
        let (b_lo, b_hi) = b.split(0.5);
        let d = depth + 1;

        self.run(&a_lo, &b_lo, (ta.0, ta_mid), (tb.0, tb_mid), d);
        self.run(&a_lo, &b_hi, (ta.0, ta_mid), (tb_mid, tb.1), d);
        self.run(&a_hi, &b_lo, (ta_mid, ta.1), (tb.0, tb_mid), d);
        self.run(&a_hi, &b_hi, (ta_mid, ta.1), (tb_mid, tb.1), d);
    }
}

/// Checks if two bounding boxes overlap, with a small slack for flat boxes.
fn bbox_overlap(a: &(Point2, Point2), b: &(Point2, Point2)) -> bool {
    let eps = INTERSECT_TOL;
    a.0.x <= b.1.x + eps && a.1.x + eps >= b.0.x && a.0.y <= b.1.y + eps && a.1.y + eps >= b.0.y
}
