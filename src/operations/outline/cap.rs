use tracing::trace;

use crate::math::{Point2, Vector2, TOLERANCE};
use crate::operations::structure::{CoordinateIndex, StructuralView};

use super::stroke_style::StrokeStyle;

/// How far an open stroke end is pushed past its centerline end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    /// A full radius: nothing nearby in that direction.
    All,
    /// Half a radius: a neighbour lies between `W` and `1.5 W` away.
    Half,
    /// No extension: the end sits inside another stroke or right against it.
    Non,
}

impl Extension {
    /// Extension length for a stroke of the given radius.
    #[must_use]
    pub fn length(self, radius: f64) -> f64 {
        match self {
            Self::All => radius,
            Self::Half => radius * 0.5,
            Self::Non => 0.0,
        }
    }
}

/// Grid axis an end tangent runs along.
#[derive(Debug, Clone, Copy)]
enum Heading {
    East,
    West,
    North,
    South,
}

impl Heading {
    fn of(outward: &Vector2) -> Option<Self> {
        let len = outward.norm();
        if len < TOLERANCE {
            return None;
        }
        if outward.y.abs() <= TOLERANCE * len {
            Some(if outward.x > 0.0 { Self::East } else { Self::West })
        } else if outward.x.abs() <= TOLERANCE * len {
            Some(if outward.y > 0.0 { Self::North } else { Self::South })
        } else {
            None
        }
    }
}

/// Decides the extension of an open end at `end` leaving along `outward`.
///
/// Only horizontal and vertical ends are considered. The walk moves one
/// grid rank at a time away from the end. Any horizontal or vertical
/// occupant closer than `W` blocks the end outright; diagonal ones that
/// close are passed over. The first occupant from `W` to `1.5 W` away, or a
/// diagonal one passed on the way, halves the extension.
#[must_use]
pub fn extension_at(
    view: &StructuralView,
    index: &CoordinateIndex,
    style: &StrokeStyle,
    end: &Point2,
    outward: &Vector2,
) -> Extension {
    let Some(heading) = Heading::of(outward) else {
        return Extension::Non;
    };
    let Some((cx, cy)) = index.cell_of(end) else {
        return Extension::Non;
    };
    if view.at(cx, cy).iter().any(|o| o.padding) {
        trace!(x = end.x, y = end.y, "end lies inside a straight run");
        return Extension::Non;
    }

    let width = style.width();
    let limit = style.cap_search_distance();
    let mut slanted_nearby = false;
    let open = |slanted: bool| {
        if slanted {
            Extension::Half
        } else {
            Extension::All
        }
    };
    let mut cell = (cx, cy);
    loop {
        let next = match heading {
            Heading::East => (cell.0 + 1 < view.width()).then_some((cell.0 + 1, cell.1)),
            Heading::West => cell.0.checked_sub(1).map(|x| (x, cell.1)),
            Heading::North => (cell.1 + 1 < view.height()).then_some((cell.0, cell.1 + 1)),
            Heading::South => cell.1.checked_sub(1).map(|y| (cell.0, y)),
        };
        let Some(next) = next else {
            return open(slanted_nearby);
        };
        cell = next;

        let distance = match heading {
            Heading::East | Heading::West => index.x_at(cell.0).map(|x| (x - end.x).abs()),
            Heading::North | Heading::South => index.y_at(cell.1).map(|y| (y - end.y).abs()),
        };
        let Some(distance) = distance else {
            return open(slanted_nearby);
        };
        if distance > limit {
            return open(slanted_nearby);
        }

        let occupants = view.at(cell.0, cell.1);
        if occupants.is_empty() {
            continue;
        }
        trace!(distance, occupants = occupants.len(), "neighbour ahead of end");
        if distance >= width {
            return Extension::Half;
        }
        if occupants.iter().any(|o| o.axis.is_straight()) {
            return Extension::Non;
        }
        slanted_nearby = true;
    }
}
