use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::math::Point2;

/// Role of a key-point within its stroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    /// An on-curve point the centerline passes through.
    #[default]
    Normal,
    /// An off-curve handle shaping the curve between two normal points.
    Control,
    /// Marks the whole stroke as hidden.
    Hidden,
}

/// One key-point of a stroke, in skeleton units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub kind: PointKind,
}

impl KeyPoint {
    /// Creates an on-curve key-point.
    #[must_use]
    pub fn normal(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            kind: PointKind::Normal,
        }
    }

    /// Creates an off-curve handle.
    #[must_use]
    pub fn control(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            kind: PointKind::Control,
        }
    }

    /// Position as a point.
    #[must_use]
    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// One centerline stroke as drawn by the calligrapher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<KeyPoint>,
}

impl Stroke {
    /// Creates a stroke from on-curve points only.
    #[must_use]
    pub fn polyline(points: &[(f64, f64)]) -> Self {
        Self {
            points: points.iter().map(|&(x, y)| KeyPoint::normal(x, y)).collect(),
        }
    }

    /// Returns `true` if any key-point is hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.points.iter().any(|p| p.kind == PointKind::Hidden)
    }
}

/// The per-glyph skeleton record: strokes made of key-points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    /// Uniform scale applied to every key-point.
    #[serde(default = "unit_scale")]
    pub scale: f64,
    pub strokes: Vec<Stroke>,
}

fn unit_scale() -> f64 {
    1.0
}

impl Skeleton {
    /// Creates a skeleton with unit scale.
    #[must_use]
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self {
            scale: 1.0,
            strokes,
        }
    }

    /// Parses a skeleton from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Json` if a required field is missing or mistyped.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| InputError::Json(e).into())
    }
}
