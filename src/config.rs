use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::math::Vector2;
use crate::operations::outline::StrokeStyle;

/// Settings shared by every glyph of one compile run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Em size in font units.
    pub design_size: f64,
    /// Full stroke width `W` in font units.
    pub stroke_width: f64,
    /// Fraction of the em the skeleton is scaled into, in `(0, 1]`.
    pub width_ratio: f64,
    /// Snap grid for key-points before merging. `None` matches endpoints
    /// exactly.
    pub merge_tolerance: Option<f64>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            design_size: 1024.0,
            stroke_width: 64.0,
            width_ratio: 0.9,
            merge_tolerance: None,
        }
    }
}

impl CompileConfig {
    /// Checks every field for a usable value.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.design_size <= 0.0 || !self.design_size.is_finite() {
            return Err(invalid("design_size must be positive"));
        }
        if self.width_ratio <= 0.0 || self.width_ratio > 1.0 {
            return Err(invalid("width_ratio must be in (0, 1]"));
        }
        if let Some(tol) = self.merge_tolerance {
            if tol <= 0.0 || !tol.is_finite() {
                return Err(invalid("merge_tolerance must be positive"));
            }
        }
        self.stroke_style().map(|_| ())
    }

    /// Stroke style built from `stroke_width`.
    ///
    /// # Errors
    ///
    /// Returns an error if the width is not positive.
    pub fn stroke_style(&self) -> Result<StrokeStyle> {
        StrokeStyle::new(self.stroke_width)
    }

    /// Factor applied to raw skeleton coordinates, before the glyph's own
    /// scale.
    #[must_use]
    pub fn point_scale(&self) -> f64 {
        self.design_size * self.width_ratio
    }

    /// Offset that centres the scaled skeleton in the em square.
    #[must_use]
    pub fn centering_offset(&self) -> Vector2 {
        let margin = self.design_size * (1.0 - self.width_ratio) * 0.5;
        Vector2::new(margin, margin)
    }
}

fn invalid(reason: &str) -> crate::error::StrokeweldError {
    InputError::InvalidConfig(reason.to_owned()).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_is_valid() {
        CompileConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: CompileConfig = serde_json::from_str(r#"{ "stroke_width": 40.0 }"#).unwrap();
        assert_abs_diff_eq!(cfg.stroke_width, 40.0);
        assert_abs_diff_eq!(cfg.design_size, 1024.0);
        assert!(cfg.merge_tolerance.is_none());
    }

    #[test]
    fn rejects_bad_ratio() {
        let cfg = CompileConfig {
            width_ratio: 1.5,
            ..CompileConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_stroke() {
        let cfg = CompileConfig {
            stroke_width: 0.0,
            ..CompileConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn centering_splits_margin() {
        let cfg = CompileConfig {
            design_size: 1000.0,
            width_ratio: 0.8,
            ..CompileConfig::default()
        };
        let off = cfg.centering_offset();
        assert_abs_diff_eq!(off.x, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(off.y, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cfg.point_scale(), 800.0, epsilon = 1e-9);
    }
}
