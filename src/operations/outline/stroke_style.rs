use crate::error::{InputError, Result};

/// Ratio of the stroke width beyond which a neighbour no longer limits an
/// end cap.
const CAP_SEARCH_RATIO: f64 = 1.5;

/// Width of the calligraphic pen used to offset centerlines.
#[derive(Debug, Clone, Copy)]
pub struct StrokeStyle {
    width: f64,
}

impl StrokeStyle {
    /// Creates a new stroke style.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is not positive.
    pub fn new(width: f64) -> Result<Self> {
        if width <= 0.0 || !width.is_finite() {
            return Err(InputError::InvalidConfig(
                "stroke width must be positive".to_owned(),
            )
            .into());
        }
        Ok(Self { width })
    }

    /// Returns the stroke width `W`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the offset radius `r = W / 2`.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.width * 0.5
    }

    /// Distance past which end-cap evaluation stops looking for neighbours.
    #[must_use]
    pub fn cap_search_distance(&self) -> f64 {
        self.width * CAP_SEARCH_RATIO
    }
}
