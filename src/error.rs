use thiserror::Error;

/// Top-level error type for the stroke outline compiler.
#[derive(Debug, Error)]
pub enum StrokeweldError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Outline(#[from] OutlineError),

    #[error(transparent)]
    Output(#[from] OutputError),

    /// A per-glyph failure, tagged with the glyph it came from.
    #[error("glyph {glyph}: {source}")]
    Glyph {
        glyph: String,
        source: Box<StrokeweldError>,
    },
}

impl StrokeweldError {
    /// Wraps this error with the identifier of the glyph being compiled.
    #[must_use]
    pub fn in_glyph(self, glyph: impl Into<String>) -> Self {
        Self::Glyph {
            glyph: glyph.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through glyph tags.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Glyph { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Errors in the skeleton record or the compile configuration.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("malformed skeleton: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stroke {stroke} is malformed: {reason}")]
    MalformedStroke { stroke: usize, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors related to geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised while offsetting centerlines into outlines.
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("no inner-rail intersection for the join at path {path}, segment {segment}")]
    UnresolvableJoin { path: usize, segment: usize },

    #[error("closed path {path} cannot be closed after offsetting")]
    UnresolvableClosure { path: usize },

    #[error("point ({x}, {y}) of path {path} is missing from the coordinate index")]
    MissingIndex { path: usize, x: f64, y: f64 },
}

/// Errors raised by output sinks.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write glyph drawing: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`StrokeweldError`].
pub type Result<T> = std::result::Result<T, StrokeweldError>;
