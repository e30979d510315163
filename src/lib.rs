pub mod config;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod math;
pub mod operations;
pub mod output;
pub mod skeleton;

pub use config::CompileConfig;
pub use error::{Result, StrokeweldError};
pub use glyph::{advance_width, compile_glyph, compile_glyph_json, GlyphOutline};
pub use output::{GlyphSink, MemorySink, SvgSink};
pub use skeleton::{KeyPoint, PointKind, Skeleton, Stroke};
