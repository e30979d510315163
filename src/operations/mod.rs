pub mod merge;
pub mod outline;
pub mod structure;

pub use merge::{merge_strokes, MergedSkeleton};
pub use outline::{StrokeOutline, StrokeStyle};
pub use structure::{CoordinateIndex, StructuralView};
