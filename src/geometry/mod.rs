pub mod path;
pub mod segment;
pub mod shape;

pub use path::Path;
pub use segment::{Axis, Segment};
pub use shape::Shape;
