pub mod error;
pub mod geometry;
pub mod math;
pub mod merge;
pub mod operations;
pub mod progress;
pub mod texture;
pub mod tile;
pub mod topology;
pub mod workplane;

pub use error::{ReliefError, Result};
